//! Scene settings
//!
//! Everything here is fixed for the lifetime of a scene. Settings can be
//! loaded from a JSON file; missing fields fall back to the defaults.

use std::f32::consts::TAU;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::geom::{GeomError, Point, Polygon};

/// Mesh quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Triangles used for a full circle (hit markers, light lens)
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 32,
        }
    }

    /// Triangles used for the light cone fan
    pub fn cone_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 24,
            QualityPreset::High => 64,
        }
    }

    /// Rings in the cone's radial gradient
    pub fn gradient_rings(&self) -> u32 {
        match self {
            QualityPreset::Low => 1,
            QualityPreset::Medium => 4,
            QualityPreset::High => 8,
        }
    }
}

/// Errors from loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid obstacle: {0}")]
    Obstacle(#[from] GeomError),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mesh quality preset
    pub quality: QualityPreset,

    // === Light ===
    /// Light movement speed (units per second)
    pub light_speed: f32,
    /// Cone reach, also the length of the forward ray
    pub cone_radius: f32,
    /// Full angular width of the drawn cone (radians)
    pub cone_aperture: f32,
    /// Maximum angle between a ray and the pointer direction (radians)
    pub ray_half_aperture: f32,
    /// Gray level of the unlit area (0-255)
    pub brightness: u8,
    /// Light position at startup
    pub initial_light: Point,
    /// Pointer position before any pointer input arrives
    pub initial_pointer: Point,

    // === Occlusion ===
    /// Obstacle polygon
    pub obstacle: Polygon,
    /// Slack for segment intersection (0 = exact)
    pub intersection_tolerance: f32,
    /// Wrap ray angles into [-π, π) before the aperture check
    pub wrap_ray_angles: bool,

    // === Overlay ===
    /// Hit marker radius
    pub hit_marker_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            light_speed: LIGHT_SPEED,
            cone_radius: CONE_RADIUS,
            cone_aperture: CONE_APERTURE,
            ray_half_aperture: RAY_HALF_APERTURE,
            brightness: DEFAULT_BRIGHTNESS,
            initial_light: Vec2::from(INITIAL_LIGHT),
            initial_pointer: Vec2::from(INITIAL_POINTER),

            obstacle: Polygon::chair(),
            intersection_tolerance: 0.0,
            wrap_ray_angles: false,

            hit_marker_radius: HIT_MARKER_RADIUS,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from a file if given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Check ranges that serde cannot express
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> SettingsError {
            SettingsError::Invalid { field, reason }
        }

        if !(self.light_speed.is_finite() && self.light_speed >= 0.0) {
            return Err(invalid("light_speed", "must be finite and non-negative"));
        }
        if !(self.cone_radius.is_finite() && self.cone_radius > 0.0) {
            return Err(invalid("cone_radius", "must be finite and positive"));
        }
        if !(self.cone_aperture > 0.0 && self.cone_aperture <= TAU) {
            return Err(invalid("cone_aperture", "must be in (0, τ]"));
        }
        if !(self.ray_half_aperture >= 0.0 && self.ray_half_aperture <= TAU) {
            return Err(invalid("ray_half_aperture", "must be in [0, τ]"));
        }
        if !(self.initial_light.is_finite() && self.initial_pointer.is_finite()) {
            return Err(invalid("initial_light", "positions must be finite"));
        }
        if !(self.intersection_tolerance.is_finite() && self.intersection_tolerance >= 0.0) {
            return Err(invalid("intersection_tolerance", "must be finite and non-negative"));
        }
        if !(self.hit_marker_radius.is_finite() && self.hit_marker_radius >= 0.0) {
            return Err(invalid("hit_marker_radius", "must be finite and non-negative"));
        }
        self.obstacle.validate()?;
        Ok(())
    }

    /// Gray level of the unlit area as a 0-1 color channel
    pub fn brightness_level(&self) -> f32 {
        self.brightness as f32 / 255.0
    }
}
