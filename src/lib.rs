//! Flashlight - a 2D light cone occluded by a polygon obstacle
//!
//! Core modules:
//! - `geom`: Pure geometry (vector math, polygons, segment intersection, ray casting)
//! - `scene`: Per-frame light controller with explicit state
//! - `renderer`: CPU-side mesh generation for a host renderer
//! - `settings`: Static configuration (JSON)

pub mod geom;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use settings::{QualityPreset, Settings, SettingsError};

/// Scene configuration constants
pub mod consts {
    use std::f32::consts::TAU;

    /// Cone reach and forward ray length
    pub const CONE_RADIUS: f32 = 200.0;
    /// Full angular width of the drawn light cone
    pub const CONE_APERTURE: f32 = TAU / 8.0;
    /// Rays further than this from the pointer direction are dropped (22.5°)
    pub const RAY_HALF_APERTURE: f32 = TAU / 16.0;

    /// Light movement speed in units per second (1/5 unit per ms)
    pub const LIGHT_SPEED: f32 = 200.0;
    /// Largest frame delta accepted by the frame clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Starting light position
    pub const INITIAL_LIGHT: [f32; 2] = [100.0, 100.0];
    /// Pointer position assumed before the first pointer event
    pub const INITIAL_POINTER: [f32; 2] = [500.0, 500.0];

    /// Gray level of the unlit light map (0-255)
    pub const DEFAULT_BRIGHTNESS: u8 = 64;
    /// Radius of the marker drawn where a ray is occluded
    pub const HIT_MARKER_RADIUS: f32 = 4.0;
    /// Where the host draws the background image
    pub const BACKGROUND_OFFSET: [f32; 2] = [-120.0, 0.0];
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    if !angle.is_finite() {
        return angle;
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI / 2.0) - (-PI / 2.0)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - (PI / 2.0)).abs() < 1e-5);
        assert!((normalize_angle(0.25) - 0.25).abs() < 1e-6);
        assert!(normalize_angle(f32::NAN).is_nan());
    }
}
