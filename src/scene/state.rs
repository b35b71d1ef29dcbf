//! Scene state and per-frame input
//!
//! The only mutable state of a running scene is the light position and the
//! frame counters. Everything else is fixed when the scene is built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom::{Point, Segment};
use crate::settings::{Settings, SettingsError};

/// Directional keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    /// A
    pub left: bool,
    /// D
    pub right: bool,
    /// W
    pub up: bool,
    /// S
    pub down: bool,
}

impl HeldKeys {
    /// Build from keyboard codes (`KeyW`, `KeyA`, `KeyS`, `KeyD`); others are ignored
    pub fn from_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut keys = Self::default();
        for code in codes {
            match code {
                "KeyA" => keys.left = true,
                "KeyD" => keys.right = true,
                "KeyW" => keys.up = true,
                "KeyS" => keys.down = true,
                _ => {}
            }
        }
        keys
    }

    /// Unit steps per axis in screen space (y grows downward)
    ///
    /// Opposite keys cancel out.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Input collected for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Pointer position in canvas coordinates
    pub pointer: Point,
    /// Directional keys held during the frame
    pub keys: HeldKeys,
    /// Seconds since the previous frame
    pub dt: f32,
}

impl FrameInput {
    pub fn new(pointer: Point, keys: HeldKeys, dt: f32) -> Self {
        Self { pointer, keys, dt }
    }
}

/// The movable light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    pub position: Point,
}

impl LightSource {
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    /// Move along the held keys by `speed * dt` per axis
    pub fn step(&mut self, keys: HeldKeys, speed: f32, dt: f32) {
        self.position += keys.direction() * speed * dt;
    }
}

/// A running flashlight scene
#[derive(Debug, Clone)]
pub struct Scene {
    settings: Settings,
    pub light: LightSource,
    /// Last pointer position seen
    pub pointer: Point,
    /// Frames processed so far
    pub frame: u64,
    /// Seconds of frame time processed so far
    pub elapsed: f32,
    /// Resolved obstacle vertices, built once
    vertices: Vec<Point>,
    /// Obstacle edges tested by the ray caster, built once
    edges: Vec<Segment>,
}

impl Scene {
    /// Build a scene, resolving the obstacle once
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let vertices = settings.obstacle.resolve();
        let edges: Vec<Segment> = settings.obstacle.edges().collect();
        log::info!(
            "Scene ready: {} obstacle vertices, {} edges, light at ({}, {})",
            vertices.len(),
            edges.len(),
            settings.initial_light.x,
            settings.initial_light.y
        );

        Ok(Self {
            light: LightSource::new(settings.initial_light),
            pointer: settings.initial_pointer,
            frame: 0,
            elapsed: 0.0,
            vertices,
            edges,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Brightness is the one setting the host may change while running
    pub fn set_brightness(&mut self, brightness: u8) {
        if brightness != self.settings.brightness {
            log::debug!("Brightness {} -> {}", self.settings.brightness, brightness);
            self.settings.brightness = brightness;
        }
    }

    /// Absolute obstacle vertices
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Obstacle edges in ray casting order
    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }
}
