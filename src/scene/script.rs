//! Scripted input for headless runs
//!
//! Stands in for a live pointer and keyboard: the pointer drifts around the
//! canvas and directional keys are held for random stretches. Seeded, so the
//! same seed always produces the same frames.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{FrameInput, HeldKeys};
use crate::geom::Point;

/// Fastest the scripted pointer moves (units per second)
const MAX_POINTER_SPEED: f32 = 400.0;
/// Random acceleration applied to the pointer each frame (units per second²)
const POINTER_JITTER: f32 = 2400.0;

/// Deterministic pointer and key generator
#[derive(Debug, Clone)]
pub struct InputScript {
    rng: Pcg32,
    pointer: Point,
    velocity: Vec2,
    keys: HeldKeys,
    /// Frames left before the held keys change
    hold_frames: u32,
    /// Canvas size; the pointer stays inside [0, bounds]
    bounds: Vec2,
    /// Fixed frame delta (seconds)
    dt: f32,
}

impl InputScript {
    pub fn new(seed: u64, start: Point, bounds: Vec2, dt: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            pointer: start.clamp(Vec2::ZERO, bounds),
            velocity: Vec2::ZERO,
            keys: HeldKeys::default(),
            hold_frames: 0,
            bounds,
            dt,
        }
    }

    /// Input for the next frame
    pub fn next_input(&mut self) -> FrameInput {
        self.step_pointer();
        self.step_keys();
        FrameInput::new(self.pointer, self.keys, self.dt)
    }

    fn step_pointer(&mut self) {
        let jitter = Vec2::new(
            self.rng.random_range(-1.0..=1.0),
            self.rng.random_range(-1.0..=1.0),
        ) * POINTER_JITTER
            * self.dt;
        self.velocity = (self.velocity + jitter).clamp_length_max(MAX_POINTER_SPEED);

        let mut next = self.pointer + self.velocity * self.dt;

        // Bounce off the canvas edges
        if next.x < 0.0 || next.x > self.bounds.x {
            self.velocity.x = -self.velocity.x;
        }
        if next.y < 0.0 || next.y > self.bounds.y {
            self.velocity.y = -self.velocity.y;
        }
        next = next.clamp(Vec2::ZERO, self.bounds);

        self.pointer = next;
    }

    fn step_keys(&mut self) {
        if self.hold_frames > 0 {
            self.hold_frames -= 1;
            return;
        }

        self.keys = if self.rng.random_bool(0.5) {
            HeldKeys::default()
        } else {
            HeldKeys {
                left: self.rng.random_bool(0.25),
                right: self.rng.random_bool(0.25),
                up: self.rng.random_bool(0.25),
                down: self.rng.random_bool(0.25),
            }
        };
        self.hold_frames = self.rng.random_range(10..60);
    }
}

impl Iterator for InputScript {
    type Item = FrameInput;

    fn next(&mut self) -> Option<FrameInput> {
        Some(self.next_input())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(seed: u64) -> InputScript {
        InputScript::new(seed, Vec2::new(500.0, 500.0), Vec2::new(800.0, 600.0), 1.0 / 60.0)
    }

    #[test]
    fn test_same_seed_same_frames() {
        let a: Vec<FrameInput> = script(42).take(200).collect();
        let b: Vec<FrameInput> = script(42).take(200).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a: Vec<FrameInput> = script(1).take(50).collect();
        let b: Vec<FrameInput> = script(2).take(50).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_pointer_stays_in_bounds() {
        for input in script(7).take(2000) {
            assert!(input.pointer.x >= 0.0 && input.pointer.x <= 800.0);
            assert!(input.pointer.y >= 0.0 && input.pointer.y <= 600.0);
            assert!((input.dt - 1.0 / 60.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_keys_are_held_for_several_frames() {
        let inputs: Vec<FrameInput> = script(3).take(300).collect();
        let changes = inputs.windows(2).filter(|w| w[0].keys != w[1].keys).count();
        // Holds last at least 10 frames
        assert!(changes <= 300 / 10);
    }
}
