//! Light scene controller
//!
//! Owns the mutable side of the effect: the light position, the last pointer
//! and the frame count. No rendering or platform dependencies; input comes in
//! as plain values once per frame.

pub mod clock;
pub mod script;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use script::InputScript;
pub use state::{FrameInput, HeldKeys, LightSource, Scene};
pub use tick::{CastRay, FrameOutput, LightCone, tick};
