//! Occlusion geometry
//!
//! Everything in here is pure: no state, no logging, no I/O. The scene
//! controller calls into it once per frame.
//! - `vector`: primitive 2D operations
//! - `polygon`: anchor + relative offsets, resolved to absolute vertices
//! - `segment`: finite segment intersection
//! - `raycast`: nearest occluder along a ray

pub mod polygon;
pub mod raycast;
pub mod segment;
pub mod vector;

pub use polygon::Polygon;
pub use raycast::{Ray, RayCast, cast, find_nearest_hit};
pub use segment::{Segment, intersect, intersect_with_tolerance};
pub use vector::{Point, Vector};

/// Errors raised while building geometry from configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeomError {
    /// A polygon needs at least one offset to produce a vertex
    #[error("polygon has no offsets")]
    EmptyPolygon,
    /// Anchor or offset contains NaN or infinity
    #[error("polygon coordinate {index} is not finite")]
    NonFinite { index: usize },
}
