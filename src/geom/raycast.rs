//! Nearest occluder along a ray

use serde::{Deserialize, Serialize};

use super::polygon::edges_of;
use super::segment::{Segment, intersect_with_tolerance};
use super::vector::{Point, distance};

/// A directed ray from `origin` to a far point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point,
    pub far: Point,
}

impl Ray {
    #[inline]
    pub const fn new(origin: Point, far: Point) -> Self {
        Self { origin, far }
    }

    #[inline]
    pub fn as_segment(&self) -> Segment {
        Segment::new(self.origin, self.far)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        distance(self.origin, self.far)
    }
}

/// Result of casting one ray against a set of edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCast {
    /// Where the ray stops (the far point if nothing is in the way)
    pub point: Point,
    /// Distance from the ray origin to `point`
    pub distance: f32,
    /// Index of the edge that stopped the ray
    pub occluder: Option<usize>,
}

impl RayCast {
    pub fn is_occluded(&self) -> bool {
        self.occluder.is_some()
    }
}

/// Cast `ray` against `edges` and keep the hit closest to the origin
///
/// A hit replaces the current best only when it is strictly closer, so of two
/// equidistant hits the first edge wins.
pub fn cast<I>(ray: &Ray, edges: I, eps: f32) -> RayCast
where
    I: IntoIterator<Item = Segment>,
{
    let segment = ray.as_segment();
    let mut best = RayCast {
        point: ray.far,
        distance: ray.length(),
        occluder: None,
    };

    for (i, edge) in edges.into_iter().enumerate() {
        if let Some(hit) = intersect_with_tolerance(&segment, &edge, eps) {
            let d = distance(ray.origin, hit);
            if d < best.distance {
                best = RayCast {
                    point: hit,
                    distance: d,
                    occluder: Some(i),
                };
            }
        }
    }

    best
}

/// Closest point where `ray` meets the open vertex chain, or its far point
///
/// Only edges between consecutive vertices are tested; the last vertex is not
/// connected back to the first.
pub fn find_nearest_hit(ray: &Ray, vertices: &[Point]) -> Point {
    cast(ray, edges_of(vertices.to_vec(), false), 0.0).point
}
