//! Finite line segments and their intersection
//!
//! Uses Paul Bourke's parametric line intercept: both segments are written as
//! `P + u * (Q - P)` and the pair of parameters `(ua, ub)` where they meet is
//! solved directly. The segments touch when both parameters lie in `[0, 1]`.

use serde::{Deserialize, Serialize};

use super::vector::{Point, Vector, vector_between};

/// A segment between two points (direction matters for `ua`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Displacement from start to end
    #[inline]
    pub fn direction(&self) -> Vector {
        vector_between(self.start, self.end)
    }

    /// Point at parameter `u` (0 = start, 1 = end)
    #[inline]
    pub fn point_at(&self, u: f32) -> Point {
        self.start + self.direction() * u
    }
}

/// Intersection point of two segments, if any
///
/// Returns `None` for parallel (or collinear) segments and when the lines
/// cross outside either segment. Endpoints count as part of the segment.
/// Comparisons are exact, so hits grazing an endpoint can come and go with
/// rounding; see [`intersect_with_tolerance`].
#[inline]
pub fn intersect(a: &Segment, b: &Segment) -> Option<Point> {
    intersect_with_tolerance(a, b, 0.0)
}

/// Like [`intersect`], accepting parameters within `eps` of the unit interval
///
/// A denominator with magnitude at most `eps` is treated as parallel. With
/// `eps == 0.0` this is exactly [`intersect`].
pub fn intersect_with_tolerance(a: &Segment, b: &Segment, eps: f32) -> Option<Point> {
    let ad = a.direction();
    let bd = b.direction();
    let ab = vector_between(b.start, a.start);

    let denominator = bd.y * ad.x - bd.x * ad.y;
    if denominator.abs() <= eps {
        return None;
    }

    let ua = (bd.x * ab.y - bd.y * ab.x) / denominator;
    let ub = (ad.x * ab.y - ad.y * ab.x) / denominator;

    // NaN parameters fail the range check
    let range = -eps..=1.0 + eps;
    if !range.contains(&ua) || !range.contains(&ub) {
        return None;
    }

    Some(a.point_at(ua))
}
