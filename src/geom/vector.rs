//! Primitive 2D vector operations
//!
//! Points and vectors share one representation (`glam::Vec2`). The aliases
//! below exist so signatures say which one they mean: a `Point` is a position,
//! a `Vector` is the difference between two positions.

use glam::Vec2;

/// A position in canvas space
pub type Point = Vec2;
/// A displacement between two points
pub type Vector = Vec2;

/// Multiply both components by `s`
#[inline]
pub fn scale(v: Vector, s: f32) -> Vector {
    v * s
}

/// Displacement from `p1` to `p2`
#[inline]
pub fn vector_between(p1: Point, p2: Point) -> Vector {
    p2 - p1
}

/// Componentwise sum
#[inline]
pub fn add(v1: Vec2, v2: Vec2) -> Vec2 {
    v1 + v2
}

/// Euclidean distance between two points
#[inline]
pub fn distance(p1: Point, p2: Point) -> f32 {
    vector_between(p1, p2).length()
}

/// Bearing of `p` seen from `origin`, measured as `atan2(dx, dy)`
#[inline]
fn bearing(origin: Point, p: Point) -> f32 {
    let d = vector_between(origin, p);
    d.x.atan2(d.y)
}

/// Signed angle between the directions `origin -> p1` and `origin -> p2`
///
/// The result is a plain difference of two bearings and is not wrapped, so it
/// lies anywhere in (-2π, 2π). Aperture checks compare its absolute value;
/// wrap it with [`crate::normalize_angle`] first if directions near the
/// bearing seam (straight up on screen) must compare as close.
#[inline]
pub fn angle_between(origin: Point, p1: Point, p2: Point) -> f32 {
    bearing(origin, p1) - bearing(origin, p2)
}

/// Rotate `point` around `pivot` by `angle` radians
///
/// Positive angles are counter-clockwise with y pointing up. On a y-down
/// screen the same angle turns clockwise; callers decide which they want.
pub fn rotate_about(pivot: Point, point: Point, angle: f32) -> Point {
    let d = vector_between(pivot, point);
    let (sin, cos) = angle.sin_cos();
    Vec2::new(
        pivot.x + d.x * cos - d.y * sin,
        pivot.y + d.x * sin + d.y * cos,
    )
}

/// Unit vector in the direction of `v`
///
/// A zero vector yields `(NaN, NaN)`. Use [`try_normalize`] when the input may
/// be degenerate.
#[inline]
pub fn normalize(v: Vector) -> Vector {
    let len = v.x.hypot(v.y);
    Vec2::new(v.x / len, v.y / len)
}

/// Unit vector in the direction of `v`, or `None` when it has no direction
#[inline]
pub fn try_normalize(v: Vector) -> Option<Vector> {
    let n = normalize(v);
    n.is_finite().then_some(n)
}
