//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list.

use glam::{Affine2, Vec2};
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors};

fn push_triangle(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    sector(center, radius, 0.0, TAU, color, segments)
}

/// Generate vertices for a pie slice from `start` to `end` (radians)
pub fn sector(center: Vec2, radius: f32, start: f32, end: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = end - start;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        push_triangle(
            &mut vertices,
            center,
            center + Vec2::from_angle(theta1) * radius,
            center + Vec2::from_angle(theta2) * radius,
            color,
        );
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    let mut vertices = Vec::with_capacity(6);
    push_triangle(&mut vertices, min, Vec2::new(max.x, min.y), max, color);
    push_triangle(&mut vertices, min, max, Vec2::new(min.x, max.y), color);
    vertices
}

/// Generate vertices for a line of the given width
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = dir.perp() * (width / 2.0);

    let mut vertices = Vec::with_capacity(6);
    push_triangle(&mut vertices, from + perp, from - perp, to + perp, color);
    push_triangle(&mut vertices, to + perp, from - perp, to - perp, color);
    vertices
}

/// Generate vertices for a light cone with a radial gradient
///
/// Solid `inner` up to `radius / 20`, then blends to `outer` at `radius`.
/// The cone spans `facing ± aperture / 2`.
pub fn cone(
    origin: Vec2,
    radius: f32,
    aperture: f32,
    facing: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
    rings: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let rings = rings.max(1);
    let core = radius / 20.0;
    let start = facing - aperture / 2.0;

    // Ring radii: the solid core, then evenly spaced gradient stops
    let radii: Vec<f32> = std::iter::once(core)
        .chain((1..=rings).map(|i| core + (radius - core) * i as f32 / rings as f32))
        .collect();
    let color_at = |r: f32| colors::lerp(inner, outer, (r - core) / (radius - core));

    let mut vertices = Vec::with_capacity((segments * (3 + rings * 6)) as usize);

    for i in 0..segments {
        let d1 = Vec2::from_angle(start + (i as f32 / segments as f32) * aperture);
        let d2 = Vec2::from_angle(start + ((i + 1) as f32 / segments as f32) * aperture);

        push_triangle(&mut vertices, origin, origin + d1 * core, origin + d2 * core, inner);

        for pair in radii.windows(2) {
            let (r1, r2) = (pair[0], pair[1]);
            let (c1, c2) = (color_at(r1), color_at(r2));
            let (a1, a2) = (origin + d1 * r1, origin + d2 * r1);
            let (b1, b2) = (origin + d1 * r2, origin + d2 * r2);

            vertices.push(Vertex::new(a1.x, a1.y, c1));
            vertices.push(Vertex::new(b1.x, b1.y, c2));
            vertices.push(Vertex::new(a2.x, a2.y, c1));

            vertices.push(Vertex::new(a2.x, a2.y, c1));
            vertices.push(Vertex::new(b1.x, b1.y, c2));
            vertices.push(Vertex::new(b2.x, b2.y, c2));
        }
    }

    vertices
}

/// Generate vertices for the light body: a handle plus a half-disc lens,
/// rotated by `facing` and placed at `position`
pub fn light_body(position: Vec2, facing: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let transform = Affine2::from_angle_translation(facing, position);

    let mut vertices = rect(Vec2::new(-16.0, -6.0), Vec2::new(24.0, 12.0), color);
    // Lens: the half of a radius-10 disc at (8, 0) facing back toward the handle
    vertices.extend(sector(
        Vec2::new(8.0, 0.0),
        10.0,
        TAU / 4.0,
        3.0 * TAU / 4.0,
        color,
        (segments / 2).max(1),
    ));

    for v in &mut vertices {
        let p = transform.transform_point2(Vec2::from(v.position));
        v.position = p.to_array();
    }
    vertices
}

/// Generate vertices for a filled simple polygon (convex or not)
pub fn polygon_fill(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for [a, b, c] in triangulate(points) {
        push_triangle(&mut vertices, points[a], points[b], points[c], color);
    }
    vertices
}

/// Twice the signed area (positive when counter-clockwise in y-up space)
pub fn signed_area_2x(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n).map(|i| points[i].perp_dot(points[(i + 1) % n])).sum()
}

/// Ear-clipping triangulation of a simple polygon, as index triples
///
/// Collinear vertices are dropped without emitting a triangle. If no ear can
/// be found (self-intersecting input) the remaining vertices are skipped.
pub fn triangulate(points: &[Vec2]) -> Vec<[usize; 3]> {
    let area = signed_area_2x(points);
    if points.len() < 3 || area == 0.0 || !area.is_finite() {
        return Vec::new();
    }
    let orientation = area.signum();

    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len() - 2);

    while remaining.len() > 3 {
        let n = remaining.len();
        let mut clipped = false;

        for i in 0..n {
            let (a, b, c) = (remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]);
            let (pa, pb, pc) = (points[a], points[b], points[c]);
            let turn = (pb - pa).perp_dot(pc - pb);

            if turn == 0.0 {
                remaining.remove(i);
                clipped = true;
                break;
            }
            // Reflex corner
            if turn * orientation < 0.0 {
                continue;
            }

            let blocked = remaining.iter().any(|&j| {
                let p = points[j];
                j != a && j != b && j != c && p != pa && p != pb && p != pc && in_triangle(p, pa, pb, pc, orientation)
            });
            if blocked {
                continue;
            }

            triangles.push([a, b, c]);
            remaining.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            log::warn!("Polygon is not simple; fill stopped with {} vertices left", remaining.len());
            return triangles;
        }
    }

    if let &[a, b, c] = remaining.as_slice() {
        if (points[b] - points[a]).perp_dot(points[c] - points[b]) != 0.0 {
            triangles.push([a, b, c]);
        }
    }

    triangles
}

/// Point inside or on the boundary of a triangle with the given winding
fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2, orientation: f32) -> bool {
    let side = |from: Vec2, to: Vec2| (to - from).perp_dot(p - from) * orientation >= 0.0;
    side(a, b) && side(b, c) && side(c, a)
}
