//! Obstacle polygons defined by relative offsets
//!
//! A polygon is an anchor point followed by a chain of displacements. Each
//! displacement is applied to the previous vertex, so insertion order defines
//! which vertices are connected by an edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::GeomError;
use super::segment::Segment;
use super::vector::{Point, Vector, add, scale};

/// An anchor plus an ordered chain of relative offsets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    anchor: Point,
    offsets: Vec<Vector>,
    /// Also connect the last vertex back to the first
    #[serde(default)]
    closed: bool,
}

impl Polygon {
    /// Build an open polygon (no edge from the last vertex back to the first)
    pub fn new(anchor: Point, offsets: Vec<Vector>) -> Result<Self, GeomError> {
        let polygon = Self {
            anchor,
            offsets,
            closed: false,
        };
        polygon.validate()?;
        Ok(polygon)
    }

    /// The chair silhouette used as the default obstacle
    pub fn chair() -> Self {
        const OFFSETS: [[f32; 2]; 10] = [
            [10.0, 0.0],
            [0.0, 50.0],
            [30.0, 0.0],
            [0.0, 30.0],
            [-10.0, 0.0],
            [0.0, -20.0],
            [-20.0, 0.0],
            [0.0, 20.0],
            [-10.0, 0.0],
            [0.0, -80.0],
        ];

        Self {
            anchor: Vec2::new(150.0, 200.0),
            offsets: OFFSETS.iter().map(|&o| Vec2::from(o)).collect(),
            closed: false,
        }
        .scaled(2.0)
    }

    /// Same anchor, every offset multiplied by `s`
    pub fn scaled(&self, s: f32) -> Self {
        Self {
            anchor: self.anchor,
            offsets: self.offsets.iter().map(|&o| scale(o, s)).collect(),
            closed: self.closed,
        }
    }

    /// Whether the edge from the last vertex back to the first is included
    pub fn with_closing_edge(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Check the invariants a deserialized polygon may have skipped
    pub fn validate(&self) -> Result<(), GeomError> {
        if self.offsets.is_empty() {
            return Err(GeomError::EmptyPolygon);
        }
        if !self.anchor.is_finite() {
            return Err(GeomError::NonFinite { index: 0 });
        }
        if let Some(i) = self.offsets.iter().position(|o| !o.is_finite()) {
            return Err(GeomError::NonFinite { index: i + 1 });
        }
        Ok(())
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn offsets(&self) -> &[Vector] {
        &self.offsets
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Absolute vertex positions, one per offset
    ///
    /// The anchor itself is not part of the output.
    pub fn resolve(&self) -> Vec<Point> {
        let mut last = self.anchor;
        let mut points = Vec::with_capacity(self.offsets.len());

        for &offset in &self.offsets {
            let next = add(last, offset);
            points.push(next);
            last = next;
        }

        points
    }

    /// Edges between consecutive resolved vertices
    pub fn edges(&self) -> impl Iterator<Item = Segment> {
        edges_of(self.resolve(), self.closed)
    }
}

/// Edges of an already resolved vertex chain
pub fn edges_of(vertices: Vec<Point>, closed: bool) -> impl Iterator<Item = Segment> {
    let closing = match (closed && vertices.len() > 2, vertices.first(), vertices.last()) {
        (true, Some(&first), Some(&last)) => Some(Segment::new(last, first)),
        _ => None,
    };

    (1..vertices.len())
        .map(move |i| Segment::new(vertices[i - 1], vertices[i]))
        .chain(closing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_simple() {
        let poly = Polygon::new(Vec2::ZERO, vec![Vec2::new(10.0, 0.0), Vec2::new(0.0, 5.0)]).unwrap();
        assert_eq!(poly.resolve(), vec![Vec2::new(10.0, 0.0), Vec2::new(10.0, 5.0)]);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let poly = Polygon::chair();
        let first = poly.resolve();
        for _ in 0..5 {
            assert_eq!(poly.resolve(), first);
        }
    }

    #[test]
    fn test_zero_offsets_give_coincident_points() {
        let poly = Polygon::new(Vec2::new(1.0, 1.0), vec![Vec2::ZERO, Vec2::ZERO]).unwrap();
        assert_eq!(poly.resolve(), vec![Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)]);
    }

    #[test]
    fn test_empty_polygon_rejected() {
        assert_eq!(Polygon::new(Vec2::ZERO, vec![]), Err(GeomError::EmptyPolygon));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = Polygon::new(Vec2::ZERO, vec![Vec2::X, Vec2::new(f32::NAN, 0.0)]);
        assert_eq!(err, Err(GeomError::NonFinite { index: 2 }));
    }

    #[test]
    fn test_chair_vertices() {
        let points = Polygon::chair().resolve();
        assert_eq!(points.len(), 10);
        assert_eq!(points[0], Vec2::new(170.0, 200.0));
        assert_eq!(points[1], Vec2::new(170.0, 300.0));
        assert_eq!(points[3], Vec2::new(230.0, 360.0));
        // The offsets walk back to the anchor
        assert_eq!(points[9], Vec2::new(150.0, 200.0));
    }

    #[test]
    fn test_edges_are_open_by_default() {
        let poly = Polygon::new(
            Vec2::ZERO,
            vec![Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0), Vec2::new(-10.0, 0.0)],
        )
        .unwrap();
        let edges: Vec<_> = poly.edges().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], Segment::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)));
        assert_eq!(edges[1], Segment::new(Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn test_closing_edge() {
        let poly = Polygon::new(
            Vec2::ZERO,
            vec![Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0), Vec2::new(-10.0, 0.0)],
        )
        .unwrap()
        .with_closing_edge(true);
        let edges: Vec<_> = poly.edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2], Segment::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_single_vertex_has_no_edges() {
        let poly = Polygon::new(Vec2::ZERO, vec![Vec2::X]).unwrap().with_closing_edge(true);
        assert_eq!(poly.edges().count(), 0);
    }
}
