//! CPU-side mesh generation
//!
//! Turns a `FrameOutput` into colored triangle lists grouped into layers, in
//! the order a host renderer should draw them. Compositing (the multiply blend
//! of the light map, the blur on the cone) is left to the host.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use glam::Vec2;

use crate::consts::BACKGROUND_OFFSET;
use crate::geom::{Point, Polygon};
use crate::scene::FrameOutput;
use crate::settings::Settings;

/// Width of the ray lines
const RAY_WIDTH: f32 = 1.0;

/// How a layer is combined with what is already drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Plain alpha blending
    Normal,
    /// Destination color multiplied by the layer color
    Multiply,
}

/// One draw call worth of triangles
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: &'static str,
    pub blend: BlendMode,
    pub vertices: Vec<Vertex>,
}

impl Layer {
    fn new(name: &'static str, blend: BlendMode) -> Self {
        Self {
            name,
            blend,
            vertices: Vec::new(),
        }
    }
}

/// All geometry for one frame, drawn after the host's background image
#[derive(Debug, Clone)]
pub struct FrameMesh {
    /// Where the host draws its background image
    pub background_offset: Vec2,
    /// Obstacle fill
    pub obstacle: Layer,
    /// Ambient gray plus the light cone, multiplied over the scene
    pub light_map: Layer,
    /// Rays, hit markers and the light body, drawn on top
    pub overlay: Layer,
}

impl FrameMesh {
    /// Layers in draw order
    pub fn layers(&self) -> [&Layer; 3] {
        [&self.obstacle, &self.light_map, &self.overlay]
    }

    pub fn vertex_count(&self) -> usize {
        self.layers().iter().map(|l| l.vertices.len()).sum()
    }
}

/// Outline of the obstacle as drawn: the anchor followed by every vertex
///
/// The fill path is always closed, so a final vertex sitting back on the
/// anchor is dropped.
pub fn obstacle_outline(polygon: &Polygon) -> Vec<Point> {
    let mut points = vec![polygon.anchor()];
    points.extend(polygon.resolve());
    if points.len() > 1 && points.last() == points.first() {
        points.pop();
    }
    points
}

/// Build the mesh for one frame
pub fn build_frame_mesh(output: &FrameOutput, settings: &Settings, canvas: Vec2) -> FrameMesh {
    let quality = settings.quality;
    let ambient = colors::gray(output.brightness);

    let mut obstacle = Layer::new("obstacle", BlendMode::Normal);
    obstacle.vertices = shapes::polygon_fill(&obstacle_outline(&settings.obstacle), colors::OBSTACLE);

    let mut light_map = Layer::new("light_map", BlendMode::Multiply);
    light_map.vertices = shapes::rect(Vec2::ZERO, canvas, ambient);
    light_map.vertices.extend(shapes::cone(
        output.cone.origin,
        output.cone.radius,
        output.cone.aperture,
        output.cone.facing_angle,
        colors::CONE_CORE,
        ambient,
        quality.cone_segments(),
        quality.gradient_rings(),
    ));

    let mut overlay = Layer::new("overlay", BlendMode::Normal);
    for ray in &output.rays {
        if let Some(hit) = ray.hit {
            overlay.vertices.extend(shapes::circle(
                hit,
                settings.hit_marker_radius,
                colors::RAY,
                quality.circle_segments(),
            ));
        }
        overlay.vertices.extend(shapes::line(ray.origin, ray.end(), RAY_WIDTH, colors::RAY));
    }
    overlay.vertices.extend(shapes::light_body(
        output.cone.origin,
        output.cone.facing_angle,
        colors::LIGHT_BODY,
        quality.circle_segments(),
    ));

    FrameMesh {
        background_offset: Vec2::from(BACKGROUND_OFFSET),
        obstacle,
        light_map,
        overlay,
    }
}
