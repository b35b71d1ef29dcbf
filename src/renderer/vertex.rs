//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Size of one vertex in a GPU buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Raw bytes of a vertex list, ready for a vertex buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for scene elements
pub mod colors {
    /// Center of the cone gradient (#EEE)
    pub const CONE_CORE: [f32; 4] = [0.933, 0.933, 0.933, 1.0];
    pub const OBSTACLE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Rays and hit markers (CSS `green`)
    pub const RAY: [f32; 4] = [0.0, 0.502, 0.0, 1.0];
    /// Light body (#666)
    pub const LIGHT_BODY: [f32; 4] = [0.4, 0.4, 0.4, 1.0];

    /// Opaque gray for a 0-255 brightness level
    pub fn gray(level: u8) -> [f32; 4] {
        let v = level as f32 / 255.0;
        [v, v, v, 1.0]
    }

    /// Linear blend between two colors
    pub fn lerp(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        let t = t.clamp(0.0, 1.0);
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(Vertex::STRIDE, 24);
        let vertices = [Vertex::new(1.0, 2.0, colors::RAY); 3];
        assert_eq!(as_bytes(&vertices).len(), 72);
    }

    #[test]
    fn test_gray_and_lerp() {
        assert_eq!(colors::gray(255), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(colors::gray(0), [0.0, 0.0, 0.0, 1.0]);
        let mid = colors::lerp([0.0; 4], [1.0; 4], 0.5);
        assert_eq!(mid, [0.5; 4]);
    }
}
