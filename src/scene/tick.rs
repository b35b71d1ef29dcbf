//! Per-frame light update
//!
//! Builds the ray fan for the current light and pointer, drops rays outside
//! the aperture, casts the survivors against the obstacle, then moves the
//! light for the next frame.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use super::state::{FrameInput, Scene};
use crate::geom::vector::{angle_between, rotate_about, try_normalize, vector_between};
use crate::geom::{Point, Ray, cast};
use crate::normalize_angle;

/// The drawn light cone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightCone {
    pub origin: Point,
    pub radius: f32,
    /// Full angular width
    pub aperture: f32,
    /// Rotation of the cone (and light body) toward the pointer
    pub facing_angle: f32,
}

/// One ray that survived the aperture filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CastRay {
    pub origin: Point,
    pub far: Point,
    /// Nearest occluder hit, if an edge was in the way
    pub hit: Option<Point>,
}

impl CastRay {
    /// Where the visible part of the ray ends
    pub fn end(&self) -> Point {
        self.hit.unwrap_or(self.far)
    }
}

/// Everything the host renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Frame index (0-based)
    pub frame: u64,
    pub cone: LightCone,
    /// Gray level of the unlit area (0-255)
    pub brightness: u8,
    /// Forward ray end point; `None` when the pointer sits on the light
    pub target: Option<Point>,
    pub rays: Vec<CastRay>,
}

impl FrameOutput {
    pub fn facing_angle(&self) -> f32 {
        self.cone.facing_angle
    }

    pub fn hits(&self) -> impl Iterator<Item = Point> + '_ {
        self.rays.iter().filter_map(|r| r.hit)
    }
}

/// Rotation that points the light from `light` toward `pointer`
///
/// Zero means facing along +x; the angle follows the canvas rotation
/// direction (clockwise on screen).
pub fn facing_angle(light: Point, pointer: Point) -> f32 {
    let d = vector_between(light, pointer);
    -d.x.atan2(d.y) + TAU / 4.0
}

/// End point of the forward ray, `radius` units toward the pointer
///
/// `None` when the pointer is on the light and there is no direction.
pub fn forward_target(light: Point, pointer: Point, radius: f32) -> Option<Point> {
    try_normalize(vector_between(light, pointer)).map(|dir| light + dir * radius)
}

/// All rays considered this frame: the forward ray, its two flanks rotated by
/// `half_aperture`, then one ray per obstacle vertex
pub fn candidate_rays(light: Point, target: Point, half_aperture: f32, vertices: &[Point]) -> Vec<Ray> {
    let flanks = [
        rotate_about(light, target, -half_aperture),
        rotate_about(light, target, half_aperture),
    ];

    std::iter::once(target)
        .chain(flanks)
        .chain(vertices.iter().copied())
        .map(|far| Ray::new(light, far))
        .collect()
}

/// Whether `far` lies within `half_aperture` of the pointer direction
///
/// With `wrap` unset the raw bearing difference is compared, so directions on
/// either side of the bearing seam (straight up) count as far apart.
pub fn within_aperture(light: Point, pointer: Point, far: Point, half_aperture: f32, wrap: bool) -> bool {
    let mut angle = angle_between(light, pointer, far);
    if wrap {
        angle = normalize_angle(angle);
    }
    angle.abs() <= half_aperture
}

/// Advance the scene by one frame
///
/// The output describes the frame as seen from the light position at the
/// start of the frame; held keys move the light afterwards.
pub fn tick(scene: &mut Scene, input: &FrameInput) -> FrameOutput {
    let settings = scene.settings();
    let light = scene.light.position;
    let pointer = input.pointer;

    let cone = LightCone {
        origin: light,
        radius: settings.cone_radius,
        aperture: settings.cone_aperture,
        facing_angle: facing_angle(light, pointer),
    };

    let target = forward_target(light, pointer, settings.cone_radius);
    let rays = match target {
        Some(target) => {
            let half = settings.ray_half_aperture;
            let eps = settings.intersection_tolerance;
            candidate_rays(light, target, half, scene.vertices())
                .into_iter()
                .filter(|ray| within_aperture(light, pointer, ray.far, half, settings.wrap_ray_angles))
                .map(|ray| {
                    let result = cast(&ray, scene.edges().iter().copied(), eps);
                    CastRay {
                        origin: ray.origin,
                        far: ray.far,
                        hit: result.occluder.map(|_| result.point),
                    }
                })
                .collect()
        }
        None => {
            log::debug!("Frame {}: pointer on the light, no rays cast", scene.frame);
            Vec::new()
        }
    };

    let output = FrameOutput {
        frame: scene.frame,
        cone,
        brightness: settings.brightness,
        target,
        rays,
    };

    log::debug!(
        "Frame {}: {} rays, {} occluded",
        output.frame,
        output.rays.len(),
        output.hits().count()
    );

    // Move the light for the next frame
    let speed = settings.light_speed;
    scene.light.step(input.keys, speed, input.dt);
    scene.pointer = pointer;
    scene.frame += 1;
    scene.elapsed += input.dt;

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::RAY_HALF_APERTURE;
    use crate::geom::Polygon;
    use crate::scene::HeldKeys;
    use crate::settings::Settings;
    use glam::Vec2;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn open_box_settings() -> Settings {
        // A wall at x=150 from y=50 to y=150, then along y=150 to x=250
        let obstacle = Polygon::new(
            Vec2::new(150.0, 0.0),
            vec![Vec2::new(0.0, 50.0), Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0)],
        )
        .unwrap();
        Settings {
            obstacle,
            ..Default::default()
        }
    }

    fn still(pointer: Vec2) -> FrameInput {
        FrameInput::new(pointer, HeldKeys::default(), 1.0 / 60.0)
    }

    #[test]
    fn test_facing_angle() {
        let light = Vec2::new(100.0, 100.0);
        // Pointer to the right faces along +x
        assert!(facing_angle(light, Vec2::new(200.0, 100.0)).abs() < 1e-6);
        // Pointer below (screen down) is a quarter turn
        assert!((facing_angle(light, Vec2::new(100.0, 200.0)) - FRAC_PI_2).abs() < 1e-6);
        // Pointer to the left is a half turn
        assert!((facing_angle(light, Vec2::new(0.0, 100.0)) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_forward_target() {
        let target = forward_target(Vec2::new(100.0, 100.0), Vec2::new(400.0, 500.0), 200.0).unwrap();
        assert!((target - Vec2::new(220.0, 260.0)).length() < 1e-3);
        assert_eq!(forward_target(Vec2::ONE, Vec2::ONE, 200.0), None);
    }

    #[test]
    fn test_candidate_rays_order() {
        let light = Vec2::ZERO;
        let vertices = [Vec2::new(50.0, 50.0), Vec2::new(60.0, 60.0)];
        let rays = candidate_rays(light, Vec2::new(200.0, 0.0), PI / 8.0, &vertices);
        assert_eq!(rays.len(), 5);
        assert!(rays.iter().all(|r| r.origin == light));
        assert_eq!(rays[0].far, Vec2::new(200.0, 0.0));
        // Flanks keep the cone radius
        assert!((rays[1].length() - 200.0).abs() < 1e-3);
        assert!((rays[2].length() - 200.0).abs() < 1e-3);
        assert!(rays[1].far.y < 0.0 && rays[2].far.y > 0.0);
        assert_eq!(rays[3].far, vertices[0]);
        assert_eq!(rays[4].far, vertices[1]);
    }

    #[test]
    fn test_aperture_filter() {
        let light = Vec2::ZERO;
        let pointer = Vec2::new(100.0, 0.0);
        let half = 22.5_f32.to_radians();

        let at = |deg: f32| Vec2::new(deg.to_radians().cos(), deg.to_radians().sin()) * 50.0;
        assert!(within_aperture(light, pointer, at(0.0), half, false));
        assert!(within_aperture(light, pointer, at(10.0), half, false));
        assert!(within_aperture(light, pointer, at(-20.0), half, false));
        assert!(!within_aperture(light, pointer, at(30.0), half, false));
        assert!(!within_aperture(light, pointer, at(-90.0), half, false));
    }

    #[test]
    fn test_aperture_filter_seam() {
        // Pointer straight up on screen; the vertex is just across the seam
        let light = Vec2::new(100.0, 100.0);
        let pointer = Vec2::new(99.0, 0.0);
        let far = Vec2::new(101.0, 0.0);
        let half = 22.5_f32.to_radians();
        assert!(!within_aperture(light, pointer, far, half, false));
        assert!(within_aperture(light, pointer, far, half, true));
    }

    #[test]
    fn test_tick_excludes_rays_outside_aperture() {
        let mut scene = Scene::new(open_box_settings()).unwrap();
        // Light at (100,100), pointer straight to the right
        let output = tick(&mut scene, &still(Vec2::new(400.0, 100.0)));

        // Vertices: (150,50) at 45° off, (150,150) at 45° off, (250,150) at ~18.4°
        let fars: Vec<Vec2> = output.rays.iter().map(|r| r.far).collect();
        assert!(fars.contains(&Vec2::new(250.0, 150.0)));
        assert!(!fars.contains(&Vec2::new(150.0, 50.0)));
        assert!(!fars.contains(&Vec2::new(150.0, 150.0)));

        for ray in &output.rays {
            let angle = angle_between(ray.origin, Vec2::new(400.0, 100.0), ray.far);
            assert!(angle.abs() <= RAY_HALF_APERTURE);
        }
    }

    #[test]
    fn test_tick_forward_ray_is_occluded() {
        let mut scene = Scene::new(open_box_settings()).unwrap();
        let output = tick(&mut scene, &still(Vec2::new(400.0, 100.0)));

        assert_eq!(output.target, Some(Vec2::new(300.0, 100.0)));
        let forward = output.rays[0];
        assert_eq!(forward.far, Vec2::new(300.0, 100.0));
        let hit = forward.hit.unwrap();
        assert!((hit - Vec2::new(150.0, 100.0)).length() < 1e-3);
        assert_eq!(forward.end(), hit);
    }

    #[test]
    fn test_tick_unobstructed_ray_has_no_hit() {
        let mut scene = Scene::new(open_box_settings()).unwrap();
        // Pointing straight up, away from the wall
        let output = tick(&mut scene, &still(Vec2::new(100.0, 0.0)));
        let forward = output.rays[0];
        assert_eq!(forward.hit, None);
        assert_eq!(forward.end(), forward.far);
        assert!((forward.far - Vec2::new(100.0, -100.0)).length() < 1e-3);
    }

    #[test]
    fn test_tick_pointer_on_light() {
        let mut scene = Scene::new(Settings::default()).unwrap();
        let output = tick(&mut scene, &still(Vec2::new(100.0, 100.0)));
        assert!(output.rays.is_empty());
        assert_eq!(output.target, None);
        assert!(output.facing_angle().is_finite());
        assert_eq!(scene.frame, 1);
    }

    #[test]
    fn test_tick_moves_light_after_output() {
        let mut scene = Scene::new(Settings::default()).unwrap();
        let input = FrameInput::new(
            Vec2::new(500.0, 500.0),
            HeldKeys {
                right: true,
                down: true,
                ..Default::default()
            },
            0.1,
        );

        let output = tick(&mut scene, &input);
        assert_eq!(output.cone.origin, Vec2::new(100.0, 100.0));
        assert!((scene.light.position - Vec2::new(120.0, 120.0)).length() < 1e-3);

        let output = tick(&mut scene, &input);
        assert_eq!(output.frame, 1);
        assert!((output.cone.origin - Vec2::new(120.0, 120.0)).length() < 1e-3);
        assert!((scene.elapsed - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_tick_reports_brightness_and_cone() {
        let mut scene = Scene::new(Settings::default()).unwrap();
        scene.set_brightness(128);
        let output = tick(&mut scene, &still(Vec2::new(300.0, 100.0)));
        assert_eq!(output.brightness, 128);
        assert_eq!(output.cone.radius, 200.0);
        assert!((output.cone.aperture - TAU / 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_tick_hits_chair() {
        let mut scene = Scene::new(Settings::default()).unwrap();
        scene.light.position = Vec2::new(100.0, 250.0);
        // Aim across the chair back
        let output = tick(&mut scene, &still(Vec2::new(400.0, 250.0)));
        let forward = output.rays[0];
        let hit = forward.hit.unwrap();
        // The back's outer side at x=150 is met before its inner side at x=170
        assert!((hit - Vec2::new(150.0, 250.0)).length() < 1e-3);
    }
}
