//! Flashlight headless driver
//!
//! Runs the scene for a number of frames with scripted input and reports what
//! the light saw. A host renderer would call the same `tick` once per
//! animation frame with live input instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use flashlight::Settings;
use flashlight::renderer::build_frame_mesh;
use flashlight::scene::{FrameClock, FrameOutput, InputScript, Scene, tick};

#[derive(Parser)]
#[command(name = "flashlight")]
#[command(about = "Cast flashlight rays against an obstacle with scripted input")]
struct Cmd {
    /// Settings JSON file (defaults are used when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of frames to run
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seed for the scripted pointer and keys
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Canvas width
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Canvas height
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Print the last frame as JSON
    #[arg(long)]
    dump: bool,

    /// Write the effective settings to this path and exit
    #[arg(long)]
    write_settings: Option<PathBuf>,
}

/// Totals collected over a run
#[derive(Debug, Default)]
struct RunStats {
    frames: u64,
    rays: usize,
    occluded: usize,
    empty_frames: u64,
    vertices: usize,
}

impl RunStats {
    fn record(&mut self, output: &FrameOutput, mesh_vertices: usize) {
        self.frames += 1;
        self.rays += output.rays.len();
        self.occluded += output.hits().count();
        if output.rays.is_empty() {
            self.empty_frames += 1;
        }
        self.vertices += mesh_vertices;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cmd = Cmd::parse();

    let settings = Settings::load_or_default(cmd.settings.as_deref()).context("loading settings")?;

    if let Some(path) = &cmd.write_settings {
        settings.save(path).with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }

    anyhow::ensure!(cmd.fps > 0.0, "--fps must be positive");
    let canvas = Vec2::new(cmd.width, cmd.height);

    let mut scene = Scene::new(settings).context("building scene")?;
    let mut script = InputScript::new(cmd.seed, scene.pointer, canvas, (1.0 / cmd.fps) as f32);
    let mut clock = FrameClock::new(0.0);
    let frame_ms = 1000.0 / cmd.fps;

    log::info!("Flashlight running {} frames (seed {})", cmd.frames, cmd.seed);

    let mut stats = RunStats::default();
    let mut last = None;
    for i in 1..=cmd.frames {
        let mut input = script.next_input();
        input.dt = clock.advance(i as f64 * frame_ms);

        let output = tick(&mut scene, &input);
        let mesh = build_frame_mesh(&output, scene.settings(), canvas);
        stats.record(&output, mesh.vertex_count());

        if output.frame % 60 == 0 {
            log::info!(
                "Frame {}: light ({:.1}, {:.1}) facing {:.2} rad, {} rays, {} occluded",
                output.frame,
                output.cone.origin.x,
                output.cone.origin.y,
                output.facing_angle(),
                output.rays.len(),
                output.hits().count()
            );
        }
        last = Some(output);
    }

    log::info!(
        "Done: {} frames, {} rays ({} occluded), {} frames without direction, {:.0} vertices/frame",
        stats.frames,
        stats.rays,
        stats.occluded,
        stats.empty_frames,
        stats.vertices as f64 / stats.frames.max(1) as f64
    );

    if cmd.dump {
        match last {
            Some(output) => println!("{}", serde_json::to_string_pretty(&output)?),
            None => log::warn!("No frames were run, nothing to dump"),
        }
    }

    Ok(())
}
