#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::unnecessary_wraps)]
//! # Trackphys Runtime
//!
//! Headless driver for the physics engine. Loads a JSON scene, steps the
//! world at a fixed frame rate and logs every hit and the final body
//! positions. With `--watch` the scene is reloaded and re-run whenever the
//! file changes.

mod scene;
mod watcher;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use scene::Scene;

#[derive(Parser, Debug)]
#[command(name = "trackphys_runtime", version, about = "Step a trackphys scene and log its collisions")]
struct Args {
    /// Scene description (.json)
    #[arg(long)]
    scene: PathBuf,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 300)]
    frames: u32,

    /// Frame rate the world is driven at
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Sub-step rate limit; defaults to the scene's configuration
    #[arg(long)]
    sub_step_fps: Option<f32>,

    /// Re-run the scene whenever the file changes
    #[arg(long)]
    watch: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    run_scene(&args)?;

    if !args.watch {
        return Ok(());
    }

    let reload = Arc::new(AtomicBool::new(false));
    let _scene_watcher = watcher::start(&args.scene, Arc::clone(&reload))?;
    loop {
        std::thread::sleep(Duration::from_millis(200));
        if reload.swap(false, Ordering::SeqCst) {
            if let Err(e) = run_scene(&args) {
                tracing::error!("Failed to run scene: {e:?}");
            }
        }
    }
}

fn load(path: &Path) -> Result<Scene> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading scene {}", path.display()))?;
    Scene::parse(&json).with_context(|| format!("parsing scene {}", path.display()))
}

fn run_scene(args: &Args) -> Result<()> {
    let (mut sim, names) = load(&args.scene)?.into_sim()?;
    let dt = 1.0 / args.fps;
    let sub_step_fps = args.sub_step_fps.unwrap_or(sim.config().sub_step_fps_limit);

    tracing::info!(
        "Simulating {} bodies for {} frames at {} fps...",
        sim.body_count(),
        args.frames,
        args.fps
    );

    let name_of = |handle| {
        names
            .iter()
            .find(|(_, h)| Some(*h) == handle)
            .map_or("?", |(name, _)| name.as_str())
    };

    for frame in 0..args.frames {
        sim.update(dt, sub_step_fps)?;
        for hit in sim.hit_data() {
            tracing::debug!(
                frame,
                collider = name_of(hit.collider),
                victim = name_of(hit.collision_victim),
                kind = ?hit.col_type,
                depth = hit.col_length,
                "hit"
            );
        }
    }

    for (name, handle) in &names {
        let position = sim.body_position(*handle)?;
        let landed = sim.body_landed(*handle)?;
        tracing::info!("{name}: position {position} cm, landed {landed}");
    }
    Ok(())
}
