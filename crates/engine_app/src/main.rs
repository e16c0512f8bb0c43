//! # engine_app — Playback driver
//!
//! Loads a scene file, steps its animation clock frame by frame, and keeps
//! the GPU resource cache in sync with every generated mesh and the
//! environment map.
//!
//! ## Startup Sequence
//!
//! 1. Parse the command line and the optional JSON config file.
//! 2. Load the scene (format chosen by file extension).
//! 3. Step the configured number of frames.
//! 4. Optionally save the scene back out.

mod config;
mod playback;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::PlaybackConfig;
use engine_scene::{builtin_registry, load_scene, save_scene};
use playback::Playback;

/// Play back an animated scene.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Scene file (`.json`, `.msgpack` or `.scene`).
    scene: PathBuf,

    /// JSON playback config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames per second of animation time.
    #[arg(long)]
    fps: Option<f64>,

    /// Number of frames to step (default: one animation cycle).
    #[arg(long)]
    frames: Option<u64>,

    /// Hold the frame rate in wall-clock time.
    #[arg(long)]
    realtime: bool,

    /// Write the scene here after playback.
    #[arg(long)]
    save: Option<PathBuf>,
}

impl Args {
    fn playback_config(&self) -> Result<PlaybackConfig> {
        let mut config = match &self.config {
            Some(path) => PlaybackConfig::load(path)?,
            None => PlaybackConfig::default(),
        };
        if let Some(fps) = self.fps {
            config = config.with_frame_rate(fps);
        }
        if let Some(frames) = self.frames {
            config = config.with_frame_count(frames);
        }
        if self.realtime {
            config = config.with_realtime(true);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .init();

    let args = Args::parse();
    let config = args.playback_config()?;

    let scene = load_scene(builtin_registry(), &args.scene)
        .with_context(|| format!("loading {}", args.scene.display()))?;
    info!(
        path = %args.scene.display(),
        objects = scene.len(),
        lights = scene.light_objects().len(),
        colliders = scene.collider_objects().len(),
        "scene ready"
    );

    let mut playback = Playback::new(scene, config);
    playback.run();

    if let Some(out) = &args.save {
        save_scene(playback.scene(), out).with_context(|| format!("saving {}", out.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from(["engine_app", "s.json", "--fps", "12", "--frames", "3"]);
        let config = args.playback_config().unwrap();
        assert_eq!(config.frame_rate, 12.0);
        assert_eq!(config.frame_count, 3);
        assert!(!config.realtime);
    }

    #[test]
    fn test_cli_rejects_non_positive_fps() {
        let args = Args::parse_from(["engine_app", "s.json", "--fps", "0"]);
        assert!(args.playback_config().is_err());
    }

    #[test]
    fn test_cli_rejects_subnormal_fps() {
        let args = Args::parse_from(["engine_app", "s.json", "--fps", "1e-320"]);
        let err = args.playback_config().unwrap_err();
        assert!(err.to_string().contains("frame_rate"));
    }

    #[test]
    fn test_load_play_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        std::fs::write(
            &input,
            r#"{
                "AnimationLength": 1.0,
                "Objects": [{
                    "Name": "floor",
                    "Components": [
                        { "Type": "Transform" },
                        { "Type": "Plane", "Properties": { "Width": 2.0 } }
                    ]
                }]
            }"#,
        )
        .unwrap();

        let scene = load_scene(builtin_registry(), &input).unwrap();
        let mut playback = Playback::new(scene, PlaybackConfig::default().with_frame_count(2));
        let summary = playback.run();
        assert_eq!(summary.cache.meshes, 1);

        let output = dir.path().join("out.scene");
        save_scene(playback.scene(), &output).unwrap();
        let reloaded = load_scene(builtin_registry(), &output).unwrap();
        let floor = reloaded.find_by_name("floor").unwrap();
        let plane = reloaded.object(floor).unwrap().component_by_name("Plane").unwrap();
        assert_eq!(plane.properties().double_value("Width"), 2.0);
    }
}
