//! Frame-stepped scene playback.
//!
//! Each frame:
//!
//! 1. Compute the animation time `t = frame / frame_rate`.
//! 2. Push `t` into every property of the scene.
//! 3. Sync every geometry mesh and the environment cubemap through the GPU
//!    resource cache, which only re-uploads what changed.
//! 4. Advance the frame counter.

use std::time::Instant;

use engine_render::{CacheStats, GlResourceManager};
use engine_scene::Scene;
use tracing::{debug, info, warn};

use crate::config::PlaybackConfig;

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Frame index, starting at 0.
    pub frame: u64,
    /// Animation time of the frame.
    pub time: f64,
    /// Property values changed by the clock.
    pub changed_properties: usize,
    /// Geometry meshes synced.
    pub meshes: usize,
    /// GPU objects built or re-uploaded during the frame.
    pub uploads: u64,
}

/// Totals over a [`Playback::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSummary {
    pub frames: u64,
    pub changed_properties: usize,
    pub cache: CacheStats,
}

/// Drives a scene's animation clock and keeps its GPU mirrors current.
#[derive(Debug)]
pub struct Playback {
    scene: Scene,
    gl: GlResourceManager,
    config: PlaybackConfig,
    frame: u64,
}

impl Playback {
    /// Wrap `scene`, applying the configured animation length if any.
    #[must_use]
    pub fn new(mut scene: Scene, config: PlaybackConfig) -> Self {
        if let Some(length) = config.animation_length {
            scene.set_animation_length(length);
        }
        Self {
            scene,
            gl: GlResourceManager::new(),
            config,
            frame: 0,
        }
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn resources(&self) -> &GlResourceManager {
        &self.gl
    }

    /// Index of the next frame to step.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame.
    pub fn step(&mut self) -> FrameStats {
        let time = self.frame as f64 / self.config.frame_rate;
        let before = self.gl.stats();

        let changed_properties = self.scene.update(time);
        let meshes = self.scene.meshes();
        let mesh_count = meshes.len();
        for (_, mesh) in meshes {
            self.gl.get_gl_mesh(mesh);
        }
        if let Some(cubemap) = self.scene.environment_cubemap() {
            self.gl.get_gl_texture(cubemap);
        }

        let after = self.gl.stats();
        let stats = FrameStats {
            frame: self.frame,
            time,
            changed_properties,
            meshes: mesh_count,
            uploads: (after.builds + after.rebuilds) - (before.builds + before.rebuilds),
        };
        debug!(
            frame = stats.frame,
            time = stats.time,
            changed = stats.changed_properties,
            uploads = stats.uploads,
            "stepped frame"
        );
        self.frame += 1;
        stats
    }

    /// Step the configured number of frames.
    ///
    /// In realtime mode the loop sleeps to hold the frame rate and warns
    /// about frames that overrun it.
    pub fn run(&mut self) -> PlaybackSummary {
        let frames = self.config.frames_for(self.scene.animation_length());
        let frame_duration = self.config.frame_duration();
        let mut changed_properties = 0usize;

        info!(
            frame_rate = self.config.frame_rate,
            frames,
            realtime = self.config.realtime,
            "starting playback"
        );

        for _ in 0..frames {
            let start = Instant::now();
            changed_properties += self.step().changed_properties;

            if !self.config.realtime {
                continue;
            }
            let elapsed = start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            } else {
                warn!(
                    frame = self.frame,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = frame_duration.as_millis() as u64,
                    "frame exceeded time budget"
                );
            }
        }

        let summary = PlaybackSummary {
            frames,
            changed_properties,
            cache: self.gl.stats(),
        };
        info!(
            frames,
            changed = changed_properties,
            meshes = summary.cache.meshes,
            textures = summary.cache.textures,
            rebuilds = summary.cache.rebuilds,
            "playback complete"
        );
        summary
    }
}
