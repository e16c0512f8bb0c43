//! Playback configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Slowest accepted frame rate (one frame every ~17 minutes).
pub const MIN_FRAME_RATE: f64 = 1e-3;
/// Fastest accepted frame rate.
pub const MAX_FRAME_RATE: f64 = 1e6;

/// How a scene is played back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PlaybackConfig {
    /// Frames per second of animation time.
    pub frame_rate: f64,
    /// Number of frames to step (0 = one full animation cycle).
    pub frame_count: u64,
    /// Overrides the scene's animation length when set.
    pub animation_length: Option<f64>,
    /// Sleep between frames to hold the frame rate in wall-clock time.
    pub realtime: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            frame_count: 0,
            animation_length: None,
            realtime: false,
        }
    }
}

impl PlaybackConfig {
    #[must_use]
    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    #[must_use]
    pub fn with_frame_count(mut self, frame_count: u64) -> Self {
        self.frame_count = frame_count;
        self
    }

    #[must_use]
    pub fn with_animation_length(mut self, length: f64) -> Self {
        self.animation_length = Some(length);
        self
    }

    #[must_use]
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject frame rates outside `[MIN_FRAME_RATE, MAX_FRAME_RATE]`.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(&self.frame_rate),
            "frame_rate must be between {MIN_FRAME_RATE} and {MAX_FRAME_RATE}, got {}",
            self.frame_rate
        );
        Ok(())
    }

    /// Wall-clock length of one frame. Zero if the rate is out of range.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.frame_rate).unwrap_or_default()
    }

    /// Frames to step for a scene of the given animation length.
    ///
    /// An explicit `frame_count` wins; otherwise one full cycle, and at
    /// least one frame.
    #[must_use]
    pub fn frames_for(&self, animation_length: f64) -> u64 {
        if self.frame_count > 0 {
            return self.frame_count;
        }
        ((animation_length * self.frame_rate).ceil() as u64).max(1)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builders_override_defaults() {
        let config = PlaybackConfig::default()
            .with_frame_rate(60.0)
            .with_frame_count(12)
            .with_animation_length(3.0)
            .with_realtime(true);
        assert_eq!(config.frame_rate, 60.0);
        assert_eq!(config.frame_count, 12);
        assert_eq!(config.animation_length, Some(3.0));
        assert!(config.realtime);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "frame_rate": 24.0 }}"#).unwrap();
        let config = PlaybackConfig::load(file.path()).unwrap();
        assert_eq!(config, PlaybackConfig::default().with_frame_rate(24.0));
    }

    #[test]
    fn test_load_rejects_zero_rate() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "frame_rate": 0.0 }}"#).unwrap();
        let err = PlaybackConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("frame_rate"));
    }

    #[test]
    fn test_tiny_and_huge_rates_are_rejected() {
        for rate in [f64::MIN_POSITIVE / 4.0, 1e-9, 1e9, f64::NAN, f64::INFINITY] {
            let config = PlaybackConfig::default().with_frame_rate(rate);
            assert!(config.validate().is_err(), "rate {rate}");
        }
        assert!(PlaybackConfig::default().validate().is_ok());
    }

    #[test]
    fn test_frame_duration_never_panics() {
        let subnormal = PlaybackConfig::default().with_frame_rate(f64::MIN_POSITIVE / 4.0);
        assert_eq!(subnormal.frame_duration(), Duration::ZERO);
        let normal = PlaybackConfig::default().with_frame_rate(4.0);
        assert_eq!(normal.frame_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_frames_for_defaults_to_one_cycle() {
        let config = PlaybackConfig::default().with_frame_rate(10.0);
        assert_eq!(config.frames_for(2.05), 21);
        assert_eq!(config.frames_for(0.0), 1);
        assert_eq!(config.with_frame_count(5).frames_for(100.0), 5);
    }
}
