//! Keyframe type.

use engine_math::DVec2;
use serde::{Deserialize, Serialize};

/// A single `(time, value)` sample of an animation curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time of the key, in the scene's animation units.
    pub time: f64,
    /// Value of the property at `time`.
    pub value: f64,
}

impl Keyframe {
    /// Create a keyframe.
    #[must_use]
    pub const fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }

    /// The keyframe as a curve control point (`x` = time, `y` = value).
    #[must_use]
    pub fn as_point(&self) -> DVec2 {
        DVec2::new(self.time, self.value)
    }
}

impl From<DVec2> for Keyframe {
    fn from(point: DVec2) -> Self {
        Self::new(point.x, point.y)
    }
}
