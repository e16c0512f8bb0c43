//! Keyframe curve evaluators.
//!
//! An evaluator turns a sequence of 2D control points (x = time,
//! y = value) into a dense polyline that a sampler can interpolate
//! linearly. All evaluators are pure: the same input always produces the
//! same output, and the input is never modified.
//!
//! | Evaluator            | Shape                                            |
//! |----------------------|--------------------------------------------------|
//! | [`LinearEvaluator`]  | straight segments between control points         |
//! | [`BezierEvaluator`]  | cubic Bezier segments, 4 points with stride 3    |
//! | [`BSplineEvaluator`] | uniform cubic B-spline, converted to Bezier form |
//!
//! Input with two or fewer points is returned unchanged by every evaluator
//! (apart from [`CurveSettings::extend_x`] padding). Malformed input never
//! produces an error; it degrades to the simplest valid output.

mod bezier;
mod bspline;
mod extend;
mod linear;

use glam::DVec2;

pub use bezier::{BezierEvaluator, de_casteljau};
pub use bspline::BSplineEvaluator;
pub use extend::extend_x;
pub use linear::LinearEvaluator;

/// Samples per segment used when a caller passes a density of `0`.
pub const DEFAULT_DENSITY: usize = 100;

/// Options shared by every evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSettings {
    /// Length of the animation. With `wrap` set this is the period of the
    /// curve; with `extend_x` set the output spans `[0, max_x]`.
    pub max_x: f64,
    /// Treat the curve as periodic with period `max_x`.
    pub wrap: bool,
    /// Pad the output so it covers `[0, max_x]`.
    pub extend_x: bool,
}

impl CurveSettings {
    /// Settings for a curve spanning `[0, max_x]`.
    #[must_use]
    pub fn new(max_x: f64) -> Self {
        Self {
            max_x,
            wrap: false,
            extend_x: false,
        }
    }

    /// Enable or disable periodic wrapping.
    #[must_use]
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Enable or disable padding to `[0, max_x]`.
    #[must_use]
    pub fn with_extend_x(mut self, extend_x: bool) -> Self {
        self.extend_x = extend_x;
        self
    }

    /// Whether wrapping is both requested and meaningful.
    #[must_use]
    pub fn wraps(&self) -> bool {
        self.wrap && self.max_x > 0.0
    }
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Maps control points to a densely sampled curve.
pub trait CurveEvaluator {
    /// The settings this evaluator was built with.
    fn settings(&self) -> &CurveSettings;

    /// Evaluate the curve through `control_points`.
    ///
    /// `density` is the number of samples per segment; `0` means
    /// [`DEFAULT_DENSITY`].
    fn evaluate_curve(&self, control_points: &[DVec2], density: usize) -> Vec<DVec2>;
}

pub(crate) fn resolve_density(density: usize) -> usize {
    if density == 0 { DEFAULT_DENSITY } else { density }
}

/// Shortcut shared by all evaluators for inputs of two points or fewer.
pub(crate) fn passthrough(control_points: &[DVec2], settings: &CurveSettings) -> Vec<DVec2> {
    let mut points = control_points.to_vec();
    extend_x(&mut points, settings);
    points
}
