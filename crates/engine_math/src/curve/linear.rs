//! Piecewise linear evaluator.

use glam::DVec2;

use super::{CurveEvaluator, CurveSettings, extend_x, passthrough, resolve_density};

/// Connects consecutive control points with straight segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearEvaluator {
    settings: CurveSettings,
}

impl LinearEvaluator {
    /// Create a linear evaluator.
    #[must_use]
    pub fn new(settings: CurveSettings) -> Self {
        Self { settings }
    }
}

impl CurveEvaluator for LinearEvaluator {
    fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    fn evaluate_curve(&self, control_points: &[DVec2], density: usize) -> Vec<DVec2> {
        let Some((&last, _)) = control_points.split_last() else {
            return Vec::new();
        };
        if control_points.len() <= 2 {
            return passthrough(control_points, &self.settings);
        }

        let density = resolve_density(density);
        let mut samples = Vec::with_capacity((control_points.len() - 1) * density + 1);
        for segment in control_points.windows(2) {
            for step in 0..density {
                let u = step as f64 / density as f64;
                samples.push(segment[0].lerp(segment[1], u));
            }
        }
        samples.push(last);

        extend_x(&mut samples, &self.settings);
        samples
    }
}
