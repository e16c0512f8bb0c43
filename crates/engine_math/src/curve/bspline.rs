//! Uniform cubic B-spline evaluator.

use glam::DVec2;

use super::bezier::sample_segment;
use super::{CurveEvaluator, CurveSettings, extend_x, passthrough, resolve_density};

/// Approximates the control points with a uniform cubic B-spline.
///
/// Every window of four consecutive points is converted into an equivalent
/// Bezier segment and sampled with [`de_casteljau`](super::de_casteljau).
/// Without wrapping the ends are clamped by repeating the first and last
/// points; with wrapping, phantom points one period away close the loop and
/// the output is clipped to `[0, max_x]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BSplineEvaluator {
    settings: CurveSettings,
}

impl BSplineEvaluator {
    /// Create a B-spline evaluator.
    #[must_use]
    pub fn new(settings: CurveSettings) -> Self {
        Self { settings }
    }

    fn padded_points(&self, control_points: &[DVec2]) -> Vec<DVec2> {
        let n = control_points.len();
        let first = control_points[0];
        let last = control_points[n - 1];
        let mut points = Vec::with_capacity(n + 4);
        if self.settings.wraps() {
            let period = DVec2::new(self.settings.max_x, 0.0);
            points.push(control_points[n - 2] - period);
            points.push(last - period);
            points.extend_from_slice(control_points);
            points.push(first + period);
            points.push(control_points[1] + period);
        } else {
            points.push(first);
            points.push(first);
            points.extend_from_slice(control_points);
            points.push(last);
            points.push(last);
        }
        points
    }
}

/// Convert one B-spline window into Bezier control points.
///
/// The handle x coordinates are clamped so a segment never folds back past
/// its own end points.
fn to_bezier(b: &[DVec2]) -> [DVec2; 4] {
    let v0 = (b[0] + 4.0 * b[1] + b[2]) / 6.0;
    let mut v1 = (2.0 * b[1] + b[2]) / 3.0;
    let mut v2 = (b[1] + 2.0 * b[2]) / 3.0;
    let v3 = (b[1] + 4.0 * b[2] + b[3]) / 6.0;
    v1.x = v1.x.min(v3.x);
    v2.x = v2.x.max(v0.x);
    [v0, v1, v2, v3]
}

impl CurveEvaluator for BSplineEvaluator {
    fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    fn evaluate_curve(&self, control_points: &[DVec2], density: usize) -> Vec<DVec2> {
        if control_points.len() <= 2 {
            return passthrough(control_points, &self.settings);
        }

        let density = resolve_density(density);
        let points = self.padded_points(control_points);
        let mut samples = Vec::with_capacity((points.len() - 3) * density + 1);
        let mut end = None;
        for window in points.windows(4) {
            let segment = to_bezier(window);
            sample_segment(&mut samples, segment, density);
            end = Some(segment[3]);
        }
        samples.extend(end);

        if self.settings.wraps() {
            let max_x = self.settings.max_x;
            samples.retain(|p| p.x >= 0.0 && p.x <= max_x);
            if samples.is_empty() {
                return passthrough(control_points, &self.settings);
            }
        }
        extend_x(&mut samples, &self.settings);
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_ends_interpolate_first_and_last_points() {
        let evaluator = BSplineEvaluator::default();
        let points = [
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 4.0),
            DVec2::new(2.0, -2.0),
            DVec2::new(3.0, 5.0),
        ];
        let samples = evaluator.evaluate_curve(&points, 12);
        let first = samples.first().copied().unwrap_or_default();
        let last = samples.last().copied().unwrap_or_default();
        assert!((first - points[0]).length() < 1e-12);
        assert!((last - points[3]).length() < 1e-12);
        // n + 4 padded points give n + 1 windows.
        assert_eq!(samples.len(), 5 * 12 + 1);
    }

    #[test]
    fn test_bezier_conversion_weights() {
        let window = [
            DVec2::new(0.0, 0.0),
            DVec2::new(6.0, 6.0),
            DVec2::new(12.0, 0.0),
            DVec2::new(18.0, 6.0),
        ];
        let [v0, v1, v2, v3] = to_bezier(&window);
        assert!((v0 - DVec2::new(6.0, 4.0)).length() < 1e-12);
        assert!((v1 - DVec2::new(8.0, 4.0)).length() < 1e-12);
        assert!((v2 - DVec2::new(10.0, 2.0)).length() < 1e-12);
        assert!((v3 - DVec2::new(12.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_handles_are_clamped_to_segment_span() {
        // A control point far to the left pulls the first handle behind v0.
        let window = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(-30.0, 0.0),
            DVec2::new(2.0, 0.0),
        ];
        let [v0, v1, v2, v3] = to_bezier(&window);
        assert!(v1.x <= v3.x);
        assert!(v2.x >= v0.x);
    }

    #[test]
    fn test_wrapped_curve_stays_within_period() {
        let settings = CurveSettings::new(10.0).with_wrap(true).with_extend_x(true);
        let evaluator = BSplineEvaluator::new(settings);
        let points = [
            DVec2::new(1.0, 0.0),
            DVec2::new(4.0, 3.0),
            DVec2::new(7.0, -1.0),
            DVec2::new(9.0, 2.0),
        ];
        let samples = evaluator.evaluate_curve(&points, 10);
        assert!(samples.iter().all(|p| p.x >= 0.0 && p.x <= 10.0));
        let first = samples.first().copied().unwrap_or_default();
        let last = samples.last().copied().unwrap_or_default();
        assert_eq!(first.x, 0.0);
        assert_eq!(last.x, 10.0);
        assert_eq!(first.y, last.y);
    }
}
