//! Cubic Bezier evaluator and the shared De Casteljau blend.

use glam::DVec2;

use super::extend::fold_into_period;
use super::{CurveEvaluator, CurveSettings, extend_x, passthrough, resolve_density};

/// Evaluate the cubic Bezier segment `v` at parameter `u ∈ [0, 1]`.
///
/// Closed form `(1-u)³v0 + 3u(1-u)²v1 + 3u²(1-u)v2 + u³v3`; returns `v0`
/// exactly at `u = 0` and `v3` exactly at `u = 1`.
#[must_use]
pub fn de_casteljau(v: [DVec2; 4], u: f64) -> DVec2 {
    let s = 1.0 - u;
    v[0] * (s * s * s) + v[1] * (3.0 * u * s * s) + v[2] * (3.0 * u * u * s) + v[3] * (u * u * u)
}

/// Push `density` samples of segment `v`, excluding its end point.
pub(crate) fn sample_segment(out: &mut Vec<DVec2>, v: [DVec2; 4], density: usize) {
    for step in 0..density {
        out.push(de_casteljau(v, step as f64 / density as f64));
    }
}

/// Groups control points into cubic Bezier segments.
///
/// Segment `k` uses points `3k..=3k+3`, so neighbouring segments share an
/// end point. Points left over after the last full segment are appended as
/// they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct BezierEvaluator {
    settings: CurveSettings,
}

impl BezierEvaluator {
    /// Create a Bezier evaluator.
    #[must_use]
    pub fn new(settings: CurveSettings) -> Self {
        Self { settings }
    }
}

impl CurveEvaluator for BezierEvaluator {
    fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    fn evaluate_curve(&self, control_points: &[DVec2], density: usize) -> Vec<DVec2> {
        if control_points.len() <= 2 {
            return passthrough(control_points, &self.settings);
        }

        let mut points = control_points.to_vec();
        if self.settings.wraps() {
            let first = points[0];
            points.push(DVec2::new(first.x + self.settings.max_x, first.y));
        }

        let density = resolve_density(density);
        let mut samples = Vec::with_capacity(points.len() / 3 * density + 4);
        let mut start = 0;
        while start + 3 < points.len() {
            let segment = [
                points[start],
                points[start + 1],
                points[start + 2],
                points[start + 3],
            ];
            sample_segment(&mut samples, segment, density);
            start += 3;
        }
        // End point of the last segment plus any ungrouped trailing points.
        samples.extend_from_slice(&points[start..]);

        if self.settings.wraps() {
            samples = fold_into_period(samples, self.settings.max_x);
        }
        extend_x(&mut samples, &self.settings);
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_de_casteljau_endpoints_are_exact() {
        let cases = [
            [
                DVec2::new(0.1, -7.3),
                DVec2::new(1e6, 3.0),
                DVec2::new(-2.5, 0.0),
                DVec2::new(9.75, 1.0 / 3.0),
            ],
            [
                DVec2::new(-0.0, 1e-12),
                DVec2::new(4.0, 4.0),
                DVec2::new(5.0, -5.0),
                DVec2::new(123.456, -654.321),
            ],
        ];
        for v in cases {
            assert_eq!(de_casteljau(v, 0.0), v[0]);
            assert_eq!(de_casteljau(v, 1.0), v[3]);
        }
    }

    #[test]
    fn test_de_casteljau_midpoint() {
        let v = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
        ];
        let mid = de_casteljau(v, 0.5);
        assert!((mid - DVec2::new(0.5, 0.75)).length() < 1e-12);
    }

    #[test]
    fn test_segments_share_end_points() {
        let evaluator = BezierEvaluator::new(CurveSettings::new(6.0));
        let points: Vec<DVec2> = (0..7).map(|i| DVec2::new(i as f64, (i % 2) as f64)).collect();
        let samples = evaluator.evaluate_curve(&points, 10);
        // Two full segments of ten samples, then the final end point.
        assert_eq!(samples.len(), 21);
        assert_eq!(samples[0], points[0]);
        assert_eq!(samples[10], points[3]);
        assert_eq!(samples[20], points[6]);
    }

    #[test]
    fn test_trailing_points_are_appended_linearly() {
        let evaluator = BezierEvaluator::default();
        let points: Vec<DVec2> = (0..6).map(|i| DVec2::new(i as f64, 1.0)).collect();
        let samples = evaluator.evaluate_curve(&points, 5);
        assert_eq!(samples.len(), 5 + 3);
        assert_eq!(&samples[5..], &points[3..]);
    }

    #[test]
    fn test_three_points_degrade_to_verbatim() {
        let evaluator = BezierEvaluator::default();
        let points = [DVec2::new(0.0, 0.0), DVec2::new(1.0, 2.0), DVec2::new(2.0, 0.0)];
        assert_eq!(evaluator.evaluate_curve(&points, 0), points.to_vec());
    }

    #[test]
    fn test_wrap_closes_the_loop_within_one_period() {
        let settings = CurveSettings::new(4.0).with_wrap(true).with_extend_x(true);
        let evaluator = BezierEvaluator::new(settings);
        let points = [
            DVec2::new(0.5, 0.0),
            DVec2::new(1.5, 1.0),
            DVec2::new(2.5, 1.0),
        ];
        let samples = evaluator.evaluate_curve(&points, 8);
        assert!(samples.iter().all(|p| p.x >= 0.0 && p.x <= 4.0));
        assert_eq!(samples.first().map(|p| p.x), Some(0.0));
        assert_eq!(samples.last().map(|p| p.x), Some(4.0));
        assert_eq!(samples.first().map(|p| p.y), samples.last().map(|p| p.y));
    }
}
