//! Keyframe store with time-based evaluation.
//!
//! A [`CurveSampler`] keeps its keyframes sorted by time and rebuilds a
//! dense polyline through them whenever anything changes. Queries then
//! reduce to a linear interpolation inside that polyline, so
//! [`CurveSampler::sample_at`] takes `&self` and always returns the same
//! value for the same time.

use engine_math::{CurveSettings, DVec2};
use tracing::{trace, warn};

use crate::curve_type::CurveType;
use crate::error::AnimError;
use crate::keyframe::Keyframe;

/// Keys closer together than this are treated as the same key.
pub const TIME_EPSILON: f64 = 1e-6;

/// Keyframed source of truth for an animated scalar.
#[derive(Debug, Clone)]
pub struct CurveSampler {
    /// Keyframes, sorted by time.
    keyframes: Vec<Keyframe>,
    /// Interpolation used between keys.
    curve_type: CurveType,
    /// Periodic sampling with period `max_x`.
    wrap: bool,
    /// Animation length; set by the owning scene.
    max_x: f64,
    /// Samples per segment handed to the evaluator (0 = evaluator default).
    density: usize,
    /// Evaluated curve, kept in sync with the fields above.
    samples: Vec<DVec2>,
}

impl CurveSampler {
    /// Create an empty sampler with the given interpolation.
    #[must_use]
    pub fn new(curve_type: CurveType) -> Self {
        Self {
            keyframes: Vec::new(),
            curve_type,
            wrap: false,
            max_x: 0.0,
            density: 0,
            samples: Vec::new(),
        }
    }

    /// Create a sampler from parallel time / value arrays.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::KeyframeCountMismatch`] if the arrays differ in
    /// length.
    pub fn from_keyframes(
        curve_type: CurveType,
        times: &[f64],
        values: &[f64],
    ) -> Result<Self, AnimError> {
        let mut sampler = Self::new(curve_type);
        sampler.set_keyframes(times, values)?;
        Ok(sampler)
    }

    /// The keyframes, sorted by time.
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Number of keyframes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Returns `true` if there are no keyframes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Whether the curve actually animates (two or more keys).
    #[must_use]
    pub fn is_interpolating(&self) -> bool {
        self.keyframes.len() >= 2
    }

    /// The interpolation kind.
    #[must_use]
    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// Change the interpolation kind.
    pub fn set_curve_type(&mut self, curve_type: CurveType) {
        if self.curve_type != curve_type {
            self.curve_type = curve_type;
            self.rebuild();
        }
    }

    /// Whether sampling is periodic.
    #[must_use]
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Enable or disable periodic sampling.
    pub fn set_wrap(&mut self, wrap: bool) {
        if self.wrap != wrap {
            self.wrap = wrap;
            self.rebuild();
        }
    }

    /// The animation length (period when wrapping).
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Set the animation length.
    pub fn set_max_x(&mut self, max_x: f64) {
        if self.max_x != max_x {
            self.max_x = max_x;
            self.rebuild();
        }
    }

    /// Set the per-segment sample density (`0` selects the default).
    pub fn set_density(&mut self, density: usize) {
        if self.density != density {
            self.density = density;
            self.rebuild();
        }
    }

    /// The dense polyline currently used for sampling.
    #[must_use]
    pub fn samples(&self) -> &[DVec2] {
        &self.samples
    }

    /// Insert a keyframe at `time`, or overwrite the value of the key
    /// already there.
    pub fn set_keyframe(&mut self, time: f64, value: f64) {
        match self.find_key(time) {
            Ok(index) => self.keyframes[index].value = value,
            Err(index) => self.keyframes.insert(index, Keyframe::new(time, value)),
        }
        self.rebuild();
    }

    /// Remove the keyframe at `time`.
    ///
    /// Returns `true` if a key was found and removed.
    pub fn remove_keyframe(&mut self, time: f64) -> bool {
        match self.find_key(time) {
            Ok(index) => {
                self.keyframes.remove(index);
                self.rebuild();
                true
            }
            Err(_) => false,
        }
    }

    /// Replace every keyframe with the given parallel arrays.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::KeyframeCountMismatch`] if the arrays differ in
    /// length; the sampler is left unchanged in that case.
    pub fn set_keyframes(&mut self, times: &[f64], values: &[f64]) -> Result<(), AnimError> {
        if times.len() != values.len() {
            return Err(AnimError::KeyframeCountMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        self.keyframes = times
            .iter()
            .zip(values)
            .map(|(&time, &value)| Keyframe::new(time, value))
            .collect();
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        self.rebuild();
        Ok(())
    }

    /// Remove every keyframe.
    pub fn clear(&mut self) {
        self.keyframes.clear();
        self.rebuild();
    }

    /// Evaluate the curve at time `t`.
    ///
    /// With no keys the result is `0.0`; with one key it is that key's
    /// value. Times before the first or after the last sample hold the end
    /// values, unless wrapping is on, in which case `t` is first reduced
    /// into `[0, max_x)`.
    #[must_use]
    pub fn sample_at(&self, t: f64) -> f64 {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return 0.0;
        };
        let t = if self.wrap && self.max_x > 0.0 {
            t.rem_euclid(self.max_x)
        } else {
            t
        };

        if t <= first.x {
            return first.y;
        }
        if t >= last.x {
            return last.y;
        }

        let Some(index) = self.samples.iter().position(|p| p.x >= t) else {
            return last.y;
        };
        let a = self.samples[index - 1];
        let b = self.samples[index];
        let dx = b.x - a.x;
        if dx.abs() <= f64::EPSILON {
            b.y
        } else {
            a.y + (b.y - a.y) * ((t - a.x) / dx)
        }
    }

    fn find_key(&self, time: f64) -> Result<usize, usize> {
        let index = self.keyframes.partition_point(|k| k.time < time - TIME_EPSILON);
        match self.keyframes.get(index) {
            Some(key) if (key.time - time).abs() <= TIME_EPSILON => Ok(index),
            _ => Err(index),
        }
    }

    fn rebuild(&mut self) {
        if !self.curve_type.has_evaluator() && self.is_interpolating() {
            warn!(
                curve_type = %self.curve_type,
                "curve type has no evaluator, falling back to linear"
            );
        }
        let settings = CurveSettings::new(self.max_x)
            .with_wrap(self.wrap)
            .with_extend_x(true);
        let points: Vec<DVec2> = self.keyframes.iter().map(Keyframe::as_point).collect();
        self.samples = self
            .curve_type
            .evaluator(settings)
            .evaluate_curve(&points, self.density);
        trace!(
            keys = self.keyframes.len(),
            samples = self.samples.len(),
            "rebuilt curve samples"
        );
    }
}

impl Default for CurveSampler {
    fn default() -> Self {
        Self::new(CurveType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(times: &[f64], values: &[f64]) -> CurveSampler {
        CurveSampler::from_keyframes(CurveType::Linear, times, values).unwrap()
    }

    #[test]
    fn test_empty_sampler_returns_zero() {
        let sampler = CurveSampler::default();
        assert!(sampler.is_empty());
        assert!(!sampler.is_interpolating());
        assert_eq!(sampler.sample_at(3.0), 0.0);
    }

    #[test]
    fn test_single_key_is_static() {
        let sampler = linear(&[2.0], &[3.0]);
        assert!(!sampler.is_interpolating());
        for t in [-5.0, 0.0, 2.0, 100.0] {
            assert_eq!(sampler.sample_at(t), 3.0);
        }
    }

    #[test]
    fn test_linear_midpoint() {
        let sampler = linear(&[0.0, 10.0], &[0.0, 10.0]);
        assert!(sampler.is_interpolating());
        assert!((sampler.sample_at(5.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_is_idempotent() {
        let mut sampler = linear(&[0.0, 2.0, 5.0, 9.0], &[1.0, -1.0, 4.0, 0.0]);
        sampler.set_curve_type(CurveType::BSpline);
        let first = sampler.sample_at(3.3);
        let second = sampler.sample_at(3.3);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_holds_end_values_outside_range() {
        let mut sampler = linear(&[1.0, 4.0], &[2.0, 8.0]);
        sampler.set_max_x(10.0);
        assert_eq!(sampler.sample_at(0.0), 2.0);
        assert_eq!(sampler.sample_at(-3.0), 2.0);
        assert_eq!(sampler.sample_at(7.0), 8.0);
    }

    #[test]
    fn test_wrap_is_periodic() {
        let mut sampler = linear(&[0.0, 5.0], &[0.0, 10.0]);
        sampler.set_max_x(10.0);
        sampler.set_wrap(true);
        let base = sampler.sample_at(2.5);
        assert!((base - 5.0).abs() < 1e-9);
        assert!((sampler.sample_at(12.5) - base).abs() < 1e-9);
        assert!((sampler.sample_at(-7.5) - base).abs() < 1e-9);
        // Between the last key and the period end the curve returns to the
        // first key's value.
        assert!((sampler.sample_at(7.5) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_keyframe_inserts_and_updates() {
        let mut sampler = CurveSampler::default();
        sampler.set_keyframe(5.0, 1.0);
        sampler.set_keyframe(1.0, 2.0);
        sampler.set_keyframe(5.0 + TIME_EPSILON / 2.0, 7.0);
        let times: Vec<f64> = sampler.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![1.0, 5.0]);
        assert_eq!(sampler.keyframes()[1].value, 7.0);
    }

    #[test]
    fn test_remove_keyframe() {
        let mut sampler = linear(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]);
        assert!(sampler.remove_keyframe(1.0));
        assert!(!sampler.remove_keyframe(1.0));
        assert_eq!(sampler.len(), 2);
    }

    #[test]
    fn test_set_keyframes_sorts_and_rejects_mismatch() {
        let mut sampler = CurveSampler::default();
        sampler.set_keyframes(&[3.0, 1.0, 2.0], &[30.0, 10.0, 20.0]).unwrap();
        let values: Vec<f64> = sampler.keyframes().iter().map(|k| k.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);

        let err = sampler.set_keyframes(&[1.0], &[]).unwrap_err();
        assert!(matches!(
            err,
            AnimError::KeyframeCountMismatch { times: 1, values: 0 }
        ));
        assert_eq!(sampler.len(), 3);
    }

    #[test]
    fn test_catmull_rom_samples_like_linear() {
        let mut sampler = linear(&[0.0, 4.0, 8.0], &[0.0, 4.0, 0.0]);
        let linear_value = sampler.sample_at(6.0);
        sampler.set_curve_type(CurveType::CatmullRom);
        assert_eq!(sampler.sample_at(6.0), linear_value);
    }

    #[test]
    fn test_bezier_passes_through_segment_ends() {
        let mut sampler = CurveSampler::new(CurveType::Bezier);
        sampler
            .set_keyframes(&[0.0, 1.0, 2.0, 3.0], &[0.0, 5.0, 5.0, 0.0])
            .unwrap();
        assert!((sampler.sample_at(0.0)).abs() < 1e-9);
        assert!((sampler.sample_at(3.0)).abs() < 1e-9);
        assert!(sampler.sample_at(1.5) > 3.0);
    }
}
