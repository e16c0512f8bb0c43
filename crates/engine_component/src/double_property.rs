//! Animatable scalar property.
//!
//! A [`DoubleProperty`] holds a plain `f64` until keyframes are written to
//! it. From then on it owns a [`CurveSampler`] and its value follows the
//! animation time pushed in by the owning scene:
//!
//! | keys | value                               |
//! |------|-------------------------------------|
//! | 0    | the raw scalar                      |
//! | 1    | that key's value, at every time     |
//! | ≥ 2  | the curve sampled at the current time |

use engine_anim::{AnimError, CurveSampler, CurveType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::PropertyError;
use crate::property::{PropertyFlags, TypedProperty};
use crate::signal::ConnectionId;

/// Resolved values closer than this do not count as a change.
pub const VALUE_EPSILON: f64 = 1e-9;

/// On-disk shape of a double property.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum DoubleRecord {
    Scalar(f64),
    Animated(AnimatedRecord),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AnimatedRecord {
    interpolation: String,
    #[serde(default)]
    wrap: bool,
    frame_times: Vec<f64>,
    frame_values: Vec<f64>,
}

/// A scalar property that can be driven by a keyframe curve.
#[derive(Debug)]
pub struct DoubleProperty {
    inner: TypedProperty<f64>,
    curve: Option<CurveSampler>,
    animation_time: f64,
    animation_length: f64,
}

impl DoubleProperty {
    /// Create an unanimated property holding `value`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            inner: TypedProperty::new(value),
            curve: None,
            animation_time: 0.0,
            animation_length: 0.0,
        }
    }

    /// The current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        *self.inner.get()
    }

    /// Write a value.
    ///
    /// On an animated property this keys the value instead: a single-key
    /// curve has that key updated, a multi-key curve gets a key at the
    /// current animation time. Returns `true` if the visible value changed.
    pub fn set(&mut self, value: f64) -> bool {
        let time = self.animation_time;
        match self.curve.as_mut() {
            Some(curve) if curve.len() == 1 => {
                let key_time = curve.keyframes()[0].time;
                curve.set_keyframe(key_time, value);
                self.resolve()
            }
            Some(curve) if curve.is_interpolating() => {
                curve.set_keyframe(time, value);
                self.resolve()
            }
            _ => self.inner.set(value),
        }
    }

    /// The editor flags.
    #[must_use]
    pub fn flags(&self) -> PropertyFlags {
        self.inner.flags()
    }

    /// Mutable access to the editor flags.
    pub fn flags_mut(&mut self) -> &mut PropertyFlags {
        self.inner.flags_mut()
    }

    /// Suppress (`true`) or restore (`false`) change notifications.
    pub fn block_signals(&mut self, block: bool) -> bool {
        self.inner.block_signals(block)
    }

    /// Number of effective value changes so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.inner.revision()
    }

    /// Register a change callback.
    pub fn on_changed(&mut self, slot: impl FnMut(&f64) + 'static) -> ConnectionId {
        self.inner.on_changed(slot)
    }

    /// Remove a change callback.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        self.inner.disconnect(id)
    }

    /// The animation curve, if one has been created.
    #[must_use]
    pub fn curve(&self) -> Option<&CurveSampler> {
        self.curve.as_ref()
    }

    /// Whether any keyframe is set.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.curve.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// The animation time last pushed in.
    #[must_use]
    pub fn animation_time(&self) -> f64 {
        self.animation_time
    }

    /// Insert or update the key at `time`, creating a linear curve if the
    /// property was not animated yet.
    pub fn set_keyframe(&mut self, time: f64, value: f64) -> bool {
        self.curve_or_insert().set_keyframe(time, value);
        self.resolve()
    }

    /// Remove the key at `time`.
    pub fn remove_keyframe(&mut self, time: f64) -> bool {
        let removed = self
            .curve
            .as_mut()
            .is_some_and(|curve| curve.remove_keyframe(time));
        if removed {
            self.resolve();
        }
        removed
    }

    /// Replace every key with the given parallel arrays.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::KeyframeCountMismatch`] if the arrays differ in
    /// length.
    pub fn set_keyframes(&mut self, times: &[f64], values: &[f64]) -> Result<(), AnimError> {
        self.curve_or_insert().set_keyframes(times, values)?;
        self.resolve();
        Ok(())
    }

    /// Change the interpolation, creating an empty curve if needed.
    pub fn set_curve_type(&mut self, curve_type: CurveType) -> bool {
        self.curve_or_insert().set_curve_type(curve_type);
        self.resolve()
    }

    /// Enable or disable periodic sampling, creating an empty curve if
    /// needed.
    pub fn set_wrap(&mut self, wrap: bool) -> bool {
        self.curve_or_insert().set_wrap(wrap);
        self.resolve()
    }

    /// Set the animation length (the wrap period).
    pub fn set_animation_length(&mut self, length: f64) -> bool {
        self.animation_length = length;
        match self.curve.as_mut() {
            Some(curve) => {
                curve.set_max_x(length);
                self.resolve()
            }
            None => false,
        }
    }

    /// Drop the curve. The current value becomes the raw scalar.
    pub fn clear_animation(&mut self) {
        self.curve = None;
    }

    /// Push a new animation time and re-resolve the value.
    ///
    /// Returns `true` (after exactly one change notification) if the value
    /// moved by more than [`VALUE_EPSILON`].
    pub fn set_animation_time(&mut self, time: f64) -> bool {
        self.animation_time = time;
        self.resolve()
    }

    fn curve_or_insert(&mut self) -> &mut CurveSampler {
        let length = self.animation_length;
        self.curve.get_or_insert_with(|| {
            let mut curve = CurveSampler::new(CurveType::Linear);
            curve.set_max_x(length);
            curve
        })
    }

    fn resolve(&mut self) -> bool {
        let resolved = match self.curve.as_ref() {
            Some(curve) if curve.len() == 1 => curve.keyframes()[0].value,
            Some(curve) if curve.is_interpolating() => curve.sample_at(self.animation_time),
            _ => return false,
        };
        if (resolved - self.get()).abs() <= VALUE_EPSILON {
            return false;
        }
        trace!(time = self.animation_time, value = resolved, "resolved animated value");
        self.inner.set(resolved)
    }

    pub(crate) fn to_value(&self, name: &str) -> Result<Value, PropertyError> {
        let record = match self.curve.as_ref() {
            Some(curve) if curve.is_interpolating() => DoubleRecord::Animated(AnimatedRecord {
                interpolation: curve.curve_type().name().to_string(),
                wrap: curve.wrap(),
                frame_times: curve.keyframes().iter().map(|k| k.time).collect(),
                frame_values: curve.keyframes().iter().map(|k| k.value).collect(),
            }),
            Some(curve) if curve.len() == 1 => DoubleRecord::Scalar(curve.keyframes()[0].value),
            _ => DoubleRecord::Scalar(self.get()),
        };
        serde_json::to_value(record).map_err(|source| PropertyError::Encode {
            name: name.to_string(),
            source,
        })
    }

    pub(crate) fn load_value(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        let record = DoubleRecord::deserialize(value).map_err(|source| PropertyError::Decode {
            name: name.to_string(),
            source,
        })?;
        let animation_error = |source| PropertyError::Animation {
            name: name.to_string(),
            source,
        };

        match record {
            DoubleRecord::Scalar(scalar) => {
                self.curve = None;
                self.inner.set(scalar);
            }
            DoubleRecord::Animated(record) => {
                let curve_type: CurveType = record.interpolation.parse().map_err(animation_error)?;
                let mut curve =
                    CurveSampler::from_keyframes(curve_type, &record.frame_times, &record.frame_values)
                        .map_err(animation_error)?;
                curve.set_max_x(self.animation_length);
                curve.set_wrap(record.wrap);
                self.curve = (!curve.is_empty()).then_some(curve);
                self.resolve();
            }
        }
        Ok(())
    }
}

impl Default for DoubleProperty {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use super::*;

    fn counted(prop: &mut DoubleProperty) -> Rc<RefCell<usize>> {
        let count = Rc::new(RefCell::new(0));
        let handle = Rc::clone(&count);
        prop.on_changed(move |_| *handle.borrow_mut() += 1);
        count
    }

    #[test]
    fn test_unanimated_time_change_is_silent() {
        let mut prop = DoubleProperty::new(4.0);
        let count = counted(&mut prop);
        assert!(!prop.set_animation_time(3.0));
        assert_eq!(prop.get(), 4.0);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_single_key_is_constant() {
        let mut prop = DoubleProperty::new(0.0);
        prop.set_keyframe(2.0, 7.0);
        assert_eq!(prop.get(), 7.0);
        for t in [0.0, 2.0, 50.0] {
            prop.set_animation_time(t);
            assert_eq!(prop.get(), 7.0);
        }
    }

    #[test]
    fn test_linear_curve_follows_time_with_one_notification() {
        let mut prop = DoubleProperty::new(0.0);
        prop.set_keyframes(&[0.0, 10.0], &[0.0, 10.0]).unwrap();
        let count = counted(&mut prop);

        assert!(prop.set_animation_time(5.0));
        assert!((prop.get() - 5.0).abs() < 1e-9);
        assert_eq!(*count.borrow(), 1);

        assert!(!prop.set_animation_time(5.0));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_set_on_animated_property_auto_keys() {
        let mut prop = DoubleProperty::new(0.0);
        prop.set_keyframes(&[0.0, 10.0], &[0.0, 10.0]).unwrap();
        prop.set_animation_time(4.0);
        prop.set(100.0);
        let curve = prop.curve().unwrap();
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.keyframes()[1].time, 4.0);
        assert!((prop.get() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_on_single_key_updates_that_key() {
        let mut prop = DoubleProperty::new(0.0);
        prop.set_keyframe(1.0, 2.0);
        prop.set_animation_time(8.0);
        prop.set(3.0);
        let curve = prop.curve().unwrap();
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.keyframes()[0].time, 1.0);
        assert_eq!(prop.get(), 3.0);
    }

    #[test]
    fn test_scalar_serialises_as_number() {
        let prop = DoubleProperty::new(1.5);
        assert_eq!(prop.to_value("x").unwrap(), json!(1.5));

        let mut keyed = DoubleProperty::new(0.0);
        keyed.set_keyframe(3.0, 9.0);
        assert_eq!(keyed.to_value("x").unwrap(), json!(9.0));
    }

    #[test]
    fn test_animated_serialisation_shape() {
        let mut prop = DoubleProperty::new(0.0);
        prop.set_keyframes(&[0.0, 1.0], &[2.0, 3.0]).unwrap();
        prop.set_curve_type(CurveType::BSpline);
        prop.set_wrap(true);
        assert_eq!(
            prop.to_value("x").unwrap(),
            json!({
                "Interpolation": "BSpline",
                "Wrap": true,
                "FrameTimes": [0.0, 1.0],
                "FrameValues": [2.0, 3.0],
            })
        );
    }

    #[test]
    fn test_load_animated_then_scalar() {
        let mut prop = DoubleProperty::new(0.0);
        prop.set_animation_length(10.0);
        prop.load_value(
            "x",
            &json!({
                "Interpolation": "Linear",
                "Wrap": false,
                "FrameTimes": [0.0, 10.0],
                "FrameValues": [0.0, 20.0],
            }),
        )
        .unwrap();
        assert!(prop.is_animated());
        prop.set_animation_time(2.5);
        assert!((prop.get() - 5.0).abs() < 1e-9);

        prop.load_value("x", &json!(4.0)).unwrap();
        assert!(!prop.is_animated());
        assert_eq!(prop.get(), 4.0);
    }

    #[test]
    fn test_bspline_wrap_round_trip() {
        let mut original = DoubleProperty::new(0.0);
        original.set_animation_length(10.0);
        original
            .set_keyframes(&[0.0, 4.0, 8.0], &[1.0, 5.0, -2.0])
            .unwrap();
        original.set_curve_type(CurveType::BSpline);
        original.set_wrap(true);
        let encoded = original.to_value("Position X").unwrap();

        let mut restored = DoubleProperty::new(0.0);
        restored.set_animation_length(10.0);
        restored.load_value("Position X", &encoded).unwrap();

        let (a, b) = (original.curve().unwrap(), restored.curve().unwrap());
        assert_eq!(b.curve_type(), CurveType::BSpline);
        assert!(b.wrap());
        assert_eq!(a.keyframes(), b.keyframes());
        for t in [0.0, 2.5, 9.9, 13.0] {
            original.set_animation_time(t);
            restored.set_animation_time(t);
            assert!((original.get() - restored.get()).abs() < 1e-9, "t = {t}");
        }
    }

    #[test]
    fn test_plain_set_does_not_create_curve() {
        let mut prop = DoubleProperty::new(0.0);
        prop.set(5.0);
        assert_eq!(prop.get(), 5.0);
        assert!(prop.curve().is_none());
        assert!(!prop.is_animated());
        prop.set_animation_time(3.0);
        assert_eq!(prop.get(), 5.0);
    }

    #[test]
    fn test_load_rejects_bad_animation_data() {
        let mut prop = DoubleProperty::new(0.0);
        let mismatch = prop
            .load_value(
                "Scale X",
                &json!({"Interpolation": "Linear", "FrameTimes": [0.0], "FrameValues": []}),
            )
            .unwrap_err();
        assert!(matches!(
            mismatch,
            PropertyError::Animation {
                source: AnimError::KeyframeCountMismatch { .. },
                ..
            }
        ));

        let unknown = prop
            .load_value(
                "Scale X",
                &json!({"Interpolation": "Hermite", "FrameTimes": [], "FrameValues": []}),
            )
            .unwrap_err();
        assert!(matches!(
            unknown,
            PropertyError::Animation {
                source: AnimError::UnknownCurveType(_),
                ..
            }
        ));

        assert!(matches!(
            prop.load_value("Scale X", &json!("big")),
            Err(PropertyError::Decode { .. })
        ));
    }

    #[test]
    fn test_blocked_signals_still_resolve() {
        let mut prop = DoubleProperty::new(0.0);
        prop.set_keyframes(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        let count = counted(&mut prop);
        prop.block_signals(true);
        prop.set_animation_time(0.5);
        assert!((prop.get() - 0.5).abs() < 1e-9);
        assert_eq!(*count.borrow(), 0);
    }
}
