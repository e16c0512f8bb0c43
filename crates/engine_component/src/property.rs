//! Typed, observable property values.
//!
//! [`TypedProperty<T>`] is the building block: a value plus editor flags, a
//! revision counter and a [`Signal`] fired after every effective change.
//! [`Property`] is the closed set of property kinds a component can own.

use engine_math::Vec3;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::double_property::DoubleProperty;
use crate::error::PropertyError;
use crate::signal::{ConnectionId, Signal};

/// Editor-facing flags carried by every property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyFlags {
    /// Shown read-only in the editor. Programmatic writes still apply.
    pub locked: bool,
    /// Not shown in the editor at all.
    pub hidden: bool,
    /// Change notifications are delivered. When `false`, changes still
    /// apply but no callback runs.
    pub allow_signals: bool,
}

impl Default for PropertyFlags {
    fn default() -> Self {
        Self {
            locked: false,
            hidden: false,
            allow_signals: true,
        }
    }
}

/// Value types a [`TypedProperty`] can hold.
pub trait PropertyData: Clone + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned + 'static {}

impl<T> PropertyData for T where
    T: Clone + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned + 'static
{
}

/// A value of type `T` with flags, revision tracking and change signal.
#[derive(Debug)]
pub struct TypedProperty<T: PropertyData> {
    value: T,
    flags: PropertyFlags,
    revision: u64,
    changed: Signal<T>,
}

impl<T: PropertyData> TypedProperty<T> {
    /// Create a property holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            flags: PropertyFlags::default(),
            revision: 0,
            changed: Signal::new(),
        }
    }

    /// The current value.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value.
    ///
    /// Setting a value equal to the current one does nothing. Otherwise the
    /// value is stored, the revision advances, and then (if signals are
    /// allowed) every connected callback sees the new value.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.revision += 1;
        if self.flags.allow_signals {
            self.changed.emit(&self.value);
        }
        true
    }

    /// The editor flags.
    #[must_use]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Mutable access to the editor flags.
    pub fn flags_mut(&mut self) -> &mut PropertyFlags {
        &mut self.flags
    }

    /// Suppress (`true`) or restore (`false`) change notifications.
    ///
    /// Returns whether signals were blocked before the call.
    pub fn block_signals(&mut self, block: bool) -> bool {
        let was_blocked = !self.flags.allow_signals;
        self.flags.allow_signals = !block;
        was_blocked
    }

    /// Number of effective changes since construction.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a change callback.
    pub fn on_changed(&mut self, slot: impl FnMut(&T) + 'static) -> ConnectionId {
        self.changed.connect(slot)
    }

    /// Remove a change callback.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }

    pub(crate) fn to_value(&self, name: &str) -> Result<Value, PropertyError> {
        serde_json::to_value(&self.value).map_err(|source| PropertyError::Encode {
            name: name.to_string(),
            source,
        })
    }

    pub(crate) fn load_value(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        let decoded = T::deserialize(value).map_err(|source| PropertyError::Decode {
            name: name.to_string(),
            source,
        })?;
        self.set(decoded);
        Ok(())
    }
}

impl<T: PropertyData + Default> Default for TypedProperty<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Every kind of property a component can own.
#[derive(Debug)]
pub enum Property {
    /// Animatable scalar.
    Double(DoubleProperty),
    /// Integer setting (subdivision counts, levels of detail).
    Int(TypedProperty<i64>),
    /// Toggle.
    Bool(TypedProperty<bool>),
    /// Free text, also used for file paths.
    Text(TypedProperty<String>),
    /// Linear RGB colour.
    Color(TypedProperty<Vec3>),
    /// 3D vector.
    Vector(TypedProperty<Vec3>),
}

impl Property {
    /// Shorthand for a new [`Property::Double`].
    #[must_use]
    pub fn double(value: f64) -> Self {
        Property::Double(DoubleProperty::new(value))
    }

    /// Shorthand for a new [`Property::Int`].
    #[must_use]
    pub fn int(value: i64) -> Self {
        Property::Int(TypedProperty::new(value))
    }

    /// Shorthand for a new [`Property::Bool`].
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Property::Bool(TypedProperty::new(value))
    }

    /// Shorthand for a new [`Property::Text`].
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Property::Text(TypedProperty::new(value.into()))
    }

    /// Shorthand for a new [`Property::Color`].
    #[must_use]
    pub fn color(value: Vec3) -> Self {
        Property::Color(TypedProperty::new(value))
    }

    /// Shorthand for a new [`Property::Vector`].
    #[must_use]
    pub fn vector(value: Vec3) -> Self {
        Property::Vector(TypedProperty::new(value))
    }

    /// A short name for the property kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Property::Double(_) => "double",
            Property::Int(_) => "int",
            Property::Bool(_) => "bool",
            Property::Text(_) => "text",
            Property::Color(_) => "color",
            Property::Vector(_) => "vector",
        }
    }

    /// The editor flags.
    #[must_use]
    pub fn flags(&self) -> PropertyFlags {
        match self {
            Property::Double(p) => p.flags(),
            Property::Int(p) => p.flags(),
            Property::Bool(p) => p.flags(),
            Property::Text(p) => p.flags(),
            Property::Color(p) | Property::Vector(p) => p.flags(),
        }
    }

    /// Mutable access to the editor flags.
    pub fn flags_mut(&mut self) -> &mut PropertyFlags {
        match self {
            Property::Double(p) => p.flags_mut(),
            Property::Int(p) => p.flags_mut(),
            Property::Bool(p) => p.flags_mut(),
            Property::Text(p) => p.flags_mut(),
            Property::Color(p) | Property::Vector(p) => p.flags_mut(),
        }
    }

    /// Number of effective value changes so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        match self {
            Property::Double(p) => p.revision(),
            Property::Int(p) => p.revision(),
            Property::Bool(p) => p.revision(),
            Property::Text(p) => p.revision(),
            Property::Color(p) | Property::Vector(p) => p.revision(),
        }
    }

    /// Encode the value in its on-disk shape.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Encode`] if serialisation fails.
    pub fn to_value(&self, name: &str) -> Result<Value, PropertyError> {
        match self {
            Property::Double(p) => p.to_value(name),
            Property::Int(p) => p.to_value(name),
            Property::Bool(p) => p.to_value(name),
            Property::Text(p) => p.to_value(name),
            Property::Color(p) | Property::Vector(p) => p.to_value(name),
        }
    }

    /// Replace the value with one decoded from its on-disk shape.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Decode`] if `value` has the wrong shape, or
    /// [`PropertyError::Animation`] for inconsistent animation data.
    pub fn load_value(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        match self {
            Property::Double(p) => p.load_value(name, value),
            Property::Int(p) => p.load_value(name, value),
            Property::Bool(p) => p.load_value(name, value),
            Property::Text(p) => p.load_value(name, value),
            Property::Color(p) | Property::Vector(p) => p.load_value(name, value),
        }
    }

    /// The animatable scalar, if this is a double property.
    #[must_use]
    pub fn as_double(&self) -> Option<&DoubleProperty> {
        match self {
            Property::Double(p) => Some(p),
            _ => None,
        }
    }

    /// Mutable animatable scalar, if this is a double property.
    pub fn as_double_mut(&mut self) -> Option<&mut DoubleProperty> {
        match self {
            Property::Double(p) => Some(p),
            _ => None,
        }
    }

    /// The integer, if this is an int property.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Property::Int(p) => Some(*p.get()),
            _ => None,
        }
    }

    /// The flag, if this is a bool property.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Property::Bool(p) => Some(*p.get()),
            _ => None,
        }
    }

    /// The text, if this is a text property.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Property::Text(p) => Some(p.get()),
            _ => None,
        }
    }

    /// The vector, if this is a colour or vector property.
    #[must_use]
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Property::Color(p) | Property::Vector(p) => Some(*p.get()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_set_emits_once_per_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut prop = TypedProperty::new(1_i64);
        {
            let seen = Rc::clone(&seen);
            prop.on_changed(move |v| seen.borrow_mut().push(*v));
        }
        assert!(prop.set(2));
        assert!(!prop.set(2));
        assert!(prop.set(3));
        assert_eq!(*seen.borrow(), vec![2, 3]);
        assert_eq!(prop.revision(), 2);
    }

    #[test]
    fn test_blocked_signals_still_apply_value() {
        let seen = Rc::new(RefCell::new(0));
        let mut prop = TypedProperty::new(false);
        {
            let seen = Rc::clone(&seen);
            prop.on_changed(move |_| *seen.borrow_mut() += 1);
        }
        assert!(!prop.block_signals(true));
        prop.set(true);
        assert!(*prop.get());
        assert_eq!(*seen.borrow(), 0);
        assert!(prop.block_signals(false));
        prop.set(false);
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn test_locked_is_advisory() {
        let mut prop = TypedProperty::new(String::from("a"));
        prop.flags_mut().locked = true;
        assert!(prop.set("b".to_string()));
        assert_eq!(prop.get(), "b");
    }

    #[test]
    fn test_value_roundtrip_per_kind() {
        let props = [
            Property::int(-4),
            Property::bool(true),
            Property::text("curve.txt"),
            Property::color(Vec3::new(1.0, 0.5, 0.25)),
            Property::vector(Vec3::new(-1.0, 2.0, 3.0)),
        ];
        for prop in props {
            let value = prop.to_value("p").unwrap();
            let mut restored = match &prop {
                Property::Int(_) => Property::int(0),
                Property::Bool(_) => Property::bool(false),
                Property::Text(_) => Property::text(""),
                Property::Color(_) => Property::color(Vec3::ZERO),
                Property::Vector(_) => Property::vector(Vec3::ZERO),
                Property::Double(_) => Property::double(0.0),
            };
            restored.load_value("p", &value).unwrap();
            assert_eq!(restored.to_value("p").unwrap(), value);
        }
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let mut prop = Property::int(1);
        let err = prop.load_value("Subdivisions", &Value::from("many")).unwrap_err();
        assert!(matches!(err, PropertyError::Decode { ref name, .. } if name == "Subdivisions"));
        assert_eq!(prop.as_int(), Some(1));
    }
}
