//! Insertion-ordered property storage.

use serde_json::{Map, Value};
use tracing::warn;

use crate::double_property::DoubleProperty;
use crate::error::PropertyError;
use crate::property::Property;

/// Named properties in the order they were added.
///
/// Names are unique within a table. The serialised map keeps insertion
/// order, so files list properties the way components declare them.
#[derive(Debug, Default)]
pub struct PropertyTable {
    entries: Vec<(String, Property)>,
}

impl PropertyTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property.
    ///
    /// # Panics
    ///
    /// Panics if a property with the same name already exists.
    pub fn add(&mut self, name: impl Into<String>, property: Property) -> &mut Property {
        let name = name.into();
        assert!(
            !self.contains(&name),
            "duplicate property name {name:?}"
        );
        self.entries.push((name, property));
        let index = self.entries.len() - 1;
        &mut self.entries[index].1
    }

    /// Builder form of [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, property: Property) -> Self {
        self.add(name, property);
        self
    }

    /// Whether a property with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a property by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    /// Look up a property by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    /// Look up a double property by name.
    #[must_use]
    pub fn double(&self, name: &str) -> Option<&DoubleProperty> {
        self.get(name).and_then(Property::as_double)
    }

    /// Look up a double property by name for mutation.
    pub fn double_mut(&mut self, name: &str) -> Option<&mut DoubleProperty> {
        self.get_mut(name).and_then(Property::as_double_mut)
    }

    /// The current value of a double property, or `0.0` if there is none.
    #[must_use]
    pub fn double_value(&self, name: &str) -> f64 {
        self.double(name).map_or(0.0, DoubleProperty::get)
    }

    /// The current value of an int property, or `0` if there is none.
    #[must_use]
    pub fn int_value(&self, name: &str) -> i64 {
        self.get(name).and_then(Property::as_int).unwrap_or(0)
    }

    /// The current value of a bool property, or `false` if there is none.
    #[must_use]
    pub fn bool_value(&self, name: &str) -> bool {
        self.get(name).and_then(Property::as_bool).unwrap_or(false)
    }

    /// The current value of a text property, or `""` if there is none.
    #[must_use]
    pub fn text_value(&self, name: &str) -> &str {
        self.get(name).and_then(Property::as_text).unwrap_or("")
    }

    /// Iterate `(name, property)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Iterate `(name, property)` pairs mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Property)> {
        self.entries.iter_mut().map(|(n, p)| (n.as_str(), p))
    }

    /// Sum of every property's revision.
    ///
    /// Moves forward whenever any property changes, so derived data can
    /// remember the revision it was built from.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.entries.iter().map(|(_, p)| p.revision()).sum()
    }

    /// Push an animation time into every double property.
    ///
    /// Returns how many values changed.
    pub fn set_animation_time(&mut self, time: f64) -> usize {
        self.doubles_mut()
            .map(|p| p.set_animation_time(time))
            .filter(|&changed| changed)
            .count()
    }

    /// Set the animation length on every double property.
    pub fn set_animation_length(&mut self, length: f64) {
        for p in self.doubles_mut() {
            p.set_animation_length(length);
        }
    }

    /// Encode every property into an ordered map.
    ///
    /// # Errors
    ///
    /// Returns the first [`PropertyError`] raised by a property.
    pub fn to_map(&self) -> Result<Map<String, Value>, PropertyError> {
        let mut map = Map::new();
        for (name, property) in &self.entries {
            map.insert(name.clone(), property.to_value(name)?);
        }
        Ok(map)
    }

    /// Load values from a map written by [`to_map`](Self::to_map).
    ///
    /// Keys without a matching property are skipped with a warning, unless
    /// `accept_dynamic` is set, in which case numeric and animated values
    /// create new double properties.
    ///
    /// # Errors
    ///
    /// Returns the first [`PropertyError`] raised by a property.
    pub fn load_map(
        &mut self,
        map: &Map<String, Value>,
        accept_dynamic: bool,
    ) -> Result<(), PropertyError> {
        for (name, value) in map {
            if let Some(property) = self.get_mut(name) {
                property.load_value(name, value)?;
                continue;
            }
            if accept_dynamic {
                let mut property = Property::double(0.0);
                property.load_value(name, value)?;
                self.add(name.clone(), property);
            } else {
                warn!(property = %name, "ignoring unknown property");
            }
        }
        Ok(())
    }

    fn doubles_mut(&mut self) -> impl Iterator<Item = &mut DoubleProperty> {
        self.entries
            .iter_mut()
            .filter_map(|(_, p)| p.as_double_mut())
    }
}
