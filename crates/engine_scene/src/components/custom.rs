//! The `CustomProperties` component.

use engine_component::{Component, Property, PropertyTable};

/// A bag of user-defined animatable scalars.
///
/// Unlike the other built-in components it accepts properties it did not
/// declare, both through [`add_double`](Self::add_double) and when loading.
#[derive(Debug, Default)]
pub struct CustomProperties {
    properties: PropertyTable,
}

impl CustomProperties {
    /// Add a new double property.
    ///
    /// # Panics
    ///
    /// Panics if a property with this name already exists.
    pub fn add_double(&mut self, name: impl Into<String>, value: f64) {
        self.properties.add(name, Property::double(value));
    }
}

impl Component for CustomProperties {
    fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PropertyTable {
        &mut self.properties
    }

    fn accepts_dynamic_properties(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_dynamic_properties() {
        let mut custom = CustomProperties::default();
        assert!(custom.accepts_dynamic_properties());
        custom.add_double("Wobble", 0.5);
        assert_eq!(custom.properties().double_value("Wobble"), 0.5);
    }
}
