//! The `EnvironmentMap` component.

use engine_asset::Cubemap;
use engine_component::{Component, Property, PropertyTable};

/// Face size of the cubemap a new environment map starts with.
pub const DEFAULT_FACE_SIZE: u32 = 16;

/// Image-based surroundings: a cubemap plus a brightness scale.
#[derive(Debug)]
pub struct EnvironmentMap {
    properties: PropertyTable,
    cubemap: Cubemap,
}

impl Default for EnvironmentMap {
    fn default() -> Self {
        Self {
            properties: PropertyTable::new().with("Intensity", Property::double(1.0)),
            cubemap: Cubemap::new("Environment", DEFAULT_FACE_SIZE),
        }
    }
}

impl_component!(EnvironmentMap);

impl EnvironmentMap {
    #[must_use]
    pub fn cubemap(&self) -> &Cubemap {
        &self.cubemap
    }

    pub fn cubemap_mut(&mut self) -> &mut Cubemap {
        &mut self.cubemap
    }

    #[must_use]
    pub fn intensity(&self) -> f64 {
        self.properties.double_value("Intensity")
    }
}
