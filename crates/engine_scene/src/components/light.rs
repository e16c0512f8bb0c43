//! Light components.

use engine_component::{Component, Property, PropertyTable};
use engine_math::{Mat4, Vec3};

/// Distance falloff `1 / (constant + linear·d + quadratic·d²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f64,
    pub linear: f64,
    pub quadratic: f64,
}

impl Attenuation {
    /// Intensity factor at distance `d`.
    #[must_use]
    pub fn factor(&self, d: f64) -> f64 {
        let denominator = self.constant + self.linear * d + self.quadratic * d * d;
        if denominator <= f64::EPSILON {
            1.0
        } else {
            1.0 / denominator
        }
    }
}

/// Per-kind light parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Point { attenuation: Attenuation },
    Directional,
    Area {
        attenuation: Attenuation,
        width: f64,
        height: f64,
    },
}

/// A light resolved for rendering: kind, shared colour and intensity, and
/// placement in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightInfo {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f64,
    /// World-space position of the light's origin.
    pub position: Vec3,
    /// World-space emission direction (local -Z).
    pub direction: Vec3,
}

fn base_properties() -> PropertyTable {
    PropertyTable::new()
        .with("Color", Property::color(Vec3::ONE))
        .with("Intensity", Property::double(1.0))
}

fn with_attenuation(table: PropertyTable) -> PropertyTable {
    table
        .with("Constant Attenuation", Property::double(1.0))
        .with("Linear Attenuation", Property::double(0.0))
        .with("Quadratic Attenuation", Property::double(0.0))
}

fn attenuation(table: &PropertyTable) -> Attenuation {
    Attenuation {
        constant: table.double_value("Constant Attenuation"),
        linear: table.double_value("Linear Attenuation"),
        quadratic: table.double_value("Quadratic Attenuation"),
    }
}

fn resolve(table: &PropertyTable, kind: LightKind, world: Mat4) -> LightInfo {
    LightInfo {
        kind,
        color: table
            .get("Color")
            .and_then(Property::as_vec3)
            .unwrap_or(Vec3::ONE),
        intensity: table.double_value("Intensity"),
        position: world.transform_point3(Vec3::ZERO),
        direction: world.transform_vector3(Vec3::NEG_Z).normalize_or_zero(),
    }
}

/// Omnidirectional light with distance attenuation.
#[derive(Debug)]
pub struct PointLight {
    properties: PropertyTable,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            properties: with_attenuation(base_properties()),
        }
    }
}

impl_component!(PointLight);

impl PointLight {
    /// Resolve against the owning object's world matrix.
    #[must_use]
    pub fn info(&self, world: Mat4) -> LightInfo {
        let kind = LightKind::Point {
            attenuation: attenuation(&self.properties),
        };
        resolve(&self.properties, kind, world)
    }
}

/// Parallel light along the object's -Z axis.
#[derive(Debug)]
pub struct DirectionalLight {
    properties: PropertyTable,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            properties: base_properties(),
        }
    }
}

impl_component!(DirectionalLight);

impl DirectionalLight {
    /// Resolve against the owning object's world matrix.
    #[must_use]
    pub fn info(&self, world: Mat4) -> LightInfo {
        resolve(&self.properties, LightKind::Directional, world)
    }
}

/// Rectangular emitter facing the object's -Z axis.
#[derive(Debug)]
pub struct AreaLight {
    properties: PropertyTable,
}

impl Default for AreaLight {
    fn default() -> Self {
        Self {
            properties: with_attenuation(base_properties())
                .with("Width", Property::double(1.0))
                .with("Height", Property::double(1.0)),
        }
    }
}

impl_component!(AreaLight);

impl AreaLight {
    /// Resolve against the owning object's world matrix.
    #[must_use]
    pub fn info(&self, world: Mat4) -> LightInfo {
        let kind = LightKind::Area {
            attenuation: attenuation(&self.properties),
            width: self.properties.double_value("Width"),
            height: self.properties.double_value("Height"),
        };
        resolve(&self.properties, kind, world)
    }
}

/// Resolve any light component, or `None` for other components.
#[must_use]
pub fn light_info(component: &dyn Component, world: Mat4) -> Option<LightInfo> {
    if let Some(light) = component.downcast_ref::<PointLight>() {
        Some(light.info(world))
    } else if let Some(light) = component.downcast_ref::<DirectionalLight>() {
        Some(light.info(world))
    } else {
        component
            .downcast_ref::<AreaLight>()
            .map(|light| light.info(world))
    }
}
