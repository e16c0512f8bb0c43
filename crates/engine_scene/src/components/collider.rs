//! Collider components.

use engine_component::{Component, Property, PropertyTable};
use engine_math::{Mat4, Vec3};

/// Collision shape in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Sphere {
        center: Vec3,
        radius: f64,
    },
    /// Rectangle spanned by the object's local X and Z axes.
    Plane {
        center: Vec3,
        normal: Vec3,
        width: f64,
        height: f64,
    },
}

/// Sphere centred on the object origin.
#[derive(Debug)]
pub struct SphereCollider {
    properties: PropertyTable,
}

impl Default for SphereCollider {
    fn default() -> Self {
        Self {
            properties: PropertyTable::new().with("Radius", Property::double(1.0)),
        }
    }
}

impl_component!(SphereCollider);

impl SphereCollider {
    /// The shape placed by `world`. The radius is scaled by the largest
    /// world axis scale.
    #[must_use]
    pub fn shape(&self, world: Mat4) -> ColliderShape {
        let (scale, _, translation) = world.to_scale_rotation_translation();
        ColliderShape::Sphere {
            center: translation,
            radius: self.properties.double_value("Radius") * f64::from(scale.abs().max_element()),
        }
    }
}

/// Finite plane through the object origin, facing local +Y.
#[derive(Debug)]
pub struct PlaneCollider {
    properties: PropertyTable,
}

impl Default for PlaneCollider {
    fn default() -> Self {
        Self {
            properties: PropertyTable::new()
                .with("Width", Property::double(1.0))
                .with("Height", Property::double(1.0)),
        }
    }
}

impl_component!(PlaneCollider);

impl PlaneCollider {
    /// The shape placed by `world`.
    #[must_use]
    pub fn shape(&self, world: Mat4) -> ColliderShape {
        ColliderShape::Plane {
            center: world.transform_point3(Vec3::ZERO),
            normal: world.transform_vector3(Vec3::Y).normalize_or_zero(),
            width: self.properties.double_value("Width"),
            height: self.properties.double_value("Height"),
        }
    }
}

/// Resolve any collider component, or `None` for other components.
#[must_use]
pub fn collider_shape(component: &dyn Component, world: Mat4) -> Option<ColliderShape> {
    if let Some(sphere) = component.downcast_ref::<SphereCollider>() {
        Some(sphere.shape(world))
    } else {
        component
            .downcast_ref::<PlaneCollider>()
            .map(|plane| plane.shape(world))
    }
}
