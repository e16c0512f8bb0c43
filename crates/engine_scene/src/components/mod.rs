//! Built-in component types.
//!
//! [`register_builtin`] lists every type shipped with the editor core;
//! there is no self-registration.

use std::rc::Rc;

use engine_component::{Component, ComponentMeta, ComponentRegistry};

macro_rules! impl_component {
    ($ty:ty) => {
        impl Component for $ty {
            fn properties(&self) -> &PropertyTable {
                &self.properties
            }

            fn properties_mut(&mut self) -> &mut PropertyTable {
                &mut self.properties
            }
        }
    };
}

pub mod collider;
pub mod custom;
pub mod environment;
pub mod geometry;
pub mod light;
pub mod transform;

pub use collider::{ColliderShape, PlaneCollider, SphereCollider, collider_shape};
pub use custom::CustomProperties;
pub use environment::EnvironmentMap;
pub use geometry::{
    Geometry, MAX_SUBDIVISIONS, Plane, SurfaceOfRevolution, TriangleFace, TriangleMesh,
};
pub use light::{
    AreaLight, Attenuation, DirectionalLight, LightInfo, LightKind, PointLight, light_info,
};
pub use transform::Transform;

/// Family name of light components.
pub const LIGHT_BASE: &str = "Light";
/// Family name of collider components.
pub const COLLIDER_BASE: &str = "Collider";
/// Family name of environment map components.
pub const ENVIRONMENT_BASE: &str = "EnvironmentMap";
/// Family name of mesh-generating components.
pub const GEOMETRY_BASE: &str = "Geometry";

/// Register every built-in component type.
///
/// # Panics
///
/// Panics if any built-in name is already registered.
pub fn register_builtin(registry: &mut ComponentRegistry) {
    const TRANSFORM: &[&str] = &["Transform"];

    registry.register(ComponentMeta::new::<Transform>("Transform", "Component"));
    registry.register(ComponentMeta::new::<CustomProperties>("CustomProperties", "Component"));

    registry.register(ComponentMeta::new::<Plane>("Plane", GEOMETRY_BASE).requires(TRANSFORM));
    registry.register(
        ComponentMeta::new::<TriangleMesh>("TriangleMesh", GEOMETRY_BASE).requires(TRANSFORM),
    );
    registry.register(
        ComponentMeta::new::<SurfaceOfRevolution>("SurfaceOfRevolution", GEOMETRY_BASE)
            .requires(TRANSFORM),
    );
    registry.register(
        ComponentMeta::new::<TriangleFace>("TriangleFace", GEOMETRY_BASE).requires(TRANSFORM),
    );

    registry.register(ComponentMeta::new::<PointLight>("PointLight", LIGHT_BASE).requires(TRANSFORM));
    registry.register(
        ComponentMeta::new::<DirectionalLight>("DirectionalLight", LIGHT_BASE).requires(TRANSFORM),
    );
    registry.register(ComponentMeta::new::<AreaLight>("AreaLight", LIGHT_BASE).requires(TRANSFORM));

    registry.register(
        ComponentMeta::new::<SphereCollider>("SphereCollider", COLLIDER_BASE).requires(TRANSFORM),
    );
    registry.register(
        ComponentMeta::new::<PlaneCollider>("PlaneCollider", COLLIDER_BASE).requires(TRANSFORM),
    );

    registry.register(ComponentMeta::new::<EnvironmentMap>("EnvironmentMap", ENVIRONMENT_BASE));
}

/// A shared registry holding every built-in type.
#[must_use]
pub fn builtin_registry() -> Rc<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();
    register_builtin(&mut registry);
    Rc::new(registry)
}

/// View a component as a mesh generator, if it is one.
pub fn as_geometry_mut(component: &mut dyn Component) -> Option<&mut dyn Geometry> {
    if component.is::<Plane>() {
        component.downcast_mut::<Plane>().map(|g| g as &mut dyn Geometry)
    } else if component.is::<TriangleMesh>() {
        component.downcast_mut::<TriangleMesh>().map(|g| g as &mut dyn Geometry)
    } else if component.is::<SurfaceOfRevolution>() {
        component
            .downcast_mut::<SurfaceOfRevolution>()
            .map(|g| g as &mut dyn Geometry)
    } else {
        component
            .downcast_mut::<TriangleFace>()
            .map(|g| g as &mut dyn Geometry)
    }
}
