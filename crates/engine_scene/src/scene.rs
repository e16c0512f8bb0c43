//! The scene graph.
//!
//! A [`Scene`] owns a forest of [`SceneObject`]s, each carrying components
//! created from a shared [`ComponentRegistry`]. The scene also keeps:
//!
//! - the global animation clock, pushed into every property by
//!   [`Scene::update`];
//! - the animation length, which is the wrap period of every curve;
//! - the set of objects holding lights, colliders and an environment map,
//!   recomputed whenever components are attached or removed.

use std::collections::BTreeMap;
use std::rc::Rc;

use engine_asset::{Cubemap, Mesh};
use engine_component::{Component, ComponentMeta, ComponentRegistry};
use engine_math::Mat4;
use tracing::{debug, trace};

use crate::components::{
    COLLIDER_BASE, ColliderShape, ENVIRONMENT_BASE, EnvironmentMap, LIGHT_BASE, LightInfo,
    Transform, as_geometry_mut, builtin_registry, collider_shape, light_info,
};
use crate::error::SceneError;
use crate::object::{AttachedComponent, ObjectId, ObjectIdAllocator, SceneObject};

/// A hierarchy of objects and their components.
#[derive(Debug)]
pub struct Scene {
    registry: Rc<ComponentRegistry>,
    ids: ObjectIdAllocator,
    objects: BTreeMap<ObjectId, SceneObject>,
    roots: Vec<ObjectId>,
    lights: Vec<ObjectId>,
    colliders: Vec<ObjectId>,
    environment: Option<ObjectId>,
    animation_length: f64,
    current_time: f64,
}

impl Scene {
    /// An empty scene creating components from `registry`.
    #[must_use]
    pub fn new(registry: Rc<ComponentRegistry>) -> Self {
        Self {
            registry,
            ids: ObjectIdAllocator::new(),
            objects: BTreeMap::new(),
            roots: Vec::new(),
            lights: Vec::new(),
            colliders: Vec::new(),
            environment: None,
            animation_length: 0.0,
            current_time: 0.0,
        }
    }

    /// The registry components are created from.
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// A shared handle to the registry.
    #[must_use]
    pub fn registry_handle(&self) -> Rc<ComponentRegistry> {
        Rc::clone(&self.registry)
    }

    // -- hierarchy ----------------------------------------------------------

    /// Create an empty object under `parent` (or as a root).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] if `parent` does not exist.
    pub fn create_object(
        &mut self,
        name: impl Into<String>,
        parent: Option<ObjectId>,
    ) -> Result<ObjectId, SceneError> {
        if let Some(p) = parent
            && !self.objects.contains_key(&p)
        {
            return Err(SceneError::ObjectNotFound(p));
        }
        let id = self.ids.allocate();
        let name = name.into();
        debug!(object = %id, name = %name, parent = ?parent, "created object");
        self.objects.insert(id, SceneObject::new(id, name, parent));
        self.attach_to_parent(id, parent);
        Ok(id)
    }

    /// Remove an object together with all of its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] if `id` does not exist.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<(), SceneError> {
        let parent = self.object(id).ok_or(SceneError::ObjectNotFound(id))?.parent;
        self.detach_from_parent(id, parent);

        let mut stack = vec![id];
        let mut removed = 0usize;
        while let Some(next) = stack.pop() {
            if let Some(object) = self.objects.remove(&next) {
                stack.extend_from_slice(&object.children);
                removed += 1;
            }
        }
        debug!(object = %id, removed, "removed object subtree");
        self.retrack();
        Ok(())
    }

    /// Move an object under a new parent (or make it a root).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] if either object does not
    /// exist, and [`SceneError::CyclicHierarchy`] if `parent` is `id` or one
    /// of its descendants.
    pub fn reparent(&mut self, id: ObjectId, parent: Option<ObjectId>) -> Result<(), SceneError> {
        let old_parent = self.object(id).ok_or(SceneError::ObjectNotFound(id))?.parent;
        if let Some(p) = parent {
            let mut cursor = Some(p);
            while let Some(ancestor) = cursor {
                if ancestor == id {
                    return Err(SceneError::CyclicHierarchy { object: id, parent: p });
                }
                cursor = self
                    .object(ancestor)
                    .ok_or(SceneError::ObjectNotFound(ancestor))?
                    .parent;
            }
        }
        self.detach_from_parent(id, old_parent);
        if let Some(object) = self.objects.get_mut(&id) {
            object.parent = parent;
        }
        self.attach_to_parent(id, parent);
        Ok(())
    }

    fn attach_to_parent(&mut self, id: ObjectId, parent: Option<ObjectId>) {
        match parent.and_then(|p| self.objects.get_mut(&p)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }
    }

    fn detach_from_parent(&mut self, id: ObjectId, parent: Option<ObjectId>) {
        match parent.and_then(|p| self.objects.get_mut(&p)) {
            Some(parent) => parent.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }
    }

    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Every object, ordered by id.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// Top-level objects in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The first object (by id) with this name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects.values().find(|o| o.name == name).map(|o| o.id)
    }

    // -- components ---------------------------------------------------------

    /// Attach a component.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] if `id` does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the component's type is not registered, if the object
    /// already has a component of that type, or if a component it depends
    /// on is missing.
    pub fn add_component(
        &mut self,
        id: ObjectId,
        component: Box<dyn Component>,
    ) -> Result<(), SceneError> {
        let registry = Rc::clone(&self.registry);
        let meta = registry.meta_of(component.as_ref());
        match self.check_attachable(id, meta) {
            Ok(()) => {}
            Err(err @ SceneError::ObjectNotFound(_)) => return Err(err),
            Err(err) => panic!("{err}"),
        }
        self.attach(id, meta.type_name, component);
        Ok(())
    }

    /// Create a default component by type name and attach it.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownComponentType`],
    /// [`SceneError::DuplicateComponent`] or [`SceneError::MissingDependency`]
    /// instead of panicking, since the name usually comes from data.
    pub fn add_component_by_name(
        &mut self,
        id: ObjectId,
        type_name: &str,
    ) -> Result<&mut dyn Component, SceneError> {
        let registry = Rc::clone(&self.registry);
        let meta = registry
            .meta(type_name)
            .ok_or_else(|| SceneError::UnknownComponentType(type_name.to_string()))?;
        self.check_attachable(id, meta)?;
        Ok(self.attach(id, meta.type_name, (meta.factory)()))
    }

    /// Detach and return the component with this type name.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] or
    /// [`SceneError::ComponentNotFound`].
    ///
    /// # Panics
    ///
    /// Panics if another component on the object depends on it.
    pub fn remove_component(
        &mut self,
        id: ObjectId,
        type_name: &str,
    ) -> Result<Box<dyn Component>, SceneError> {
        let registry = Rc::clone(&self.registry);
        let object = self.objects.get_mut(&id).ok_or(SceneError::ObjectNotFound(id))?;
        let index = object
            .components
            .iter()
            .position(|c| c.type_name == type_name)
            .ok_or_else(|| SceneError::ComponentNotFound {
                object: id,
                type_name: type_name.to_string(),
            })?;
        if let Some(dependant) = object.components.iter().find(|c| {
            registry
                .meta(c.type_name)
                .is_some_and(|m| m.dependencies.contains(&type_name))
        }) {
            panic!(
                "cannot remove {type_name:?} from object {id}: {:?} depends on it",
                dependant.type_name
            );
        }
        let removed = object.components.remove(index);
        debug!(object = %id, component = type_name, "removed component");
        self.retrack();
        Ok(removed.component)
    }

    /// The component of concrete type `T` on object `id`.
    #[must_use]
    pub fn component<T: Component>(&self, id: ObjectId) -> Option<&T> {
        self.object(id)?.component::<T>()
    }

    /// The component of concrete type `T` on object `id`, mutably.
    pub fn component_mut<T: Component>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.object_mut(id)?.component_mut::<T>()
    }

    pub(crate) fn check_attachable(
        &self,
        id: ObjectId,
        meta: &ComponentMeta,
    ) -> Result<(), SceneError> {
        let object = self.object(id).ok_or(SceneError::ObjectNotFound(id))?;
        if object.has_component(meta.type_name) {
            return Err(SceneError::DuplicateComponent {
                object: id,
                type_name: meta.type_name.to_string(),
            });
        }
        match meta.dependencies.iter().find(|dep| !object.has_component(dep)) {
            Some(dep) => Err(SceneError::MissingDependency {
                component: meta.type_name.to_string(),
                dependency: (*dep).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Attach without validation. Callers run
    /// [`check_attachable`](Self::check_attachable) first.
    pub(crate) fn attach(
        &mut self,
        id: ObjectId,
        type_name: &'static str,
        mut component: Box<dyn Component>,
    ) -> &mut dyn Component {
        let properties = component.properties_mut();
        properties.set_animation_length(self.animation_length);
        properties.set_animation_time(self.current_time);
        debug!(object = %id, component = type_name, "attached component");

        let Some(object) = self.objects.get_mut(&id) else {
            unreachable!("attach called for missing object {id}");
        };
        object.components.push(AttachedComponent {
            type_name,
            component,
        });
        self.retrack();

        let Some(object) = self.objects.get_mut(&id) else {
            unreachable!("attach called for missing object {id}");
        };
        let last = object.components.len() - 1;
        object.components[last].component.as_mut()
    }

    fn retrack(&mut self) {
        self.lights.clear();
        self.colliders.clear();
        self.environment = None;
        for object in self.objects.values() {
            for attached in &object.components {
                match self.registry.meta(attached.type_name).map(|m| m.base_type_name) {
                    Some(LIGHT_BASE) => self.lights.push(object.id),
                    Some(COLLIDER_BASE) => self.colliders.push(object.id),
                    Some(ENVIRONMENT_BASE) if self.environment.is_none() => {
                        self.environment = Some(object.id);
                    }
                    _ => {}
                }
            }
        }
        self.lights.dedup();
        self.colliders.dedup();
        trace!(
            lights = self.lights.len(),
            colliders = self.colliders.len(),
            environment = self.environment.is_some(),
            "retracked scene objects"
        );
    }

    // -- derived views ------------------------------------------------------

    /// Object-to-world matrix, composing every `Transform` up the parent
    /// chain. Objects without a `Transform` contribute the identity.
    #[must_use]
    pub fn world_matrix(&self, id: ObjectId) -> Option<Mat4> {
        let mut matrix = Mat4::IDENTITY;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let object = self.objects.get(&current)?;
            if let Some(transform) = object.component::<Transform>() {
                matrix = transform.local_matrix() * matrix;
            }
            cursor = object.parent;
        }
        Some(matrix)
    }

    /// Objects carrying a light, ordered by id.
    #[must_use]
    pub fn light_objects(&self) -> &[ObjectId] {
        &self.lights
    }

    /// Objects carrying a collider, ordered by id.
    #[must_use]
    pub fn collider_objects(&self) -> &[ObjectId] {
        &self.colliders
    }

    /// The object whose environment map lights the scene.
    #[must_use]
    pub fn environment_object(&self) -> Option<ObjectId> {
        self.environment
    }

    /// Every light, resolved in world space.
    #[must_use]
    pub fn lights(&self) -> Vec<(ObjectId, LightInfo)> {
        self.resolve_tracked(&self.lights, light_info)
    }

    /// Every collider, resolved in world space.
    #[must_use]
    pub fn colliders(&self) -> Vec<(ObjectId, ColliderShape)> {
        self.resolve_tracked(&self.colliders, collider_shape)
    }

    fn resolve_tracked<T>(
        &self,
        ids: &[ObjectId],
        resolve: fn(&dyn Component, Mat4) -> Option<T>,
    ) -> Vec<(ObjectId, T)> {
        let mut out = Vec::new();
        for &id in ids {
            let (Some(object), Some(world)) = (self.object(id), self.world_matrix(id)) else {
                continue;
            };
            out.extend(
                object
                    .components
                    .iter()
                    .filter_map(|c| resolve(c.component(), world))
                    .map(|value| (id, value)),
            );
        }
        out
    }

    /// The tracked environment map's cubemap.
    #[must_use]
    pub fn environment_cubemap(&self) -> Option<&Cubemap> {
        self.component::<EnvironmentMap>(self.environment?)
            .map(EnvironmentMap::cubemap)
    }

    /// The tracked environment map's cubemap, mutably.
    pub fn environment_cubemap_mut(&mut self) -> Option<&mut Cubemap> {
        let id = self.environment?;
        self.component_mut::<EnvironmentMap>(id)
            .map(EnvironmentMap::cubemap_mut)
    }

    /// Every geometry component's mesh, regenerated where stale.
    pub fn meshes(&mut self) -> Vec<(ObjectId, &Mesh)> {
        let mut out = Vec::new();
        for object in self.objects.values_mut() {
            for attached in &mut object.components {
                if let Some(geometry) = as_geometry_mut(attached.component.as_mut()) {
                    out.push((object.id, geometry.mesh()));
                }
            }
        }
        out
    }

    /// Reload external inputs (curve files) of every geometry component.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a component.
    pub fn load_external_data(&mut self) -> Result<(), SceneError> {
        for object in self.objects.values_mut() {
            for attached in &mut object.components {
                if let Some(geometry) = as_geometry_mut(attached.component.as_mut()) {
                    geometry.load_external()?;
                }
            }
        }
        Ok(())
    }

    // -- animation ----------------------------------------------------------

    /// The animation length, which is also the wrap period of every curve.
    #[must_use]
    pub fn animation_length(&self) -> f64 {
        self.animation_length
    }

    /// The animation time last passed to [`update`](Self::update).
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Set the animation length on every property.
    pub fn set_animation_length(&mut self, length: f64) {
        self.animation_length = length;
        for attached in self.attached_mut() {
            attached.component.properties_mut().set_animation_length(length);
        }
        debug!(length, "set animation length");
    }

    /// Push animation time `t` into every property.
    ///
    /// Returns how many property values changed.
    pub fn update(&mut self, t: f64) -> usize {
        self.current_time = t;
        let changed: usize = self
            .attached_mut()
            .map(|attached| attached.component.properties_mut().set_animation_time(t))
            .sum();
        trace!(time = t, changed, "updated scene");
        changed
    }

    fn attached_mut(&mut self) -> impl Iterator<Item = &mut AttachedComponent> {
        self.objects
            .values_mut()
            .flat_map(|object| object.components.iter_mut())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(builtin_registry())
    }
}
