//! Component type registry.
//!
//! The registry maps component type names to [`ComponentMeta`] records and
//! creates boxed default instances by name. It is filled once at start-up
//! and read-only afterwards.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::component::Component;

/// Metadata about a registered component type.
#[derive(Clone)]
pub struct ComponentMeta {
    /// The unique type name (e.g. `"PointLight"`).
    pub type_name: &'static str,
    /// The family the type belongs to (e.g. `"Light"`).
    pub base_type_name: &'static str,
    /// Rust type identity of the concrete type.
    pub type_id: TypeId,
    /// Type names that must already be attached to an object before this
    /// type can be added to it.
    pub dependencies: Vec<&'static str>,
    /// Builds a default instance.
    pub factory: fn() -> Box<dyn Component>,
}

impl ComponentMeta {
    /// Describe component type `T`.
    #[must_use]
    pub fn new<T: Component + Default>(type_name: &'static str, base_type_name: &'static str) -> Self {
        Self {
            type_name,
            base_type_name,
            type_id: TypeId::of::<T>(),
            dependencies: Vec::new(),
            factory: || -> Box<dyn Component> { Box::new(T::default()) },
        }
    }

    /// Add required component types.
    #[must_use]
    pub fn requires(mut self, dependencies: &[&'static str]) -> Self {
        self.dependencies.extend_from_slice(dependencies);
        self
    }
}

impl fmt::Debug for ComponentMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentMeta")
            .field("type_name", &self.type_name)
            .field("base_type_name", &self.base_type_name)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Name- and type-indexed table of component types.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    metas: Vec<ComponentMeta>,
    by_name: HashMap<&'static str, usize>,
    by_type: HashMap<TypeId, usize>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component type.
    ///
    /// # Panics
    ///
    /// Panics if the name or the Rust type is already registered.
    pub fn register(&mut self, meta: ComponentMeta) {
        assert!(
            !self.by_name.contains_key(meta.type_name),
            "component type {:?} registered twice",
            meta.type_name
        );
        assert!(
            !self.by_type.contains_key(&meta.type_id),
            "Rust type behind {:?} is already registered under another name",
            meta.type_name
        );
        debug!(
            type_name = meta.type_name,
            base = meta.base_type_name,
            deps = meta.dependencies.len(),
            "registered component type"
        );
        let index = self.metas.len();
        self.by_name.insert(meta.type_name, index);
        self.by_type.insert(meta.type_id, index);
        self.metas.push(meta);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, meta: ComponentMeta) -> Self {
        self.register(meta);
        self
    }

    /// Whether a type with this name is registered.
    #[must_use]
    pub fn is_defined(&self, type_name: &str) -> bool {
        self.by_name.contains_key(type_name)
    }

    /// Create a default instance of the named type.
    ///
    /// # Panics
    ///
    /// Panics if `type_name` is not registered. Check with
    /// [`is_defined`](Self::is_defined) first when the name comes from data.
    #[must_use]
    pub fn create(&self, type_name: &str) -> Box<dyn Component> {
        match self.meta(type_name) {
            Some(meta) => (meta.factory)(),
            None => panic!("unknown component type {type_name:?}"),
        }
    }

    /// Metadata by type name.
    #[must_use]
    pub fn meta(&self, type_name: &str) -> Option<&ComponentMeta> {
        self.by_name.get(type_name).map(|&i| &self.metas[i])
    }

    /// Metadata by Rust type identity.
    #[must_use]
    pub fn meta_by_type(&self, type_id: TypeId) -> Option<&ComponentMeta> {
        self.by_type.get(&type_id).map(|&i| &self.metas[i])
    }

    /// Metadata for a component instance.
    ///
    /// # Panics
    ///
    /// Panics if the instance's type was never registered.
    #[must_use]
    pub fn meta_of(&self, component: &dyn Component) -> &ComponentMeta {
        match self.meta_by_type(component.concrete_type_id()) {
            Some(meta) => meta,
            None => panic!("component instance of an unregistered type"),
        }
    }

    /// Registered name of a component instance's type.
    ///
    /// # Panics
    ///
    /// Panics if the instance's type was never registered.
    #[must_use]
    pub fn type_name_of(&self, component: &dyn Component) -> &'static str {
        self.meta_of(component).type_name
    }

    /// Family name of a component instance's type.
    ///
    /// # Panics
    ///
    /// Panics if the instance's type was never registered.
    #[must_use]
    pub fn base_type_of(&self, component: &dyn Component) -> &'static str {
        self.meta_of(component).base_type_name
    }

    /// Registered name of component type `T`, if registered.
    #[must_use]
    pub fn type_name_for<T: Component>(&self) -> Option<&'static str> {
        self.meta_by_type(TypeId::of::<T>()).map(|m| m.type_name)
    }

    /// Every registered type in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentMeta> {
        self.metas.iter()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metas.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }
}
