//! Scene objects.

use std::fmt;

use engine_component::Component;

/// Identifier of an object within one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonically increasing [`ObjectId`] allocator starting at 1.
#[derive(Debug)]
pub struct ObjectIdAllocator {
    next: u64,
}

impl ObjectIdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id. IDs are never reused.
    pub fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next += 1;
        id
    }
}

impl Default for ObjectIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A component together with its registered type name.
pub struct AttachedComponent {
    pub(crate) type_name: &'static str,
    pub(crate) component: Box<dyn Component>,
}

impl AttachedComponent {
    /// The registered type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The component.
    #[must_use]
    pub fn component(&self) -> &dyn Component {
        self.component.as_ref()
    }

    /// The component, mutably.
    pub fn component_mut(&mut self) -> &mut dyn Component {
        self.component.as_mut()
    }
}

impl fmt::Debug for AttachedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachedComponent")
            .field("type_name", &self.type_name)
            .field("properties", &self.component.properties().len())
            .finish()
    }
}

/// A node in the scene hierarchy.
///
/// Objects own their components. At most one component of each type is
/// attached.
#[derive(Debug)]
pub struct SceneObject {
    pub(crate) id: ObjectId,
    pub(crate) name: String,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
    pub(crate) components: Vec<AttachedComponent>,
}

impl SceneObject {
    pub(crate) fn new(id: ObjectId, name: String, parent: Option<ObjectId>) -> Self {
        Self {
            id,
            name,
            parent,
            children: Vec::new(),
            components: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Child ids in insertion order.
    #[must_use]
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    /// Attached components in insertion order.
    pub fn components(&self) -> impl Iterator<Item = &AttachedComponent> {
        self.components.iter()
    }

    /// Whether a component with this type name is attached.
    #[must_use]
    pub fn has_component(&self, type_name: &str) -> bool {
        self.components.iter().any(|c| c.type_name == type_name)
    }

    /// The attached component with this type name.
    #[must_use]
    pub fn component_by_name(&self, type_name: &str) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.type_name == type_name)
            .map(AttachedComponent::component)
    }

    /// The attached component with this type name, mutably.
    pub fn component_by_name_mut(&mut self, type_name: &str) -> Option<&mut dyn Component> {
        self.components
            .iter_mut()
            .find(|c| c.type_name == type_name)
            .map(AttachedComponent::component_mut)
    }

    /// The attached component of concrete type `T`.
    #[must_use]
    pub fn component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| c.component.downcast_ref::<T>())
    }

    /// The attached component of concrete type `T`, mutably.
    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|c| c.component.downcast_mut::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic_from_one() {
        let mut ids = ObjectIdAllocator::new();
        assert_eq!(ids.allocate(), ObjectId(1));
        assert_eq!(ids.allocate(), ObjectId(2));
        assert_eq!(ObjectId(7).to_string(), "#7");
    }
}
