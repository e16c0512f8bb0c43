//! Core [`Component`] trait.
//!
//! A component is a bundle of named properties attached to one scene
//! object. Scenes hold components as `Box<dyn Component>` and recover the
//! concrete type through the downcast helpers on `dyn Component`.

use std::any::{Any, TypeId};

use crate::table::PropertyTable;

/// Upcast to [`Any`], implemented for every `'static` type.
pub trait AsAny: Any {
    /// `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The core component trait.
///
/// # Examples
///
/// ```rust
/// use engine_component::{Component, Property, PropertyTable};
///
/// struct Spin {
///     properties: PropertyTable,
/// }
///
/// impl Default for Spin {
///     fn default() -> Self {
///         Self {
///             properties: PropertyTable::new().with("Speed", Property::double(1.0)),
///         }
///     }
/// }
///
/// impl Component for Spin {
///     fn properties(&self) -> &PropertyTable {
///         &self.properties
///     }
///     fn properties_mut(&mut self) -> &mut PropertyTable {
///         &mut self.properties
///     }
/// }
/// ```
pub trait Component: AsAny + 'static {
    /// The component's properties.
    fn properties(&self) -> &PropertyTable;

    /// The component's properties, mutably.
    fn properties_mut(&mut self) -> &mut PropertyTable;

    /// Whether loading may add properties the component did not declare.
    fn accepts_dynamic_properties(&self) -> bool {
        false
    }
}

impl dyn Component {
    /// Whether the concrete type is `T`.
    #[must_use]
    pub fn is<T: Component>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow as the concrete type `T`.
    #[must_use]
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Mutably borrow as the concrete type `T`.
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// The [`TypeId`] of the concrete type.
    #[must_use]
    pub fn concrete_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }
}
