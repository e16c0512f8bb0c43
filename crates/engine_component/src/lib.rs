//! # engine_component
//!
//! What a component is, what its properties are, and how component types are
//! looked up by name.
//!
//! This crate provides:
//!
//! - [`Signal`] — synchronous change notification.
//! - [`TypedProperty`] / [`Property`] — observable values with editor flags.
//! - [`DoubleProperty`] — a scalar that can be driven by a keyframe curve.
//! - [`PropertyTable`] — insertion-ordered named properties with
//!   serialisation to and from ordered JSON maps.
//! - [`Component`] trait — the contract every scene component satisfies.
//! - [`ComponentRegistry`] — name and type indexed factory for components.

pub mod component;
pub mod double_property;
pub mod error;
pub mod property;
pub mod registry;
pub mod signal;
pub mod table;

pub use component::{AsAny, Component};
pub use double_property::{DoubleProperty, VALUE_EPSILON};
pub use error::PropertyError;
pub use property::{Property, PropertyData, PropertyFlags, TypedProperty};
pub use registry::{ComponentMeta, ComponentRegistry};
pub use signal::{ConnectionId, Signal};
pub use table::PropertyTable;
