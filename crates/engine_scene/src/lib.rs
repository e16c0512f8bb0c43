//! # engine_scene
//!
//! The editable scene: a hierarchy of named objects, each carrying a set of
//! components created by name from a [`ComponentRegistry`].
//!
//! This crate provides:
//!
//! - [`Scene`] — hierarchy editing, component attachment with dependency
//!   checks, world matrices, and the animation clock.
//! - [`components`] — the built-in component set (transform, geometry,
//!   lights, colliders, environment map, custom properties).
//! - [`SceneDocument`] — the serialisable form of a scene.
//! - [`save_scene`] / [`load_scene`] — JSON and MessagePack scene files.
//!
//! [`ComponentRegistry`]: engine_component::ComponentRegistry

pub mod codec;
pub mod components;
pub mod document;
pub mod error;
pub mod object;
pub mod scene;

pub use codec::{SceneFormat, decode, encode, load_scene, save_scene};
pub use components::{builtin_registry, register_builtin};
pub use document::{ComponentDocument, ObjectDocument, SceneDocument};
pub use error::SceneError;
pub use object::{AttachedComponent, ObjectId, SceneObject};
pub use scene::Scene;
