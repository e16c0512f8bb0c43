//! Scene error types.

use std::path::PathBuf;

use engine_anim::AnimError;
use engine_asset::AssetError;
use engine_component::PropertyError;

use crate::object::ObjectId;

/// Errors that can occur while editing, loading or saving a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// No object with this id exists.
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    /// The object has no component of this type.
    #[error("object {object} has no {type_name} component")]
    ComponentNotFound {
        /// The object searched.
        object: ObjectId,
        /// The component type name.
        type_name: String,
    },

    /// Re-parenting would make an object its own ancestor.
    #[error("cannot parent object {object} under its descendant {parent}")]
    CyclicHierarchy {
        /// The object being moved.
        object: ObjectId,
        /// The requested parent.
        parent: ObjectId,
    },

    /// A component type name is not registered.
    #[error("unknown component type {0:?}")]
    UnknownComponentType(String),

    /// A component requires another one the object does not have.
    #[error("component {component:?} requires {dependency:?}")]
    MissingDependency {
        /// The component being added.
        component: String,
        /// The required component.
        dependency: String,
    },

    /// An object already carries a component of this type.
    #[error("object {object} already has a {type_name} component")]
    DuplicateComponent {
        /// The object.
        object: ObjectId,
        /// The component type name.
        type_name: String,
    },

    /// A property value could not be encoded or decoded.
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// Curve data could not be read.
    #[error(transparent)]
    Animation(#[from] AnimError),

    /// Asset data was invalid.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// JSON encoding or decoding failed.
    #[error("scene JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MessagePack encoding failed.
    #[error("failed to encode scene: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// MessagePack decoding failed.
    #[error("failed to decode scene: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// A scene file could not be read or written.
    #[error("scene file {path}: {source}")]
    Io {
        /// The file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file extension names no known scene format.
    #[error("unsupported scene format: {0}")]
    UnsupportedFormat(PathBuf),
}
