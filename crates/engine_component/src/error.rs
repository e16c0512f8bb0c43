//! Property error types.

use engine_anim::AnimError;

/// Errors raised while encoding or decoding property values.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// A property value could not be encoded.
    #[error("failed to encode property {name:?}: {source}")]
    Encode {
        /// The property name.
        name: String,
        /// The underlying serialisation error.
        source: serde_json::Error,
    },

    /// A stored value did not match the property's type.
    #[error("failed to decode property {name:?}: {source}")]
    Decode {
        /// The property name.
        name: String,
        /// The underlying deserialisation error.
        source: serde_json::Error,
    },

    /// Stored animation data was inconsistent.
    #[error("invalid animation data for property {name:?}: {source}")]
    Animation {
        /// The property name.
        name: String,
        /// The underlying animation error.
        source: AnimError,
    },
}
