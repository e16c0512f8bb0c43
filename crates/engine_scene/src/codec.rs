//! Scene file codecs.
//!
//! Scenes are stored either as pretty-printed JSON or as MessagePack with
//! named fields. The format is picked from the file extension.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use engine_component::ComponentRegistry;
use tracing::info;

use crate::document::SceneDocument;
use crate::error::SceneError;
use crate::scene::Scene;

/// On-disk scene encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    /// `.json`
    Json,
    /// `.msgpack` or `.scene`
    MessagePack,
}

impl SceneFormat {
    /// Pick the format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, SceneError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("msgpack" | "scene") => Ok(Self::MessagePack),
            _ => Err(SceneError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Encode a document.
///
/// # Errors
///
/// Returns [`SceneError::Json`] or [`SceneError::Encode`] if serialisation
/// fails.
pub fn encode(document: &SceneDocument, format: SceneFormat) -> Result<Vec<u8>, SceneError> {
    Ok(match format {
        SceneFormat::Json => serde_json::to_vec_pretty(document)?,
        SceneFormat::MessagePack => rmp_serde::to_vec_named(document)?,
    })
}

/// Decode a document.
///
/// # Errors
///
/// Returns [`SceneError::Json`] or [`SceneError::Decode`] if the bytes are
/// not a valid document.
pub fn decode(bytes: &[u8], format: SceneFormat) -> Result<SceneDocument, SceneError> {
    Ok(match format {
        SceneFormat::Json => serde_json::from_slice(bytes)?,
        SceneFormat::MessagePack => rmp_serde::from_slice(bytes)?,
    })
}

/// Write `scene` to `path`, choosing the format from the extension.
///
/// # Errors
///
/// Returns an error if the extension is unknown, a property cannot be
/// encoded, or the file cannot be written.
pub fn save_scene(scene: &Scene, path: &Path) -> Result<(), SceneError> {
    let format = SceneFormat::from_path(path)?;
    let bytes = encode(&scene.to_document()?, format)?;
    fs::write(path, &bytes).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), ?format, bytes = bytes.len(), "saved scene");
    Ok(())
}

/// Read a scene from `path`, choosing the format from the extension.
///
/// External inputs such as curve files are loaded before returning.
///
/// # Errors
///
/// Returns an error if the extension is unknown, the file cannot be read,
/// the document is malformed, or an external input fails to load.
pub fn load_scene(registry: Rc<ComponentRegistry>, path: &Path) -> Result<Scene, SceneError> {
    let format = SceneFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut scene = Scene::from_document(registry, &decode(&bytes, format)?)?;
    scene.load_external_data()?;
    info!(path = %path.display(), ?format, objects = scene.len(), "loaded scene");
    Ok(scene)
}
