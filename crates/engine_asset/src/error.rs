//! Asset error types.

use std::path::PathBuf;

/// Errors raised while building or loading assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// A pixel buffer did not match the declared dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PixelSizeMismatch {
        /// Bytes required by the dimensions.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// A mesh index pointed past the vertex list.
    #[error("mesh index {index} out of range for {vertices} vertices")]
    IndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of vertices.
        vertices: usize,
    },

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
