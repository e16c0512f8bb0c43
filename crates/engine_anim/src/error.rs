//! Animation error types.

use std::path::PathBuf;

/// Errors raised while building curves or reading curve files.
#[derive(Debug, thiserror::Error)]
pub enum AnimError {
    /// Bulk keyframe data had differently sized time and value arrays.
    #[error("keyframe times ({times}) and values ({values}) differ in length")]
    KeyframeCountMismatch {
        /// Number of times supplied.
        times: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// An interpolation name that is not one of the known curve types.
    #[error("unknown curve type: {0:?}")]
    UnknownCurveType(String),

    /// A curve file could not be read.
    #[error("failed to read curve file {}: {source}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line in a curve file is not an `x y` pair.
    #[error("line {line}: malformed control point {content:?}")]
    MalformedPoint {
        /// One-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// A curve file held no control points at all.
    #[error("curve data contains no control points")]
    EmptyCurve,
}
