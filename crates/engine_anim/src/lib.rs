//! # engine_anim
//!
//! Keyframe animation for scalar properties.
//!
//! This crate provides:
//!
//! - [`Keyframe`] — a mutable `(time, value)` pair.
//! - [`CurveType`] — the interpolation kinds a curve can use.
//! - [`CurveSampler`] — a keyframe store that evaluates its curve and answers
//!   `sample_at(t)` queries, optionally periodic.
//! - [`curve_file`] — reader for whitespace-separated control-point files.
//! - [`AnimError`] — errors raised by the above.

pub mod curve_file;
pub mod curve_type;
pub mod error;
pub mod keyframe;
pub mod sampler;

pub use curve_file::{load_curve_file, parse_curve_points};
pub use curve_type::CurveType;
pub use error::AnimError;
pub use keyframe::Keyframe;
pub use sampler::CurveSampler;
