//! # engine_math
//!
//! Math types for the scene editor core. Re-exports [`glam`] for linear
//! algebra and defines:
//!
//! - [`Transform3D`] — position / rotation / scale with matrix conversion.
//! - [`curve`] — pure curve evaluators (linear, Bezier, B-spline) that turn
//!   keyframe control points into densely sampled 2D polylines.

pub mod curve;
pub mod transform;

// Re-export glam types for convenience.
pub use glam::{DMat4, DVec2, DVec3, EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use curve::{
    BSplineEvaluator, BezierEvaluator, CurveEvaluator, CurveSettings, DEFAULT_DENSITY,
    LinearEvaluator,
};
pub use transform::Transform3D;
