//! Spatial transform used by scene objects.
//!
//! [`Transform3D`] is the resolved form of a `Transform` component: the
//! component stores nine animatable scalars (position, Euler rotation in
//! degrees, per-axis scale) and converts them into this type whenever a
//! matrix is needed.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, rotation and non-uniform scale in 3D space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform3D {
    /// Translation relative to the parent.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Transform3D {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Build a transform from editor-facing values.
    ///
    /// `rotation_degrees` holds XYZ Euler angles in degrees, the unit the
    /// property panel shows.
    #[must_use]
    pub fn from_euler_degrees(position: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Self {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            rotation_degrees.x.to_radians(),
            rotation_degrees.y.to_radians(),
            rotation_degrees.z.to_radians(),
        );
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Compute the 4×4 local-to-parent matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Rotate a direction; scale and translation are ignored.
    #[must_use]
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform3D::IDENTITY.to_matrix(), Mat4::IDENTITY);
        assert_eq!(Transform3D::default(), Transform3D::IDENTITY);
    }

    #[test]
    fn test_from_euler_degrees_quarter_turn() {
        let t = Transform3D::from_euler_degrees(Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0), Vec3::ONE);
        // A quarter turn about +Y maps +X onto -Z.
        assert!(approx_eq(t.transform_direction(Vec3::X), -Vec3::Z));
    }

    #[test]
    fn test_matrix_applies_scale_then_rotation_then_translation() {
        let t = Transform3D::from_euler_degrees(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(10.0, 20.0, 30.0),
            Vec3::new(2.0, 1.0, 0.5),
        );
        let p = Vec3::new(0.3, -1.0, 4.0);
        let expected = t.position + t.rotation * (t.scale * p);
        assert!(approx_eq(t.to_matrix().transform_point3(p), expected));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let t = Transform3D::from_euler_degrees(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::ONE);
        let json = serde_json::to_string(&t).unwrap();
        let restored: Transform3D = serde_json::from_str(&json).unwrap();
        assert_eq!(t, restored);
    }
}
