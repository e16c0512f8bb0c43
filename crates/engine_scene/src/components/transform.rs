//! The `Transform` component.

use engine_component::{Component, Property, PropertyTable};
use engine_math::{Mat4, Transform3D, Vec3};

pub const POSITION: [&str; 3] = ["Position X", "Position Y", "Position Z"];
pub const ROTATION: [&str; 3] = ["Rotation X", "Rotation Y", "Rotation Z"];
pub const SCALE: [&str; 3] = ["Scale X", "Scale Y", "Scale Z"];

/// Local position, XYZ Euler rotation in degrees and per-axis scale, all
/// as animatable scalars.
#[derive(Debug)]
pub struct Transform {
    properties: PropertyTable,
}

impl Transform {
    /// A transform with the given components.
    #[must_use]
    pub fn new(position: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Self {
        let mut properties = PropertyTable::new();
        for (names, value) in [(POSITION, position), (ROTATION, rotation_degrees), (SCALE, scale)] {
            for (name, v) in names.into_iter().zip(value.to_array()) {
                properties.add(name, Property::double(f64::from(v)));
            }
        }
        Self { properties }
    }

    fn read(&self, names: [&str; 3]) -> Vec3 {
        let [x, y, z] = names.map(|n| self.properties.double_value(n) as f32);
        Vec3::new(x, y, z)
    }

    fn write(&mut self, names: [&str; 3], value: Vec3) {
        for (name, v) in names.into_iter().zip(value.to_array()) {
            if let Some(p) = self.properties.double_mut(name) {
                p.set(f64::from(v));
            }
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.read(POSITION)
    }

    /// XYZ Euler angles in degrees.
    #[must_use]
    pub fn rotation_degrees(&self) -> Vec3 {
        self.read(ROTATION)
    }

    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.read(SCALE)
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.write(POSITION, position);
    }

    pub fn set_rotation_degrees(&mut self, rotation: Vec3) {
        self.write(ROTATION, rotation);
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.write(SCALE, scale);
    }

    /// The resolved transform at the current animation time.
    #[must_use]
    pub fn transform(&self) -> Transform3D {
        Transform3D::from_euler_degrees(self.position(), self.rotation_degrees(), self.scale())
    }

    /// Local-to-parent matrix.
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        self.transform().to_matrix()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE)
    }
}

impl Component for Transform {
    fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PropertyTable {
        &mut self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_layout() {
        let t = Transform::default();
        let names: Vec<&str> = t.properties().iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec![
                "Position X", "Position Y", "Position Z", "Rotation X", "Rotation Y",
                "Rotation Z", "Scale X", "Scale Y", "Scale Z",
            ]
        );
        assert_eq!(t.scale(), Vec3::ONE);
    }

    #[test]
    fn test_animated_position_drives_matrix() {
        let mut t = Transform::default();
        t.properties_mut()
            .double_mut("Position X")
            .unwrap()
            .set_keyframes(&[0.0, 1.0], &[0.0, 4.0])
            .unwrap();
        t.properties_mut().set_animation_time(0.5);
        let m = t.local_matrix();
        assert!((m.transform_point3(Vec3::ZERO) - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_setters() {
        let mut t = Transform::default();
        t.set_position(Vec3::new(1.0, 2.0, 3.0));
        t.set_rotation_degrees(Vec3::new(0.0, 90.0, 0.0));
        t.set_scale(Vec3::splat(2.0));
        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        let dir = t.transform().transform_direction(Vec3::X);
        assert!((dir + Vec3::Z).length() < 1e-5);
    }
}
