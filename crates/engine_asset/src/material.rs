//! Surface materials.

use std::any::Any;

use engine_math::Vec3;

use crate::asset::{Asset, AssetHeader, AssetType};
use crate::id::AssetId;

/// Phong-style surface parameters. Materials have no GPU counterpart of
/// their own; renderers read them directly.
#[derive(Debug, Clone)]
pub struct Material {
    header: AssetHeader,
    diffuse: Vec3,
    specular: Vec3,
    ambient: Vec3,
    shininess: f32,
    diffuse_texture: Option<AssetId>,
}

impl Material {
    /// A grey, mildly glossy material.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: AssetHeader::new(name),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::splat(0.2),
            ambient: Vec3::splat(0.1),
            shininess: 32.0,
            diffuse_texture: None,
        }
    }

    #[must_use]
    pub fn diffuse(&self) -> Vec3 {
        self.diffuse
    }

    #[must_use]
    pub fn specular(&self) -> Vec3 {
        self.specular
    }

    #[must_use]
    pub fn ambient(&self) -> Vec3 {
        self.ambient
    }

    #[must_use]
    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    /// The texture modulating the diffuse colour, if any.
    #[must_use]
    pub fn diffuse_texture(&self) -> Option<AssetId> {
        self.diffuse_texture
    }

    pub fn set_diffuse(&mut self, colour: Vec3) {
        self.diffuse = colour;
        self.header.mark_dirty();
    }

    pub fn set_specular(&mut self, colour: Vec3) {
        self.specular = colour;
        self.header.mark_dirty();
    }

    pub fn set_ambient(&mut self, colour: Vec3) {
        self.ambient = colour;
        self.header.mark_dirty();
    }

    pub fn set_shininess(&mut self, shininess: f32) {
        self.shininess = shininess;
        self.header.mark_dirty();
    }

    pub fn set_diffuse_texture(&mut self, texture: Option<AssetId>) {
        self.diffuse_texture = texture;
        self.header.mark_dirty();
    }
}

impl Asset for Material {
    fn header(&self) -> &AssetHeader {
        &self.header
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Material
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cacheable;
    use crate::texture::Texture;

    #[test]
    fn test_setters_bump_version() {
        let mut material = Material::new("steel");
        let texture = Texture::solid("grain", 1, 1, [128; 4]);
        let v = material.version();
        material.set_shininess(64.0);
        material.set_diffuse_texture(Some(texture.id()));
        assert_eq!(material.version(), v + 2);
        assert_eq!(material.diffuse_texture(), Some(texture.id()));
        assert!(!material.asset_type().is_texture_like());
    }
}
