//! Cube textures and cube render targets.

use std::any::Any;

use crate::asset::{Asset, AssetHeader, AssetType};
use crate::error::AssetError;
use crate::texture::{BYTES_PER_PIXEL, check_pixels};

/// One face of a cube texture, in upload order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    /// Every face in upload order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Position in [`CubeFace::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Six square RGBA8 faces of equal size.
#[derive(Debug, Clone)]
pub struct Cubemap {
    header: AssetHeader,
    size: u32,
    faces: [Vec<u8>; 6],
}

impl Cubemap {
    /// A black cubemap with `size`×`size` faces.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        let bytes = size as usize * size as usize * BYTES_PER_PIXEL;
        Self {
            header: AssetHeader::new(name),
            size,
            faces: std::array::from_fn(|_| vec![0; bytes]),
        }
    }

    /// Edge length of every face, in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Pixels of one face.
    #[must_use]
    pub fn face(&self, face: CubeFace) -> &[u8] {
        &self.faces[face.index()]
    }

    /// Replace one face.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::PixelSizeMismatch`] unless `pixels` is exactly
    /// one face of the current size.
    pub fn set_face(&mut self, face: CubeFace, pixels: Vec<u8>) -> Result<(), AssetError> {
        check_pixels(self.size, self.size, &pixels)?;
        self.faces[face.index()] = pixels;
        self.header.mark_dirty();
        Ok(())
    }

    /// Fill every face with one colour.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        let pixels = rgba.repeat(self.size as usize * self.size as usize);
        for face in &mut self.faces {
            face.clone_from(&pixels);
        }
        self.header.mark_dirty();
    }
}

impl Asset for Cubemap {
    fn header(&self) -> &AssetHeader {
        &self.header
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Cubemap
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A cube render target described only by its face size.
#[derive(Debug, Clone)]
pub struct RenderableCubemap {
    header: AssetHeader,
    size: u32,
}

impl RenderableCubemap {
    /// Create a cube render target.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            header: AssetHeader::new(name),
            size,
        }
    }

    /// Edge length of every face, in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Change the face size. Setting the current size is a no-op.
    pub fn set_size(&mut self, size: u32) {
        if self.size != size {
            self.size = size;
            self.header.mark_dirty();
        }
    }
}

impl Asset for RenderableCubemap {
    fn header(&self) -> &AssetHeader {
        &self.header
    }

    fn asset_type(&self) -> AssetType {
        AssetType::RenderableCubemap
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cacheable;

    #[test]
    fn test_new_cubemap_is_black() {
        let cube = Cubemap::new("sky", 2);
        for face in CubeFace::ALL {
            assert_eq!(cube.face(face), &[0; 16]);
        }
    }

    #[test]
    fn test_set_face_checks_size() {
        let mut cube = Cubemap::new("sky", 2);
        assert!(cube.set_face(CubeFace::NegativeY, vec![1; 12]).is_err());
        cube.set_face(CubeFace::NegativeY, vec![1; 16]).unwrap();
        assert_eq!(cube.face(CubeFace::NegativeY)[0], 1);
        assert_eq!(cube.face(CubeFace::PositiveY)[0], 0);
    }

    #[test]
    fn test_fill_bumps_version() {
        let mut cube = Cubemap::new("sky", 1);
        let v = cube.version();
        cube.fill([10, 20, 30, 255]);
        assert!(cube.version() > v);
        assert_eq!(cube.face(CubeFace::PositiveZ), &[10, 20, 30, 255]);
    }

    #[test]
    fn test_face_order() {
        let indices: Vec<usize> = CubeFace::ALL.iter().map(|f| f.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }
}
