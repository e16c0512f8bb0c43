//! 2D textures and render targets.

use std::any::Any;

use crate::asset::{Asset, AssetHeader, AssetType};
use crate::error::AssetError;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

pub(crate) fn check_pixels(width: u32, height: u32, pixels: &[u8]) -> Result<(), AssetError> {
    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if pixels.len() == expected {
        Ok(())
    } else {
        Err(AssetError::PixelSizeMismatch {
            expected,
            actual: pixels.len(),
        })
    }
}

/// RGBA8 image.
#[derive(Debug, Clone)]
pub struct Texture {
    header: AssetHeader,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    /// Create a texture from tightly packed RGBA8 pixels.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::PixelSizeMismatch`] if `pixels` is not exactly
    /// `width * height * 4` bytes.
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, AssetError> {
        check_pixels(width, height, &pixels)?;
        Ok(Self {
            header: AssetHeader::new(name),
            width,
            height,
            pixels,
        })
    }

    /// A texture filled with one colour.
    #[must_use]
    pub fn solid(name: impl Into<String>, width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self {
            header: AssetHeader::new(name),
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel data.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Replace the image.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::PixelSizeMismatch`] on a size mismatch; the
    /// texture is left unchanged.
    pub fn set_pixels(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> Result<(), AssetError> {
        check_pixels(width, height, &pixels)?;
        self.width = width;
        self.height = height;
        self.pixels = pixels;
        self.header.mark_dirty();
        Ok(())
    }
}

impl Asset for Texture {
    fn header(&self) -> &AssetHeader {
        &self.header
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Texture
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A render target described only by its resolution.
#[derive(Debug, Clone)]
pub struct RenderableTexture {
    header: AssetHeader,
    width: u32,
    height: u32,
}

impl RenderableTexture {
    /// Create a render target.
    #[must_use]
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            header: AssetHeader::new(name),
            width,
            height,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the resolution. Setting the current size is a no-op.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.header.mark_dirty();
        }
    }
}

impl Asset for RenderableTexture {
    fn header(&self) -> &AssetHeader {
        &self.header
    }

    fn asset_type(&self) -> AssetType {
        AssetType::RenderableTexture
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
