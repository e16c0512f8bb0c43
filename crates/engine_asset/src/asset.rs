//! The [`Asset`] trait and shared header.

use std::any::Any;
use std::fmt;

use crate::cache::{CacheState, Cacheable};
use crate::id::AssetId;

/// Kind tag carried by every asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    /// Pixel image.
    Texture,
    /// Render target described only by its resolution.
    RenderableTexture,
    /// Six-face cube image.
    Cubemap,
    /// Cube render target described only by its face size.
    RenderableCubemap,
    /// Triangle mesh.
    Mesh,
    /// Set of shader stage sources.
    ShaderProgram,
    /// Surface parameters; no GPU counterpart.
    Material,
}

impl AssetType {
    /// Whether the GPU cache mirrors this kind as a texture.
    #[must_use]
    pub fn is_texture_like(self) -> bool {
        matches!(
            self,
            AssetType::Texture
                | AssetType::RenderableTexture
                | AssetType::Cubemap
                | AssetType::RenderableCubemap
        )
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Identity, name and version shared by every asset.
#[derive(Debug, Clone)]
pub struct AssetHeader {
    id: AssetId,
    name: String,
    cache: CacheState,
}

impl AssetHeader {
    /// A header with a freshly allocated id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: AssetId::next(),
            name: name.into(),
            cache: CacheState::new(),
        }
    }

    /// The asset id.
    #[must_use]
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current version.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.cache.version()
    }

    /// Record a mutation of the owning asset.
    pub fn mark_dirty(&mut self) {
        self.cache.mark_dirty();
    }
}

/// Contract shared by every CPU-side asset.
pub trait Asset: Any + 'static {
    /// The shared header.
    fn header(&self) -> &AssetHeader;

    /// The declared kind.
    fn asset_type(&self) -> AssetType;

    /// `self` as `&dyn Any`, for dispatch on the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// The asset id.
    fn id(&self) -> AssetId {
        self.header().id()
    }

    /// The display name.
    fn name(&self) -> &str {
        self.header().name()
    }
}

impl<A: Asset + ?Sized> Cacheable for A {
    fn cache_id(&self) -> AssetId {
        self.header().id()
    }

    fn version(&self) -> u64 {
        self.header().version()
    }
}

impl dyn Asset {
    /// Borrow as the concrete type `T`.
    #[must_use]
    pub fn downcast_ref<T: Asset>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }
}
