//! GPU mirrors of texture-like assets.

use engine_asset::{
    Asset, AssetType, CubeFace, Cubemap, RenderableCubemap, RenderableTexture, SyncState, Texture,
};

/// A 2D texture with uploaded pixels.
#[derive(Debug, Clone)]
pub struct GlTexture2D {
    sync: SyncState,
    width: u32,
    height: u32,
    uploaded_bytes: usize,
    upload_count: u64,
}

impl GlTexture2D {
    fn build(texture: &Texture) -> Self {
        let mut gl = Self {
            sync: SyncState::new(texture.id()),
            width: 0,
            height: 0,
            uploaded_bytes: 0,
            upload_count: 0,
        };
        gl.upload(texture);
        gl
    }

    fn upload(&mut self, texture: &Texture) {
        self.width = texture.width();
        self.height = texture.height();
        self.uploaded_bytes = texture.pixels().len();
        self.upload_count += 1;
        self.sync.mark_updated(texture);
    }

    /// Width in pixels at the last upload.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels at the last upload.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes pushed by the last upload.
    #[must_use]
    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }

    /// Number of uploads, counting the initial build.
    #[must_use]
    pub fn upload_count(&self) -> u64 {
        self.upload_count
    }
}

/// A render target; only its storage is allocated.
#[derive(Debug, Clone)]
pub struct GlRenderTarget {
    sync: SyncState,
    width: u32,
    height: u32,
    upload_count: u64,
}

impl GlRenderTarget {
    fn build(target: &RenderableTexture) -> Self {
        let mut gl = Self {
            sync: SyncState::new(target.id()),
            width: 0,
            height: 0,
            upload_count: 0,
        };
        gl.upload(target);
        gl
    }

    fn upload(&mut self, target: &RenderableTexture) {
        self.width = target.width();
        self.height = target.height();
        self.upload_count += 1;
        self.sync.mark_updated(target);
    }

    /// Width in pixels at the last upload.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels at the last upload.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of uploads, counting the initial build.
    #[must_use]
    pub fn upload_count(&self) -> u64 {
        self.upload_count
    }
}

/// A cube texture with all six faces uploaded.
#[derive(Debug, Clone)]
pub struct GlCubemap {
    sync: SyncState,
    size: u32,
    uploaded_bytes: usize,
    upload_count: u64,
}

impl GlCubemap {
    fn build(cubemap: &Cubemap) -> Self {
        let mut gl = Self {
            sync: SyncState::new(cubemap.id()),
            size: 0,
            uploaded_bytes: 0,
            upload_count: 0,
        };
        gl.upload(cubemap);
        gl
    }

    fn upload(&mut self, cubemap: &Cubemap) {
        self.size = cubemap.size();
        self.uploaded_bytes = CubeFace::ALL
            .iter()
            .map(|&face| cubemap.face(face).len())
            .sum();
        self.upload_count += 1;
        self.sync.mark_updated(cubemap);
    }

    /// Edge length of each face in pixels at the last upload.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Bytes pushed by the last upload, all faces together.
    #[must_use]
    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }

    /// Number of uploads, counting the initial build.
    #[must_use]
    pub fn upload_count(&self) -> u64 {
        self.upload_count
    }
}

/// A cube render target; only its storage is allocated.
#[derive(Debug, Clone)]
pub struct GlRenderCubemap {
    sync: SyncState,
    size: u32,
    upload_count: u64,
}

impl GlRenderCubemap {
    fn build(target: &RenderableCubemap) -> Self {
        let mut gl = Self {
            sync: SyncState::new(target.id()),
            size: 0,
            upload_count: 0,
        };
        gl.upload(target);
        gl
    }

    fn upload(&mut self, target: &RenderableCubemap) {
        self.size = target.size();
        self.upload_count += 1;
        self.sync.mark_updated(target);
    }

    /// Edge length of each face in pixels at the last upload.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of uploads, counting the initial build.
    #[must_use]
    pub fn upload_count(&self) -> u64 {
        self.upload_count
    }
}

/// Every GPU texture kind, selected by the source's [`AssetType`].
#[derive(Debug, Clone)]
pub enum GlTexture {
    Texture(GlTexture2D),
    RenderTarget(GlRenderTarget),
    Cubemap(GlCubemap),
    RenderCubemap(GlRenderCubemap),
}

impl GlTexture {
    /// Build the mirror for `asset`.
    ///
    /// Returns `None` for kinds without a texture representation, or when
    /// the concrete type does not match the declared [`AssetType`].
    pub(crate) fn build(asset: &dyn Asset) -> Option<Self> {
        match asset.asset_type() {
            AssetType::Texture => asset
                .downcast_ref::<Texture>()
                .map(|t| GlTexture::Texture(GlTexture2D::build(t))),
            AssetType::RenderableTexture => asset
                .downcast_ref::<RenderableTexture>()
                .map(|t| GlTexture::RenderTarget(GlRenderTarget::build(t))),
            AssetType::Cubemap => asset
                .downcast_ref::<Cubemap>()
                .map(|c| GlTexture::Cubemap(GlCubemap::build(c))),
            AssetType::RenderableCubemap => asset
                .downcast_ref::<RenderableCubemap>()
                .map(|c| GlTexture::RenderCubemap(GlRenderCubemap::build(c))),
            AssetType::Mesh | AssetType::ShaderProgram | AssetType::Material => None,
        }
    }

    /// Re-push from `asset`. Returns `false` if `asset` is not the kind this
    /// mirror was built from.
    pub(crate) fn upload(&mut self, asset: &dyn Asset) -> bool {
        let any = asset.as_any();
        match self {
            GlTexture::Texture(gl) => any.downcast_ref::<Texture>().map(|t| gl.upload(t)),
            GlTexture::RenderTarget(gl) => {
                any.downcast_ref::<RenderableTexture>().map(|t| gl.upload(t))
            }
            GlTexture::Cubemap(gl) => any.downcast_ref::<Cubemap>().map(|c| gl.upload(c)),
            GlTexture::RenderCubemap(gl) => {
                any.downcast_ref::<RenderableCubemap>().map(|c| gl.upload(c))
            }
        }
        .is_some()
    }

    /// Version bookkeeping against the source asset.
    #[must_use]
    pub fn sync(&self) -> &SyncState {
        match self {
            GlTexture::Texture(gl) => &gl.sync,
            GlTexture::RenderTarget(gl) => &gl.sync,
            GlTexture::Cubemap(gl) => &gl.sync,
            GlTexture::RenderCubemap(gl) => &gl.sync,
        }
    }

    /// How many times this mirror has been pushed.
    #[must_use]
    pub fn upload_count(&self) -> u64 {
        match self {
            GlTexture::Texture(gl) => gl.upload_count,
            GlTexture::RenderTarget(gl) => gl.upload_count,
            GlTexture::Cubemap(gl) => gl.upload_count,
            GlTexture::RenderCubemap(gl) => gl.upload_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_getters_follow_last_upload() {
        let mut texture = Texture::solid("t", 2, 2, [0; 4]);
        let mut gl = GlTexture2D::build(&texture);
        assert_eq!((gl.width(), gl.height(), gl.uploaded_bytes()), (2, 2, 16));
        assert_eq!(gl.upload_count(), 1);

        texture.set_pixels(4, 1, vec![7; 16]).unwrap();
        gl.upload(&texture);
        assert_eq!((gl.width(), gl.height(), gl.uploaded_bytes()), (4, 1, 16));
        assert_eq!(gl.upload_count(), 2);
    }

    #[test]
    fn test_render_target_getters_follow_last_upload() {
        let mut target = RenderableTexture::new("rt", 8, 8);
        let mut gl = GlRenderTarget::build(&target);
        target.set_resolution(16, 4);
        gl.upload(&target);
        assert_eq!((gl.width(), gl.height()), (16, 4));
        assert_eq!(gl.upload_count(), 2);
        assert_eq!(GlTexture::RenderTarget(gl).upload_count(), 2);
    }
}
