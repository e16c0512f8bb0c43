//! Asset id keyed cache of GPU mirrors.
//!
//! Every `get_*` call follows the same three-way rule:
//!
//! - **miss**: build the mirror, store it, record the source version;
//! - **hit, dirty**: re-push the relevant data in one upload and record the
//!   new version;
//! - **hit, clean**: return the stored mirror untouched.
//!
//! Entries are never evicted.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use engine_asset::{Asset, AssetId, Mesh, ShaderProgram};
use tracing::debug;

use crate::gl_mesh::GlMesh;
use crate::gl_shader::GlShaderProgram;
use crate::gl_texture::GlTexture;

/// Counters describing the cache contents and activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Live mesh mirrors.
    pub meshes: usize,
    /// Live texture mirrors of every kind.
    pub textures: usize,
    /// Live shader program mirrors.
    pub programs: usize,
    /// Mirrors built on a miss.
    pub builds: u64,
    /// Mirrors re-pushed because their source was dirty.
    pub rebuilds: u64,
}

/// Owns one GPU mirror per asset id.
#[derive(Debug, Default)]
pub struct GlResourceManager {
    meshes: HashMap<AssetId, GlMesh>,
    textures: HashMap<AssetId, GlTexture>,
    programs: HashMap<AssetId, GlShaderProgram>,
    builds: u64,
    rebuilds: u64,
}

impl GlResourceManager {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The up-to-date mirror of `mesh`.
    pub fn get_gl_mesh(&mut self, mesh: &Mesh) -> &GlMesh {
        match self.meshes.entry(mesh.id()) {
            Entry::Occupied(entry) => {
                let gl = entry.into_mut();
                if gl.sync().is_dirty(mesh) {
                    gl.upload(mesh);
                    self.rebuilds += 1;
                    debug!(asset = %mesh.id(), name = mesh.name(), "re-uploaded mesh");
                }
                gl
            }
            Entry::Vacant(entry) => {
                self.builds += 1;
                debug!(
                    asset = %mesh.id(),
                    name = mesh.name(),
                    vertices = mesh.vertex_count(),
                    "built mesh"
                );
                entry.insert(GlMesh::build(mesh))
            }
        }
    }

    /// The up-to-date mirror of a texture-like asset.
    ///
    /// Returns `None` for assets without a texture representation
    /// ([`Material`](engine_asset::Material), meshes, shader programs) and
    /// for assets whose concrete type does not match their declared
    /// [`AssetType`](engine_asset::AssetType).
    pub fn get_gl_texture(&mut self, asset: &dyn Asset) -> Option<&GlTexture> {
        if !asset.asset_type().is_texture_like() {
            return None;
        }
        match self.textures.entry(asset.id()) {
            Entry::Occupied(entry) => {
                let gl = entry.into_mut();
                if gl.sync().is_dirty(asset) {
                    if !gl.upload(asset) {
                        return None;
                    }
                    self.rebuilds += 1;
                    debug!(asset = %asset.id(), kind = %asset.asset_type(), "re-uploaded texture");
                }
                Some(&*gl)
            }
            Entry::Vacant(entry) => {
                let gl = GlTexture::build(asset)?;
                self.builds += 1;
                debug!(asset = %asset.id(), kind = %asset.asset_type(), "built texture");
                Some(&*entry.insert(gl))
            }
        }
    }

    /// The up-to-date mirror of `program`.
    pub fn get_gl_shader_program(&mut self, program: &ShaderProgram) -> &GlShaderProgram {
        match self.programs.entry(program.id()) {
            Entry::Occupied(entry) => {
                let gl = entry.into_mut();
                if gl.sync().is_dirty(program) {
                    gl.upload(program);
                    self.rebuilds += 1;
                    debug!(asset = %program.id(), stages = gl.stages().len(), "recompiled program");
                }
                gl
            }
            Entry::Vacant(entry) => {
                self.builds += 1;
                let gl = entry.insert(GlShaderProgram::build(program));
                debug!(asset = %program.id(), stages = gl.stages().len(), "compiled program");
                gl
            }
        }
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            meshes: self.meshes.len(),
            textures: self.textures.len(),
            programs: self.programs.len(),
            builds: self.builds,
            rebuilds: self.rebuilds,
        }
    }
}
