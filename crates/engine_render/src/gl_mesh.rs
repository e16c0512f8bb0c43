//! GPU mirror of a [`Mesh`].

use engine_asset::{Asset, Mesh, SyncState};

/// Floats per interleaved vertex: position, normal, texture coordinate.
pub const VERTEX_STRIDE: usize = 8;

/// Vertex and index buffers built from a mesh.
#[derive(Debug, Clone)]
pub struct GlMesh {
    sync: SyncState,
    vertices: Vec<f32>,
    indices: Vec<u32>,
    upload_count: u64,
}

impl GlMesh {
    pub(crate) fn build(mesh: &Mesh) -> Self {
        let mut gl = Self {
            sync: SyncState::new(mesh.id()),
            vertices: Vec::new(),
            indices: Vec::new(),
            upload_count: 0,
        };
        gl.upload(mesh);
        gl
    }

    /// Re-push both buffers and record the synced version.
    pub(crate) fn upload(&mut self, mesh: &Mesh) {
        self.vertices.clear();
        self.vertices.reserve(mesh.vertex_count() * VERTEX_STRIDE);
        for ((p, n), uv) in mesh.positions().iter().zip(mesh.normals()).zip(mesh.uvs()) {
            self.vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, uv.x, uv.y]);
        }
        self.indices.clear();
        self.indices.extend_from_slice(mesh.indices());
        self.upload_count += 1;
        self.sync.mark_updated(mesh);
    }

    /// Version bookkeeping against the source mesh.
    #[must_use]
    pub fn sync(&self) -> &SyncState {
        &self.sync
    }

    /// Interleaved vertex data, [`VERTEX_STRIDE`] floats per vertex.
    #[must_use]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Triangle indices.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices in the buffer.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    /// How many times the buffers have been pushed.
    #[must_use]
    pub fn upload_count(&self) -> u64 {
        self.upload_count
    }
}
