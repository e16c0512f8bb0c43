//! Triangle meshes.

use std::any::Any;

use engine_math::{Vec2, Vec3};

use crate::asset::{Asset, AssetHeader, AssetType};
use crate::error::AssetError;

/// Indexed triangle mesh with per-vertex normals and texture coordinates.
#[derive(Debug, Clone)]
pub struct Mesh {
    header: AssetHeader,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl Mesh {
    /// An empty mesh.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: AssetHeader::new(name),
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Vertex normals, one per position.
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Texture coordinates, one per position.
    #[must_use]
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Triangle indices, three per triangle.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of complete triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Replace the geometry and recompute smooth normals.
    ///
    /// Texture coordinates are reset to zero unless `uvs` holds one entry
    /// per position.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::IndexOutOfRange`] if an index does not name a
    /// position; the mesh is left unchanged in that case.
    pub fn set_geometry(
        &mut self,
        positions: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Result<(), AssetError> {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(AssetError::IndexOutOfRange {
                index,
                vertices: positions.len(),
            });
        }
        self.uvs = if uvs.len() == positions.len() {
            uvs
        } else {
            vec![Vec2::ZERO; positions.len()]
        };
        self.positions = positions;
        self.indices = indices;
        self.recompute_normals();
        Ok(())
    }

    /// Remove all geometry.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.indices.clear();
        self.header.mark_dirty();
    }

    /// Recompute area-weighted smooth vertex normals from the triangles.
    ///
    /// Vertices not used by any non-degenerate triangle get a zero normal.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
        self.header.mark_dirty();
    }
}

impl Asset for Mesh {
    fn header(&self) -> &AssetHeader {
        &self.header
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Mesh
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
