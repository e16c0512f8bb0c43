//! Components that generate meshes.
//!
//! Each geometry component owns a [`Mesh`] that is regenerated lazily: the
//! mesh remembers the property table revision (and, for externally fed
//! shapes, a source generation) it was built from, and [`Geometry::mesh`]
//! rebuilds it only when either has moved. Rebuilding bumps the mesh
//! version, which is what the GPU cache keys its own refresh on.

use std::f32::consts::TAU;

use engine_anim::load_curve_file;
use engine_asset::{Asset, AssetError, Mesh};
use engine_component::{Component, Property, PropertyTable};
use engine_math::{DVec2, Vec2, Vec3};
use tracing::{debug, warn};

use crate::error::SceneError;

/// A component that produces a triangle mesh.
pub trait Geometry: Component {
    /// Reload any external inputs the properties point at (such as curve
    /// files). The default has none.
    ///
    /// # Errors
    ///
    /// Returns an error if an external input cannot be read.
    fn load_external(&mut self) -> Result<(), SceneError> {
        Ok(())
    }

    /// The mesh for the current property values, regenerated if stale.
    fn mesh(&mut self) -> &Mesh;
}

type GeometryData = (Vec<Vec3>, Vec<Vec2>, Vec<u32>);

#[derive(Debug)]
struct GeneratedMesh {
    mesh: Mesh,
    built_from: Option<(u64, u64)>,
}

impl GeneratedMesh {
    fn new(name: &str) -> Self {
        Self {
            mesh: Mesh::new(name),
            built_from: None,
        }
    }

    fn refresh(&mut self, key: (u64, u64), build: impl FnOnce() -> GeometryData) -> &Mesh {
        if self.built_from != Some(key) {
            let (positions, uvs, indices) = build();
            if let Err(err) = self.mesh.set_geometry(positions, uvs, indices) {
                warn!(mesh = %self.mesh.header().name(), %err, "discarding invalid geometry");
                self.mesh.clear();
            }
            self.built_from = Some(key);
            debug!(
                mesh = %self.mesh.header().name(),
                vertices = self.mesh.vertex_count(),
                triangles = self.mesh.triangle_count(),
                "regenerated mesh"
            );
        }
        &self.mesh
    }
}

fn check_indices(vertices: usize, indices: &[u32]) -> Result<(), AssetError> {
    match indices.iter().find(|&&i| i as usize >= vertices) {
        Some(&index) => Err(AssetError::IndexOutOfRange { index, vertices }),
        None => Ok(()),
    }
}

/// Axis-aligned rectangle in the XZ plane, centred on the origin, facing +Y.
#[derive(Debug)]
pub struct Plane {
    properties: PropertyTable,
    generated: GeneratedMesh,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            properties: PropertyTable::new()
                .with("Width", Property::double(1.0))
                .with("Height", Property::double(1.0)),
            generated: GeneratedMesh::new("Plane"),
        }
    }
}

impl_component!(Plane);

impl Geometry for Plane {
    fn mesh(&mut self) -> &Mesh {
        let hw = self.properties.double_value("Width") as f32 / 2.0;
        let hh = self.properties.double_value("Height") as f32 / 2.0;
        self.generated.refresh((self.properties.revision(), 0), || {
            (
                vec![
                    Vec3::new(-hw, 0.0, -hh),
                    Vec3::new(-hw, 0.0, hh),
                    Vec3::new(hw, 0.0, hh),
                    Vec3::new(hw, 0.0, -hh),
                ],
                vec![Vec2::ZERO, Vec2::Y, Vec2::ONE, Vec2::X],
                vec![0, 1, 2, 0, 2, 3],
            )
        })
    }
}

/// A single triangle given by three vertex properties.
#[derive(Debug)]
pub struct TriangleFace {
    properties: PropertyTable,
    generated: GeneratedMesh,
}

impl Default for TriangleFace {
    fn default() -> Self {
        Self {
            properties: PropertyTable::new()
                .with("Vertex A", Property::vector(Vec3::ZERO))
                .with("Vertex B", Property::vector(Vec3::X))
                .with("Vertex C", Property::vector(Vec3::Y)),
            generated: GeneratedMesh::new("TriangleFace"),
        }
    }
}

impl_component!(TriangleFace);

impl Geometry for TriangleFace {
    fn mesh(&mut self) -> &Mesh {
        let vertex = |name| {
            self.properties
                .get(name)
                .and_then(Property::as_vec3)
                .unwrap_or(Vec3::ZERO)
        };
        let positions = vec![vertex("Vertex A"), vertex("Vertex B"), vertex("Vertex C")];
        self.generated.refresh((self.properties.revision(), 0), || {
            (positions, vec![Vec2::ZERO, Vec2::X, Vec2::Y], vec![0, 1, 2])
        })
    }
}

/// A mesh whose vertices are supplied by the caller.
///
/// With `Smooth Normals` off, every triangle gets its own vertices so the
/// shading is faceted.
#[derive(Debug)]
pub struct TriangleMesh {
    properties: PropertyTable,
    generated: GeneratedMesh,
    source: GeometryData,
    generation: u64,
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self {
            properties: PropertyTable::new().with("Smooth Normals", Property::bool(true)),
            generated: GeneratedMesh::new("TriangleMesh"),
            source: (Vec::new(), Vec::new(), Vec::new()),
            generation: 0,
        }
    }
}

impl TriangleMesh {
    /// Replace the source geometry.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::IndexOutOfRange`] if an index does not name a
    /// position.
    pub fn set_mesh_data(
        &mut self,
        positions: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Result<(), AssetError> {
        check_indices(positions.len(), &indices)?;
        self.source = (positions, uvs, indices);
        self.generation += 1;
        Ok(())
    }
}

impl_component!(TriangleMesh);

impl Geometry for TriangleMesh {
    fn mesh(&mut self) -> &Mesh {
        let smooth = self.properties.bool_value("Smooth Normals");
        let key = (self.properties.revision(), self.generation);
        let (positions, uvs, indices) = &self.source;
        self.generated.refresh(key, || {
            if smooth {
                return (positions.clone(), uvs.clone(), indices.clone());
            }
            let uv_at = |i: u32| uvs.get(i as usize).copied().unwrap_or(Vec2::ZERO);
            let flat_positions = indices.iter().map(|&i| positions[i as usize]).collect();
            let flat_uvs = indices.iter().map(|&i| uv_at(i)).collect();
            (flat_positions, flat_uvs, (0..indices.len() as u32).collect())
        })
    }
}

/// A profile curve revolved around the Y axis.
///
/// The profile comes from a curve file (`x` is the radius, `y` the height).
/// Files may hold several point lists; `Level Of Detail` picks one, clamped
/// to the lists available.
#[derive(Debug)]
pub struct SurfaceOfRevolution {
    properties: PropertyTable,
    generated: GeneratedMesh,
    profiles: Vec<Vec<DVec2>>,
    loaded_path: Option<String>,
    generation: u64,
}

/// Fewest segments around the axis that still enclose a volume.
const MIN_SUBDIVISIONS: i64 = 3;
/// Most segments around the axis. Values loaded from files are clamped here.
pub const MAX_SUBDIVISIONS: i64 = 1024;

impl Default for SurfaceOfRevolution {
    fn default() -> Self {
        Self {
            properties: PropertyTable::new()
                .with("Curve File", Property::text(""))
                .with("Subdivisions", Property::int(16))
                .with("Level Of Detail", Property::int(0)),
            generated: GeneratedMesh::new("SurfaceOfRevolution"),
            profiles: Vec::new(),
            loaded_path: None,
            generation: 0,
        }
    }
}

impl SurfaceOfRevolution {
    /// Replace the profile lists directly.
    pub fn set_profiles(&mut self, profiles: Vec<Vec<DVec2>>) {
        self.profiles = profiles;
        self.generation += 1;
    }

    /// The loaded profile lists.
    #[must_use]
    pub fn profiles(&self) -> &[Vec<DVec2>] {
        &self.profiles
    }
}

impl_component!(SurfaceOfRevolution);

impl Geometry for SurfaceOfRevolution {
    fn load_external(&mut self) -> Result<(), SceneError> {
        let path = self.properties.text_value("Curve File").to_string();
        if path.is_empty() || self.loaded_path.as_deref() == Some(path.as_str()) {
            return Ok(());
        }
        let profiles = load_curve_file(&path)?;
        self.set_profiles(profiles);
        self.loaded_path = Some(path);
        Ok(())
    }

    fn mesh(&mut self) -> &Mesh {
        let key = (self.properties.revision(), self.generation);
        let subdivisions = self
            .properties
            .int_value("Subdivisions")
            .clamp(MIN_SUBDIVISIONS, MAX_SUBDIVISIONS) as usize;
        let lod = self.properties.int_value("Level Of Detail").max(0) as usize;
        let profile = self
            .profiles
            .get(lod.min(self.profiles.len().saturating_sub(1)))
            .map_or(&[][..], Vec::as_slice);
        self.generated
            .refresh(key, || revolve(profile, subdivisions))
    }
}

fn revolve(profile: &[DVec2], subdivisions: usize) -> GeometryData {
    let ring = subdivisions + 1;
    let mut positions = Vec::with_capacity(profile.len() * ring);
    let mut uvs = Vec::with_capacity(profile.len() * ring);
    let rows = profile.len().saturating_sub(1).max(1) as f32;
    for (i, point) in profile.iter().enumerate() {
        let (radius, height) = (point.x as f32, point.y as f32);
        for j in 0..ring {
            let u = j as f32 / subdivisions as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            positions.push(Vec3::new(radius * cos, height, radius * sin));
            uvs.push(Vec2::new(u, i as f32 / rows));
        }
    }

    let mut indices = Vec::with_capacity(profile.len().saturating_sub(1) * subdivisions * 6);
    for i in 0..profile.len().saturating_sub(1) {
        for j in 0..subdivisions {
            let a = (i * ring + j) as u32;
            let b = a + ring as u32;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    (positions, uvs, indices)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use engine_asset::Cacheable;
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn test_plane_faces_up_and_tracks_size() {
        let mut plane = Plane::default();
        let mesh = plane.mesh();
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.normals().iter().all(|n| (*n - Vec3::Y).length() < 1e-6));
        let v1 = mesh.version();

        plane.properties_mut().double_mut("Width").unwrap().set(4.0);
        let mesh = plane.mesh();
        assert!(mesh.version() > v1);
        assert_eq!(mesh.positions()[2].x, 2.0);
    }

    #[test]
    fn test_unchanged_properties_keep_mesh_version() {
        let mut plane = Plane::default();
        let v = plane.mesh().version();
        assert_eq!(plane.mesh().version(), v);
    }

    #[test]
    fn test_triangle_face_reads_vertices() {
        let mut face = TriangleFace::default();
        if let Some(Property::Vector(p)) = face.properties_mut().get_mut("Vertex C") {
            p.set(Vec3::new(0.0, 0.0, 1.0));
        }
        let mesh = face.mesh();
        assert_eq!(mesh.positions()[2], Vec3::Z);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_flat_triangle_mesh_splits_vertices() {
        let mut tm = TriangleMesh::default();
        tm.set_mesh_data(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            Vec::new(),
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap();
        assert_eq!(tm.mesh().vertex_count(), 4);

        if let Some(Property::Bool(p)) = tm.properties_mut().get_mut("Smooth Normals") {
            p.set(false);
        }
        assert_eq!(tm.mesh().vertex_count(), 6);
    }

    #[test]
    fn test_triangle_mesh_rejects_bad_indices() {
        let mut tm = TriangleMesh::default();
        assert!(tm.set_mesh_data(vec![Vec3::ZERO], Vec::new(), vec![0, 1, 2]).is_err());
    }

    #[test]
    fn test_revolution_ring_layout() {
        let mut surface = SurfaceOfRevolution::default();
        surface.set_profiles(vec![vec![DVec2::new(1.0, 0.0), DVec2::new(1.0, 2.0)]]);
        let mesh = surface.mesh();
        // Two rings of 17 vertices, 16 quads between them.
        assert_eq!(mesh.vertex_count(), 2 * 17);
        assert_eq!(mesh.triangle_count(), 32);
        assert!((mesh.positions()[0] - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_revolution_level_of_detail_is_clamped() {
        let mut surface = SurfaceOfRevolution::default();
        surface.set_profiles(vec![
            vec![DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0), DVec2::new(0.5, 2.0)],
            vec![DVec2::new(1.0, 0.0), DVec2::new(0.5, 2.0)],
        ]);
        if let Some(Property::Int(p)) = surface.properties_mut().get_mut("Level Of Detail") {
            p.set(9);
        }
        if let Some(Property::Int(p)) = surface.properties_mut().get_mut("Subdivisions") {
            p.set(1);
        }
        let mesh = surface.mesh();
        assert_eq!(mesh.vertex_count(), 2 * 4);
    }

    #[test]
    fn test_revolution_clamps_oversized_subdivisions() {
        let mut surface = SurfaceOfRevolution::default();
        surface.set_profiles(vec![vec![DVec2::new(1.0, 0.0), DVec2::new(1.0, 2.0)]]);
        let Value::Object(map) = json!({ "Subdivisions": 1_000_000_000_000_i64 }) else {
            unreachable!();
        };
        surface.properties_mut().load_map(&map, false).unwrap();
        assert_eq!(surface.properties().int_value("Subdivisions"), 1_000_000_000_000);

        let ring = MAX_SUBDIVISIONS as usize + 1;
        let mesh = surface.mesh();
        assert_eq!(mesh.vertex_count(), 2 * ring);
        assert_eq!(mesh.triangle_count(), 2 * MAX_SUBDIVISIONS as usize);
    }

    #[test]
    fn test_revolution_loads_curve_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 0\n1 1\n-\n1 0\n1 1\n1 2").unwrap();
        let mut surface = SurfaceOfRevolution::default();
        if let Some(Property::Text(p)) = surface.properties_mut().get_mut("Curve File") {
            p.set(file.path().display().to_string());
        }
        surface.load_external().unwrap();
        assert_eq!(surface.profiles().len(), 2);
        // Reloading the same path is a no-op.
        surface.load_external().unwrap();
        assert_eq!(surface.mesh().vertex_count(), 2 * 17);
    }

    #[test]
    fn test_missing_curve_file_is_an_error() {
        let mut surface = SurfaceOfRevolution::default();
        if let Some(Property::Text(p)) = surface.properties_mut().get_mut("Curve File") {
            p.set("/no/such/profile.crv".to_string());
        }
        assert!(matches!(surface.load_external(), Err(SceneError::Animation(_))));
    }
}
