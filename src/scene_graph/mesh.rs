use glam::{Mat3, Vec2, Vec3};
use id_arena::Id;

use crate::material_manager::MaterialId;
use crate::math::AABB;

pub type MeshId = Id<PolyMesh>;

#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertices: Vec<u32>,
    /// Index into [`PolyMesh::materials`].
    pub material_index: u32,
}

impl Face {
    pub fn new(vertices: impl Into<Vec<u32>>) -> Self {
        Self {
            vertices: vertices.into(),
            material_index: 0,
        }
    }

    pub fn with_material(mut self, material_index: u32) -> Self {
        self.material_index = material_index;
        self
    }
}

/// Per-face-corner texture coordinates, parallel to [`PolyMesh::faces`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UvLayer {
    pub faces: Vec<Vec<Vec2>>,
}

/// Polygon mesh in the host's layout: positions and normals are parallel
/// per-vertex arrays, faces are arbitrary polygons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub uv_layers: Vec<UvLayer>,
    /// Material slots; `None` is an empty slot.
    pub materials: Vec<Option<MaterialId>>,
}

impl PolyMesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn bounding_box(&self) -> Option<AABB> {
        AABB::from_points(self.positions.iter().copied())
    }

    /// Bakes `basis` into the vertex data. Normals use the inverse transpose.
    pub fn transform(&mut self, basis: Mat3) {
        for position in self.positions.iter_mut() {
            *position = basis * *position;
        }

        let normal_matrix = basis.inverse().transpose();
        if normal_matrix.is_finite() {
            for normal in self.normals.iter_mut() {
                *normal = (normal_matrix * *normal).normalize_or_zero();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_bakes_scale_into_positions() {
        let mut mesh = PolyMesh::new("quad");
        mesh.positions = vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
        mesh.normals = vec![Vec3::Z; 4];
        mesh.faces = vec![Face::new([0, 1, 2, 3])];

        mesh.transform(Mat3::from_diagonal(Vec3::new(2.0, 3.0, 1.0)));

        let aabb = mesh.bounding_box().unwrap();
        assert_eq!(aabb.max, Vec3::new(2.0, 3.0, 0.0));
        assert_eq!(mesh.normals[0], Vec3::Z);
    }
}
