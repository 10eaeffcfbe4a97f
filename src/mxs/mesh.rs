use anyhow::bail;
use glam::Vec3;

use crate::mxs::material::MaterialRef;

/// A triangle in the renderer's layout: vertex and normal indices are
/// independent.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [u32; 3],
    pub normals: [u32; 3],
    pub material: MaterialRef,
}

impl Triangle {
    pub fn new(vertices: [u32; 3], normals: [u32; 3]) -> Self {
        Self {
            vertices,
            normals,
            material: MaterialRef::Null,
        }
    }

    pub fn with_material(mut self, material: MaterialRef) -> Self {
        self.material = material;
        self
    }
}

/// UVW coordinates of the three corners of one triangle.
pub type TriangleUvw = [Vec3; 3];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
    /// One entry per UV channel, each parallel to `triangles`.
    pub uv_channels: Vec<Vec<TriangleUvw>>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn uv_channel_count(&self) -> usize {
        self.uv_channels.len()
    }

    pub fn vertex(&self, index: u32) -> Option<Vec3> {
        self.positions.get(index as usize).copied()
    }

    pub fn normal(&self, index: u32) -> Option<Vec3> {
        self.normals.get(index as usize).copied()
    }

    pub fn triangle_uvw(&self, index: usize, channel: usize) -> Option<&TriangleUvw> {
        self.uv_channels.get(channel)?.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() || self.positions.is_empty()
    }

    /// Checks that every index is in range and UV channels match the
    /// triangle count.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (index, triangle) in self.triangles.iter().enumerate() {
            if let Some(vertex) = triangle
                .vertices
                .iter()
                .find(|&&v| v as usize >= self.positions.len())
            {
                bail!(
                    "Triangle {} references vertex {} but the mesh has {} vertices",
                    index,
                    vertex,
                    self.positions.len()
                );
            }

            if let Some(normal) = triangle
                .normals
                .iter()
                .find(|&&n| n as usize >= self.normals.len())
            {
                bail!(
                    "Triangle {} references normal {} but the mesh has {} normals",
                    index,
                    normal,
                    self.normals.len()
                );
            }
        }

        for (channel, uvs) in self.uv_channels.iter().enumerate() {
            if uvs.len() != self.triangles.len() {
                bail!(
                    "UV channel {} has {} entries for {} triangles",
                    channel,
                    uvs.len(),
                    self.triangles.len()
                );
            }
        }

        Ok(())
    }
}
