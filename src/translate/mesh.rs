use anyhow::{bail, Context};
use glam::{Vec2, Vec3};
use indexmap::IndexSet;
use itertools::{izip, Itertools};

use crate::mxs::{MaterialRef, MeshData, Triangle, TriangleUvw};
use crate::scene_graph::{Face, PolyMesh, UvLayer};

/// Normals with a NaN component become zero; everything else is normalized.
pub fn sanitize_normal(normal: Vec3) -> Vec3 {
    if normal.is_nan() {
        Vec3::ZERO
    } else {
        normal.normalize_or_zero()
    }
}

/// The host drops faces whose last vertex index is 0, so such triangles are
/// rotated before they reach it.
pub fn needs_zero_face_rotation(vertices: [u32; 3]) -> bool {
    vertices[2] == 0
}

fn rotate_left<T: Copy>(corners: [T; 3]) -> [T; 3] {
    [corners[1], corners[2], corners[0]]
}

/// Corner indices of the triangles a polygon with `corner_count` corners
/// splits into. Quads share the v0-v2 diagonal; larger polygons are fanned
/// around v0.
pub fn triangulate_corners(corner_count: usize) -> Vec<[usize; 3]> {
    match corner_count {
        0..=2 => Vec::new(),
        3 => vec![[0, 1, 2]],
        4 => vec![[0, 1, 2], [2, 3, 0]],
        n => (2..n).map(|i| [0, i - 1, i]).collect(),
    }
}

/// Converts host polygons into renderer triangles.
///
/// `material_names` holds the host material name for each material slot, with
/// any object-level override already applied.
pub fn export_mesh(mesh: &PolyMesh, material_names: &[Option<String>]) -> anyhow::Result<MeshData> {
    let vertex_count = mesh.positions.len();

    let normals = (0..vertex_count)
        .map(|index| {
            mesh.normals
                .get(index)
                .copied()
                .map(sanitize_normal)
                .unwrap_or(Vec3::ZERO)
        })
        .collect_vec();

    let uv_layer = mesh.uv_layers.first();
    let mut triangles = Vec::with_capacity(mesh.faces.len());
    let mut uvs: Vec<TriangleUvw> = Vec::new();

    for (face_index, face) in mesh.faces.iter().enumerate() {
        if face.vertices.len() < 3 {
            log::warn!(
                "Skipping face {} of mesh {} with {} vertices",
                face_index,
                mesh.name,
                face.vertices.len()
            );
            continue;
        }

        if let Some(&vertex) = face
            .vertices
            .iter()
            .find(|&&vertex| vertex as usize >= vertex_count)
        {
            bail!(
                "Face {} of mesh {} references vertex {} but the mesh has {} vertices",
                face_index,
                mesh.name,
                vertex,
                vertex_count
            );
        }

        let material = material_names
            .get(face.material_index as usize)
            .cloned()
            .flatten()
            .map_or(MaterialRef::Null, MaterialRef::Named);

        let face_uvs = uv_layer.and_then(|layer| layer.faces.get(face_index));

        for corners in triangulate_corners(face.vertices.len()) {
            let vertices = corners.map(|corner| face.vertices[corner]);
            triangles.push(Triangle::new(vertices, vertices).with_material(material.clone()));

            if uv_layer.is_some() {
                uvs.push(corners.map(|corner| {
                    let uv = face_uvs
                        .and_then(|face_uvs| face_uvs.get(corner))
                        .copied()
                        .unwrap_or(Vec2::ZERO);
                    Vec3::new(uv.x, -uv.y, 0.0)
                }));
            }
        }
    }

    let exported = MeshData {
        positions: mesh.positions.clone(),
        normals,
        triangles,
        uv_channels: if uv_layer.is_some() { vec![uvs] } else { Vec::new() },
    };

    exported
        .validate()
        .with_context(|| format!("Exported mesh {} is inconsistent", mesh.name))?;

    Ok(exported)
}

/// A host mesh built from renderer triangles, with the material names its
/// slots refer to, in slot order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMesh {
    pub mesh: PolyMesh,
    pub material_names: Vec<String>,
}

/// Converts renderer triangles into a host mesh.
pub fn import_mesh(data: &MeshData, name: &str) -> anyhow::Result<ImportedMesh> {
    data.validate()
        .with_context(|| format!("Mesh {} has invalid indices", name))?;

    let vertex_count = data
        .triangles
        .iter()
        .flat_map(|triangle| triangle.vertices)
        .max()
        .map_or(0, |max| max as usize + 1);

    // Each vertex takes the normal with the highest index among the
    // triangle corners that use it.
    let mut normal_index: Vec<Option<u32>> = vec![None; vertex_count];
    for triangle in &data.triangles {
        for (&vertex, &normal) in izip!(&triangle.vertices, &triangle.normals) {
            let slot = &mut normal_index[vertex as usize];
            *slot = Some(slot.map_or(normal, |current| current.max(normal)));
        }
    }

    let normals = normal_index
        .iter()
        .map(|index| {
            index
                .and_then(|index| data.normal(index))
                .unwrap_or(Vec3::ZERO)
        })
        .collect_vec();

    let mut material_names: IndexSet<String> = IndexSet::new();
    let mut faces = Vec::with_capacity(data.triangle_count());
    let mut uv_faces = Vec::new();
    let has_uvs = data.uv_channel_count() > 0;

    for (index, triangle) in data.triangles.iter().enumerate() {
        let material_index = match &triangle.material {
            MaterialRef::Null => 0,
            MaterialRef::Named(material) => material_names.insert_full(material.clone()).0 as u32,
        };

        let rotate = needs_zero_face_rotation(triangle.vertices);
        let vertices = if rotate {
            rotate_left(triangle.vertices)
        } else {
            triangle.vertices
        };
        faces.push(Face::new(vertices).with_material(material_index));

        if let Some(uvw) = data.triangle_uvw(index, 0) {
            let uvw = if rotate { rotate_left(*uvw) } else { *uvw };
            uv_faces.push(uvw.iter().map(|uv| Vec2::new(uv.x, -uv.y)).collect_vec());
        }
    }

    let mut mesh = PolyMesh::new(name);
    mesh.positions = (0..vertex_count as u32)
        .map(|index| data.vertex(index).unwrap_or(Vec3::ZERO))
        .collect();
    mesh.normals = normals;
    mesh.faces = faces;
    if has_uvs {
        mesh.uv_layers.push(UvLayer { faces: uv_faces });
    }

    Ok(ImportedMesh {
        mesh,
        material_names: material_names.into_iter().collect(),
    })
}
