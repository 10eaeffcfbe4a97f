//! Renderer instances on import.
//!
//! Instances are grouped by the object they repeat and the material they
//! carry. Small groups become plain copies of the host object; large groups
//! become one vertex-duplicated point cloud per distinct rotation/scale.

use glam::{Mat3, Mat4, Vec3};
use indexmap::IndexMap;

use crate::math::base_pivot::with_basis;
use crate::math::{base_pivot_to_matrix, renderer_to_host};
use crate::mxs::{MaterialRef, MxsObjectKind, MxsScene};
use crate::pipeline::report::PassReport;
use crate::scene_graph::{Duplication, Object3D, ObjectId, ObjectKind, PolyMesh, Scene, Transform};
use crate::translate::context::{ImportContext, ImportedObject};

/// Group size from which instances are emitted as point clouds.
pub const DEFAULT_MAX_INSTANCES: usize = 200;

pub const POINT_CLOUD_PREFIX: &str = "DUPLI";

/// Instances of one renderer object sharing one material.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceGroup {
    /// Display name of the instanced object.
    pub source: String,
    pub material: MaterialRef,
    /// World transforms in host space.
    pub transforms: Vec<Mat4>,
}

impl InstanceGroup {
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// Collects every instance object of `scene` into groups, in first-seen
/// order.
pub fn group_instances(
    scene: &MxsScene,
    context: &mut ImportContext,
    report: &mut PassReport,
) -> Vec<InstanceGroup> {
    let mut groups: IndexMap<(String, MaterialRef), InstanceGroup> = IndexMap::new();

    for (_, object) in scene.objects() {
        let instanced = match &object.kind {
            MxsObjectKind::Instance { instanced } => *instanced,
            MxsObjectKind::Mesh(_) | MxsObjectKind::Null => continue,
        };

        let instance_name = object.name.to_string_lossy();
        let Some(reference) = scene.object(instanced) else {
            report.skip(instance_name, "instanced object does not exist");
            continue;
        };

        let source = match reference.name.as_str() {
            Ok(raw) => context.names.cleanup(raw),
            Err(err) => {
                report.skip(instance_name, format!("instanced object has a corrupt name: {}", err));
                continue;
            }
        };

        let world = renderer_to_host(base_pivot_to_matrix(&object.base_pivot));
        let material = object.material.clone();

        groups
            .entry((source.clone(), material.clone()))
            .or_insert_with(|| InstanceGroup {
                source,
                material,
                transforms: Vec::new(),
            })
            .transforms
            .push(world);
    }

    groups.into_values().collect()
}

/// Exact bit pattern of a 3x3, so that only identical rotations and scales
/// share a point cloud. `-0.0` and `0.0` are the same key.
fn basis_key(world: &Mat4) -> [u32; 9] {
    Mat3::from_mat4(*world)
        .to_cols_array()
        .map(|value| (value + 0.0).to_bits())
}

fn place_copy(
    scene: &mut Scene,
    context: &ImportContext,
    reference: &ImportedObject,
    material: &MaterialRef,
    matrix: Mat4,
) -> Option<ObjectId> {
    let copy = scene.copy_object(reference.object)?;
    // Group proxies have no material slots to override.
    let override_id = material
        .name()
        .filter(|_| !reference.proxy)
        .and_then(|name| context.material(name));

    if let Some(object) = scene.get_object_mut(copy) {
        object.transform = Transform::from_matrix(matrix);
        if override_id.is_some() {
            object.material_override = override_id;
        }
    }

    Some(copy)
}

fn copy_instances(
    scene: &mut Scene,
    context: &ImportContext,
    reference: &ImportedObject,
    group: &InstanceGroup,
) -> usize {
    group
        .transforms
        .iter()
        .filter_map(|world| {
            let basis = Mat3::from_mat4(*world) * reference.inverse_basis;
            let matrix = with_basis(basis, world.w_axis.truncate());
            place_copy(scene, context, reference, &group.material, matrix)
        })
        .count()
}

fn point_cloud_instances(
    scene: &mut Scene,
    context: &ImportContext,
    reference: &ImportedObject,
    group: &InstanceGroup,
) -> usize {
    let mut buckets: IndexMap<[u32; 9], Vec<&Mat4>> = IndexMap::new();
    for world in &group.transforms {
        buckets.entry(basis_key(world)).or_default().push(world);
    }

    let mut created = 0;
    for (_, transforms) in buckets {
        let Some(first) = transforms.first().map(|world| world.w_axis.truncate()) else {
            continue;
        };

        let name = format!("{}{}", POINT_CLOUD_PREFIX, group.source);
        let mut cloud = PolyMesh::new(name.clone());
        cloud.positions = transforms
            .iter()
            .map(|world| world.w_axis.truncate() - first)
            .collect();
        cloud.normals = vec![Vec3::ZERO; cloud.positions.len()];
        let mesh_id = scene.add_mesh(cloud);

        let placeholder = scene.add_object(Object3D {
            transform: Transform::from_translation(first),
            duplication: Duplication::Vertices,
            ..Object3D::new(name, ObjectKind::Mesh(mesh_id))
        });

        let basis = Mat3::from_mat4(*transforms[0]) * reference.inverse_basis;
        let matrix = with_basis(basis, Vec3::ZERO);
        if let Some(copy) = place_copy(scene, context, reference, &group.material, matrix) {
            scene.set_object_parent(copy, Some(placeholder));
            created += 2;
        }

        log::debug!(
            "Point cloud for {} with {} points",
            group.source,
            transforms.len()
        );
    }

    created
}

/// Turns instance groups into host objects. Returns the number of host
/// objects created.
pub fn resolve_instances(
    scene: &mut Scene,
    context: &ImportContext,
    groups: &[InstanceGroup],
    max_instances: usize,
    report: &mut PassReport,
) -> usize {
    let mut created = 0;

    for group in groups {
        let Some(reference) = context.meshes.get(&group.source) else {
            log::warn!(
                "Instances of {} have no imported object to copy",
                group.source
            );
            for index in 0..group.len() {
                report.skip(
                    format!("{} instance {}", group.source, index),
                    "referenced object was not imported",
                );
            }
            continue;
        };

        created += if group.len() < max_instances {
            copy_instances(scene, context, reference, group)
        } else {
            point_cloud_instances(scene, context, reference, group)
        };

        log::debug!(
            "Resolved {} instances of {} ({})",
            group.len(),
            group.source,
            group.material
        );
    }

    created
}
