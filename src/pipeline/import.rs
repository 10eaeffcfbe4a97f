use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context};
use glam::{Mat3, Mat4, Vec3};

use crate::config::ImportOptions;
use crate::error::{PassError, PassResult};
use crate::material_manager::MaterialId;
use crate::math::base_pivot::with_basis;
use crate::math::{
    base_pivot_to_matrix, inverse_basis_or_identity, renderer_to_host, AXIS_CONVERSION,
};
use crate::mxs::{MaterialRef, MeshData, MxsObject, MxsObjectKind, MxsScene, MxsStore, SceneHandle};
use crate::pipeline::report::{PassReport, Stage};
use crate::scene_graph::{
    DisplayMode, Duplication, Object3D, ObjectId, ObjectKind, Scene, Transform,
};
use crate::translate::names::{clean_name, is_proxy_name, proxy_group_name};
use crate::translate::{
    group_instances, import_camera, import_material, import_mesh, resolve_instances, ImportContext,
    ImportedObject,
};

/// Proxy groups are authored Y-up in inches.
const PROXY_SCALE: f32 = 1.0 / 0.0254;

fn proxy_matrix(world: Mat4) -> Mat4 {
    let basis = Mat3::from_mat4(AXIS_CONVERSION)
        * Mat3::from_diagonal(Vec3::splat(PROXY_SCALE))
        * Mat3::from_mat4(world);
    with_basis(basis, world.w_axis.truncate())
}

fn import_cameras(
    mxs: &MxsScene,
    scene: &mut Scene,
    options: &ImportOptions,
    report: &mut PassReport,
) -> usize {
    let active = mxs.active_camera_name();
    let mut count = 0;

    for camera in mxs.cameras() {
        let imported = match import_camera(camera, options.camera_far_plane) {
            Ok(imported) => imported,
            Err(err) => {
                report.skip(camera.name.clone(), format!("{:#}", err));
                continue;
            }
        };

        let id = scene.add_object(Object3D {
            transform: Transform::from_matrix(imported.matrix),
            ..Object3D::new(imported.name, ObjectKind::Camera(imported.data))
        });

        if active == Some(camera.name.as_str()) {
            scene.active_camera = Some(id);
        }
        count += 1;
    }

    count
}

fn import_materials(mxs: &MxsScene, scene: &mut Scene, context: &mut ImportContext) -> usize {
    if context.materials.is_none() {
        context.materials = Some(HashMap::new());
    }

    for material in mxs.materials() {
        let imported = import_material(&mut scene.materials, material, context.scene_dir());
        context.register_material(material.name.clone(), imported.id);
    }

    mxs.materials().len()
}

fn slot_materials(
    context: &ImportContext,
    names: &[String],
    object_material: &MaterialRef,
) -> anyhow::Result<Vec<Option<MaterialId>>> {
    if names.is_empty() {
        return match object_material.name() {
            Some(name) => Ok(vec![context.slot_material(name)?]),
            None => Ok(Vec::new()),
        };
    }

    names
        .iter()
        .map(|name| context.slot_material(name))
        .collect()
}

fn find_proxy_group(scene: &Scene, name: &str) -> Option<String> {
    let group = proxy_group_name(name)?;
    if scene.has_group(group) {
        Some(group.to_string())
    } else {
        log::warn!("Could not find group {:?} for proxy {:?}", group, name);
        None
    }
}

/// Creates the host object for one renderer mesh. Empty meshes produce
/// nothing.
fn import_mesh_object(
    scene: &mut Scene,
    context: &mut ImportContext,
    options: &ImportOptions,
    object: &MxsObject,
    data: &MeshData,
) -> anyhow::Result<Option<ObjectId>> {
    if data.is_empty() {
        log::debug!("Ignoring empty mesh {}", object.name.to_string_lossy());
        return Ok(None);
    }

    let raw_name = object
        .name
        .as_str()
        .map_err(|err| anyhow!("Object name is not valid UTF-8: {}", err))?;
    // Proxy groups are named after the undeduplicated name.
    let group_source = clean_name(raw_name);
    let name = context.names.cleanup(raw_name);
    let world = renderer_to_host(base_pivot_to_matrix(&object.base_pivot));

    let proxy_group = if options.resolve_proxy_groups && is_proxy_name(&group_source) {
        find_proxy_group(scene, &group_source)
    } else {
        None
    };
    let proxy = proxy_group.is_some();

    let (object_id, basis) = match proxy_group {
        Some(group) => {
            let matrix = proxy_matrix(world);
            let id = scene.add_object(Object3D {
                transform: Transform::from_matrix(matrix),
                duplication: Duplication::Group(group),
                ..Object3D::new(name.clone(), ObjectKind::Empty)
            });
            (id, Mat3::from_mat4(matrix))
        }
        None => {
            let imported = import_mesh(data, &name)?;
            let mut mesh = imported.mesh;
            mesh.materials = slot_materials(context, &imported.material_names, &object.material)
                .with_context(|| format!("Cannot assign materials to {}", name))?;

            let basis = Mat3::from_mat4(world);
            let matrix = if options.apply_scale {
                mesh.transform(basis);
                Mat4::from_translation(world.w_axis.truncate())
            } else {
                world
            };

            let display = if mesh.vertex_count() > options.draw_bounds_threshold {
                DisplayMode::Bounds
            } else {
                DisplayMode::Textured
            };

            let mesh_id = scene.add_mesh(mesh);
            let id = scene.add_object(Object3D {
                transform: Transform::from_matrix(matrix),
                display,
                ..Object3D::new(name.clone(), ObjectKind::Mesh(mesh_id))
            });
            (id, basis)
        }
    };

    let inverse_basis = if options.apply_scale {
        inverse_basis_or_identity(basis)
    } else {
        Mat3::IDENTITY
    };

    context.meshes.insert(
        name,
        ImportedObject {
            object: object_id,
            inverse_basis,
            proxy,
        },
    );

    Ok(Some(object_id))
}

fn import_meshes(
    mxs: &MxsScene,
    scene: &mut Scene,
    context: &mut ImportContext,
    options: &ImportOptions,
    report: &mut PassReport,
) -> usize {
    let mut count = 0;

    for (_, object) in mxs.objects() {
        match &object.kind {
            MxsObjectKind::Mesh(data) => {
                match import_mesh_object(scene, context, options, object, data) {
                    Ok(Some(_)) => count += 1,
                    Ok(None) => {}
                    Err(err) => report.skip(object.name.to_string_lossy(), format!("{:#}", err)),
                }
            }
            // Resolved by the instances stage.
            MxsObjectKind::Instance { .. } => {}
            MxsObjectKind::Null => {
                log::debug!("Ignoring null object {}", object.name.to_string_lossy())
            }
        }
    }

    count
}

/// Reads the scene at `path` into the host scene.
///
/// Stages run in a fixed order: cameras, materials, meshes, instances.
/// Instances can only be resolved against meshes imported in the same pass.
pub fn import_scene<S: MxsStore + ?Sized>(
    store: &mut S,
    path: impl AsRef<Path>,
    scene: &mut Scene,
    options: &ImportOptions,
) -> PassResult<PassReport> {
    let path = path.as_ref();
    let mut report = PassReport::new();

    let handle = report
        .time_stage(Stage::Open, move |_| {
            let handle = SceneHandle::open_read(store, path);
            let count = usize::from(handle.is_ok());
            (handle, count)
        })
        .map_err(|diagnostic| PassError::Read {
            path: path.to_path_buf(),
            diagnostic,
        })?;

    let mxs = handle.scene();
    log::info!("Reading {}: {}", path.display(), mxs.scene_info());

    let mut context = ImportContext::new(path);

    if options.import_cameras {
        report.time_stage(Stage::Cameras, |report| {
            ((), import_cameras(mxs, scene, options, report))
        });
    }

    if options.import_materials {
        report.time_stage(Stage::Materials, |_| {
            ((), import_materials(mxs, scene, &mut context))
        });
    }

    if options.import_meshes {
        report.time_stage(Stage::Meshes, |report| {
            ((), import_meshes(mxs, scene, &mut context, options, report))
        });
    }

    if options.import_instances {
        report.time_stage(Stage::Instances, |report| {
            let groups = group_instances(mxs, &mut context, report);
            let created =
                resolve_instances(scene, &context, &groups, options.max_instances, report);
            ((), created)
        });
    }

    report.time_stage(Stage::Close, |_| {
        if let Err(err) = handle.close() {
            log::warn!("Failed to release {}: {}", path.display(), err);
        }
        ((), 0)
    });

    log::info!(
        "Imported {} in {:.3} sec, {} objects skipped",
        path.display(),
        report.total_duration().as_secs_f64(),
        report.skipped.len()
    );

    Ok(report)
}
