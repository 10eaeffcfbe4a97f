use std::collections::HashMap;
use std::path::Path;

use rayon::prelude::*;

use crate::config::ExportOptions;
use crate::error::{PassError, PassResult};
use crate::math::{host_to_renderer, matrix_to_base_pivot};
use crate::mxs::{MaterialRef, MeshData, MxsScene, MxsStore, SceneHandle};
use crate::pipeline::report::{PassReport, Stage};
use crate::scene_graph::{MeshId, Object3D, ObjectId, ObjectKind, PolyMesh, Scene};
use crate::translate::{export_camera, export_material, export_mesh, ExportContext};

fn export_materials(scene: &Scene, mxs: &mut MxsScene, context: &ExportContext) -> usize {
    for (_, material) in scene.materials.materials() {
        mxs.add_material(export_material(
            &scene.materials,
            material,
            context.output_dir.as_deref(),
        ));
    }

    scene.materials.len()
}

fn export_cameras(scene: &Scene, mxs: &mut MxsScene) -> usize {
    let mut count = 0;

    for (id, object) in scene.objects.iter() {
        let ObjectKind::Camera(camera) = &object.kind else {
            continue;
        };
        if !object.visible {
            log::debug!("Not exporting hidden camera {}", object.name);
            continue;
        }

        let exported = export_camera(&object.name, camera, scene.world_matrix(id), &scene.render);
        mxs.add_camera(exported);
        if scene.active_camera == Some(id) {
            mxs.set_active_camera(object.name.clone());
        }
        count += 1;
    }

    count
}

/// Host material names per slot, with the object's own material in slot 0.
fn slot_names(scene: &Scene, object: &Object3D, mesh: &PolyMesh) -> Vec<Option<String>> {
    let mut names = mesh
        .materials
        .iter()
        .map(|slot| {
            slot.and_then(|id| scene.materials.name_of(id))
                .map(str::to_string)
        })
        .collect::<Vec<_>>();

    if let Some(name) = object
        .material_override
        .and_then(|id| scene.materials.name_of(id))
    {
        match names.first_mut() {
            Some(first) => *first = Some(name.to_string()),
            None => names.push(Some(name.to_string())),
        }
    }

    names
}

/// Material carried by the renderer object itself.
fn object_material(scene: &Scene, object: &Object3D) -> MaterialRef {
    object
        .material_override
        .and_then(|id| scene.materials.name_of(id))
        .map_or(MaterialRef::Null, MaterialRef::named)
}

struct MeshJob<'a> {
    object_id: ObjectId,
    mesh: &'a PolyMesh,
    slot_names: Vec<Option<String>>,
}

fn export_meshes(
    scene: &Scene,
    mxs: &mut MxsScene,
    context: &mut ExportContext,
    options: &ExportOptions,
    report: &mut PassReport,
) -> usize {
    let objects = scene
        .objects
        .iter()
        .filter_map(|(id, object)| {
            let mesh_id = object.mesh_id()?;
            if !object.visible || object.is_duplicator() {
                log::debug!("Not exporting {}", object.name);
                return None;
            }
            Some((id, object, mesh_id))
        })
        .collect::<Vec<_>>();

    // With instancing only the first user of each mesh is triangulated.
    let mut first_users: HashMap<MeshId, ObjectId> = HashMap::new();
    let jobs = objects
        .iter()
        .filter(|&&(id, _, mesh_id)| {
            !options.instance_shared_meshes || *first_users.entry(mesh_id).or_insert(id) == id
        })
        .filter_map(|&(object_id, object, mesh_id)| {
            let mesh = scene.get_mesh(mesh_id)?;
            Some(MeshJob {
                object_id,
                mesh,
                slot_names: slot_names(scene, object, mesh),
            })
        })
        .collect::<Vec<_>>();

    let mut triangulated: HashMap<ObjectId, anyhow::Result<MeshData>> = jobs
        .par_iter()
        .map(|job| (job.object_id, export_mesh(job.mesh, &job.slot_names)))
        .collect();

    let mut count = 0;
    for (id, object, mesh_id) in objects {
        let base_pivot = matrix_to_base_pivot(host_to_renderer(scene.world_matrix(id)));

        let exported = match triangulated.remove(&id) {
            Some(Ok(data)) => {
                let exported = mxs.create_mesh(object.name.as_str(), data);
                context.mesh_cache.insert(mesh_id, exported);
                exported
            }
            Some(Err(err)) => {
                report.skip(object.name.clone(), format!("{:#}", err));
                continue;
            }
            None => match context.mesh_cache.get(mesh_id) {
                Some(first) => {
                    let name = context.mesh_cache.next_instance_name(mesh_id, &object.name);
                    mxs.create_instancement(name, first)
                }
                None => {
                    report.skip(object.name.clone(), "shared mesh could not be exported");
                    continue;
                }
            },
        };

        mxs.set_base_and_pivot(exported, base_pivot);
        mxs.set_material(exported, object_material(scene, object));
        count += 1;
    }

    count
}

fn log_ignored(scene: &Scene) {
    for (_, object) in scene.objects.iter() {
        match &object.kind {
            ObjectKind::Mesh(_) | ObjectKind::Camera(_) => {}
            ObjectKind::Empty => log::debug!("Ignoring empty {}", object.name),
            ObjectKind::Other(kind) => log::debug!("Ignoring {} {}", kind, object.name),
        }
    }
}

/// Writes the host scene to `path`.
///
/// The handle is released even when the final write fails.
pub fn export_scene<S: MxsStore + ?Sized>(
    store: &mut S,
    path: impl AsRef<Path>,
    scene: &Scene,
    options: &ExportOptions,
) -> PassResult<PassReport> {
    let path = path.as_ref();
    let mut report = PassReport::new();

    let mut handle = report.time_stage(Stage::Open, move |_| (SceneHandle::create(store, path), 1));
    let mut context = ExportContext::new(path);
    log_ignored(scene);

    if options.export_materials {
        report.time_stage(Stage::Materials, |_| {
            ((), export_materials(scene, handle.scene_mut(), &context))
        });
    }

    if options.export_cameras {
        report.time_stage(Stage::Cameras, |_| ((), export_cameras(scene, handle.scene_mut())));
    }

    if options.export_meshes {
        report.time_stage(Stage::Meshes, |report| {
            let count = export_meshes(scene, handle.scene_mut(), &mut context, options, report);
            ((), count)
        });
    }

    log::info!("Writing {}: {}", path.display(), handle.scene().scene_info());

    report
        .time_stage(Stage::Close, |_| (handle.close(), 1))
        .map_err(|diagnostic| {
            log::error!("Failed to write {}: {}", path.display(), diagnostic);
            PassError::Write {
                path: path.to_path_buf(),
                diagnostic,
            }
        })?;

    log::info!(
        "Exported {} in {:.3} sec, {} objects skipped",
        path.display(),
        report.total_duration().as_secs_f64(),
        report.skipped.len()
    );

    Ok(report)
}
