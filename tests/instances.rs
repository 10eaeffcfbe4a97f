mod common;

use glam::{Mat4, Quat, Vec3};
use mxs_bridge::math::{host_to_renderer, matrix_to_base_pivot};
use mxs_bridge::mxs::{MaterialRef, MeshData, MxsObject, MxsObjectKind, Triangle};
use mxs_bridge::scene_graph::Duplication;
use mxs_bridge::{import_scene, ImportOptions, MemoryStore, MxsScene, Scene, Stage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ROTATIONS: [f32; 3] = [0.0, 0.7, 1.9];

fn pebble() -> MeshData {
    MeshData {
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
        normals: vec![Vec3::Z],
        triangles: vec![
            Triangle::new([0, 1, 2], [0; 3]),
            Triangle::new([0, 2, 3], [0; 3]),
        ],
        uv_channels: Vec::new(),
    }
}

/// A scene with one pebble mesh and `count` scattered instances of it,
/// each using one of three rotations.
fn scattered(count: usize, seed: u64) -> MxsScene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = MxsScene::new();
    let pebble = scene.create_mesh("Pebble [1.0.0]", pebble());

    for index in 0..count {
        let translation = Vec3::new(
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(0.0..5.0),
        );
        let rotation = Quat::from_rotation_z(ROTATIONS[index % ROTATIONS.len()]);
        let world = Mat4::from_rotation_translation(rotation, translation);

        let mut instance = MxsObject::new(
            format!("Pebble [1.0.{}]", index % 1000),
            MxsObjectKind::Instance { instanced: pebble },
        );
        instance.base_pivot = matrix_to_base_pivot(host_to_renderer(world));
        scene.add_object(instance);
    }

    scene
}

fn import(mxs: MxsScene, options: &ImportOptions) -> (Scene, mxs_bridge::PassReport) {
    let mut store = MemoryStore::new();
    store.insert("/scenes/scatter.mxs", mxs);

    let mut scene = Scene::new();
    let report = import_scene(&mut store, "/scenes/scatter.mxs", &mut scene, options).unwrap();
    assert_eq!(store.open_handles(), 0);
    (scene, report)
}

#[test]
fn five_hundred_instances_become_point_clouds() {
    common::init_logger();

    let options = ImportOptions {
        import_materials: false,
        ..ImportOptions::default()
    };
    let (scene, report) = import(scattered(500, 7), &options);

    // One placeholder and one copy per distinct rotation.
    assert_eq!(report.count(Stage::Instances), 2 * ROTATIONS.len());

    let placeholders = scene
        .objects
        .iter()
        .filter(|(_, object)| object.duplication == Duplication::Vertices)
        .map(|(_, object)| object)
        .collect::<Vec<_>>();
    assert_eq!(placeholders.len(), ROTATIONS.len());
    assert!(placeholders.iter().all(|object| object.name == "DUPLIPebble"));

    let points: usize = placeholders
        .iter()
        .filter_map(|object| object.mesh_id())
        .filter_map(|mesh_id| scene.get_mesh(mesh_id))
        .map(|mesh| mesh.vertex_count())
        .sum();
    assert_eq!(points, 500);

    for placeholder in &placeholders {
        let mesh = scene.get_mesh(placeholder.mesh_id().unwrap()).unwrap();
        assert_eq!(mesh.positions[0], Vec3::ZERO);
        assert_eq!(placeholder.child_ids.len(), 1);
    }
}

#[test]
fn instances_below_the_ceiling_are_copied() {
    common::init_logger();

    let options = ImportOptions {
        import_materials: false,
        ..ImportOptions::default()
    };
    let (scene, report) = import(scattered(150, 11), &options);

    assert_eq!(report.count(Stage::Instances), 150);
    // The pebble itself plus its copies, all sharing one mesh.
    assert_eq!(scene.mesh_object_count(), 151);
    assert_eq!(scene.meshes.len(), 1);
}

#[test]
fn ceiling_is_configurable() {
    common::init_logger();

    let options = ImportOptions {
        import_materials: false,
        max_instances: 10,
        ..ImportOptions::default()
    };
    let (_, report) = import(scattered(30, 3), &options);
    assert_eq!(report.count(Stage::Instances), 2 * ROTATIONS.len());
}

#[test]
fn instances_without_meshes_are_skipped() {
    common::init_logger();

    let options = ImportOptions {
        import_meshes: false,
        ..ImportOptions::default()
    };
    let (scene, report) = import(scattered(20, 5), &options);

    assert!(!report.ran(Stage::Meshes));
    assert_eq!(report.count(Stage::Instances), 0);
    assert_eq!(report.skipped.len(), 20);
    assert_eq!(scene.objects.len(), 0);
}

#[test]
fn instance_materials_split_groups() {
    common::init_logger();

    let mut mxs = scattered(4, 1);
    let pebble = mxs
        .objects()
        .find(|(_, object)| object.is_mesh())
        .map(|(id, _)| id)
        .unwrap();
    let mut mossy = MxsObject::new("mossy", MxsObjectKind::Instance { instanced: pebble });
    mossy.material = MaterialRef::named("Moss");
    mxs.add_object(mossy);
    mxs.add_material(mxs_bridge::mxs::MxsMaterial::diffuse("Moss", Vec3::Y, None));

    let (scene, report) = import(mxs, &ImportOptions::default());
    assert_eq!(report.count(Stage::Instances), 5);

    let moss = scene.materials.get_by_name("Moss").unwrap();
    let overridden = scene
        .objects
        .iter()
        .filter(|(_, object)| object.material_override == Some(moss))
        .count();
    assert_eq!(overridden, 1);
}
