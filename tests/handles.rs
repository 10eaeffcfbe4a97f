mod common;

use std::path::Path;

use mxs_bridge::mxs::{MxsStore, StoreError};
use mxs_bridge::scene_graph::{Object3D, ObjectKind};
use mxs_bridge::{
    export_scene, import_scene, ExportOptions, ImportOptions, MemoryStore, MxsScene, PassError,
    Scene,
};

/// Counts every scene handed out and handed back.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    acquired: usize,
    freed: usize,
}

impl MxsStore for CountingStore {
    fn read(&mut self, path: &Path) -> Result<MxsScene, StoreError> {
        self.inner.read(path)
    }

    fn write(&mut self, path: &Path, scene: &MxsScene) -> Result<(), StoreError> {
        self.inner.write(path, scene)
    }

    fn free(&mut self, scene: MxsScene) {
        self.freed += 1;
        self.inner.free(scene);
    }

    fn acquire(&mut self) {
        self.acquired += 1;
        self.inner.acquire();
    }
}

#[test]
fn unreadable_file_fails_without_leaking() {
    common::init_logger();

    let mut store = CountingStore::default();
    let mut scene = Scene::new();
    let err = import_scene(&mut store, "/missing.mxs", &mut scene, &ImportOptions::default())
        .unwrap_err();

    assert!(matches!(err, PassError::Read { .. }));
    assert!(err.to_string().contains("/missing.mxs"));
    assert_eq!(store.acquired, store.freed);
    assert_eq!(scene.objects.len(), 0);
}

#[test]
fn import_releases_its_handle() {
    common::init_logger();

    let mut store = CountingStore::default();
    store.inner.insert("/scene.mxs", MxsScene::new());

    let mut scene = Scene::new();
    import_scene(&mut store, "/scene.mxs", &mut scene, &ImportOptions::default()).unwrap();

    assert_eq!(store.acquired, 1);
    assert_eq!(store.freed, 1);
}

#[test]
fn failed_write_still_releases_handle() {
    common::init_logger();

    let mut store = CountingStore::default();
    store.inner.fail_writes = true;

    let mut scene = Scene::new();
    let mesh_id = scene.add_mesh(common::triangle());
    scene.add_object(Object3D::new("Tri", ObjectKind::Mesh(mesh_id)));

    let err = export_scene(&mut store, "/readonly/out.mxs", &scene, &ExportOptions::default())
        .unwrap_err();

    assert!(matches!(err, PassError::Write { .. }));
    assert_eq!(store.acquired, 1);
    assert_eq!(store.freed, 1);
    assert_eq!(store.inner.open_handles(), 0);
}
