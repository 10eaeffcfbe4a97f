use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mxs::scene::MxsScene;

/// Diagnostic reported by the renderer SDK.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// File primitives of the renderer SDK. The binary layout stays behind this
/// trait.
pub trait MxsStore {
    fn read(&mut self, path: &Path) -> Result<MxsScene, StoreError>;

    fn write(&mut self, path: &Path, scene: &MxsScene) -> Result<(), StoreError>;

    /// Releases a scene obtained from [`MxsStore::read`] or created for
    /// writing.
    fn free(&mut self, scene: MxsScene) {
        drop(scene);
    }

    /// Called when a handle is opened; paired with [`MxsStore::free`].
    fn acquire(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleMode {
    Read,
    Write,
}

/// Exclusive access to one renderer scene for the duration of a pass.
/// The scene is handed back to the store when the handle is dropped.
pub struct SceneHandle<'s, S: MxsStore + ?Sized> {
    store: &'s mut S,
    scene: Option<MxsScene>,
    path: PathBuf,
    mode: HandleMode,
}

impl<'s, S: MxsStore + ?Sized> SceneHandle<'s, S> {
    pub fn open_read(store: &'s mut S, path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let scene = store.read(&path)?;
        store.acquire();

        Ok(Self {
            store,
            scene: Some(scene),
            path,
            mode: HandleMode::Read,
        })
    }

    pub fn create(store: &'s mut S, path: impl Into<PathBuf>) -> Self {
        store.acquire();

        Self {
            store,
            scene: Some(MxsScene::new()),
            path: path.into(),
            mode: HandleMode::Write,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> HandleMode {
        self.mode
    }

    pub fn scene(&self) -> &MxsScene {
        // Only `close` and `drop` take the scene out, and both consume the handle.
        self.scene.as_ref().unwrap_or_else(|| unreachable!("scene handle already released"))
    }

    pub fn scene_mut(&mut self) -> &mut MxsScene {
        self.scene.as_mut().unwrap_or_else(|| unreachable!("scene handle already released"))
    }

    /// Writes the scene (write mode only) and releases it. The scene is
    /// released even when the write fails.
    pub fn close(mut self) -> Result<(), StoreError> {
        let result = match (self.mode, self.scene.as_ref()) {
            (HandleMode::Write, Some(scene)) => self.store.write(&self.path, scene),
            _ => Ok(()),
        };

        self.release();
        result
    }

    fn release(&mut self) {
        if let Some(scene) = self.scene.take() {
            self.store.free(scene);
        }
    }
}

impl<S: MxsStore + ?Sized> Drop for SceneHandle<'_, S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Keeps scenes in memory, keyed by path. Tracks open handles so callers
/// can verify that every pass released its scene.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: HashMap<PathBuf, MxsScene>,
    open_handles: usize,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, scene: MxsScene) {
        self.files.insert(path.into(), scene);
    }

    pub fn get(&self, path: &Path) -> Option<&MxsScene> {
        self.files.get(path)
    }

    pub fn open_handles(&self) -> usize {
        self.open_handles
    }
}

impl MxsStore for MemoryStore {
    fn read(&mut self, path: &Path) -> Result<MxsScene, StoreError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::new(format!("No such file: {}", path.display())))
    }

    fn write(&mut self, path: &Path, scene: &MxsScene) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::new(format!("Cannot write {}", path.display())));
        }

        self.files.insert(path.to_path_buf(), scene.clone());
        Ok(())
    }

    fn acquire(&mut self) {
        self.open_handles += 1;
    }

    fn free(&mut self, scene: MxsScene) {
        self.open_handles = self.open_handles.saturating_sub(1);
        drop(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_handle_is_released_on_drop() {
        let mut store = MemoryStore::new();
        store.insert("/a.mxs", MxsScene::new());

        {
            let handle = SceneHandle::open_read(&mut store, "/a.mxs").unwrap();
            assert_eq!(handle.mode(), HandleMode::Read);
        }

        assert_eq!(store.open_handles(), 0);
    }

    #[test]
    fn missing_file_reports_diagnostic() {
        let mut store = MemoryStore::new();
        let err = SceneHandle::open_read(&mut store, "/missing.mxs").err().unwrap();
        assert!(err.message.contains("/missing.mxs"));
        assert_eq!(store.open_handles(), 0);
    }

    #[test]
    fn failed_write_still_releases() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;

        let handle = SceneHandle::create(&mut store, "/out.mxs");
        assert!(handle.close().is_err());
        assert_eq!(store.open_handles(), 0);
        assert!(store.get(Path::new("/out.mxs")).is_none());
    }

    #[test]
    fn close_writes_scene() {
        let mut store = MemoryStore::new();
        let mut handle = SceneHandle::create(&mut store, "/out.mxs");
        handle.scene_mut().set_active_camera("cam");
        handle.close().unwrap();

        let written = store.get(Path::new("/out.mxs")).unwrap();
        assert_eq!(written.active_camera_name(), Some("cam"));
    }
}
