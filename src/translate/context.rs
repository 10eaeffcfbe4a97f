use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use glam::Mat3;

use crate::material_manager::MaterialId;
use crate::mxs::MxsObjectId;
use crate::scene_graph::{MeshId, ObjectId};
use crate::translate::names::NameMapping;

/// A host object created from a renderer mesh, as instances see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportedObject {
    pub object: ObjectId,
    /// Inverse of the 3x3 part baked into the object's mesh (identity when
    /// nothing was baked).
    pub inverse_basis: Mat3,
    pub proxy: bool,
}

/// State shared by the stages of one import pass.
#[derive(Debug)]
pub struct ImportContext {
    pub names: NameMapping,
    /// Renderer material name to host material. `None` when the materials
    /// stage did not run.
    pub materials: Option<HashMap<String, MaterialId>>,
    /// Imported mesh objects by display name.
    pub meshes: HashMap<String, ImportedObject>,
    scene_dir: PathBuf,
}

impl ImportContext {
    pub fn new(scene_path: &Path) -> Self {
        let scene_dir = scene_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self {
            names: NameMapping::new(),
            materials: None,
            meshes: HashMap::new(),
            scene_dir,
        }
    }

    /// Directory that relative texture paths are resolved against.
    pub fn scene_dir(&self) -> &Path {
        &self.scene_dir
    }

    pub fn register_material(&mut self, name: impl Into<String>, id: MaterialId) {
        self.materials
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), id);
    }

    pub fn material(&self, name: &str) -> Option<MaterialId> {
        self.materials.as_ref()?.get(name).copied()
    }

    /// Host material for a mesh slot. A name the materials stage did not
    /// produce is an error; when the stage did not run, slots stay empty.
    pub fn slot_material(&self, name: &str) -> anyhow::Result<Option<MaterialId>> {
        match &self.materials {
            None => Ok(None),
            Some(materials) => materials
                .get(name)
                .copied()
                .map(Some)
                .ok_or_else(|| anyhow!("Material {:?} is not in the scene", name)),
        }
    }
}

/// Renderer objects already holding the geometry of a host mesh.
#[derive(Debug, Default)]
pub struct MeshCache {
    first_users: HashMap<MeshId, MxsObjectId>,
    instance_counts: HashMap<MeshId, usize>,
}

impl MeshCache {
    pub fn get(&self, mesh: MeshId) -> Option<MxsObjectId> {
        self.first_users.get(&mesh).copied()
    }

    pub fn insert(&mut self, mesh: MeshId, object: MxsObjectId) {
        self.first_users.entry(mesh).or_insert(object);
    }

    /// `<object name><n>`, numbered per mesh from 1.
    pub fn next_instance_name(&mut self, mesh: MeshId, object_name: &str) -> String {
        let count = self.instance_counts.entry(mesh).or_default();
        *count += 1;
        format!("{}{}", object_name, count)
    }

    pub fn len(&self) -> usize {
        self.first_users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_users.is_empty()
    }
}

/// State shared by the stages of one export pass.
#[derive(Debug, Default)]
pub struct ExportContext {
    pub mesh_cache: MeshCache,
    /// Texture paths are written relative to this directory when possible.
    pub output_dir: Option<PathBuf>,
}

impl ExportContext {
    pub fn new(output_path: &Path) -> Self {
        Self {
            mesh_cache: MeshCache::default(),
            output_dir: output_path.parent().map(Path::to_path_buf),
        }
    }
}
