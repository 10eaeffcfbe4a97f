use id_arena::Arena;

use crate::math::BasePivot;
use crate::mxs::camera::MxsCamera;
use crate::mxs::material::{MaterialRef, MxsMaterial};
use crate::mxs::mesh::MeshData;
use crate::mxs::object::{MxsObject, MxsObjectId, MxsObjectKind, ObjectName};

/// Input axis convention announced to the renderer: Y-up, right-handed.
pub const INPUT_DATA_TYPE: &str = "YZXRH";
pub const PLUGIN_ID: &str = "mxs-bridge";

/// In-memory view of a renderer scene.
#[derive(Debug, Clone)]
pub struct MxsScene {
    objects: Arena<MxsObject>,
    cameras: Vec<MxsCamera>,
    materials: Vec<MxsMaterial>,
    active_camera: Option<String>,
    pub plugin_id: String,
    pub input_data_type: String,
}

impl Default for MxsScene {
    fn default() -> Self {
        Self {
            objects: Arena::new(),
            cameras: Vec::new(),
            materials: Vec::new(),
            active_camera: None,
            plugin_id: PLUGIN_ID.to_string(),
            input_data_type: INPUT_DATA_TYPE.to_string(),
        }
    }
}

impl MxsScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: MxsObject) -> MxsObjectId {
        self.objects.alloc(object)
    }

    pub fn create_mesh(&mut self, name: impl Into<ObjectName>, mesh: MeshData) -> MxsObjectId {
        self.add_object(MxsObject::new(name, MxsObjectKind::Mesh(mesh)))
    }

    pub fn create_instancement(
        &mut self,
        name: impl Into<ObjectName>,
        instanced: MxsObjectId,
    ) -> MxsObjectId {
        self.add_object(MxsObject::new(name, MxsObjectKind::Instance { instanced }))
    }

    pub fn set_base_and_pivot(&mut self, id: MxsObjectId, base_pivot: BasePivot) {
        if let Some(object) = self.objects.get_mut(id) {
            object.base_pivot = base_pivot;
        }
    }

    pub fn set_material(&mut self, id: MxsObjectId, material: MaterialRef) {
        if let Some(object) = self.objects.get_mut(id) {
            object.material = material;
        }
    }

    pub fn object(&self, id: MxsObjectId) -> Option<&MxsObject> {
        self.objects.get(id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (MxsObjectId, &MxsObject)> {
        self.objects.iter()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn add_camera(&mut self, camera: MxsCamera) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    pub fn cameras(&self) -> &[MxsCamera] {
        &self.cameras
    }

    pub fn camera(&self, name: &str) -> Option<&MxsCamera> {
        self.cameras.iter().find(|camera| camera.name == name)
    }

    pub fn set_active_camera(&mut self, name: impl Into<String>) {
        self.active_camera = Some(name.into());
    }

    pub fn active_camera(&self) -> Option<&MxsCamera> {
        self.active_camera
            .as_deref()
            .and_then(|name| self.camera(name))
    }

    pub fn active_camera_name(&self) -> Option<&str> {
        self.active_camera.as_deref()
    }

    pub fn add_material(&mut self, material: MxsMaterial) {
        self.materials.push(material);
    }

    pub fn materials(&self) -> &[MxsMaterial] {
        &self.materials
    }

    pub fn material(&self, name: &str) -> Option<&MxsMaterial> {
        self.materials.iter().find(|material| material.name == name)
    }

    pub fn triangle_count(&self) -> usize {
        self.objects
            .iter()
            .filter_map(|(_, object)| object.mesh())
            .map(MeshData::triangle_count)
            .sum()
    }

    /// One-line summary, logged after a pass.
    pub fn scene_info(&self) -> String {
        let meshes = self.objects.iter().filter(|(_, o)| o.is_mesh()).count();
        let instances = self.objects.iter().filter(|(_, o)| o.is_instance()).count();

        format!(
            "{} objects ({} meshes, {} instances), {} triangles, {} cameras, {} materials",
            self.objects.len(),
            meshes,
            instances,
            self.triangle_count(),
            self.cameras.len(),
            self.materials.len()
        )
    }
}
