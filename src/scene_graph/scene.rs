use glam::Mat4;
use id_arena::Arena;
use indexmap::IndexSet;

use crate::material_manager::MaterialManager;
use crate::scene_graph::mesh::{MeshId, PolyMesh};
use crate::scene_graph::object3d::{Object3D, ObjectId, ObjectKind};

/// Output resolution of the host scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100,
        }
    }
}

impl RenderSettings {
    /// Effective pixel size after the percentage is applied.
    pub fn effective_resolution(&self) -> (u32, u32) {
        let scale = |value: u32| {
            ((value as f64) * (self.resolution_percentage as f64) / 100.0).round() as u32
        };
        (scale(self.resolution_x), scale(self.resolution_y))
    }
}

/// The host application's scene graph.
#[derive(Default)]
pub struct Scene {
    pub objects: Arena<Object3D>,
    pub meshes: Arena<PolyMesh>,
    pub materials: MaterialManager,
    /// Named object groups that proxy objects may point at.
    pub groups: IndexSet<String>,
    pub active_camera: Option<ObjectId>,
    pub render: RenderSettings,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id)
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn add_mesh(&mut self, mesh: PolyMesh) -> MeshId {
        self.meshes.alloc(mesh)
    }

    pub fn get_mesh(&self, id: MeshId) -> Option<&PolyMesh> {
        self.meshes.get(id)
    }

    /// Mesh data of a mesh object.
    pub fn object_mesh(&self, id: ObjectId) -> Option<&PolyMesh> {
        self.get_object(id)
            .and_then(Object3D::mesh_id)
            .and_then(|mesh_id| self.get_mesh(mesh_id))
    }

    /// Shallow copy: the new object shares mesh data with the original and
    /// has no parent or children.
    pub fn copy_object(&mut self, id: ObjectId) -> Option<ObjectId> {
        let mut copy = self.get_object(id)?.clone();
        copy.parent_id = None;
        copy.child_ids.clear();
        Some(self.add_object(copy))
    }

    pub fn add_group(&mut self, name: impl Into<String>) {
        self.groups.insert(name.into());
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains(name)
    }

    /// Composes local transforms from the root down.
    pub fn world_matrix(&self, object_id: ObjectId) -> Mat4 {
        let Some(object) = self.objects.get(object_id) else {
            return Mat4::IDENTITY;
        };

        let local = object.transform.local_matrix();
        match object.parent_id {
            Some(parent_id) => self.world_matrix(parent_id) * local,
            None => local,
        }
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        // Remove from old parent's children list
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        // Set new parent and add to new parent's children list
        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }
    }

    pub fn count_objects(&self, predicate: impl Fn(&Object3D) -> bool) -> usize {
        self.objects
            .iter()
            .filter(|(_, object)| predicate(object))
            .count()
    }

    pub fn mesh_object_count(&self) -> usize {
        self.count_objects(|object| matches!(object.kind, ObjectKind::Mesh(_)))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene_graph::transform::Transform;

    #[test]
    fn world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Object3D {
            transform: Transform::from_translation(Vec3::X),
            ..Object3D::new("parent", ObjectKind::Empty)
        });
        let child = scene.add_object(Object3D {
            transform: Transform::from_translation(Vec3::Y),
            ..Object3D::new("child", ObjectKind::Empty)
        });
        scene.set_object_parent(child, Some(parent));

        assert_eq!(
            scene.world_matrix(child).w_axis.truncate(),
            Vec3::new(1.0, 1.0, 0.0)
        );
        assert_eq!(scene.get_object(parent).unwrap().children(&scene).count(), 1);
    }

    #[test]
    fn copies_share_mesh_data() {
        let mut scene = Scene::new();
        let mesh_id = scene.add_mesh(PolyMesh::new("cube"));
        let original = scene.add_object(Object3D::new("cube", ObjectKind::Mesh(mesh_id)));
        let copy = scene.copy_object(original).unwrap();

        assert_ne!(original, copy);
        assert_eq!(scene.get_object(copy).unwrap().mesh_id(), Some(mesh_id));
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.mesh_object_count(), 2);
    }

    #[test]
    fn effective_resolution_applies_percentage() {
        let render = RenderSettings {
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 50,
        };
        assert_eq!(render.effective_resolution(), (960, 540));
    }
}
