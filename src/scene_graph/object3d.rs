use id_arena::Id;

use crate::material_manager::MaterialId;
use crate::scene_graph::camera::CameraData;
use crate::scene_graph::mesh::MeshId;
use crate::scene_graph::scene::Scene;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Mesh(MeshId),
    Camera(CameraData),
    Empty,
    /// Host object types the bridge does not translate (lights, curves...).
    Other(String),
}

/// How an object repeats other content at render time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Duplication {
    #[default]
    None,
    /// Children are repeated at every vertex of this object's mesh.
    Vertices,
    /// The named group is instanced at this object's transform.
    Group(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Textured,
    Bounds,
}

#[derive(Debug, Clone)]
pub struct Object3D {
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
    pub visible: bool,
    pub display: DisplayMode,
    pub duplication: Duplication,
    /// Object-linked material for slot 0; wins over the mesh's own slot.
    pub material_override: Option<MaterialId>,
}

impl Object3D {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn mesh_id(&self) -> Option<MeshId> {
        match self.kind {
            ObjectKind::Mesh(mesh_id) => Some(mesh_id),
            _ => None,
        }
    }

    pub fn is_duplicator(&self) -> bool {
        self.duplication != Duplication::None
    }

    pub fn parent<'a>(&self, scene: &'a Scene) -> Option<&'a Object3D> {
        self.parent_id.and_then(|id| scene.get_object(id))
    }

    pub fn children<'a, 'b>(&'a self, scene: &'b Scene) -> impl Iterator<Item = &'b Object3D> + 'b
    where
        'a: 'b,
    {
        self.child_ids
            .iter()
            .filter_map(move |id| scene.get_object(*id))
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ObjectKind::Empty,
            transform: Transform::IDENTITY,
            parent_id: None,
            child_ids: Vec::new(),
            visible: true,
            display: DisplayMode::Textured,
            duplication: Duplication::None,
            material_override: None,
        }
    }
}
