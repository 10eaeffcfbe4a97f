use std::str::Utf8Error;

use id_arena::Id;

use crate::math::BasePivot;
use crate::mxs::material::MaterialRef;
use crate::mxs::mesh::MeshData;

pub type MxsObjectId = Id<MxsObject>;

/// Object names come out of the file as raw bytes and are not guaranteed
/// to be valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName(Vec<u8>);

impl ObjectName {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.0)
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl From<&str> for ObjectName {
    fn from(name: &str) -> Self {
        Self(name.as_bytes().to_vec())
    }
}

impl From<String> for ObjectName {
    fn from(name: String) -> Self {
        Self(name.into_bytes())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MxsObjectKind {
    Mesh(MeshData),
    /// Reuses the geometry of another object.
    Instance { instanced: MxsObjectId },
    /// Placeholder object without geometry.
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MxsObject {
    pub name: ObjectName,
    pub kind: MxsObjectKind,
    pub base_pivot: BasePivot,
    pub material: MaterialRef,
}

impl MxsObject {
    pub fn new(name: impl Into<ObjectName>, kind: MxsObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            base_pivot: BasePivot::default(),
            material: MaterialRef::Null,
        }
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, MxsObjectKind::Mesh(_))
    }

    pub fn is_instance(&self) -> bool {
        matches!(self.kind, MxsObjectKind::Instance { .. })
    }

    pub fn mesh(&self) -> Option<&MeshData> {
        match &self.kind {
            MxsObjectKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}
