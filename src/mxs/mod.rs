//! The renderer side of the bridge: an in-memory model of an MXS scene as
//! exposed by the renderer SDK, plus the file primitives behind [`MxsStore`].

pub mod camera;
pub mod material;
pub mod mesh;
pub mod object;
pub mod scene;
pub mod store;

pub use camera::{CameraStep, Diaphragm, MxsCamera};
pub use material::{Bsdf, Layer, MapColor, MaterialRef, MxsMaterial, Reflectance};
pub use mesh::{MeshData, Triangle, TriangleUvw};
pub use object::{MxsObject, MxsObjectId, MxsObjectKind, ObjectName};
pub use scene::MxsScene;
pub use store::{HandleMode, MemoryStore, MxsStore, SceneHandle, StoreError};
