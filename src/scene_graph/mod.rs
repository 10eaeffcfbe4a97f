pub mod camera;
pub mod mesh;
pub mod object3d;
pub mod scene;
pub mod transform;

// Re-export main types for convenience
pub use camera::CameraData;
pub use mesh::{Face, MeshId, PolyMesh, UvLayer};
pub use object3d::{DisplayMode, Duplication, Object3D, ObjectId, ObjectKind};
pub use scene::{RenderSettings, Scene};
pub use transform::Transform;
