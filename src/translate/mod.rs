//! Entity translators between the host scene graph and the renderer scene.
//! Each one converts a single kind of entity; the pipeline decides which
//! objects get translated and in what order.

pub mod camera;
pub mod context;
pub mod instance;
pub mod material;
pub mod mesh;
pub mod names;

pub use camera::{export_camera, import_camera, ImportedCamera};
pub use context::{ExportContext, ImportContext, ImportedObject, MeshCache};
pub use instance::{group_instances, resolve_instances, InstanceGroup};
pub use material::{export_material, find_reusable_material, import_material, ImportedMaterial};
pub use mesh::{export_mesh, import_mesh, needs_zero_face_rotation, ImportedMesh};
pub use names::{clean_name, NameMapping};
