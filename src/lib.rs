//! Scene graph translation between a Z-up host application and the MXS
//! renderer scene format.
//!
//! [`import_scene`] reads an MXS scene through an [`MxsStore`] into a host
//! [`Scene`]; [`export_scene`] writes a host scene back out. Both return a
//! [`PassReport`] listing stage timings and every object that was skipped.

pub mod config;
pub mod error;
pub mod material_manager;
pub mod math;
pub mod mxs;
pub mod pipeline;
pub mod scene_graph;
pub mod texture;
pub mod translate;

pub use config::{ConfigError, ExportOptions, ImportOptions, Options};
pub use error::{PassError, PassResult};
pub use mxs::{MemoryStore, MxsScene, MxsStore};
pub use pipeline::{export_scene, import_scene, PassReport, Stage};
pub use scene_graph::Scene;
