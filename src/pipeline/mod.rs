//! Whole-scene passes. Each pass owns its renderer scene handle and its
//! translation context for exactly one import or export.

pub mod export;
pub mod import;
pub mod report;

pub use export::export_scene;
pub use import::import_scene;
pub use report::{PassReport, SkippedObject, Stage, StageTiming};
