use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::translate::instance::DEFAULT_MAX_INSTANCES;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Options structs that can be read from and written to TOML. Missing keys
/// take their default values.
pub trait Options: Serialize + for<'de> Deserialize<'de> + Default {
    fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    pub import_cameras: bool,
    pub import_materials: bool,
    pub import_meshes: bool,
    pub import_instances: bool,
    /// Bake rotation and scale into imported meshes.
    pub apply_scale: bool,
    /// Turn `*_proxy` meshes into instances of the host group they name.
    pub resolve_proxy_groups: bool,
    /// Instance groups of this size or larger become point clouds.
    pub max_instances: usize,
    /// Meshes with more vertices than this are displayed as bounding boxes.
    pub draw_bounds_threshold: usize,
    pub camera_far_plane: f32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            import_cameras: true,
            import_materials: true,
            import_meshes: true,
            import_instances: true,
            apply_scale: true,
            resolve_proxy_groups: true,
            max_instances: DEFAULT_MAX_INSTANCES,
            draw_bounds_threshold: 5000,
            camera_far_plane: 1000.0,
        }
    }
}

impl Options for ImportOptions {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub export_cameras: bool,
    pub export_meshes: bool,
    pub export_materials: bool,
    /// Write objects that share mesh data as renderer instances.
    pub instance_shared_meshes: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            export_cameras: true,
            export_meshes: true,
            export_materials: true,
            instance_shared_meshes: true,
        }
    }
}

impl Options for ExportOptions {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let options =
            ImportOptions::from_toml("max_instances = 50\nimport_cameras = false\n").unwrap();

        assert_eq!(options.max_instances, 50);
        assert!(!options.import_cameras);
        assert!(options.import_meshes);
        assert_eq!(options.draw_bounds_threshold, 5000);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = ExportOptions::from_toml("export_meshes = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn options_survive_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.toml");

        let options = ExportOptions {
            instance_shared_meshes: false,
            ..ExportOptions::default()
        };
        options.save_to_file(&path).unwrap();

        assert_eq!(ExportOptions::load_from_file(&path).unwrap(), options);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ImportOptions::load_from_file("/no/such/options.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
