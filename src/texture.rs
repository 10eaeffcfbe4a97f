use std::path::{Path, PathBuf};

use anyhow::Context;
use id_arena::Id;

pub type ImageId = Id<Image>;

/// An image datablock in the host scene. Pixels are decoded once on load
/// to validate the file; only the metadata is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Image {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .with_context(|| format!("Failed to load image {}", path.display()))?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            path: path.to_path_buf(),
            width: decoded.width(),
            height: decoded.height(),
        })
    }
}

/// Normalizes a texture path stored by the renderer (which may use
/// backslashes) and resolves it against `base_dir`.
pub fn resolve_texture_path(base_dir: &Path, raw: &str) -> PathBuf {
    let normalized = raw.replace('\\', "/");
    base_dir.join(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_windows_separators() {
        let resolved = resolve_texture_path(Path::new("/scenes"), "maps\\wood.png");
        assert_eq!(resolved, PathBuf::from("/scenes/maps/wood.png"));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let resolved = resolve_texture_path(Path::new("/scenes"), "/textures/wood.png");
        assert_eq!(resolved, PathBuf::from("/textures/wood.png"));
    }

    #[test]
    fn load_reads_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.png");
        image::RgbaImage::new(4, 2).save(&path).unwrap();

        let loaded = Image::load(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (4, 2));
        assert_eq!(loaded.name, "checker.png");
    }

    #[test]
    fn load_fails_for_missing_file() {
        assert!(Image::load("/definitely/not/here.png").is_err());
    }
}
