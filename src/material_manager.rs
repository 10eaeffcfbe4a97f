use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec3;
use id_arena::{Arena, Id};

use crate::texture::{Image, ImageId};

/// Simplified host shading: a diffuse color, optionally driven by an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse_color: Vec3,
    pub base_color_texture: Option<ImageId>,
}

impl Material {
    pub fn new(name: impl Into<String>, diffuse_color: Vec3) -> Self {
        Self {
            name: name.into(),
            diffuse_color,
            base_color_texture: None,
        }
    }
}

pub type MaterialId = Id<Material>;

/// Materials and images of a host scene, addressable by name / path.
#[derive(Default)]
pub struct MaterialManager {
    materials: Arena<Material>,
    materials_by_name: HashMap<String, MaterialId>,
    images: Arena<Image>,
    images_by_path: HashMap<PathBuf, ImageId>,
}

impl MaterialManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material. The first material registered under a name keeps it.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let name = material.name.clone();
        let id = self.materials.alloc(material);
        self.materials_by_name.entry(name).or_insert(id);
        id
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<MaterialId> {
        self.materials_by_name.get(name).copied()
    }

    pub fn name_of(&self, id: MaterialId) -> Option<&str> {
        self.get(id).map(|material| material.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.len() == 0
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials.iter()
    }

    /// Registers an image; an image already loaded from the same path is
    /// returned instead.
    pub fn add_image(&mut self, image: Image) -> ImageId {
        if let Some(id) = self.images_by_path.get(&image.path) {
            return *id;
        }

        let path = image.path.clone();
        let id = self.images.alloc(image);
        self.images_by_path.insert(path, id);
        id
    }

    pub fn get_image(&self, id: ImageId) -> Option<&Image> {
        self.images.get(id)
    }

    pub fn get_image_by_path(&self, path: &Path) -> Option<ImageId> {
        self.images_by_path.get(path).copied()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_material_keeps_the_name() {
        let mut manager = MaterialManager::new();
        let first = manager.add_material(Material::new("Wood", Vec3::ONE));
        let _second = manager.add_material(Material::new("Wood", Vec3::ZERO));

        assert_eq!(manager.get_by_name("Wood"), Some(first));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn images_are_deduplicated_by_path() {
        let mut manager = MaterialManager::new();
        let image = Image {
            name: "a.png".to_string(),
            path: PathBuf::from("/tmp/a.png"),
            width: 1,
            height: 1,
        };

        let first = manager.add_image(image.clone());
        let second = manager.add_image(image);
        assert_eq!(first, second);
        assert_eq!(manager.image_count(), 1);
        assert_eq!(manager.get_image_by_path(Path::new("/tmp/a.png")), Some(first));
    }
}
