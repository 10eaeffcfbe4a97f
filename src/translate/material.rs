use std::path::Path;

use glam::Vec3;

use crate::material_manager::{Material, MaterialId, MaterialManager};
use crate::mxs::MxsMaterial;
use crate::texture::{resolve_texture_path, Image, ImageId};

/// Diffuse color of imported materials that carry no reflectance.
pub const DEFAULT_DIFFUSE: Vec3 = Vec3::new(0.7, 0.7, 0.7);

/// An existing host material that `name` should map onto: the exact name,
/// then the name without trailing digits, then that stripped name compared
/// case-insensitively.
pub fn find_reusable_material(materials: &MaterialManager, name: &str) -> Option<MaterialId> {
    if let Some(id) = materials.get_by_name(name) {
        return Some(id);
    }

    let stripped = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if stripped.is_empty() {
        return None;
    }

    if let Some(id) = materials.get_by_name(stripped) {
        return Some(id);
    }

    let lowercase = stripped.to_lowercase();
    materials
        .materials()
        .find(|(_, material)| material.name.to_lowercase() == lowercase)
        .map(|(id, _)| id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportedMaterial {
    pub id: MaterialId,
    pub reused: bool,
}

fn load_texture(
    materials: &mut MaterialManager,
    scene_dir: &Path,
    file_name: &str,
) -> Option<ImageId> {
    let path = resolve_texture_path(scene_dir, file_name);
    if let Some(id) = materials.get_image_by_path(&path) {
        return Some(id);
    }

    match Image::load(&path) {
        Ok(image) => Some(materials.add_image(image)),
        Err(err) => {
            log::warn!("{:#}", err);
            None
        }
    }
}

/// Maps a renderer material onto the host, reusing a matching host material
/// when there is one. Only the first layer's first BSDF is read.
pub fn import_material(
    materials: &mut MaterialManager,
    material: &MxsMaterial,
    scene_dir: &Path,
) -> ImportedMaterial {
    if let Some(id) = find_reusable_material(materials, &material.name) {
        log::debug!(
            "Reusing host material {:?} for {:?}",
            materials.name_of(id).unwrap_or_default(),
            material.name
        );
        return ImportedMaterial { id, reused: true };
    }

    let color = material.first_reflectance_color();
    let mut imported = Material::new(
        material.name.clone(),
        color.map_or(DEFAULT_DIFFUSE, |color| color.rgb),
    );

    if let Some(file_name) = color
        .and_then(|color| color.file_name.as_deref())
        .filter(|file_name| !file_name.is_empty())
    {
        imported.base_color_texture = load_texture(materials, scene_dir, file_name);
    }

    ImportedMaterial {
        id: materials.add_material(imported),
        reused: false,
    }
}

/// One layer, one BSDF: the host's diffuse color and texture.
pub fn export_material(
    materials: &MaterialManager,
    material: &Material,
    output_dir: Option<&Path>,
) -> MxsMaterial {
    let file_name = material
        .base_color_texture
        .and_then(|id| materials.get_image(id))
        .map(|image| {
            let path = output_dir
                .and_then(|dir| image.path.strip_prefix(dir).ok())
                .unwrap_or(&image.path);
            path.to_string_lossy().replace('\\', "/")
        });

    MxsMaterial::diffuse(material.name.clone(), material.diffuse_color, file_name)
}
