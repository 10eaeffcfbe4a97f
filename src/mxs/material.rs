use glam::Vec3;

/// Material reference as stored on renderer objects and triangles.
/// `Null` means "no material" and is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum MaterialRef {
    #[default]
    Null,
    Named(String),
}

impl MaterialRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            MaterialRef::Null => None,
            MaterialRef::Named(name) => Some(name),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, MaterialRef::Null)
    }
}

impl std::fmt::Display for MaterialRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialRef::Null => f.write_str("None"),
            MaterialRef::Named(name) => f.write_str(name),
        }
    }
}

/// A color parameter that may be driven by a texture file.
#[derive(Debug, Clone, PartialEq)]
pub struct MapColor {
    pub rgb: Vec3,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reflectance {
    pub color: MapColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bsdf {
    pub name: String,
    pub reflectance: Reflectance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub bsdfs: Vec<Bsdf>,
}

/// Layered renderer material. Only the first layer's first BSDF is
/// translated.
#[derive(Debug, Clone, PartialEq)]
pub struct MxsMaterial {
    pub name: String,
    pub layers: Vec<Layer>,
}

impl MxsMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: Vec::new(),
        }
    }

    /// A one-layer, one-BSDF material with the given reflectance color.
    pub fn diffuse(name: impl Into<String>, rgb: Vec3, file_name: Option<String>) -> Self {
        let name = name.into();
        Self {
            layers: vec![Layer {
                name: "base".to_string(),
                bsdfs: vec![Bsdf {
                    name: "diffuse".to_string(),
                    reflectance: Reflectance {
                        color: MapColor { rgb, file_name },
                    },
                }],
            }],
            name,
        }
    }

    pub fn first_reflectance_color(&self) -> Option<&MapColor> {
        let bsdf = self.layers.first()?.bsdfs.first()?;
        Some(&bsdf.reflectance.color)
    }
}
