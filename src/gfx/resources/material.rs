//! Material import for Phong shading
//!
//! Reads the companion `.mtl` file of a model into a single [`Material`].
//! Only one material is kept per file: every recognized record overwrites the
//! matching field, so the last definition wins.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::error::{ImportError, ImportResult};

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 3],
    pub shininess: f32,
    pub diffuse: [f32; 3],
    _padding0: f32,
    pub specular: [f32; 3],
    _padding1: f32,
}

/// Reflectance coefficients of a surface
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    /// Diffuse texture from `map_Kd`, as written in the file
    pub diffuse_texture: Option<PathBuf>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            ambient: [0.1; 3],
            diffuse: [0.7; 3],
            specular: [0.5; 3],
            shininess: 32.0,
            diffuse_texture: None,
        }
    }
}

impl Material {
    /// Packs the coefficients for a uniform buffer upload
    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            ambient: self.ambient,
            shininess: self.shininess,
            diffuse: self.diffuse,
            _padding0: 0.0,
            specular: self.specular,
            _padding1: 0.0,
        }
    }

    /// Applies one material record. Returns `false` for records that are not
    /// recognized or whose values do not parse; the material is unchanged then.
    fn apply_record(&mut self, keyword: &str, rest: &str) -> bool {
        match keyword {
            "Ka" => parse_color(rest).map(|c| self.ambient = c).is_some(),
            "Kd" => parse_color(rest).map(|c| self.diffuse = c).is_some(),
            "Ks" => parse_color(rest).map(|c| self.specular = c).is_some(),
            "Ns" => rest
                .split_whitespace()
                .next()
                .and_then(|token| token.parse::<f32>().ok())
                .map(|ns| self.shininess = ns)
                .is_some(),
            "newmtl" if !rest.is_empty() => {
                self.name = rest.to_string();
                true
            }
            "map_Kd" if !rest.is_empty() => {
                self.diffuse_texture = Some(PathBuf::from(rest));
                true
            }
            _ => false,
        }
    }
}

fn parse_color(rest: &str) -> Option<[f32; 3]> {
    let mut tokens = rest.split_whitespace().map(|token| token.parse::<f32>());
    let mut color = [0.0; 3];
    for channel in color.iter_mut() {
        *channel = tokens.next()?.ok()?;
    }
    Some(color)
}

/// Parses MTL text from any buffered reader.
pub fn parse_mtl<R: BufRead>(reader: R) -> std::io::Result<Material> {
    let mut material = Material::default();

    // Decoded lossily: stray non-UTF-8 bytes in comments or names are not errors
    for line in reader.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        let line = line.trim();
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        let recognized = matches!(keyword, "Ka" | "Kd" | "Ks" | "Ns");
        if !material.apply_record(keyword, rest.trim()) && recognized {
            debug!("Ignoring malformed material record: {:?}", line);
        }
    }

    Ok(material)
}

/// Loads an MTL file from disk.
pub fn load_mtl(path: impl AsRef<Path>) -> ImportResult<Material> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let material = parse_mtl(BufReader::new(file)).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded material '{}' from {}", material.name, path.display());
    Ok(material)
}

/// Loads an MTL file, falling back to the default material when it cannot be read.
pub fn load_mtl_or_default(path: impl AsRef<Path>) -> Material {
    load_mtl(path).unwrap_or_else(|e| {
        warn!("{}; using default material", e);
        Material::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUZANNE: &str = "\
# Blender MTL File
newmtl Suzanne
Ns 96.078431
Ka 1.000000 1.000000 1.000000
Kd 0.640000 0.640000 0.640000
Ks 0.500000 0.500000 0.500000
Ke 0.000000 0.000000 0.000000
Ni 1.000000
d 1.000000
illum 2
map_Kd Suzanne.png
";

    #[test]
    fn test_parse_recognized_records() {
        let material = parse_mtl(SUZANNE.as_bytes()).unwrap();
        assert_eq!(material.name, "Suzanne");
        assert_eq!(material.ambient, [1.0, 1.0, 1.0]);
        assert_eq!(material.diffuse, [0.64, 0.64, 0.64]);
        assert_eq!(material.specular, [0.5, 0.5, 0.5]);
        assert!((material.shininess - 96.078431).abs() < 1e-4);
        assert_eq!(material.diffuse_texture, Some(PathBuf::from("Suzanne.png")));
    }

    #[test]
    fn test_later_records_overwrite_earlier_ones() {
        let text = "Kd 1 0 0\nnewmtl second\nKd 0 0 1\n";
        let material = parse_mtl(text.as_bytes()).unwrap();
        assert_eq!(material.diffuse, [0.0, 0.0, 1.0]);
        assert_eq!(material.name, "second");
    }

    #[test]
    fn test_unset_fields_keep_defaults() {
        let material = parse_mtl("Ks 0.9 0.9 0.9\n".as_bytes()).unwrap();
        let defaults = Material::default();
        assert_eq!(material.specular, [0.9, 0.9, 0.9]);
        assert_eq!(material.ambient, defaults.ambient);
        assert_eq!(material.diffuse, defaults.diffuse);
        assert_eq!(material.shininess, 32.0);
    }

    #[test]
    fn test_malformed_record_leaves_field_unchanged() {
        let text = "Ka 0.2 0.2\nKd 0.3 nope 0.3\nNs lots\n";
        let material = parse_mtl(text.as_bytes()).unwrap();
        assert_eq!(material, Material::default());
    }

    #[test]
    fn test_non_utf8_name_keeps_coefficients() {
        let bytes: &[u8] = b"newmtl Gr\xfcn\nKd 0 1 0\nNs 10\n";
        let material = parse_mtl(bytes).unwrap();
        assert_eq!(material.diffuse, [0.0, 1.0, 0.0]);
        assert_eq!(material.shininess, 10.0);
        assert!(material.name.starts_with("Gr"));
    }

    #[test]
    fn test_uniform_layout() {
        let uniform = Material::default().uniform();
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
        assert_eq!(uniform.shininess, 32.0);
        assert_eq!(uniform.diffuse, [0.7; 3]);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let path = Path::new("/definitely/not/here/model.mtl");
        assert!(matches!(load_mtl(path), Err(ImportError::Open { .. })));
        assert_eq!(load_mtl_or_default(path), Material::default());
    }
}
