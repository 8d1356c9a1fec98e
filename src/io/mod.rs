//! Mesh file I/O.
//!
//! Texel density needs a UV layer, so only formats that carry per-corner
//! texture coordinates are supported.
//!
//! | Format | Extension | Load | Save |
//! |--------|-----------|------|------|
//! | Wavefront OBJ | `.obj` | ✓ | ✓ |
//!
//! # Usage
//!
//! ```no_run
//! use texelkit::io::{load, save};
//! use texelkit::mesh::{MeshObject, PolyMesh};
//!
//! let objects: Vec<MeshObject<PolyMesh>> = load("scene.obj").unwrap();
//! save(&objects, "scene_out.obj").unwrap();
//! ```

pub mod obj;

use std::path::Path;

use crate::error::{Result, TexelError};
use crate::mesh::{MeshIndex, MeshObject, PolyMesh};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| TexelError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load every object in a file, detecting the format from its extension.
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<Vec<MeshObject<PolyMesh<I>>>> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Obj => obj::load(path),
    }
}

/// Save objects to a file, detecting the format from its extension.
pub fn save<P: AsRef<Path>, I: MeshIndex>(
    objects: &[MeshObject<PolyMesh<I>>],
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Obj => obj::save(objects, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;
    use nalgebra::{Point2, Point3};

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("a/b/scene.OBJ"), Some(Format::Obj));
        assert_eq!(Format::from_path("scene.stl"), None);
        assert_eq!(Format::from_path("scene"), None);
    }

    #[test]
    fn test_unsupported_extension() {
        let objects: Vec<MeshObject<PolyMesh>> = Vec::new();
        let err = save(&objects, "out.fbx").unwrap_err();
        assert!(matches!(
            err,
            TexelError::UnsupportedFormat { ref extension } if extension == "fbx"
        ));
        assert!(load::<_, u32>("in").is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let mesh: PolyMesh = build_from_triangles(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            &[[0, 1, 2]],
            &[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ],
        )
        .unwrap();
        let mut object = MeshObject::new("Tri", mesh);
        object.set_texel_density(100.0);

        let path = std::env::temp_dir().join(format!("texelkit_io_{}.obj", std::process::id()));
        save(std::slice::from_ref(&object), &path).unwrap();
        let loaded: Vec<MeshObject<PolyMesh>> = load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Tri");
        assert_eq!(loaded[0].mesh.num_faces(), 1);
        // Cached densities are not read back from files.
        assert_eq!(loaded[0].texel_density(), None);
    }
}
