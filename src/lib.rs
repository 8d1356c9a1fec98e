//! # Texelkit
//!
//! Texel density measurement and normalization for UV-mapped meshes.
//!
//! Texel density is the number of texture pixels covering one unit of
//! surface. Texelkit measures it per object from the ratio of 3D surface
//! area to UV area, and rescales UV layouts about the centre of UV space so
//! every object in a selection ends up with the same density.
//!
//! ## Features
//!
//! - **Polygon meshes with per-corner UVs**: n-gons and UV seams are kept
//! - **Density estimation**: `(resolution / 100) / sqrt(surface / uv)` pixels per unit
//! - **Normalization**: uniform UV scaling about `(0.5, 0.5)` to hit a target
//! - **Batch processing**: per-object results, one failure never blocks the rest
//! - **OBJ I/O**: multi-object files with texture coordinates
//!
//! ## Quick Start
//!
//! ```no_run
//! use texelkit::prelude::*;
//!
//! let mut objects: Vec<MeshObject> = texelkit::io::load("scene.obj").unwrap();
//! let config = DensityConfig::default();
//!
//! let report = texelkit::algo::batch::normalize_objects(&mut objects, &config);
//! for (name, err) in report.failed() {
//!     eprintln!("{}: {}", name, err);
//! }
//!
//! texelkit::io::save(&objects, "scene_normalized.obj").unwrap();
//! ```
//!
//! ## Measuring a Single Mesh
//!
//! ```
//! use texelkit::prelude::*;
//! use nalgebra::{Point2, Point3};
//!
//! // A 2x2 quad mapped onto the whole unit UV square.
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(2.0, 2.0, 0.0),
//!     Point3::new(0.0, 2.0, 0.0),
//! ];
//! let quad = vec![
//!     (0, Point2::new(0.0, 0.0)),
//!     (1, Point2::new(1.0, 0.0)),
//!     (2, Point2::new(1.0, 1.0)),
//!     (3, Point2::new(0.0, 1.0)),
//! ];
//!
//! let mut mesh: PolyMesh = build_from_polygons(&positions, &[quad]).unwrap();
//!
//! // 1024 px over a 2 unit edge: 512 px per unit, reported as 5.12.
//! let density = estimate_density(&mesh, 1024.0).unwrap();
//! assert!((density - 5.12).abs() < 1e-9);
//!
//! let outcome = normalize_to_target(&mut mesh, 10.24, 1024.0).unwrap();
//! assert!((outcome.scale_factor() - 2.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use texelkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::texel::{
        estimate_density, normalize_to_target, DensityConfig, NormalizeOutcome,
    };
    pub use crate::algo::unwrap::{UnwrapOptions, Unwrapper};
    pub use crate::error::{Result, TexelError};
    pub use crate::mesh::{
        build_from_polygons, build_from_triangles, FaceId, LoopId, MeshIndex, MeshObject,
        PolyMesh, UvMesh, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::algo::batch::{calculate_densities, normalize_objects};
    use super::prelude::*;
    use nalgebra::{Point2, Point3};

    fn cube_face(size: f64, uv_scale: f64) -> PolyMesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(size, 0.0, 0.0),
            Point3::new(size, size, 0.0),
            Point3::new(0.0, size, 0.0),
        ];
        let uvs: Vec<Point2<f64>> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(u, v)| Point2::new(u * uv_scale, v * uv_scale))
            .collect();
        build_from_triangles(&positions, &[[0, 1, 2], [0, 2, 3]], &uvs).unwrap()
    }

    #[test]
    fn test_selection_ends_at_common_density() {
        let mut objects = vec![
            MeshObject::new("Small", cube_face(1.0, 0.25)),
            MeshObject::new("Large", cube_face(8.0, 1.0)),
            MeshObject::new("Flat", cube_face(2.0, 0.0)),
        ];
        let config = DensityConfig::new(2048, 10.0).unwrap();

        let before = calculate_densities(&mut objects, &config);
        assert_eq!(before.failed().count(), 0);
        assert!(objects[0].texel_density().unwrap() != objects[1].texel_density().unwrap());

        let report = normalize_objects(&mut objects, &config);
        assert_eq!(report.len(), 3);

        for obj in &objects[..2] {
            let density = obj.texel_density().unwrap();
            assert!((density - 10.0).abs() < 1e-9, "{}: {}", obj.name, density);
        }

        // Collapsed UVs stay at zero and are left alone.
        assert_eq!(objects[2].texel_density(), Some(0.0));
        assert!(!report.entries[2].result.as_ref().unwrap().is_scaled());
    }
}
