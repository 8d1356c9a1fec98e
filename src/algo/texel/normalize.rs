//! Uniform UV rescaling to reach a target texel density.

use nalgebra::Point2;

use crate::error::Result;
use crate::mesh::UvMesh;

use super::estimate::estimate_density;

/// Fixed point of every UV rescale.
pub const UV_CENTER: Point2<f64> = Point2::new(0.5, 0.5);

/// Result of a normalization attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizeOutcome {
    /// UVs were rescaled.
    Scaled {
        /// Density measured before scaling.
        previous_density: f64,
        /// Factor applied around [`UV_CENTER`].
        scale_factor: f64,
    },

    /// UVs were left untouched because no positive scale factor exists,
    /// typically because the mesh has zero UV area.
    Unchanged {
        /// Density measured on the mesh (usually 0).
        density: f64,
    },
}

impl NormalizeOutcome {
    /// Whether any UV was modified.
    pub fn is_scaled(&self) -> bool {
        matches!(self, NormalizeOutcome::Scaled { .. })
    }

    /// The applied scale factor, or 0 when nothing changed.
    pub fn scale_factor(&self) -> f64 {
        match *self {
            NormalizeOutcome::Scaled { scale_factor, .. } => scale_factor,
            NormalizeOutcome::Unchanged { .. } => 0.0,
        }
    }
}

/// Factor that moves `current_density` to `target_density`.
///
/// Returns 0 when the current density is 0.
#[inline]
pub fn scale_factor(current_density: f64, target_density: f64) -> f64 {
    if current_density != 0.0 {
        target_density / current_density
    } else {
        0.0
    }
}

/// Scale every loop UV uniformly around [`UV_CENTER`].
pub fn scale_uvs_about_center<M: UvMesh>(mesh: &mut M, factor: f64) {
    mesh.map_uvs(|uv| UV_CENTER + (uv - UV_CENTER) * factor);
}

/// Rescale a mesh's UVs so that its texel density matches `target_density`.
///
/// The current density is measured first. If the resulting scale factor is
/// not strictly positive (zero UV area, for instance) the mesh is left as is
/// and [`NormalizeOutcome::Unchanged`] is returned, so callers can report
/// that the density did not change.
pub fn normalize_to_target<M: UvMesh>(
    mesh: &mut M,
    target_density: f64,
    texture_resolution_px: f64,
) -> Result<NormalizeOutcome> {
    let current = estimate_density(&*mesh, texture_resolution_px)?;
    let factor = scale_factor(current, target_density);

    if factor > 0.0 {
        scale_uvs_about_center(mesh, factor);
        Ok(NormalizeOutcome::Scaled {
            previous_density: current,
            scale_factor: factor,
        })
    } else {
        Ok(NormalizeOutcome::Unchanged { density: current })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_polygons, build_from_triangles, PolyMesh};
    use nalgebra::Point3;

    const EPS: f64 = 1e-9;

    /// An L-shaped pair of quads with an off-center UV layout.
    fn l_shape() -> PolyMesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 3.0, 0.5),
            Point3::new(1.0, 3.0, 0.5),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let polygons = vec![
            vec![
                (0, Point2::new(0.10, 0.20)),
                (1, Point2::new(0.50, 0.20)),
                (2, Point2::new(0.50, 0.40)),
                (3, Point2::new(0.10, 0.40)),
            ],
            vec![
                (3, Point2::new(0.60, 0.10)),
                (6, Point2::new(0.80, 0.10)),
                (5, Point2::new(0.80, 0.55)),
                (4, Point2::new(0.60, 0.55)),
            ],
        ];
        build_from_polygons(&positions, &polygons).unwrap()
    }

    fn uvs(mesh: &PolyMesh) -> Vec<Point2<f64>> {
        mesh.face_ids().flat_map(|f| mesh.face_uvs(f)).collect()
    }

    fn assert_uvs_close(a: &[Point2<f64>], b: &[Point2<f64>]) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            assert!((p - q).norm() < EPS, "{:?} != {:?}", p, q);
        }
    }

    #[test]
    fn test_scale_factor() {
        assert_eq!(scale_factor(10.0, 20.0), 2.0);
        assert_eq!(scale_factor(0.0, 20.0), 0.0);
    }

    #[test]
    fn test_normalize_hits_target() {
        let mut mesh = l_shape();
        let outcome = normalize_to_target(&mut mesh, 20.48, 4096.0).unwrap();
        assert!(outcome.is_scaled());

        let density = estimate_density(&mesh, 4096.0).unwrap();
        assert!((density - 20.48).abs() < EPS);
    }

    #[test]
    fn test_normalize_to_current_density_is_identity() {
        let mut mesh = l_shape();
        let before = uvs(&mesh);
        let current = estimate_density(&mesh, 2048.0).unwrap();

        let outcome = normalize_to_target(&mut mesh, current, 2048.0).unwrap();
        assert!((outcome.scale_factor() - 1.0).abs() < 1e-12);
        assert_uvs_close(&before, &uvs(&mesh));
    }

    #[test]
    fn test_normalize_round_trip() {
        let mut mesh = l_shape();
        let before = uvs(&mesh);
        let t1 = estimate_density(&mesh, 1024.0).unwrap();

        normalize_to_target(&mut mesh, 3.5, 1024.0).unwrap();
        normalize_to_target(&mut mesh, 0.75, 1024.0).unwrap();
        normalize_to_target(&mut mesh, t1, 1024.0).unwrap();

        assert_uvs_close(&before, &uvs(&mesh));
    }

    #[test]
    fn test_center_is_fixed_point() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let vertex_uvs = vec![UV_CENTER, Point2::new(0.9, 0.5), Point2::new(0.5, 0.9)];
        let mut mesh: PolyMesh = build_from_triangles(&positions, &[[0, 1, 2]], &vertex_uvs).unwrap();

        for factor in [0.25, 1.0, 3.0, 17.5] {
            scale_uvs_about_center(&mut mesh, factor);
            assert_eq!(mesh.face_uvs(mesh.face_ids().next().unwrap()).next(), Some(UV_CENTER));
        }
    }

    #[test]
    fn test_scale_about_center() {
        let mut mesh = l_shape();
        scale_uvs_about_center(&mut mesh, 2.0);
        let first = uvs(&mesh)[0];
        // (0.1 - 0.5) * 2 + 0.5, (0.2 - 0.5) * 2 + 0.5
        assert!((first.x - (-0.3)).abs() < 1e-12);
        assert!((first.y - (-0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_uvs_left_unchanged() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let collapsed = vec![Point2::new(0.2, 0.8); 3];
        let mut mesh: PolyMesh = build_from_triangles(&positions, &[[0, 1, 2]], &collapsed).unwrap();

        let outcome = normalize_to_target(&mut mesh, 20.48, 4096.0).unwrap();
        assert_eq!(outcome, NormalizeOutcome::Unchanged { density: 0.0 });
        assert_eq!(outcome.scale_factor(), 0.0);
        assert!(uvs(&mesh).iter().all(|&uv| uv == Point2::new(0.2, 0.8)));
    }
}
