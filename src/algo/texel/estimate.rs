//! Texel density estimation.

use crate::error::{Result, TexelError};
use crate::mesh::UvMesh;

use super::area::MeshAreas;
use super::PIXELS_PER_UNIT;

/// Convert measured areas into a texel density.
///
/// Returns 0 when the UV area is zero (collapsed or missing UVs). Returns
/// [`TexelError::NumericAnomaly`] when there is UV area but no surface area,
/// since the density would be infinite.
pub fn density_from_areas(areas: &MeshAreas, texture_resolution_px: f64) -> Result<f64> {
    debug_assert!(texture_resolution_px > 0.0);

    let Some(stretch) = areas.stretch() else {
        return Ok(0.0);
    };

    if stretch <= 0.0 {
        return Err(TexelError::NumericAnomaly {
            surface_area: areas.surface,
            uv_area: areas.uv,
        });
    }

    Ok((texture_resolution_px / PIXELS_PER_UNIT) / stretch.sqrt())
}

/// Estimate the texel density of a mesh, in pixels per unit.
///
/// Sums face areas and per-face UV areas in one pass, then applies
/// [`density_from_areas`]. The mesh is only read.
///
/// # Example
///
/// ```
/// use texelkit::prelude::*;
/// use texelkit::algo::texel::estimate_density;
/// use nalgebra::{Point2, Point3};
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// // UVs span 2x2, four times the surface area.
/// let uvs: Vec<_> = positions.iter().map(|p| Point2::new(2.0 * p.x, 2.0 * p.y)).collect();
/// let mesh: PolyMesh = build_from_triangles(&positions, &[[0, 1, 2], [0, 2, 3]], &uvs).unwrap();
///
/// let density = estimate_density(&mesh, 100.0).unwrap();
/// assert!((density - 2.0).abs() < 1e-12);
/// ```
pub fn estimate_density<M: UvMesh>(mesh: &M, texture_resolution_px: f64) -> Result<f64> {
    density_from_areas(&MeshAreas::measure(mesh), texture_resolution_px)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_polygons, build_from_triangles, PolyMesh};
    use nalgebra::{Point2, Point3};

    fn unit_square(uv_scale: f64) -> PolyMesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let uvs: Vec<Point2<f64>> = positions
            .iter()
            .map(|p| Point2::new(p.x * uv_scale, p.y * uv_scale))
            .collect();
        build_from_triangles(&positions, &[[0, 1, 2], [0, 2, 3]], &uvs).unwrap()
    }

    #[test]
    fn test_unit_square_density() {
        let density = estimate_density(&unit_square(1.0), 100.0).unwrap();
        assert_eq!(density, 1.0);
    }

    #[test]
    fn test_doubled_uv_extent_doubles_density() {
        let density = estimate_density(&unit_square(2.0), 100.0).unwrap();
        assert!((density - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_density_scales_with_resolution() {
        let density = estimate_density(&unit_square(1.0), 4096.0).unwrap();
        assert!((density - 40.96).abs() < 1e-12);
    }

    #[test]
    fn test_collapsed_uvs_give_zero_density() {
        let density = estimate_density(&unit_square(0.0), 4096.0).unwrap();
        assert_eq!(density, 0.0);
    }

    #[test]
    fn test_empty_mesh_gives_zero_density() {
        let mesh = PolyMesh::<u32>::new();
        assert_eq!(estimate_density(&mesh, 1024.0).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_surface_area_is_anomaly() {
        // Three collinear points span no area in 3D but a full triangle in UV.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let polygons = vec![vec![
            (0, Point2::new(0.0, 0.0)),
            (1, Point2::new(1.0, 0.0)),
            (2, Point2::new(0.0, 1.0)),
        ]];
        let mesh: PolyMesh = build_from_polygons(&positions, &polygons).unwrap();

        let err = estimate_density(&mesh, 100.0).unwrap_err();
        assert!(matches!(err, TexelError::NumericAnomaly { .. }));
    }

    #[test]
    fn test_density_from_areas() {
        let areas = MeshAreas {
            surface: 16.0,
            uv: 1.0,
        };
        // 2048 px -> 20.48 units, stretched by sqrt(16) = 4.
        let density = density_from_areas(&areas, 2048.0).unwrap();
        assert!((density - 5.12).abs() < 1e-12);
    }
}
