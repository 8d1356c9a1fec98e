//! Area summation shared by density estimation and normalization.

use nalgebra::{Point2, Point3, Vector3};

use crate::mesh::UvMesh;

/// Area of a planar polygon in 3D.
///
/// Sums the cross products of a triangle fan around the first point. The sum
/// is exact for planar polygons of either winding and needs no precomputed
/// normal. Returns 0 for fewer than three points.
pub fn polygon_area_3d(points: &[Point3<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let o = points[0];
    let mut cross_sum = Vector3::zeros();
    for i in 1..points.len() - 1 {
        let a = points[i] - o;
        let b = points[i + 1] - o;
        cross_sum += a.cross(&b);
    }

    0.5 * cross_sum.norm()
}

/// Unsigned area of a polygon in UV space.
///
/// Accumulates `u[i-1] * v[i] - v[i-1] * u[i]` around the closed cycle (the
/// predecessor of the first corner is the last one) and halves the absolute
/// value.
pub fn uv_polygon_area<It>(uvs: It) -> f64
where
    It: IntoIterator<Item = Point2<f64>>,
{
    let mut iter = uvs.into_iter();
    let Some(first) = iter.next() else {
        return 0.0;
    };

    let mut sum = 0.0;
    let mut prev = first;
    for cur in iter {
        sum += prev.x * cur.y - prev.y * cur.x;
        prev = cur;
    }
    sum += prev.x * first.y - prev.y * first.x;

    sum.abs() * 0.5
}

/// Total 3D surface area and UV-parameter area of a mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshAreas {
    /// Sum of face areas in world space.
    pub surface: f64,

    /// Sum of per-face unsigned UV areas.
    pub uv: f64,
}

impl MeshAreas {
    /// Measure both areas in a single pass over the faces.
    ///
    /// UV areas are taken per face before summing, so overlapping or mirrored
    /// islands add up instead of cancelling. Tools that take one absolute
    /// value of the signed total report less UV area for mirrored layouts.
    pub fn measure<M: UvMesh>(mesh: &M) -> Self {
        let mut areas = Self::default();
        for face in mesh.faces() {
            areas.surface += mesh.face_area(face);
            areas.uv += uv_polygon_area(mesh.face_uvs(face));
        }
        areas
    }

    /// Ratio of surface area to UV area, or `None` when the UV area is zero.
    pub fn stretch(&self) -> Option<f64> {
        if self.uv > 0.0 {
            Some(self.surface / self.uv)
        } else {
            None
        }
    }
}
