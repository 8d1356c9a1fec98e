//! The mesh contract consumed by the texel-density algorithms.
//!
//! The algorithms in [`crate::algo::texel`] never touch a concrete mesh type.
//! They read and write through [`UvMesh`], so a host application can expose
//! its own mesh storage without copying it into a [`PolyMesh`].

use nalgebra::Point2;

use super::index::{FaceId, MeshIndex};
use super::poly::PolyMesh;

/// A polygonal surface with one UV coordinate per face corner.
///
/// Implementations must keep face order stable between calls, and the UV
/// sequence of a face must be its loops in winding order. The cycle is
/// implicitly closed.
pub trait UvMesh {
    /// Handle identifying a face.
    type Face: Copy;

    /// Iterate over all faces.
    fn faces(&self) -> impl Iterator<Item = Self::Face> + '_;

    /// Planar 3D area of a face. Must be non-negative.
    fn face_area(&self, face: Self::Face) -> f64;

    /// UV coordinates of a face's loops, in winding order.
    fn face_uvs(&self, face: Self::Face) -> impl Iterator<Item = Point2<f64>> + '_;

    /// Rewrite the UV coordinate of every loop of every face.
    fn map_uvs<F>(&mut self, f: F)
    where
        F: FnMut(Point2<f64>) -> Point2<f64>;
}

impl<I: MeshIndex> UvMesh for PolyMesh<I> {
    type Face = FaceId<I>;

    fn faces(&self) -> impl Iterator<Item = Self::Face> + '_ {
        self.face_ids()
    }

    fn face_area(&self, face: Self::Face) -> f64 {
        PolyMesh::face_area(self, face)
    }

    fn face_uvs(&self, face: Self::Face) -> impl Iterator<Item = Point2<f64>> + '_ {
        PolyMesh::face_uvs(self, face)
    }

    fn map_uvs<F>(&mut self, mut f: F)
    where
        F: FnMut(Point2<f64>) -> Point2<f64>,
    {
        for uv in self.uvs_mut() {
            *uv = f(*uv);
        }
    }
}
