//! Mesh construction utilities.
//!
//! This module provides functions for building [`PolyMesh`]es from
//! face-vertex lists as commonly found in mesh file formats, and for
//! converting them back.

use nalgebra::{Point2, Point3};

use super::index::{MeshIndex, VertexId};
use super::poly::{check_capacity, PolyMesh};
use crate::error::{Result, TexelError};

/// A face corner given as `(vertex index, uv)`.
pub type Corner = (usize, Point2<f64>);

/// Build a polygon mesh from vertex positions and polygons with per-corner UVs.
///
/// # Arguments
/// * `positions` - List of vertex positions
/// * `polygons` - List of faces, each a list of `(vertex index, uv)` corners
///   in winding order
///
/// # Example
/// ```
/// use texelkit::mesh::{build_from_polygons, PolyMesh};
/// use nalgebra::{Point2, Point3};
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let polygons = vec![vec![
///     (0, Point2::new(0.0, 0.0)),
///     (1, Point2::new(1.0, 0.0)),
///     (2, Point2::new(1.0, 1.0)),
///     (3, Point2::new(0.0, 1.0)),
/// ]];
///
/// let mesh: PolyMesh = build_from_polygons(&positions, &polygons).unwrap();
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.num_loops(), 4);
/// ```
pub fn build_from_polygons<I: MeshIndex>(
    positions: &[Point3<f64>],
    polygons: &[Vec<Corner>],
) -> Result<PolyMesh<I>> {
    if polygons.is_empty() {
        return Err(TexelError::EmptyMesh);
    }

    let num_loops = polygons.iter().map(Vec::len).sum();
    check_capacity::<I>("vertices", positions.len())?;
    check_capacity::<I>("loops", num_loops)?;
    check_capacity::<I>("faces", polygons.len())?;

    let mut mesh = PolyMesh::with_capacity(positions.len(), num_loops, polygons.len());

    for &p in positions {
        mesh.add_vertex(p)?;
    }

    let mut corners: Vec<(VertexId<I>, Point2<f64>)> = Vec::new();
    for (fi, polygon) in polygons.iter().enumerate() {
        corners.clear();
        for &(vi, uv) in polygon {
            // Checked here so the typed index is never built from an out-of-range value.
            if vi >= positions.len() {
                return Err(TexelError::InvalidVertexIndex {
                    face: fi,
                    vertex: vi,
                });
            }
            corners.push((VertexId::new(vi), uv));
        }
        mesh.add_face(&corners)?;
    }

    Ok(mesh)
}

/// Build a polygon mesh from triangles and per-vertex UVs.
///
/// Every loop takes the UV of its vertex, so the result has no UV seams.
///
/// # Example
/// ```
/// use texelkit::mesh::{build_from_triangles, PolyMesh};
/// use nalgebra::{Point2, Point3};
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let uvs = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// ];
///
/// let mesh: PolyMesh = build_from_triangles(&positions, &[[0, 1, 2]], &uvs).unwrap();
/// assert_eq!(mesh.num_loops(), 3);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    positions: &[Point3<f64>],
    faces: &[[usize; 3]],
    vertex_uvs: &[Point2<f64>],
) -> Result<PolyMesh<I>> {
    if vertex_uvs.len() != positions.len() {
        return Err(TexelError::invalid_param(
            "vertex_uvs",
            vertex_uvs.len(),
            "must provide one UV per vertex",
        ));
    }

    let polygons: Vec<Vec<Corner>> = faces
        .iter()
        .map(|face| {
            face.iter()
                .map(|&vi| (vi, vertex_uvs.get(vi).copied().unwrap_or_else(Point2::origin)))
                .collect()
        })
        .collect();

    build_from_polygons(positions, &polygons)
}

/// Convert a polygon mesh back to a face-vertex representation.
///
/// Returns `(positions, polygons)` where each polygon lists its
/// `(vertex index, uv)` corners in winding order.
pub fn to_polygons<I: MeshIndex>(mesh: &PolyMesh<I>) -> (Vec<Point3<f64>>, Vec<Vec<Corner>>) {
    let positions = mesh.positions.clone();

    let polygons = mesh
        .face_ids()
        .map(|f| {
            mesh.face_loops(f)
                .map(|l| {
                    let lp = mesh.get_loop(l);
                    (lp.vertex.index(), lp.uv)
                })
                .collect()
        })
        .collect();

    (positions, polygons)
}
