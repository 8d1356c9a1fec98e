//! Polygon mesh with per-corner UV coordinates.
//!
//! A [`PolyMesh`] stores every face as a closed cycle of *loops*. A loop is one
//! corner of one face: it references a vertex and carries the UV coordinate
//! used at that corner. Two faces sharing a vertex therefore each own a loop
//! for it and may map it to different UVs (a UV seam).
//!
//! # Layout
//!
//! - Vertex positions live in one array, shared by all faces
//! - Loops are stored contiguously per face, in winding order
//! - A face records the first loop of its cycle and the cycle length
//!
//! The loop cycle of a face is closed: the predecessor of the first loop is
//! the last loop of the same face.

use std::ops::Range;

use nalgebra::{Point2, Point3};

use super::index::{FaceId, LoopId, MeshIndex, VertexId};
use crate::algo::texel::polygon_area_3d;
use crate::error::{Result, TexelError};

/// One corner of a face.
#[derive(Debug, Clone, Copy)]
pub struct Loop<I: MeshIndex = u32> {
    /// The vertex at this corner.
    pub vertex: VertexId<I>,

    /// The UV coordinate at this corner.
    pub uv: Point2<f64>,
}

impl<I: MeshIndex> Loop<I> {
    /// Create a loop for the given vertex and UV.
    pub fn new(vertex: VertexId<I>, uv: Point2<f64>) -> Self {
        Self { vertex, uv }
    }
}

/// A face, stored as a contiguous run of loops.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// First loop of the face cycle.
    pub first_loop: LoopId<I>,

    /// Number of loops (corners) in the cycle.
    pub len: usize,
}

impl<I: MeshIndex> Face<I> {
    /// Range of loop indices belonging to this face.
    #[inline]
    pub fn loop_range(&self) -> Range<usize> {
        let start = self.first_loop.index();
        start..start + self.len
    }
}

/// A polygon mesh with per-loop UV coordinates.
#[derive(Debug, Clone)]
pub struct PolyMesh<I: MeshIndex = u32> {
    /// Vertex positions.
    pub(crate) positions: Vec<Point3<f64>>,

    /// Face corners, grouped per face.
    pub(crate) loops: Vec<Loop<I>>,

    /// Faces, in insertion order.
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Default for PolyMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> PolyMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            loops: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_loops: usize, num_faces: usize) -> Self {
        Self {
            positions: Vec::with_capacity(num_vertices),
            loops: Vec::with_capacity(num_loops),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of loops (face corners).
    #[inline]
    pub fn num_loops(&self) -> usize {
        self.loops.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex position.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.positions[v.index()]
    }

    /// Get a loop by ID.
    #[inline]
    pub fn get_loop(&self, l: LoopId<I>) -> &Loop<I> {
        &self.loops[l.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, f: FaceId<I>) -> &Face<I> {
        &self.faces[f.index()]
    }

    /// Get the UV coordinate of a loop.
    #[inline]
    pub fn uv(&self, l: LoopId<I>) -> Point2<f64> {
        self.loops[l.index()].uv
    }

    /// Set the UV coordinate of a loop.
    #[inline]
    pub fn set_uv(&mut self, l: LoopId<I>, uv: Point2<f64>) {
        self.loops[l.index()].uv = uv;
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.positions.len()).map(VertexId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over the loops of a face, in winding order.
    pub fn face_loops(&self, f: FaceId<I>) -> impl Iterator<Item = LoopId<I>> + '_ {
        self.faces[f.index()].loop_range().map(LoopId::new)
    }

    /// Iterate over the vertices of a face, in winding order.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.loops[self.faces[f.index()].loop_range()]
            .iter()
            .map(|l| l.vertex)
    }

    /// Iterate over the UV coordinates of a face, in winding order.
    pub fn face_uvs(&self, f: FaceId<I>) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.loops[self.faces[f.index()].loop_range()]
            .iter()
            .map(|l| l.uv)
    }

    /// Collect the positions of a face's corners.
    pub fn face_positions(&self, f: FaceId<I>) -> Vec<Point3<f64>> {
        self.face_vertices(f).map(|v| *self.position(v)).collect()
    }

    /// Mutable access to every loop UV.
    pub fn uvs_mut(&mut self) -> impl Iterator<Item = &mut Point2<f64>> + '_ {
        self.loops.iter_mut().map(|l| &mut l.uv)
    }

    // ==================== Geometry ====================

    /// Compute the planar area of a face.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        polygon_area_3d(&self.face_positions(f))
    }

    /// Compute the total surface area of the mesh.
    pub fn surface_area(&self) -> f64 {
        self.face_ids().map(|f| self.face_area(f)).sum()
    }

    /// Compute the bounding box of the UV coordinates.
    ///
    /// Returns `None` if the mesh has no loops.
    pub fn uv_bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = self.loops.first()?.uv;
        let (mut min, mut max) = (first, first);

        for l in &self.loops {
            min.x = min.x.min(l.uv.x);
            min.y = min.y.min(l.uv.y);
            max.x = max.x.max(l.uv.x);
            max.y = max.y.max(l.uv.y);
        }

        Some((min, max))
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its ID.
    ///
    /// Fails once the vertex count would exceed what `I` can address.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> Result<VertexId<I>> {
        check_capacity::<I>("vertices", self.positions.len() + 1)?;
        let id = VertexId::new(self.positions.len());
        self.positions.push(position);
        Ok(id)
    }

    /// Add a face from its corners, in winding order.
    ///
    /// Fails if the face has fewer than three corners, references a vertex
    /// that does not exist, uses the same vertex twice, or would push the
    /// face or loop count past what `I` can address.
    pub fn add_face(&mut self, corners: &[(VertexId<I>, Point2<f64>)]) -> Result<FaceId<I>> {
        let face_index = self.faces.len();

        if corners.len() < 3 {
            return Err(TexelError::DegenerateFace {
                face: face_index,
                corners: corners.len(),
            });
        }

        for (i, &(v, _)) in corners.iter().enumerate() {
            if !v.is_valid() || v.index() >= self.positions.len() {
                return Err(TexelError::InvalidVertexIndex {
                    face: face_index,
                    vertex: v.index(),
                });
            }
            if corners[..i].iter().any(|&(w, _)| w == v) {
                return Err(TexelError::DegenerateFace {
                    face: face_index,
                    corners: corners.len(),
                });
            }
        }

        check_capacity::<I>("faces", face_index + 1)?;
        check_capacity::<I>("loops", self.loops.len() + corners.len())?;

        let first_loop = LoopId::new(self.loops.len());
        self.loops
            .extend(corners.iter().map(|&(v, uv)| Loop::new(v, uv)));
        self.faces.push(Face {
            first_loop,
            len: corners.len(),
        });

        Ok(FaceId::new(face_index))
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid.
    ///
    /// Every face must own at least three loops, face loop ranges must tile
    /// the loop array in order, and every loop must reference an existing
    /// vertex.
    pub fn is_valid(&self) -> bool {
        let mut expected_start = 0;
        for face in &self.faces {
            if face.len < 3 || face.first_loop.index() != expected_start {
                return false;
            }
            expected_start += face.len;
        }

        if expected_start != self.loops.len() {
            return false;
        }

        self.loops
            .iter()
            .all(|l| l.vertex.is_valid() && l.vertex.index() < self.positions.len())
    }
}

/// Check that `count` elements can be addressed by index type `I`.
pub(crate) fn check_capacity<I: MeshIndex>(kind: &'static str, count: usize) -> Result<()> {
    let capacity = I::MAX.to_usize().saturating_add(1);
    if count > capacity {
        return Err(TexelError::TooManyElements {
            kind,
            count,
            capacity,
        });
    }
    Ok(())
}
