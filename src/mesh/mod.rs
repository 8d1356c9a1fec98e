//! Core mesh data structures.
//!
//! This module provides the polygon mesh representation used by the
//! texel-density algorithms.
//!
//! # Overview
//!
//! The primary type is [`PolyMesh`], a polygon mesh whose faces are closed
//! cycles of *loops*. Each loop is one face corner and carries its own UV
//! coordinate, which is how UV seams are represented.
//!
//! Algorithms do not depend on [`PolyMesh`] directly. They consume the
//! [`UvMesh`] trait, which host applications can implement for their own
//! mesh storage.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`LoopId`] - Identifies a face corner
//! - [`FaceId`] - Identifies a face
//!
//! # Construction
//!
//! ```
//! use texelkit::mesh::{build_from_triangles, PolyMesh};
//! use nalgebra::{Point2, Point3};
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let uvs = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 1.0),
//! ];
//!
//! let mesh: PolyMesh = build_from_triangles(&positions, &[[0, 1, 2]], &uvs).unwrap();
//! ```

mod builder;
mod index;
mod object;
mod poly;
mod traits;

pub use builder::{build_from_polygons, build_from_triangles, to_polygons, Corner};
pub use index::{FaceId, LoopId, MeshIndex, VertexId};
pub use object::MeshObject;
pub use poly::{Face, Loop, PolyMesh};
pub use traits::UvMesh;
