//! Error types for texelkit.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`TexelError`].
pub type Result<T> = std::result::Result<T, TexelError>;

/// Errors that can occur while building meshes or measuring texel density.
#[derive(Error, Debug)]
pub enum TexelError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three corners or repeats a vertex.
    #[error("face {face} is degenerate ({corners} corners, repeated or missing vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
        /// Number of corners the face was given.
        corners: usize,
    },

    /// The mesh has more elements than its index type can address.
    #[error("{count} {kind} exceed the index capacity of {capacity}")]
    TooManyElements {
        /// Element kind ("vertices", "loops" or "faces").
        kind: &'static str,
        /// Number of elements requested.
        count: usize,
        /// Largest element count the index type supports.
        capacity: usize,
    },

    /// The mesh carries no UV coordinates for one or more faces.
    #[error("object '{object}' has no UV layer (face {face} lacks texture coordinates)")]
    MissingUvLayer {
        /// Name of the offending object.
        object: String,
        /// First face found without texture coordinates.
        face: usize,
    },

    /// The mesh has UV area but no 3D surface area, so density is undefined.
    #[error("texel density is undefined: surface area {surface_area} with UV area {uv_area}")]
    NumericAnomaly {
        /// Total 3D surface area.
        surface_area: f64,
        /// Total UV-parameter area.
        uv_area: f64,
    },

    /// The external unwrap step reported a failure.
    #[error("unwrap failed for '{object}': {message}")]
    UnwrapFailed {
        /// Name of the object being unwrapped.
        object: String,
        /// Error message from the unwrapper.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl TexelError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        TexelError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a load error for the given path.
    pub(crate) fn load<P: Into<PathBuf>, M: Into<String>>(path: P, message: M) -> Self {
        TexelError::LoadError {
            path: path.into(),
            message: message.into(),
        }
    }
}
