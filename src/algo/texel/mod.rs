//! Texel density measurement and normalization.
//!
//! *Texel density* is the number of texture pixels covering one unit of
//! world-space length. It is derived from the ratio between a mesh's 3D
//! surface area and the area its faces occupy in UV space:
//!
//! ```text
//! density = (texture_resolution_px / PIXELS_PER_UNIT) / sqrt(surface_area / uv_area)
//! ```
//!
//! Normalization rescales all UVs uniformly around the UV center `(0.5, 0.5)`
//! so that the measured density matches a target. Since UV area scales with
//! the square of the factor, scaling by `target / current` lands exactly on
//! the target.
//!
//! # Example
//!
//! ```
//! use texelkit::prelude::*;
//! use texelkit::algo::texel::{estimate_density, normalize_to_target, NormalizeOutcome};
//! use nalgebra::{Point2, Point3};
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let uvs: Vec<_> = positions.iter().map(|p| Point2::new(p.x, p.y)).collect();
//! let mut mesh: PolyMesh =
//!     build_from_triangles(&positions, &[[0, 1, 2], [0, 2, 3]], &uvs).unwrap();
//!
//! let density = estimate_density(&mesh, 100.0).unwrap();
//! assert!((density - 1.0).abs() < 1e-12);
//!
//! let outcome = normalize_to_target(&mut mesh, 2.0, 100.0).unwrap();
//! assert!(matches!(outcome, NormalizeOutcome::Scaled { .. }));
//! assert!((estimate_density(&mesh, 100.0).unwrap() - 2.0).abs() < 1e-9);
//! ```

mod area;
mod estimate;
mod normalize;

pub use area::{polygon_area_3d, uv_polygon_area, MeshAreas};
pub use estimate::{density_from_areas, estimate_density};
pub use normalize::{
    normalize_to_target, scale_factor, scale_uvs_about_center, NormalizeOutcome, UV_CENTER,
};

use crate::error::{Result, TexelError};

/// Pixels per world-space unit used to convert texture resolution to length.
pub const PIXELS_PER_UNIT: f64 = 100.0;

/// Texture resolution and target density for density operations.
///
/// Values are validated on construction, so a `DensityConfig` always holds a
/// resolution of at least one pixel and a target of at least
/// [`DensityConfig::MIN_TARGET_DENSITY`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityConfig {
    texture_resolution_px: u32,
    target_density: f64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            texture_resolution_px: Self::DEFAULT_TEXTURE_RESOLUTION,
            target_density: Self::DEFAULT_TARGET_DENSITY,
        }
    }
}

impl DensityConfig {
    /// Default texture edge length in pixels.
    pub const DEFAULT_TEXTURE_RESOLUTION: u32 = 4096;

    /// Default target density in pixels per unit.
    pub const DEFAULT_TARGET_DENSITY: f64 = 20.48;

    /// Smallest accepted target density.
    pub const MIN_TARGET_DENSITY: f64 = 0.01;

    /// Create a validated configuration.
    pub fn new(texture_resolution_px: u32, target_density: f64) -> Result<Self> {
        Self::default()
            .with_texture_resolution(texture_resolution_px)?
            .with_target_density(target_density)
    }

    /// Set the texture resolution in pixels.
    pub fn with_texture_resolution(mut self, texture_resolution_px: u32) -> Result<Self> {
        if texture_resolution_px == 0 {
            return Err(TexelError::invalid_param(
                "texture_resolution_px",
                texture_resolution_px,
                "must be at least 1",
            ));
        }
        self.texture_resolution_px = texture_resolution_px;
        Ok(self)
    }

    /// Set the target density in pixels per unit.
    pub fn with_target_density(mut self, target_density: f64) -> Result<Self> {
        // Written so that NaN fails the check.
        if !(target_density >= Self::MIN_TARGET_DENSITY) || !target_density.is_finite() {
            return Err(TexelError::invalid_param(
                "target_density",
                target_density,
                "must be a finite value of at least 0.01",
            ));
        }
        self.target_density = target_density;
        Ok(self)
    }

    /// Texture resolution in pixels.
    pub fn texture_resolution_px(&self) -> u32 {
        self.texture_resolution_px
    }

    /// Target density in pixels per unit.
    pub fn target_density(&self) -> f64 {
        self.target_density
    }
}
