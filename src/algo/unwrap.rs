//! Automatic UV unwrapping.
//!
//! The unwrap heuristic itself (how a mesh is cut into UV islands) is not
//! implemented here. It is provided by the caller through the [`Unwrapper`]
//! trait, typically an adapter around a host application's unwrap operator.
//! This module owns the options and their validation, and
//! [`crate::algo::batch`] drives the unwrapper over many objects.

use crate::error::{Result, TexelError};

/// Parameters of the unwrap step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnwrapOptions {
    /// Maximum angle between adjacent faces kept in one island, in degrees.
    pub angle_limit_deg: f64,

    /// Spacing between islands, as a fraction of UV space (0.0 to 1.0).
    pub island_margin: f64,
}

impl Default for UnwrapOptions {
    fn default() -> Self {
        Self {
            angle_limit_deg: Self::DEFAULT_ANGLE_LIMIT_DEG,
            island_margin: 0.0,
        }
    }
}

impl UnwrapOptions {
    /// Default island angle limit.
    pub const DEFAULT_ANGLE_LIMIT_DEG: f64 = 66.0;

    /// Largest accepted angle limit.
    pub const MAX_ANGLE_LIMIT_DEG: f64 = 180.0;

    /// Set the angle limit, in degrees.
    pub fn with_angle_limit(mut self, degrees: f64) -> Self {
        self.angle_limit_deg = degrees;
        self
    }

    /// Set the island margin.
    pub fn with_island_margin(mut self, margin: f64) -> Self {
        self.island_margin = margin;
        self
    }

    /// Check that both parameters are within range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=Self::MAX_ANGLE_LIMIT_DEG).contains(&self.angle_limit_deg) {
            return Err(TexelError::invalid_param(
                "angle_limit_deg",
                self.angle_limit_deg,
                "must be between 0 and 180 degrees",
            ));
        }
        if !(0.0..=1.0).contains(&self.island_margin) {
            return Err(TexelError::invalid_param(
                "island_margin",
                self.island_margin,
                "must be between 0 and 1",
            ));
        }
        Ok(())
    }

    /// The angle limit in radians, as unwrappers expect it.
    pub fn angle_limit_radians(&self) -> f64 {
        self.angle_limit_deg.to_radians()
    }
}

/// An external operation that replaces a mesh's UV layout.
///
/// Implementations partition all faces of `mesh` into UV islands and write
/// new loop UVs. Failures are reported as a message and wrapped by the
/// caller into [`TexelError::UnwrapFailed`].
pub trait Unwrapper<M> {
    /// Unwrap every face of `mesh`.
    fn unwrap(
        &mut self,
        mesh: &mut M,
        angle_limit_rad: f64,
        island_margin: f64,
    ) -> std::result::Result<(), String>;
}

impl<M, F> Unwrapper<M> for F
where
    F: FnMut(&mut M, f64, f64) -> std::result::Result<(), String>,
{
    fn unwrap(
        &mut self,
        mesh: &mut M,
        angle_limit_rad: f64,
        island_margin: f64,
    ) -> std::result::Result<(), String> {
        self(mesh, angle_limit_rad, island_margin)
    }
}
