//! Named mesh objects.

use super::poly::PolyMesh;

/// A named mesh together with its cached texel density.
///
/// The density is the only value this crate persists on an object. It is set
/// by the batch operations in [`crate::algo::batch`] and cleared whenever the
/// UV layout is replaced.
#[derive(Debug, Clone)]
pub struct MeshObject<M = PolyMesh> {
    /// Object name, e.g. the `o` statement of an OBJ file.
    pub name: String,

    /// The mesh data.
    pub mesh: M,

    texel_density: Option<f64>,
}

impl<M> MeshObject<M> {
    /// Create an object with no cached density.
    pub fn new(name: impl Into<String>, mesh: M) -> Self {
        Self {
            name: name.into(),
            mesh,
            texel_density: None,
        }
    }

    /// The last computed texel density, in pixels per unit.
    pub fn texel_density(&self) -> Option<f64> {
        self.texel_density
    }

    /// Cache a computed texel density.
    pub fn set_texel_density(&mut self, density: f64) {
        self.texel_density = Some(density);
    }

    /// Forget the cached texel density.
    pub fn clear_texel_density(&mut self) {
        self.texel_density = None;
    }
}
