//! Texel density algorithms.
//!
//! - **Texel**: area measurement, density estimation, UV normalization
//! - **Unwrap**: options and the trait for an external UV unwrapper
//! - **Batch**: the above applied to a selection of mesh objects

pub mod batch;
pub mod progress;
pub mod texel;
pub mod unwrap;

pub use progress::Progress;
