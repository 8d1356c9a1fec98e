//! Batch operations over a selection of mesh objects.
//!
//! Each object is processed to completion before the next one starts, and no
//! state is carried between objects: one object failing or having degenerate
//! UVs never affects the others. Results are collected per object in a
//! [`BatchReport`].
//!
//! # Example
//!
//! ```
//! use texelkit::prelude::*;
//! use texelkit::algo::batch::normalize_objects;
//! use nalgebra::{Point2, Point3};
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let uvs = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
//! let mesh: PolyMesh = build_from_triangles(&positions, &[[0, 1, 2]], &uvs).unwrap();
//!
//! let mut objects = vec![MeshObject::new("Tri", mesh)];
//! let config = DensityConfig::new(1024, 5.0).unwrap();
//! let report = normalize_objects(&mut objects, &config);
//!
//! assert_eq!(report.failed().count(), 0);
//! assert!((objects[0].texel_density().unwrap() - 5.0).abs() < 1e-9);
//! ```

use log::{debug, info, warn};

use crate::error::{Result, TexelError};
use crate::mesh::{MeshObject, UvMesh};

use super::texel::{estimate_density, normalize_to_target, DensityConfig, NormalizeOutcome};
use super::unwrap::{UnwrapOptions, Unwrapper};
use super::Progress;

/// Result of a batch operation for one object.
#[derive(Debug)]
pub struct BatchEntry<T> {
    /// Name of the processed object.
    pub name: String,

    /// Outcome for this object.
    pub result: Result<T>,
}

/// Per-object results of a batch operation, in processing order.
#[derive(Debug)]
pub struct BatchReport<T> {
    /// One entry per object.
    pub entries: Vec<BatchEntry<T>>,
}

impl<T> BatchReport<T> {
    fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    /// Number of processed objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that completed successfully.
    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().ok().map(|v| (e.name.as_str(), v)))
    }

    /// Entries that failed, with their errors.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &TexelError)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().err().map(|err| (e.name.as_str(), err)))
    }
}

/// Compute and cache the texel density of every object.
pub fn calculate_densities<M: UvMesh>(
    objects: &mut [MeshObject<M>],
    config: &DensityConfig,
) -> BatchReport<f64> {
    calculate_densities_with_progress(objects, config, &Progress::none())
}

/// Compute and cache the texel density of every object, with progress reporting.
pub fn calculate_densities_with_progress<M: UvMesh>(
    objects: &mut [MeshObject<M>],
    config: &DensityConfig,
    progress: &Progress,
) -> BatchReport<f64> {
    let resolution = f64::from(config.texture_resolution_px());
    let total = objects.len();
    let mut report = BatchReport::with_capacity(total);

    for (i, obj) in objects.iter_mut().enumerate() {
        let result = estimate_density(&obj.mesh, resolution);
        match &result {
            Ok(density) => {
                debug!("{}: texel density {:.4} px/unit", obj.name, density);
                obj.set_texel_density(*density);
            }
            Err(e) => {
                warn!("{}: {}", obj.name, e);
                obj.clear_texel_density();
            }
        }

        report.entries.push(BatchEntry {
            name: obj.name.clone(),
            result,
        });
        progress.report(i + 1, total, &obj.name);
    }

    info!(
        "Calculated texel density for {} of {} objects",
        report.succeeded().count(),
        total
    );
    report
}

/// Rescale every object's UVs to the configured target density.
///
/// After a successful pass the re-measured density is cached on the object.
pub fn normalize_objects<M: UvMesh>(
    objects: &mut [MeshObject<M>],
    config: &DensityConfig,
) -> BatchReport<NormalizeOutcome> {
    normalize_objects_with_progress(objects, config, &Progress::none())
}

/// Rescale every object's UVs to the configured target density, with progress reporting.
pub fn normalize_objects_with_progress<M: UvMesh>(
    objects: &mut [MeshObject<M>],
    config: &DensityConfig,
    progress: &Progress,
) -> BatchReport<NormalizeOutcome> {
    let resolution = f64::from(config.texture_resolution_px());
    let target = config.target_density();
    let total = objects.len();
    let mut report = BatchReport::with_capacity(total);

    for (i, obj) in objects.iter_mut().enumerate() {
        let result = normalize_object(obj, target, resolution);

        match &result {
            Ok(NormalizeOutcome::Scaled {
                previous_density,
                scale_factor,
            }) => debug!(
                "{}: {:.4} -> {:.4} px/unit (scale factor {:.6})",
                obj.name, previous_density, target, scale_factor
            ),
            Ok(NormalizeOutcome::Unchanged { density }) => warn!(
                "{}: density unchanged ({:.4} px/unit, no usable UV area)",
                obj.name, density
            ),
            Err(e) => warn!("{}: {}", obj.name, e),
        }

        report.entries.push(BatchEntry {
            name: obj.name.clone(),
            result,
        });
        progress.report(i + 1, total, &obj.name);
    }

    let scaled = report.succeeded().filter(|(_, o)| o.is_scaled()).count();
    info!(
        "Normalized {} of {} objects to {:.4} px/unit",
        scaled, total, target
    );
    report
}

fn normalize_object<M: UvMesh>(
    obj: &mut MeshObject<M>,
    target: f64,
    resolution: f64,
) -> Result<NormalizeOutcome> {
    let outcome = normalize_to_target(&mut obj.mesh, target, resolution)?;
    let density = match outcome {
        NormalizeOutcome::Scaled { .. } => estimate_density(&obj.mesh, resolution)?,
        NormalizeOutcome::Unchanged { density } => density,
    };
    obj.set_texel_density(density);
    Ok(outcome)
}

/// Run an external unwrapper over every object.
///
/// The options are validated once up front, so an invalid angle or margin
/// fails the whole call before any mesh is touched. After that each object
/// is unwrapped independently; a successfully unwrapped object loses its
/// cached density because its UV layout was replaced.
pub fn unwrap_objects<M, U>(
    objects: &mut [MeshObject<M>],
    unwrapper: &mut U,
    options: &UnwrapOptions,
) -> Result<BatchReport<()>>
where
    U: Unwrapper<M>,
{
    unwrap_objects_with_progress(objects, unwrapper, options, &Progress::none())
}

/// Run an external unwrapper over every object, with progress reporting.
pub fn unwrap_objects_with_progress<M, U>(
    objects: &mut [MeshObject<M>],
    unwrapper: &mut U,
    options: &UnwrapOptions,
    progress: &Progress,
) -> Result<BatchReport<()>>
where
    U: Unwrapper<M>,
{
    options.validate()?;
    let angle = options.angle_limit_radians();
    let margin = options.island_margin;

    debug!(
        "Unwrapping with angle limit {:.1} deg ({:.4} rad), island margin {:.3}",
        options.angle_limit_deg, angle, margin
    );

    let total = objects.len();
    let mut report = BatchReport::with_capacity(total);

    for (i, obj) in objects.iter_mut().enumerate() {
        let result = unwrapper
            .unwrap(&mut obj.mesh, angle, margin)
            .map_err(|message| TexelError::UnwrapFailed {
                object: obj.name.clone(),
                message,
            });

        match &result {
            Ok(()) => obj.clear_texel_density(),
            Err(e) => warn!("{}", e),
        }

        report.entries.push(BatchEntry {
            name: obj.name.clone(),
            result,
        });
        progress.report(i + 1, total, &obj.name);
    }

    info!(
        "Unwrapped {} of {} objects",
        report.succeeded().count(),
        total
    );
    Ok(report)
}
