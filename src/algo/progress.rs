//! Progress reporting for batch operations.
//!
//! Batch operations call a [`Progress`] once per processed object, so a
//! front end can show how far a selection of objects has got.
//!
//! # Example
//!
//! ```
//! use texelkit::algo::Progress;
//!
//! let progress = Progress::new(|current, total, name| {
//!     println!("[{}/{}] {}", current, total, name);
//! });
//! progress.report(1, 3, "Cube");
//! ```

/// A progress callback.
///
/// The callback receives:
/// - `current`: Number of objects finished so far
/// - `total`: Number of objects in the batch
/// - `message`: Name of the object just processed
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
