//! Resampling a path to a fixed number of points evenly spaced by arc length.

use crate::errors::GeometryError;
use crate::log::trace;
use crate::types::{Path, Point};

pub const MIN_RESAMPLE_COUNT: usize = 32;
pub const MAX_RESAMPLE_COUNT: usize = 256;
pub const DEFAULT_RESAMPLE_COUNT: usize = 128;

/// Resamples paths to a validated point count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resampler {
    count: usize,
}

impl Resampler {
    pub fn new(count: usize) -> Result<Self, GeometryError> {
        check_count(count)?;
        Ok(Self { count })
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Redistribute `path` to exactly [`count`](Self::count) points.
    ///
    /// Fails with [`GeometryError::Overflow`] when the arc length of `path`
    /// does not fit in an `f64`.
    pub fn resample(&self, path: &Path) -> Result<Path, GeometryError> {
        Path::from_computed(resample_points(path.points(), self.count))
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self {
            count: DEFAULT_RESAMPLE_COUNT,
        }
    }
}

/// Redistribute `path` to exactly `n` points evenly spaced along its length.
///
/// `n` must lie in `32..=256`.
pub fn resample(path: &Path, n: usize) -> Result<Path, GeometryError> {
    Resampler::new(n)?.resample(path)
}

fn check_count(n: usize) -> Result<(), GeometryError> {
    if (MIN_RESAMPLE_COUNT..=MAX_RESAMPLE_COUNT).contains(&n) {
        Ok(())
    } else {
        Err(GeometryError::ResampleCountOutOfRange { count: n })
    }
}

/// Core resampling walk.
///
/// `points` is non-empty and `n >= 2`; the output always has `n` points, the
/// first and last equal to the input's first and last.
pub(crate) fn resample_points(points: &[Point], n: usize) -> Vec<Point> {
    debug_assert!(!points.is_empty() && n >= 2, "resample needs points and n >= 2");

    let first = points[0];
    let last = points[points.len() - 1];
    let total = crate::geometry::path_length(points);

    // All points coincide: nothing to walk along.
    if total <= 0.0 {
        return vec![first; n];
    }

    let interval = total / (n - 1) as f64;
    let mut out = Vec::with_capacity(n);
    out.push(first);

    let mut reference = first;
    let mut accumulated = 0.0;
    let mut i = 1;

    // The final point is pinned to the end of the input below, so only the
    // n - 2 interior points come from the walk.
    while i < points.len() && out.len() < n - 1 {
        let next = points[i];
        let d = reference.distance(next);
        if accumulated + d < interval {
            accumulated += d;
            reference = next;
            i += 1;
        } else {
            // accumulated < interval <= accumulated + d, so d > 0 here
            let q = reference.lerp(next, (interval - accumulated) / d);
            out.push(q);
            reference = q;
            accumulated = 0.0;
        }
    }

    while out.len() < n {
        out.push(last);
    }

    trace!(input = points.len(), output = n, interval, "resampled path");
    out
}
