//! Geometry functions: arc length, centroid, bounds, rotation and the
//! positional distance between two paths

use glam::DVec2;

use crate::errors::GeometryError;
use crate::types::{BBox, Path, Point};

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Sum of the distances between consecutive points
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Average of all points; an empty slice has no centroid
pub fn centroid(points: &[Point]) -> Result<Point, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPath);
    }
    let sum: DVec2 = points.iter().map(|p| p.vec()).sum();
    Ok((sum / points.len() as f64).into())
}

/// Axis-aligned bounds of all points
pub fn bounding_box(points: &[Point]) -> Result<BBox, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPath);
    }
    Ok(points.iter().copied().collect())
}

impl Path {
    /// Average of all points
    pub fn centroid(&self) -> Point {
        let sum: DVec2 = self.iter().map(|p| p.vec()).sum();
        (sum / self.len() as f64).into()
    }

    pub fn bounding_box(&self) -> BBox {
        self.iter().copied().collect()
    }

    /// Arc length of the path
    pub fn length(&self) -> f64 {
        path_length(self.points())
    }
}

/// Angle (radians) of the vector from the first point to the centroid.
///
/// Rotating the path by the negation of this angle puts the first point
/// straight left of the centroid.
pub fn indicative_angle(path: &Path) -> f64 {
    let c = path.centroid();
    let first = path.first();
    (c.y - first.y).atan2(c.x - first.x)
}

/// Rotate every point by `radians` (counter-clockwise) about the centroid
pub fn rotate_by(path: &Path, radians: f64) -> Result<Path, GeometryError> {
    Path::from_computed(rotated(path, radians).into_points())
}

/// [`rotate_by`] for paths already known to be normalized.
pub(crate) fn rotated(path: &Path, radians: f64) -> Path {
    let c = path.centroid().vec();
    let rot = DVec2::from_angle(radians);
    path.map_unchecked(|p| (c + rot.rotate(p.vec() - c)).into())
}

/// Mean distance between points paired by index.
///
/// Both paths must hold the same number of points.
pub fn path_distance(a: &Path, b: &Path) -> Result<f64, GeometryError> {
    if a.len() != b.len() {
        return Err(GeometryError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(paired_distance(a.points(), b.points()))
}

/// Mean index-paired distance; callers guarantee equal lengths.
#[inline]
pub(crate) fn paired_distance(a: &[Point], b: &[Point]) -> f64 {
    let total: f64 = a.iter().zip(b).map(|(p, q)| p.distance(*q)).sum();
    total / a.len() as f64
}
