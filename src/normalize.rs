//! Rotation, scale and position normalization.
//!
//! The three transforms run in a fixed order: [`rotate_to_zero`], then
//! [`scale_to_square`], then [`translate_to_origin`]. Running the chain on
//! its own output gives the same path back. Each transform fails with
//! [`GeometryError::Overflow`] when a coordinate leaves the finite range.

use crate::config::{DEFAULT_SQUARE_SIZE, RecognizerConfig, validate_square_size};
use crate::errors::{ConfigError, GeometryError};
use crate::geometry::{indicative_angle, rotate_by};
use crate::log::warn;
use crate::types::{Path, Point};

/// Bounding-box extents at or below this are treated as a flat axis.
pub const DEGENERATE_EXTENT: f64 = 1e-9;

/// Rotate the path about its centroid so its indicative angle becomes zero.
pub fn rotate_to_zero(path: &Path) -> Result<Path, GeometryError> {
    rotate_by(path, -indicative_angle(path))
}

/// Scale each axis independently so the bounding box becomes `size` by `size`.
///
/// This is a non-uniform scale. An axis with no extent (a perfectly
/// horizontal or vertical stroke) keeps a scale factor of 1.
pub fn scale_to_square(path: &Path, size: f64) -> Result<Path, GeometryError> {
    let bbox = path.bounding_box();
    let sx = axis_factor(bbox.width(), size);
    let sy = axis_factor(bbox.height(), size);
    if bbox.width() <= DEGENERATE_EXTENT || bbox.height() <= DEGENERATE_EXTENT {
        warn!(
            width = bbox.width(),
            height = bbox.height(),
            "degenerate bounding box axis left unscaled"
        );
    }
    path.map(|p| Point::new(p.x * sx, p.y * sy))
}

fn axis_factor(extent: f64, size: f64) -> f64 {
    if extent > DEGENERATE_EXTENT {
        size / extent
    } else {
        1.0
    }
}

/// Shift the path so its centroid sits at the origin.
pub fn translate_to_origin(path: &Path) -> Result<Path, GeometryError> {
    let c = path.centroid();
    path.map(|p| p - c)
}

/// Applies the three transforms for a fixed reference square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    square_size: f64,
}

impl Normalizer {
    pub fn new(square_size: f64) -> Result<Self, ConfigError> {
        validate_square_size(square_size)?;
        Ok(Self { square_size })
    }

    pub fn from_config(config: &RecognizerConfig) -> Result<Self, ConfigError> {
        Self::new(config.square_size)
    }

    #[inline]
    pub fn square_size(&self) -> f64 {
        self.square_size
    }

    /// Rotate, scale and translate.
    pub fn normalize(&self, path: &Path) -> Result<Path, GeometryError> {
        let rotated = rotate_to_zero(path)?;
        let scaled = scale_to_square(&rotated, self.square_size)?;
        translate_to_origin(&scaled)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            square_size: DEFAULT_SQUARE_SIZE,
        }
    }
}
