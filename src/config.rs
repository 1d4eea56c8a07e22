//! Recognizer configuration
//!
//! Every component takes its parameters explicitly, either one by one or
//! through a validated [`RecognizerConfig`]. Configuration files are TOML;
//! missing keys fall back to the defaults below.

use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, Error};
use crate::resample::{DEFAULT_RESAMPLE_COUNT, MAX_RESAMPLE_COUNT, MIN_RESAMPLE_COUNT};
use crate::types::Angle;

/// Reference square side that normalized paths are scaled to.
pub const DEFAULT_SQUARE_SIZE: f64 = 50.0;
/// Half-width of the rotation search bracket.
pub const DEFAULT_ANGLE_RANGE: Angle = Angle::degrees(45.0);
/// Bracket width at which the rotation search stops.
pub const DEFAULT_ANGLE_THRESHOLD: Angle = Angle::degrees(2.0);

/// Parameters shared by the resampler, normalizer and matcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecognizerConfig {
    /// Number of points every path is resampled to, in `32..=256`
    pub resample_count: usize,
    /// Side of the reference square
    pub square_size: f64,
    /// The matcher searches rotations in `[-angle_range, +angle_range]`
    pub angle_range: Angle,
    /// Convergence width of the rotation search
    pub angle_threshold: Angle,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            resample_count: DEFAULT_RESAMPLE_COUNT,
            square_size: DEFAULT_SQUARE_SIZE,
            angle_range: DEFAULT_ANGLE_RANGE,
            angle_threshold: DEFAULT_ANGLE_THRESHOLD,
        }
    }
}

impl RecognizerConfig {
    /// Check every field, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_RESAMPLE_COUNT..=MAX_RESAMPLE_COUNT).contains(&self.resample_count) {
            return Err(ConfigError::ResampleCount(self.resample_count));
        }
        validate_square_size(self.square_size)?;
        validate_angles(self.angle_range, self.angle_threshold)
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|source| ConfigError::Render { source })
    }
}

pub(crate) fn validate_square_size(size: f64) -> Result<(), ConfigError> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::SquareSize(size))
    }
}

pub(crate) fn validate_angles(range: Angle, threshold: Angle) -> Result<(), ConfigError> {
    let (range, threshold) = (range.raw(), threshold.raw());
    if !(range.is_finite() && range > 0.0 && range <= 180.0) {
        return Err(ConfigError::AngleRange(range));
    }
    if !(threshold.is_finite() && threshold > 0.0 && threshold < 2.0 * range) {
        return Err(ConfigError::AngleThreshold(threshold));
    }
    Ok(())
}
