//! Error types with diagnostic codes using miette
//!
//! Geometry errors reject bad input or a transform that overflowed, template load errors
//! leave the store untouched, and configuration errors are caught when a
//! component is built.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::resample::{MAX_RESAMPLE_COUNT, MIN_RESAMPLE_COUNT};

/// Convenience alias for results carrying [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

// ============================================================================
// Geometry Errors
// ============================================================================

/// Invalid input handed to the resampler, normalizer or matcher
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("path has no points")]
    #[diagnostic(
        code(onedollar::geometry::empty_path),
        help("a gesture needs at least one stroke with at least one point")
    )]
    EmptyPath,

    #[error(
        "resample count {count} is outside the supported range {min}..={max}",
        min = MIN_RESAMPLE_COUNT,
        max = MAX_RESAMPLE_COUNT
    )]
    #[diagnostic(code(onedollar::geometry::resample_count))]
    ResampleCountOutOfRange { count: usize },

    #[error("point {index} has a non-finite coordinate")]
    #[diagnostic(code(onedollar::geometry::non_finite))]
    NonFiniteCoordinate { index: usize },

    #[error("point {index} overflowed while transforming the path")]
    #[diagnostic(
        code(onedollar::geometry::overflow),
        help("coordinates are too large to resample or normalize; scale the input down")
    )]
    Overflow { index: usize },

    #[error("paths have different lengths: {left} vs {right}")]
    #[diagnostic(
        code(onedollar::geometry::length_mismatch),
        help("candidate and templates must be resampled to the same point count")
    )]
    LengthMismatch { left: usize, right: usize },
}

// ============================================================================
// Template Load Errors
// ============================================================================

/// A template document that does not have the `(label, points)` shape
#[derive(Error, Diagnostic, Debug)]
pub enum TemplateLoadError {
    #[error("malformed template document")]
    #[diagnostic(code(onedollar::template::malformed))]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported template document version {found}")]
    #[diagnostic(
        code(onedollar::template::version),
        help("this build reads version {expected}")
    )]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("template {index} ({label:?}) has no points")]
    #[diagnostic(code(onedollar::template::empty_points))]
    EmptyPoints { index: usize, label: String },

    #[error("template {index} ({label:?}) has {found} points, expected {expected}")]
    #[diagnostic(
        code(onedollar::template::point_count),
        help("templates must be saved with the same resample count as the recognizer")
    )]
    WrongPointCount {
        index: usize,
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("template {index} ({label:?}) has a non-finite coordinate at point {point}")]
    #[diagnostic(code(onedollar::template::non_finite))]
    NonFiniteCoordinate {
        index: usize,
        label: String,
        point: usize,
    },
}

// ============================================================================
// Config Errors
// ============================================================================

/// Out-of-range recognizer configuration
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error(
        "resample count {0} is outside the supported range {min}..={max}",
        min = MIN_RESAMPLE_COUNT,
        max = MAX_RESAMPLE_COUNT
    )]
    #[diagnostic(code(onedollar::config::resample_count))]
    ResampleCount(usize),

    #[error("square size must be finite and positive, got {0}")]
    #[diagnostic(code(onedollar::config::square_size))]
    SquareSize(f64),

    #[error("angle range must be finite and within (0, 180] degrees, got {0}")]
    #[diagnostic(code(onedollar::config::angle_range))]
    AngleRange(f64),

    #[error("angle threshold must be finite, positive and below twice the range, got {0}")]
    #[diagnostic(code(onedollar::config::angle_threshold))]
    AngleThreshold(f64),

    #[error("invalid configuration file")]
    #[diagnostic(code(onedollar::config::parse))]
    Parse {
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot render configuration")]
    #[diagnostic(code(onedollar::config::render))]
    Render {
        #[source]
        source: toml::ser::Error,
    },
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Every failure the crate can surface
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    TemplateLoad(#[from] TemplateLoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid gesture document")]
    #[diagnostic(code(onedollar::gesture::malformed))]
    GestureDocument {
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize document")]
    #[diagnostic(code(onedollar::serialize))]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}", .path.display())]
    #[diagnostic(code(onedollar::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
