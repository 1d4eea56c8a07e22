//! A pure Rust implementation of the $1 unistroke gesture recognizer.
//!
//! A [`Gesture`] is flattened into one [`Path`], resampled to a fixed number
//! of points, rotated so its indicative angle is zero, scaled to a reference
//! square and centered on the origin. The result is compared against stored
//! templates with a golden-section search over rotation.
//!
//! ```
//! use onedollar::{Gesture, Recognition, RecognitionService};
//!
//! let service = RecognitionService::with_defaults();
//! service
//!     .add_template("caret", &Gesture::from_points([(0.0, 40.0), (20.0, 0.0), (40.0, 40.0)]))
//!     .unwrap();
//!
//! let drawn = Gesture::from_points([(3.0, 44.0), (22.0, 2.0), (39.0, 41.0)]);
//! match service.recognize(&drawn).unwrap() {
//!     Recognition::Recognized { label, .. } => assert_eq!(label, "caret"),
//!     Recognition::Unrecognized => unreachable!(),
//! }
//! ```

pub mod config;
pub mod errors;
pub mod geometry;
mod log;
pub mod matcher;
pub mod normalize;
pub mod persist;
pub mod pipeline;
pub mod resample;
pub mod service;
pub mod template;
pub mod types;

pub use config::RecognizerConfig;
pub use errors::{ConfigError, Error, GeometryError, Result, TemplateLoadError};
pub use matcher::{Match, Matcher, Recognition};
pub use normalize::Normalizer;
pub use persist::{TemplateDocument, TemplateRecord, load_gesture, save_gesture};
pub use pipeline::{Preprocessor, Stage};
pub use resample::Resampler;
pub use service::RecognitionService;
pub use template::{Template, TemplateStore};
pub use types::{Angle, BBox, Gesture, Path, Point, Stroke};
