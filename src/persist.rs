//! JSON documents for gestures and template sets
//!
//! Gesture: `{"strokes": [[[x, y], ...], ...]}`
//!
//! Template set: `{"version": 1, "templates": [{"label": "...", "points": [[x, y], ...]}]}`
//!
//! Coordinates are written in shortest round-trip form and read back with
//! `serde_json`'s exact float parser (`float_roundtrip`), so a save/load cycle
//! reproduces them bit for bit.

use std::fs;
use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, TemplateLoadError};
use crate::template::Template;
use crate::types::{Gesture, Path, Point};

/// Template document version this build reads and writes
pub const TEMPLATE_DOCUMENT_VERSION: u32 = 1;

/// One stored template: its label and normalized points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub label: String,
    pub points: Vec<Point>,
}

/// Serialized template set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDocument {
    pub version: u32,
    pub templates: Vec<TemplateRecord>,
}

impl TemplateDocument {
    pub fn new(templates: Vec<TemplateRecord>) -> Self {
        Self {
            version: TEMPLATE_DOCUMENT_VERSION,
            templates,
        }
    }

    pub fn from_json(content: &str) -> Result<Self, TemplateLoadError> {
        serde_json::from_str(content).map_err(|source| TemplateLoadError::Malformed { source })
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|source| Error::Serialize { source })
    }

    /// Read a template document from disk. Shape checks happen on
    /// [`into_templates`](Self::into_templates).
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_json(&content)?)
    }

    pub fn save(&self, path: impl AsRef<FsPath>) -> Result<(), Error> {
        let path = path.as_ref();
        let content = self.to_json()?;
        fs::write(path, content).map_err(|e| Error::io(path, e))
    }

    /// Check every record and convert them all, or none.
    ///
    /// Each template needs exactly `expected_points` finite points.
    pub(crate) fn into_templates(
        self,
        expected_points: usize,
    ) -> Result<Vec<Template>, TemplateLoadError> {
        if self.version != TEMPLATE_DOCUMENT_VERSION {
            return Err(TemplateLoadError::UnsupportedVersion {
                found: self.version,
                expected: TEMPLATE_DOCUMENT_VERSION,
            });
        }
        self.templates
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_template(index, expected_points))
            .collect()
    }
}

impl TemplateRecord {
    fn into_template(
        self,
        index: usize,
        expected_points: usize,
    ) -> Result<Template, TemplateLoadError> {
        let TemplateRecord { label, points } = self;
        if points.is_empty() {
            return Err(TemplateLoadError::EmptyPoints { index, label });
        }
        if points.len() != expected_points {
            return Err(TemplateLoadError::WrongPointCount {
                index,
                label,
                expected: expected_points,
                found: points.len(),
            });
        }
        if let Some(point) = points.iter().position(|p| !p.is_finite()) {
            return Err(TemplateLoadError::NonFiniteCoordinate { index, label, point });
        }
        Ok(Template::new(label, Path::from_vec_unchecked(points)))
    }
}

impl Gesture {
    pub fn from_json(content: &str) -> Result<Self, Error> {
        serde_json::from_str(content).map_err(|source| Error::GestureDocument { source })
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|source| Error::Serialize { source })
    }
}

/// Read a gesture document
pub fn load_gesture(path: impl AsRef<FsPath>) -> Result<Gesture, Error> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Gesture::from_json(&content)
}

/// Write a gesture document
pub fn save_gesture(path: impl AsRef<FsPath>, gesture: &Gesture) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, gesture.to_json()?).map_err(|e| Error::io(path, e))
}
