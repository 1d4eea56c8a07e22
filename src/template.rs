//! Labeled reference paths and the store that owns them.

use crate::config::RecognizerConfig;
use crate::errors::{Error, GeometryError, TemplateLoadError};
use crate::log::debug;
use crate::persist::{TemplateDocument, TemplateRecord};
use crate::pipeline::Preprocessor;
use crate::types::{Gesture, Path};

/// A normalized, labeled path
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    label: String,
    path: Path,
}

impl Template {
    pub(crate) fn new(label: String, path: Path) -> Self {
        Self { label, path }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Templates in insertion order.
///
/// Every template was produced by the store's own [`Preprocessor`], so all
/// of them share one point count. Labels are not deduplicated.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    preprocessor: Preprocessor,
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn new(config: &RecognizerConfig) -> Result<Self, Error> {
        Ok(Self::with_preprocessor(Preprocessor::from_config(config)?))
    }

    pub fn with_preprocessor(preprocessor: Preprocessor) -> Self {
        Self {
            preprocessor,
            templates: Vec::new(),
        }
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Point count every stored template has
    pub fn resample_count(&self) -> usize {
        self.preprocessor.resampler().count()
    }

    /// Normalize `gesture` and append it under `label`.
    ///
    /// The stored path is an independent copy; later changes to `gesture`
    /// do not reach the store.
    pub fn add(
        &mut self,
        label: impl Into<String>,
        gesture: &Gesture,
    ) -> Result<&Template, GeometryError> {
        let path = self.preprocessor.prepare(gesture)?;
        let label = label.into();
        debug!(label = %label, count = self.templates.len() + 1, "template added");
        self.templates.push(Template::new(label, path));
        Ok(&self.templates[self.templates.len() - 1])
    }

    pub fn clear(&mut self) {
        debug!(dropped = self.templates.len(), "templates cleared");
        self.templates.clear();
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    /// Labels and points of every template, in insertion order
    pub fn to_document(&self) -> TemplateDocument {
        TemplateDocument::new(
            self.templates
                .iter()
                .map(|t| TemplateRecord {
                    label: t.label.clone(),
                    points: t.path.points().to_vec(),
                })
                .collect(),
        )
    }

    /// Replace every template with the contents of `document`.
    ///
    /// The whole document is checked first; on any violation the store is
    /// left exactly as it was.
    pub fn replace_from_document(
        &mut self,
        document: TemplateDocument,
    ) -> Result<(), TemplateLoadError> {
        let templates = document.into_templates(self.resample_count())?;
        debug!(count = templates.len(), "templates replaced");
        self.templates = templates;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TemplateStore {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}
