//! The recognition entry point.
//!
//! [`RecognitionService`] owns one configuration and one template store.
//! Queries share the store through a read lock; adding, clearing and loading
//! templates take the write lock, so a store is never mutated under a
//! running query.

use std::path::Path as FsPath;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::RecognizerConfig;
use crate::errors::Result;
use crate::log::debug;
use crate::matcher::{Match, Matcher, Recognition};
use crate::persist::TemplateDocument;
use crate::pipeline::{Preprocessor, Stage};
use crate::template::{Template, TemplateStore};
use crate::types::{Gesture, Path};

/// Flatten, resample, normalize and match gestures against a template set
#[derive(Debug)]
pub struct RecognitionService {
    config: RecognizerConfig,
    preprocessor: Preprocessor,
    matcher: Matcher,
    store: RwLock<TemplateStore>,
}

impl Default for RecognitionService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RecognitionService {
    /// Build a service with an empty template set.
    pub fn new(config: RecognizerConfig) -> Result<Self> {
        config.validate()?;
        let preprocessor = Preprocessor::from_config(&config)?;
        Ok(Self {
            config,
            preprocessor,
            matcher: Matcher::from_config(&config)?,
            store: RwLock::new(TemplateStore::with_preprocessor(preprocessor)),
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: RecognizerConfig::default(),
            preprocessor: Preprocessor::default(),
            matcher: Matcher::default(),
            store: RwLock::new(TemplateStore::default()),
        }
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    // Store mutations are all-or-nothing, so a poisoned store is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, TemplateStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TemplateStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the preprocessing chain without matching.
    pub fn normalize(&self, gesture: &Gesture) -> Result<Path> {
        Ok(self.preprocessor.prepare(gesture)?)
    }

    /// Run the preprocessing chain up to and including `stage`.
    pub fn stage(&self, gesture: &Gesture, stage: Stage) -> Result<Path> {
        Ok(self.preprocessor.run_until(gesture, stage)?)
    }

    /// Closest template to `gesture`, or [`Recognition::Unrecognized`] when
    /// no templates are loaded.
    pub fn recognize(&self, gesture: &Gesture) -> Result<Recognition> {
        let candidate = self.preprocessor.prepare(gesture)?;
        let store = self.read();
        #[cfg(feature = "parallel")]
        let recognition = self.matcher.recognize_parallel(&candidate, store.all())?;
        #[cfg(not(feature = "parallel"))]
        let recognition = self.matcher.recognize(&candidate, store.all())?;
        Ok(recognition)
    }

    /// The `limit` closest templates, best first.
    pub fn rank(&self, gesture: &Gesture, limit: usize) -> Result<Vec<Match>> {
        let candidate = self.preprocessor.prepare(gesture)?;
        Ok(self.matcher.rank(&candidate, self.read().all(), limit)?)
    }

    /// Normalize `gesture` and store it under `label`.
    pub fn add_template(&self, label: impl Into<String>, gesture: &Gesture) -> Result<Template> {
        Ok(self.write().add(label, gesture)?.clone())
    }

    pub fn clear_templates(&self) {
        self.write().clear();
    }

    /// Snapshot of the templates in insertion order
    pub fn templates(&self) -> Vec<Template> {
        self.read().all().to_vec()
    }

    pub fn template_count(&self) -> usize {
        self.read().len()
    }

    /// Write every template to `path`, replacing the file.
    pub fn save_templates(&self, path: impl AsRef<FsPath>) -> Result<()> {
        let document = self.read().to_document();
        document.save(path.as_ref())?;
        debug!(
            path = %path.as_ref().display(),
            count = document.templates.len(),
            "templates saved"
        );
        Ok(())
    }

    /// Replace the template set with the contents of `path`.
    ///
    /// Returns the number of templates loaded. Nothing changes if the file
    /// cannot be read or any template in it is invalid.
    pub fn load_templates(&self, path: impl AsRef<FsPath>) -> Result<usize> {
        let document = TemplateDocument::load(path.as_ref())?;
        let mut store = self.write();
        store.replace_from_document(document)?;
        Ok(store.len())
    }

    /// Add a template and rewrite `path` with the whole set.
    ///
    /// The file is created when missing. If it cannot be written the
    /// template is not kept.
    pub fn append_template(
        &self,
        path: impl AsRef<FsPath>,
        label: impl Into<String>,
        gesture: &Gesture,
    ) -> Result<Template> {
        let mut store = self.write();
        let mut updated = store.clone();
        let template = updated.add(label, gesture)?.clone();
        updated.to_document().save(path.as_ref())?;
        *store = updated;
        debug!(path = %path.as_ref().display(), label = template.label(), "template appended");
        Ok(template)
    }
}
