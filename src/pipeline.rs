//! Gesture preprocessing: flatten, resample, normalize.
//!
//! Templates and candidates go through the same [`Preprocessor`], which is
//! what makes their points comparable index by index.

use std::fmt;
use std::str::FromStr;

use crate::config::RecognizerConfig;
use crate::errors::{Error, GeometryError};
use crate::normalize::{Normalizer, rotate_to_zero, scale_to_square, translate_to_origin};
use crate::resample::Resampler;
use crate::types::{Gesture, Path};

/// A prefix of the preprocessing chain. Each stage includes the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Flattened gesture, untouched
    Flatten,
    Resample,
    Rotate,
    Scale,
    Translate,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Flatten,
        Stage::Resample,
        Stage::Rotate,
        Stage::Scale,
        Stage::Translate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Flatten => "flatten",
            Stage::Resample => "resample",
            Stage::Rotate => "rotate",
            Stage::Scale => "scale",
            Stage::Translate => "translate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flatten" => Ok(Stage::Flatten),
            "resample" => Ok(Stage::Resample),
            "rotate" => Ok(Stage::Rotate),
            "scale" => Ok(Stage::Scale),
            "translate" | "normalize" => Ok(Stage::Translate),
            other => Err(format!("unknown stage `{other}`")),
        }
    }
}

/// Resampler and normalizer bound to one configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Preprocessor {
    resampler: Resampler,
    normalizer: Normalizer,
}

impl Preprocessor {
    pub fn new(resampler: Resampler, normalizer: Normalizer) -> Self {
        Self {
            resampler,
            normalizer,
        }
    }

    pub fn from_config(config: &RecognizerConfig) -> Result<Self, Error> {
        Ok(Self {
            resampler: Resampler::new(config.resample_count)?,
            normalizer: Normalizer::from_config(config)?,
        })
    }

    pub fn resampler(&self) -> &Resampler {
        &self.resampler
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Flatten, resample and normalize a finished gesture.
    pub fn prepare(&self, gesture: &Gesture) -> Result<Path, GeometryError> {
        self.run_until(gesture, Stage::Translate)
    }

    /// Resample and normalize an already flattened path.
    pub fn prepare_path(&self, path: &Path) -> Result<Path, GeometryError> {
        self.normalizer.normalize(&self.resampler.resample(path)?)
    }

    /// Run the chain up to and including `stage`.
    pub fn run_until(&self, gesture: &Gesture, stage: Stage) -> Result<Path, GeometryError> {
        let mut path = gesture.flatten()?;
        for step in Stage::ALL.into_iter().skip(1).take_while(|s| *s <= stage) {
            path = match step {
                Stage::Flatten => path,
                Stage::Resample => self.resampler.resample(&path)?,
                Stage::Rotate => rotate_to_zero(&path)?,
                Stage::Scale => scale_to_square(&path, self.normalizer.square_size())?,
                Stage::Translate => translate_to_origin(&path)?,
            };
        }
        Ok(path)
    }
}
