//! Rotation-invariant nearest-template search.
//!
//! Each template is scored by the smallest mean point distance the candidate
//! reaches while rotated within `[-angle_range, +angle_range]`. The rotation
//! is found with a golden-section search, which assumes the distance is
//! unimodal over that bracket; a better alignment hidden behind a second
//! local minimum is missed.
//!
//! Across templates the lowest score wins. On equal scores the template that
//! comes first in the store wins, in the sequential and parallel paths alike.

use std::cmp::Ordering;
use std::fmt;

use crate::config::{RecognizerConfig, validate_angles};
use crate::errors::{ConfigError, GeometryError};
use crate::geometry::{paired_distance, rotated};
use crate::log::debug;
use crate::template::Template;
use crate::types::{Angle, Path};

/// Golden ratio conjugate, `(√5 - 1) / 2`
pub const PHI: f64 = 0.618_033_988_749_894_9;

/// Upper bound on search iterations, reached only for thresholds too small
/// for the bracket to ever shrink below.
const MAX_SEARCH_ITERATIONS: usize = 256;

/// Result of a [`golden_section_search`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Argument of the returned score
    pub angle: f64,
    /// Smaller of the two interior evaluations at termination
    pub score: f64,
    /// Number of bracket reductions performed
    pub iterations: usize,
    /// Bracket width at termination
    pub width: f64,
}

/// Minimize `f` over `[lo, hi]` by golden-section search.
///
/// The bracket shrinks by [`PHI`] per iteration until it is narrower than
/// `threshold`. When both interior points evaluate equal, the left part of
/// the bracket is dropped.
pub fn golden_section_search<F>(mut f: F, lo: f64, hi: f64, threshold: f64) -> SearchOutcome
where
    F: FnMut(f64) -> f64,
{
    let (mut lo, mut hi) = (lo, hi);
    let mut x1 = hi - PHI * (hi - lo);
    let mut f1 = f(x1);
    let mut x2 = lo + PHI * (hi - lo);
    let mut f2 = f(x2);
    let mut iterations = 0;

    while (hi - lo).abs() >= threshold && iterations < MAX_SEARCH_ITERATIONS {
        if f1 < f2 {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - PHI * (hi - lo);
            f1 = f(x1);
        } else {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + PHI * (hi - lo);
            f2 = f(x2);
        }
        iterations += 1;
    }

    let (angle, score) = if f1 <= f2 { (x1, f1) } else { (x2, f2) };
    SearchOutcome {
        angle,
        score,
        iterations,
        width: (hi - lo).abs(),
    }
}

// ============================================================================
// Results
// ============================================================================

/// Outcome of matching one candidate against a template set
#[derive(Debug, Clone, PartialEq)]
pub enum Recognition {
    /// Best template and its score; lower scores are closer matches
    Recognized { label: String, score: f64 },
    /// The template set was empty
    Unrecognized,
}

impl Recognition {
    pub fn label(&self) -> Option<&str> {
        match self {
            Recognition::Recognized { label, .. } => Some(label),
            Recognition::Unrecognized => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Recognition::Recognized { score, .. } => Some(*score),
            Recognition::Unrecognized => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Recognition::Recognized { .. })
    }
}

impl fmt::Display for Recognition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recognition::Recognized { label, score } => write!(f, "{label} (score {score:.3})"),
            Recognition::Unrecognized => f.write_str("unrecognized"),
        }
    }
}

/// One scored template in a ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Position of the template in its store
    pub index: usize,
    pub label: String,
    pub score: f64,
}

impl Match {
    /// Score mapped to `[0, 1]`, higher is closer.
    ///
    /// `1 - score / (½·√2·square_size)`, where the divisor is half the
    /// diagonal of the reference square.
    pub fn similarity(&self, square_size: f64) -> f64 {
        let half_diagonal = 0.5 * (2.0 * square_size * square_size).sqrt();
        (1.0 - self.score / half_diagonal).clamp(0.0, 1.0)
    }

    fn order(&self, other: &Match) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.index.cmp(&other.index))
    }
}

impl From<Match> for Recognition {
    fn from(m: Match) -> Self {
        Recognition::Recognized {
            label: m.label,
            score: m.score,
        }
    }
}

// ============================================================================
// Matcher
// ============================================================================

/// Scores normalized candidates against templates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matcher {
    /// Half-width of the search bracket, radians
    angle_range: f64,
    /// Convergence width, radians
    angle_threshold: f64,
}

impl Default for Matcher {
    fn default() -> Self {
        let config = RecognizerConfig::default();
        Self {
            angle_range: config.angle_range.to_radians(),
            angle_threshold: config.angle_threshold.to_radians(),
        }
    }
}

impl Matcher {
    pub fn new(angle_range: Angle, angle_threshold: Angle) -> Result<Self, ConfigError> {
        validate_angles(angle_range, angle_threshold)?;
        Ok(Self {
            angle_range: angle_range.to_radians(),
            angle_threshold: angle_threshold.to_radians(),
        })
    }

    pub fn from_config(config: &RecognizerConfig) -> Result<Self, ConfigError> {
        Self::new(config.angle_range, config.angle_threshold)
    }

    pub fn angle_range(&self) -> Angle {
        Angle::from_radians(self.angle_range)
    }

    pub fn angle_threshold(&self) -> Angle {
        Angle::from_radians(self.angle_threshold)
    }

    /// Full rotation search of `candidate` against one template path.
    pub fn search(
        &self,
        candidate: &Path,
        template: &Path,
    ) -> Result<SearchOutcome, GeometryError> {
        check_lengths(candidate, template)?;
        Ok(self.search_unchecked(candidate, template))
    }

    /// Smallest mean distance over the rotation bracket.
    pub fn best_distance(&self, candidate: &Path, template: &Path) -> Result<f64, GeometryError> {
        Ok(self.search(candidate, template)?.score)
    }

    fn search_unchecked(&self, candidate: &Path, template: &Path) -> SearchOutcome {
        golden_section_search(
            |theta| paired_distance(rotated(candidate, theta).points(), template.points()),
            -self.angle_range,
            self.angle_range,
            self.angle_threshold,
        )
    }

    fn score_all<'t>(
        &self,
        candidate: &Path,
        templates: &'t [Template],
    ) -> Result<impl Iterator<Item = (usize, &'t Template, f64)>, GeometryError> {
        for template in templates {
            check_lengths(candidate, template.path())?;
        }
        Ok(templates.iter().enumerate().map(move |(index, template)| {
            let outcome = self.search_unchecked(candidate, template.path());
            debug!(
                index,
                label = template.label(),
                score = outcome.score,
                angle = outcome.angle.to_degrees(),
                "scored template"
            );
            (index, template, outcome.score)
        }))
    }

    /// Label of the closest template.
    ///
    /// `candidate` must be resampled and normalized the same way as the
    /// templates. An empty template set yields [`Recognition::Unrecognized`].
    pub fn recognize(
        &self,
        candidate: &Path,
        templates: &[Template],
    ) -> Result<Recognition, GeometryError> {
        let mut best: Option<(&Template, f64)> = None;
        for (_, template, score) in self.score_all(candidate, templates)? {
            // strictly smaller only: earlier templates win ties
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((template, score));
            }
        }
        let recognition = match best {
            Some((template, score)) => Recognition::Recognized {
                label: template.label().to_string(),
                score,
            },
            None => Recognition::Unrecognized,
        };
        debug!(%recognition, templates = templates.len(), "recognized");
        Ok(recognition)
    }

    /// The `limit` closest templates, best first.
    ///
    /// Equal scores keep store order. The first entry always agrees with
    /// [`recognize`](Self::recognize).
    pub fn rank(
        &self,
        candidate: &Path,
        templates: &[Template],
        limit: usize,
    ) -> Result<Vec<Match>, GeometryError> {
        let mut matches: Vec<Match> = Vec::with_capacity(limit.min(templates.len()));
        if limit == 0 {
            return Ok(matches);
        }
        for (index, template, score) in self.score_all(candidate, templates)? {
            let m = Match {
                index,
                label: template.label().to_string(),
                score,
            };
            // Full and no better than the current worst: skip
            if matches.len() == limit
                && matches.last().is_some_and(|worst| m.order(worst).is_ge())
            {
                continue;
            }
            let at = matches
                .iter()
                .position(|existing| m.order(existing).is_lt())
                .unwrap_or(matches.len());
            matches.insert(at, m);
            matches.truncate(limit);
        }
        Ok(matches)
    }

    /// [`recognize`](Self::recognize) with templates scored on the rayon pool.
    ///
    /// Scores are reduced by `(score, index)`, so the answer is identical to
    /// the sequential one.
    #[cfg(feature = "parallel")]
    pub fn recognize_parallel(
        &self,
        candidate: &Path,
        templates: &[Template],
    ) -> Result<Recognition, GeometryError> {
        use rayon::prelude::*;

        for template in templates {
            check_lengths(candidate, template.path())?;
        }
        let best = templates
            .par_iter()
            .enumerate()
            .map(|(index, template)| Match {
                index,
                label: template.label().to_string(),
                score: self.search_unchecked(candidate, template.path()).score,
            })
            .min_by(|a, b| a.order(b));

        let recognition = best.map_or(Recognition::Unrecognized, Recognition::from);
        debug!(%recognition, templates = templates.len(), "recognized in parallel");
        Ok(recognition)
    }
}

fn check_lengths(candidate: &Path, template: &Path) -> Result<(), GeometryError> {
    if candidate.len() == template.len() {
        Ok(())
    } else {
        Err(GeometryError::LengthMismatch {
            left: candidate.len(),
            right: template.len(),
        })
    }
}
