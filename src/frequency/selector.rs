use super::table::{FrequencyEntry, FrequencyTable};
use crate::error::SelectionError;
use log::{debug, trace};
use rand::Rng;

/// Default cap on the number of candidates considered per selection
pub const MAX_CANDIDATES: usize = 500;

/// Map a learner level to the ceiling frequency `1 / ln(level)^10`.
///
/// Higher levels give a sharply smaller ceiling, i.e. rarer characters.
pub fn target_frequency(level: f64) -> Result<f64, SelectionError> {
    if !level.is_finite() || level <= 1.0 {
        return Err(SelectionError::InvalidLevel(level));
    }

    let target = 1.0 / level.ln().powi(10);
    if !target.is_finite() {
        return Err(SelectionError::InvalidLevel(level));
    }

    Ok(target)
}

/// Linear interpolation from `lowest` toward `target` by `unit`.
///
/// Not clamped: bounds are used as given even if `target < lowest`.
pub fn make_indicator(target: f64, lowest: f64, unit: f64) -> f64 {
    unit * (target - lowest) + lowest
}

/// Intermediate values of one selection
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub level: f64,
    pub target_frequency: f64,
    /// Candidates before truncation
    pub full_candidates: usize,
    /// Candidates actually searched
    pub used_candidates: usize,
    pub lowest_frequency: u64,
    pub indicator: f64,
    pub entry: &'a FrequencyEntry,
}

impl<'a> Selection<'a> {
    pub fn character(&self) -> &'a str {
        &self.entry.character
    }
}

/// Picks a character whose frequency suits a learner level
#[derive(Debug, Clone)]
pub struct CharacterSelector {
    table: FrequencyTable,
    candidate_limit: usize,
}

impl CharacterSelector {
    pub fn new(table: FrequencyTable) -> Self {
        Self {
            table,
            candidate_limit: MAX_CANDIDATES,
        }
    }

    /// Override the candidate cap. Zero is raised to one.
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = limit.max(1);
        self
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn candidate_limit(&self) -> usize {
        self.candidate_limit
    }

    /// Select a character for `level` using the thread-local RNG
    pub fn select_character(&self, level: f64) -> Result<&str, SelectionError> {
        self.select_character_with(level, &mut rand::thread_rng())
    }

    pub fn select_character_with<R: Rng + ?Sized>(
        &self,
        level: f64,
        rng: &mut R,
    ) -> Result<&str, SelectionError> {
        Ok(self.explain(level, rng)?.character())
    }

    /// Run a selection and report every intermediate value
    pub fn explain<R: Rng + ?Sized>(
        &self,
        level: f64,
        rng: &mut R,
    ) -> Result<Selection<'_>, SelectionError> {
        self.explain_with_unit(level, rng.gen::<f64>())
    }

    /// Run a selection with a fixed draw `unit` in `[0, 1)`
    pub fn explain_with_unit(&self, level: f64, unit: f64) -> Result<Selection<'_>, SelectionError> {
        let target = target_frequency(level)?;
        debug!("level {level}: target frequency {target}");

        let full = self.table.candidates(target);
        let full_candidates = full.len();
        let candidates = full.truncate_to(self.candidate_limit);
        trace!(
            "candidate set ({} of {full_candidates}): {:?}",
            candidates.len(),
            candidates.entries()
        );

        let Some(lowest) = candidates.lowest_frequency() else {
            return Err(SelectionError::EmptyCandidateSet { target });
        };

        let indicator = make_indicator(target, lowest as f64, unit);
        debug!("indicator {indicator} (lowest frequency {lowest})");

        let entry = candidates
            .nearest(indicator)
            .ok_or(SelectionError::EmptyCandidateSet { target })?;

        Ok(Selection {
            level,
            target_frequency: target,
            full_candidates,
            used_candidates: candidates.len(),
            lowest_frequency: lowest,
            indicator,
            entry,
        })
    }
}
