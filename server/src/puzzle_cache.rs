//! A concurrent, generate-once cache of puzzles keyed by calendar date.
//!
//! Generalizes the teacher's `puzzle_config::ConfigProvider`: same
//! `dashmap`-backed "compute on miss, hand back a cached ref" shape, but
//! without a TTL — a puzzle for a given date is the same forever, so
//! once generated it is never recomputed (spec.md §4.6's determinism
//! invariant makes the cache pure memoization, not a staleness guard).

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;

use unquote_engine::error::EngineError;
use unquote_engine::puzzle::{self, GeneratedPuzzle};
use unquote_engine::QuoteSource;

#[derive(Clone)]
pub struct PuzzleCache {
    cache: Arc<DashMap<NaiveDate, GeneratedPuzzle>>,
}

impl PuzzleCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the puzzle for `date`, generating and caching it on first
    /// request. Concurrent first-requests for the same date may each
    /// generate once (generation is pure and cheap); `dashmap`'s
    /// entry API still guarantees a single final cached value.
    pub fn get_or_generate(
        &self,
        date: NaiveDate,
        quotes: &dyn QuoteSource,
        keywords: &[String],
    ) -> Result<GeneratedPuzzle, EngineError> {
        if let Some(cached) = self.cache.get(&date) {
            return Ok(cached.clone());
        }

        let generated = puzzle::generate(date, quotes, keywords, puzzle::DEFAULT_HINT_COUNT)?;
        self.cache.entry(date).or_insert_with(|| generated.clone());
        Ok(generated)
    }
}

impl Default for PuzzleCache {
    fn default() -> Self {
        Self::new()
    }
}
