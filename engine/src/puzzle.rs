//! Puzzle generation (spec.md §4.6): composes the quote source, cipher
//! builder, hint selector, and difficulty scorer into a single
//! deterministic `Puzzle` for a calendar date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cipher::{self, CipherMapping};
use crate::difficulty;
use crate::error::EngineError;
use crate::game_id;
use crate::hints::{self, Hint};
use crate::quote::{Quote, QuoteSource};
use crate::rng::SeededRng;

pub const DEFAULT_HINT_COUNT: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: String,
    pub date: NaiveDate,
    pub ciphertext: String,
    pub author: String,
    pub category: String,
    pub difficulty: u8,
    pub hints: Vec<Hint>,
}

/// A generated puzzle together with the data needed to check a
/// submission against it. Kept separate from `Puzzle` (the wire shape)
/// so the plaintext — the answer — never accidentally round-trips
/// through a payload that serializes `Puzzle`.
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub puzzle: Puzzle,
    pub plaintext: String,
    pub mapping: CipherMapping,
}

/// Generates the puzzle for calendar date `date`, given a quote source
/// and a keyword list. Deterministic: identical inputs always produce a
/// byte-identical `Puzzle`.
pub fn generate(
    date: NaiveDate,
    quotes: &dyn QuoteSource,
    keywords: &[String],
    hint_count: usize,
) -> Result<GeneratedPuzzle, EngineError> {
    let date_seed = date.format("%Y-%m-%d").to_string();
    let keyword_seed = format!("{date_seed}:keyword");

    let quote: Quote = quotes.random(Some(&date_seed))?;

    let keyword = {
        let mut rng = SeededRng::new(&keyword_seed);
        rng.select(keywords)
            .cloned()
            .unwrap_or_else(|| "PUZZLE".to_owned())
    };

    let mapping = cipher::build_mapping(&keyword, hash_for_mapping(&date_seed));
    let ciphertext = mapping.apply(&quote.text);
    let hints = hints::select_hints(&mapping, &ciphertext, hint_count);
    let difficulty = difficulty::score(&quote, &mapping);
    let id = game_id::encode(date);

    Ok(GeneratedPuzzle {
        puzzle: Puzzle {
            id,
            date,
            ciphertext,
            author: quote.author,
            category: quote.category,
            difficulty,
            hints,
        },
        plaintext: quote.text,
        mapping,
    })
}

/// Derives the integer seed the cipher builder's rotation uses from the
/// same date seed string, via the same stable hash `SeededRng` uses, so
/// the mapping is purely a function of the date.
fn hash_for_mapping(date_seed: &str) -> i64 {
    crate::rng::stable_hash(date_seed) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::QuoteCorpus;

    fn corpus() -> QuoteCorpus {
        QuoteCorpus::from_json(
            r#"[{"id":"q1","text":"HELLO","author":"A","category":"c","difficulty":10}]"#,
        )
        .unwrap()
    }

    fn keywords() -> Vec<String> {
        vec!["KEY".to_owned(), "KEYWORD".to_owned()]
    }

    #[test]
    fn two_runs_on_the_same_date_are_byte_identical() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let a = generate(date, &corpus(), &keywords(), DEFAULT_HINT_COUNT).unwrap();
        let b = generate(date, &corpus(), &keywords(), DEFAULT_HINT_COUNT).unwrap();
        assert_eq!(a.puzzle.id, b.puzzle.id);
        assert_eq!(a.puzzle.ciphertext, b.puzzle.ciphertext);
        assert_eq!(a.puzzle.hints, b.puzzle.hints);
    }

    #[test]
    fn different_dates_yield_different_ciphertexts_or_quotes() {
        let d1 = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        let a = generate(d1, &corpus(), &keywords(), DEFAULT_HINT_COUNT).unwrap();
        let b = generate(d2, &corpus(), &keywords(), DEFAULT_HINT_COUNT).unwrap();
        assert_ne!(a.puzzle.id, b.puzzle.id);
    }

    #[test]
    fn id_round_trips_through_the_game_id_codec() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let generated = generate(date, &corpus(), &keywords(), DEFAULT_HINT_COUNT).unwrap();
        assert_eq!(game_id::decode(&generated.puzzle.id), Some(date));
    }
}
