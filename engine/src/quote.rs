use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::rng::SeededRng;

/// A single quote in the corpus. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
    pub category: String,
    pub difficulty: u8,
}

impl Quote {
    /// Validates the invariants spec.md §3 places on a loaded quote:
    /// non-empty id, non-empty text, difficulty in `[0, 100]`.
    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id must not be empty".to_owned());
        }
        if self.text.trim().is_empty() {
            return Err(format!("quote {:?} has empty text", self.id));
        }
        if self.difficulty > 100 {
            return Err(format!(
                "quote {:?} has out-of-range difficulty {}",
                self.id, self.difficulty
            ));
        }
        Ok(())
    }
}

/// A loaded, validated quote corpus.
///
/// Trait so the server, the client's `--random` path, and tests can each
/// supply a corpus (file-backed, embedded, or in-memory) behind the same
/// contract — mirrors the teacher's `services::words` trait-per-capability
/// split.
pub trait QuoteSource {
    fn get(&self, id: &str) -> Option<Quote>;
    fn random(&self, seed: Option<&str>) -> Result<Quote, EngineError>;
}

/// In-memory corpus, validated once at construction.
#[derive(Debug, Clone)]
pub struct QuoteCorpus {
    quotes: Vec<Quote>,
}

impl QuoteCorpus {
    /// Parses and validates a JSON array of quotes (spec.md §6 "Quote file
    /// format"). Fails fast, naming the first offending entry.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let quotes: Vec<Quote> =
            serde_json::from_str(raw).map_err(|e| format!("malformed quote corpus: {}", e))?;

        for (idx, quote) in quotes.iter().enumerate() {
            quote
                .validate()
                .map_err(|msg| format!("entry {} invalid: {}", idx, msg))?;
        }

        Ok(Self { quotes })
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl QuoteSource for QuoteCorpus {
    fn get(&self, id: &str) -> Option<Quote> {
        self.quotes.iter().find(|q| q.id == id).cloned()
    }

    fn random(&self, seed: Option<&str>) -> Result<Quote, EngineError> {
        if self.quotes.is_empty() {
            return Err(EngineError::NotFound("quote corpus is empty".to_owned()));
        }

        match seed {
            Some(seed) => {
                let mut rng = SeededRng::new(seed);
                Ok(rng
                    .select(&self.quotes)
                    .expect("corpus checked non-empty above")
                    .clone())
            }
            None => {
                use rand::Rng;
                let idx = rand::rng().random_range(0..self.quotes.len());
                Ok(self.quotes[idx].clone())
            }
        }
    }
}

/// Loads a corpus lazily on first use and caches it behind a one-shot
/// initialization guard, preventing duplicate parses under concurrent
/// first access (spec.md §4.2, §5).
pub struct LazyQuoteSource<F> {
    loader: F,
    cell: OnceLock<QuoteCorpus>,
}

impl<F> LazyQuoteSource<F>
where
    F: Fn() -> Result<QuoteCorpus, String>,
{
    pub fn new(loader: F) -> Self {
        Self {
            loader,
            cell: OnceLock::new(),
        }
    }

    pub fn corpus(&self) -> Result<&QuoteCorpus, String> {
        if let Some(corpus) = self.cell.get() {
            return Ok(corpus);
        }
        let corpus = (self.loader)()?;
        Ok(self.cell.get_or_init(|| corpus))
    }
}

impl<F> QuoteSource for LazyQuoteSource<F>
where
    F: Fn() -> Result<QuoteCorpus, String>,
{
    fn get(&self, id: &str) -> Option<Quote> {
        self.corpus().ok()?.get(id)
    }

    fn random(&self, seed: Option<&str>) -> Result<Quote, EngineError> {
        let corpus = self
            .corpus()
            .map_err(|e| EngineError::NotFound(format!("quote corpus unavailable: {}", e)))?;
        corpus.random(seed)
    }
}
