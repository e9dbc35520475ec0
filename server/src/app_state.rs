//! The composition root: a `Server`/`AppState` value holding the quote
//! source, puzzle cache, and store, handed to handlers as `State`
//! (spec.md §9's "explicit construction graph" note) rather than looked
//! up through ambient machinery.

use std::sync::Arc;

use unquote_engine::quote::{LazyQuoteSource, QuoteCorpus, QuoteSource};
use unquote_engine::{keywords, EngineError, Quote};
use unquote_store::memory::MemoryStore;
use unquote_store::pg::PgStore;
use unquote_store::{
    CheckHealth, FindPlayer, FindPlayerError, HealthError, HealthStatus, Player, PlayerStats,
    RecordOutcome, RecordSession, RecordSessionError, RegisterPlayer, RegisterPlayerError, Stats,
    StatsError,
};

use crate::puzzle_cache::PuzzleCache;

#[derive(Clone)]
pub enum StoreBackend {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl RegisterPlayer for StoreBackend {
    async fn register_player(&self) -> Result<Player, RegisterPlayerError> {
        match self {
            Self::Memory(s) => s.register_player().await,
            Self::Postgres(s) => s.register_player().await,
        }
    }
}

impl FindPlayer for StoreBackend {
    async fn find_player(&self, claim_code: &str) -> Result<Option<Player>, FindPlayerError> {
        match self {
            Self::Memory(s) => s.find_player(claim_code).await,
            Self::Postgres(s) => s.find_player(claim_code).await,
        }
    }
}

impl RecordSession for StoreBackend {
    async fn record_session(
        &self,
        player_id: &str,
        game_id: &str,
        completion_time: u64,
    ) -> Result<RecordOutcome, RecordSessionError> {
        match self {
            Self::Memory(s) => s.record_session(player_id, game_id, completion_time).await,
            Self::Postgres(s) => s.record_session(player_id, game_id, completion_time).await,
        }
    }
}

impl Stats for StoreBackend {
    async fn stats(&self, player_id: &str) -> Result<PlayerStats, StatsError> {
        match self {
            Self::Memory(s) => s.stats(player_id).await,
            Self::Postgres(s) => s.stats(player_id).await,
        }
    }
}

impl CheckHealth for StoreBackend {
    async fn check_health(&self) -> Result<HealthStatus, HealthError> {
        match self {
            Self::Memory(s) => s.check_health().await,
            Self::Postgres(s) => s.check_health().await,
        }
    }
}

/// Shared, cloneable application state handed to every axum handler via
/// `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<dyn QuoteSource + Send + Sync>,
    pub keywords: Arc<Vec<String>>,
    pub puzzles: PuzzleCache,
    pub store: StoreBackend,
    /// Whether a real database was configured at all — drives the
    /// `unconfigured` branch of `/health/ready` independently of whether
    /// the connection itself is currently healthy.
    pub database_configured: bool,
}

impl AppState {
    pub fn quote_by_id(&self, id: &str) -> Option<Quote> {
        self.quotes.get(id)
    }

    pub fn generate_for_date(
        &self,
        date: chrono::NaiveDate,
    ) -> Result<unquote_engine::puzzle::GeneratedPuzzle, EngineError> {
        self.puzzles.get_or_generate(date, self.quotes.as_ref(), &self.keywords)
    }
}

pub fn build_quote_source(path: String) -> Arc<dyn QuoteSource + Send + Sync> {
    Arc::new(LazyQuoteSource::new(move || {
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| format!("failed to read quotes file {path:?}: {e}"))?;
        QuoteCorpus::from_json(&raw)
    }))
}

pub fn default_keywords() -> Vec<String> {
    keywords::default_keywords()
}
