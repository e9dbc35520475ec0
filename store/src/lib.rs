//! Player and session storage (spec.md §4.9) — the one mutable shared
//! resource in the system (§5). One trait per capability, each with its
//! own error enum, mirroring the teacher's `services::words` module so
//! handlers stay generic over exactly the capability they need.

pub mod memory;
pub mod pg;

use std::fmt::Display;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub claim_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub player_id: String,
    pub game_id: String,
    pub completion_time: u64,
    pub solved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    pub already_recorded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    pub solved: u32,
    pub median_seconds: u64,
    pub current_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Connected,
    Unconfigured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthError {
    Error(String),
}

impl Display for HealthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for HealthError {}

pub trait RegisterPlayer {
    async fn register_player(&self) -> Result<Player, RegisterPlayerError>;
}

#[derive(Debug)]
pub enum RegisterPlayerError {
    DbError(Box<dyn std::error::Error + Send + Sync>),
}

impl Display for RegisterPlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DbError(e) => write!(f, "failed to register player due to database error: {e}"),
        }
    }
}

impl std::error::Error for RegisterPlayerError {}

pub trait FindPlayer {
    async fn find_player(&self, claim_code: &str) -> Result<Option<Player>, FindPlayerError>;
}

#[derive(Debug)]
pub enum FindPlayerError {
    DbError(Box<dyn std::error::Error + Send + Sync>),
}

impl Display for FindPlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DbError(e) => write!(f, "failed to find player due to database error: {e}"),
        }
    }
}

impl std::error::Error for FindPlayerError {}

pub trait RecordSession {
    async fn record_session(
        &self,
        player_id: &str,
        game_id: &str,
        completion_time: u64,
    ) -> Result<RecordOutcome, RecordSessionError>;
}

#[derive(Debug)]
pub enum RecordSessionError {
    DbError(Box<dyn std::error::Error + Send + Sync>),
}

impl Display for RecordSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DbError(e) => write!(f, "failed to record session due to database error: {e}"),
        }
    }
}

impl std::error::Error for RecordSessionError {}

pub trait Stats {
    async fn stats(&self, player_id: &str) -> Result<PlayerStats, StatsError>;
}

#[derive(Debug)]
pub enum StatsError {
    DbError(Box<dyn std::error::Error + Send + Sync>),
}

impl Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DbError(e) => write!(f, "failed to compute stats due to database error: {e}"),
        }
    }
}

impl std::error::Error for StatsError {}

pub trait CheckHealth {
    async fn check_health(&self) -> Result<HealthStatus, HealthError>;
}

/// Generates a fresh, dash-grouped, human-transcribable claim code with
/// at least 20 bits of entropy (spec.md §4.9). Twelve symbols from a
/// 32-symbol alphabet gives 60 bits.
pub fn generate_claim_code() -> String {
    use rand::Rng;
    const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
    let mut rng = rand::rng();
    let symbols: String = (0..12)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    symbols
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_codes_are_dash_grouped() {
        let code = generate_claim_code();
        assert_eq!(code.len(), 14); // 12 symbols + 2 dashes
        assert_eq!(code.chars().filter(|&c| c == '-').count(), 2);
    }

    #[test]
    fn claim_codes_are_not_trivially_repeated() {
        let a = generate_claim_code();
        let b = generate_claim_code();
        assert_ne!(a, b);
    }
}
