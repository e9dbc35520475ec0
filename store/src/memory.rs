//! A `dashmap`-backed store: the default for local development and all
//! server unit tests. The teacher's own `ConfigProvider` already reaches
//! for `dashmap` for its concurrent cache, which is why this crate reaches
//! for the same crate for its concurrent map.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use crate::{
    generate_claim_code, FindPlayerError, GameSession, HealthError, HealthStatus, Player,
    PlayerStats, RecordOutcome, RecordSessionError, RegisterPlayerError, StatsError,
};

#[derive(Clone, Default)]
pub struct MemoryStore {
    next_id: Arc<AtomicU64>,
    players_by_id: Arc<DashMap<String, Player>>,
    players_by_claim_code: Arc<DashMap<String, String>>,
    sessions: Arc<DashMap<String, GameSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn session_key(player_id: &str, game_id: &str) -> String {
        format!("{player_id}:{game_id}")
    }
}

impl crate::RegisterPlayer for MemoryStore {
    async fn register_player(&self) -> Result<Player, RegisterPlayerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let player = Player {
            id: format!("p-{id}"),
            claim_code: generate_claim_code(),
            created_at: Utc::now(),
        };
        self.players_by_claim_code
            .insert(player.claim_code.clone(), player.id.clone());
        self.players_by_id.insert(player.id.clone(), player.clone());
        Ok(player)
    }
}

impl crate::FindPlayer for MemoryStore {
    async fn find_player(&self, claim_code: &str) -> Result<Option<Player>, FindPlayerError> {
        let Some(id) = self.players_by_claim_code.get(claim_code).map(|r| r.clone()) else {
            return Ok(None);
        };
        Ok(self.players_by_id.get(&id).map(|r| r.clone()))
    }
}

impl crate::RecordSession for MemoryStore {
    async fn record_session(
        &self,
        player_id: &str,
        game_id: &str,
        completion_time: u64,
    ) -> Result<RecordOutcome, RecordSessionError> {
        let key = Self::session_key(player_id, game_id);
        match self.sessions.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Ok(RecordOutcome { already_recorded: true })
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(GameSession {
                    player_id: player_id.to_owned(),
                    game_id: game_id.to_owned(),
                    completion_time,
                    solved_at: Utc::now(),
                });
                Ok(RecordOutcome { already_recorded: false })
            }
        }
    }
}

impl crate::Stats for MemoryStore {
    async fn stats(&self, player_id: &str) -> Result<PlayerStats, StatsError> {
        let sessions: Vec<GameSession> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().player_id == player_id)
            .map(|entry| entry.value().clone())
            .collect();

        Ok(compute_stats(&sessions))
    }
}

/// Shared by the memory and Postgres stores: both end up with the same
/// `Vec<GameSession>` shape and need the same aggregation.
pub(crate) fn compute_stats(sessions: &[GameSession]) -> PlayerStats {
    let mut sessions = sessions.to_vec();
    sessions.sort_by_key(|s| s.solved_at);

    PlayerStats {
        solved: sessions.len() as u32,
        median_seconds: median(&sessions.iter().map(|s| s.completion_time).collect::<Vec<_>>()),
        current_streak: streak(&sessions),
    }
}

impl crate::CheckHealth for MemoryStore {
    async fn check_health(&self) -> Result<HealthStatus, HealthError> {
        Ok(HealthStatus::Connected)
    }
}

fn median(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2
    } else {
        sorted[mid]
    }
}

/// Counts consecutive calendar days (UTC) of completions ending at the
/// most recent one.
fn streak(sessions_by_solved_at_ascending: &[GameSession]) -> u32 {
    let mut days: Vec<chrono::NaiveDate> = sessions_by_solved_at_ascending
        .iter()
        .map(|s| s.solved_at.date_naive())
        .collect();
    days.dedup();
    days.reverse();

    let mut count = 0u32;
    let mut expected = match days.first() {
        Some(d) => *d,
        None => return 0,
    };
    for day in days {
        if day == expected {
            count += 1;
            expected -= chrono::Duration::days(1);
        } else {
            break;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CheckHealth, FindPlayer, RecordSession, RegisterPlayer, Stats};

    #[tokio::test]
    async fn register_then_find_round_trips() {
        let store = MemoryStore::new();
        let player = store.register_player().await.unwrap();
        let found = store.find_player(&player.claim_code).await.unwrap();
        assert_eq!(found.unwrap().id, player.id);
    }

    #[tokio::test]
    async fn find_unknown_claim_code_is_none() {
        let store = MemoryStore::new();
        assert!(store.find_player("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn recording_twice_is_idempotent_and_keeps_first_time() {
        let store = MemoryStore::new();
        let player = store.register_player().await.unwrap();

        let first = store
            .record_session(&player.id, "game-1", 120)
            .await
            .unwrap();
        assert!(!first.already_recorded);

        let second = store
            .record_session(&player.id, "game-1", 90)
            .await
            .unwrap();
        assert!(second.already_recorded);

        let stats = store.stats(&player.id).await.unwrap();
        assert_eq!(stats.solved, 1);
        assert_eq!(stats.median_seconds, 120);
    }

    #[tokio::test]
    async fn stats_computes_median_over_multiple_sessions() {
        let store = MemoryStore::new();
        let player = store.register_player().await.unwrap();
        store.record_session(&player.id, "g1", 60).await.unwrap();
        store.record_session(&player.id, "g2", 120).await.unwrap();
        store.record_session(&player.id, "g3", 90).await.unwrap();

        let stats = store.stats(&player.id).await.unwrap();
        assert_eq!(stats.solved, 3);
        assert_eq!(stats.median_seconds, 90);
    }

    #[tokio::test]
    async fn health_reports_connected() {
        let store = MemoryStore::new();
        assert_eq!(store.check_health().await.unwrap(), HealthStatus::Connected);
    }
}
