//! A `sqlx::PgPool`-backed implementation — structurally the same shape
//! as the teacher's `services::words::pg`: acquire a connection, build
//! and execute a query, map the error. `record_session`'s idempotence is
//! an `ON CONFLICT DO NOTHING` upsert whose `rows_affected() == 0` case
//! becomes the `already_recorded` outcome rather than a surfaced
//! constraint violation (spec.md §7).

use chrono::{DateTime, Utc};

use crate::{
    generate_claim_code, FindPlayerError, GameSession, HealthError, HealthStatus, Player,
    PlayerStats, RecordOutcome, RecordSessionError, RegisterPlayerError, StatsError,
};

#[derive(Clone)]
pub struct PgStore(pub sqlx::PgPool);

#[derive(sqlx::FromRow)]
struct PlayerRow {
    id: String,
    claim_code: String,
    created_at: DateTime<Utc>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id,
            claim_code: row.claim_code,
            created_at: row.created_at,
        }
    }
}

impl crate::RegisterPlayer for PgStore {
    async fn register_player(&self) -> Result<Player, RegisterPlayerError> {
        let mut conn = self
            .0
            .acquire()
            .await
            .map_err(|e| RegisterPlayerError::DbError(Box::new(e)))?;

        let id = uuid_like();
        let claim_code = generate_claim_code();

        let row: PlayerRow = sqlx::query_as(
            "insert into players (id, claim_code, created_at) values ($1, $2, now()) returning id, claim_code, created_at",
        )
        .bind(&id)
        .bind(&claim_code)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| RegisterPlayerError::DbError(Box::new(e)))?;

        Ok(row.into())
    }
}

impl crate::FindPlayer for PgStore {
    async fn find_player(&self, claim_code: &str) -> Result<Option<Player>, FindPlayerError> {
        let mut conn = self
            .0
            .acquire()
            .await
            .map_err(|e| FindPlayerError::DbError(Box::new(e)))?;

        let row: Option<PlayerRow> =
            sqlx::query_as("select id, claim_code, created_at from players where claim_code = $1")
                .bind(claim_code)
                .fetch_optional(&mut *conn)
                .await
                .map_err(|e| FindPlayerError::DbError(Box::new(e)))?;

        Ok(row.map(Player::from))
    }
}

impl crate::RecordSession for PgStore {
    async fn record_session(
        &self,
        player_id: &str,
        game_id: &str,
        completion_time: u64,
    ) -> Result<RecordOutcome, RecordSessionError> {
        let mut conn = self
            .0
            .acquire()
            .await
            .map_err(|e| RecordSessionError::DbError(Box::new(e)))?;

        let result = sqlx::query(
            "insert into game_sessions (player_id, game_id, completion_time, solved_at)
             values ($1, $2, $3, now())
             on conflict (player_id, game_id) do nothing",
        )
        .bind(player_id)
        .bind(game_id)
        .bind(completion_time as i64)
        .execute(&mut *conn)
        .await
        .map_err(|e| RecordSessionError::DbError(Box::new(e)))?;

        Ok(RecordOutcome {
            already_recorded: result.rows_affected() == 0,
        })
    }
}

impl crate::Stats for PgStore {
    async fn stats(&self, player_id: &str) -> Result<PlayerStats, StatsError> {
        let mut conn = self
            .0
            .acquire()
            .await
            .map_err(|e| StatsError::DbError(Box::new(e)))?;

        let rows: Vec<(i64, DateTime<Utc>)> = sqlx::query_as(
            "select completion_time, solved_at from game_sessions
             where player_id = $1
             order by solved_at asc",
        )
        .bind(player_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| StatsError::DbError(Box::new(e)))?;

        let sessions: Vec<GameSession> = rows
            .into_iter()
            .map(|(completion_time, solved_at)| GameSession {
                player_id: player_id.to_owned(),
                game_id: String::new(),
                completion_time: completion_time as u64,
                solved_at,
            })
            .collect();

        Ok(crate::memory::compute_stats(&sessions))
    }
}

impl crate::CheckHealth for PgStore {
    async fn check_health(&self) -> Result<HealthStatus, HealthError> {
        match self.0.acquire().await {
            Ok(mut conn) => match sqlx::query("select 1").execute(&mut *conn).await {
                Ok(_) => Ok(HealthStatus::Connected),
                Err(e) => Err(HealthError::Error(e.to_string())),
            },
            Err(e) => Err(HealthError::Error(e.to_string())),
        }
    }
}

/// A lightweight, dependency-free stand-in for a UUID: we avoid pulling
/// in the `uuid` crate for a single id-generation call.
fn uuid_like() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
