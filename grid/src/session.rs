//! Local, per-game-id session persistence (spec.md §4.13).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocalSessionFile {
    schema_version: u32,
    game_id: String,
    inputs: HashMap<char, char>,
    elapsed_seconds: u64,
}

const SCHEMA_VERSION: u32 = 1;
const MIN_WRITE_INTERVAL: Duration = Duration::from_secs(1);

/// Client-side session state for one puzzle, persisted to a per-user
/// file and restored when the same `game_id` is reopened.
#[derive(Debug, Clone)]
pub struct LocalSession {
    pub game_id: String,
    pub inputs: HashMap<char, char>,
    pub elapsed_seconds: u64,
    last_saved: Option<Instant>,
}

impl LocalSession {
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            inputs: HashMap::new(),
            elapsed_seconds: 0,
            last_saved: None,
        }
    }

    fn path(dir: &Path, game_id: &str) -> PathBuf {
        dir.join(format!("session-{game_id}.json"))
    }

    /// Loads a session for `game_id` from `dir`. A missing, corrupt, or
    /// schema-mismatched file is treated as absent and deleted.
    pub fn load(dir: &Path, game_id: &str) -> Option<Self> {
        let path = Self::path(dir, game_id);
        let raw = std::fs::read_to_string(&path).ok()?;

        match serde_json::from_str::<LocalSessionFile>(&raw) {
            Ok(file) if file.schema_version == SCHEMA_VERSION && file.game_id == game_id => {
                Some(Self {
                    game_id: file.game_id,
                    inputs: file.inputs,
                    elapsed_seconds: file.elapsed_seconds,
                    last_saved: None,
                })
            }
            _ => {
                tracing::warn!(game_id, path = %path.display(), "discarding corrupt or stale local session");
                let _ = std::fs::remove_file(&path);
                None
            }
        }
    }

    /// Writes unconditionally, bypassing the one-write-per-second
    /// coalescing `save` applies. Used on mutation paths that must not
    /// be dropped (clean shutdown).
    pub fn save_now(&mut self, dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(dir)?;
        let file = LocalSessionFile {
            schema_version: SCHEMA_VERSION,
            game_id: self.game_id.clone(),
            inputs: self.inputs.clone(),
            elapsed_seconds: self.elapsed_seconds,
        };
        let raw = serde_json::to_string(&file).map_err(std::io::Error::other)?;
        std::fs::write(Self::path(dir, &self.game_id), raw)?;
        self.last_saved = Some(Instant::now());
        Ok(())
    }

    /// Writes at most once per second; returns `true` if a write
    /// actually happened.
    pub fn save(&mut self, dir: &Path) -> std::io::Result<bool> {
        if let Some(last) = self.last_saved {
            if last.elapsed() < MIN_WRITE_INTERVAL {
                return Ok(false);
            }
        }
        self.save_now(dir)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir();
        let mut session = LocalSession::new("game-1");
        session.inputs.insert('A', 'X');
        session.elapsed_seconds = 42;
        session.save_now(&dir).unwrap();

        let loaded = LocalSession::load(&dir, "game-1").unwrap();
        assert_eq!(loaded.inputs.get(&'A'), Some(&'X'));
        assert_eq!(loaded.elapsed_seconds, 42);
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempdir();
        assert!(LocalSession::load(&dir, "nonexistent").is_none());
    }

    #[test]
    fn corrupt_file_is_treated_as_absent_and_removed() {
        let dir = tempdir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = LocalSession::path(&dir, "game-2");
        std::fs::write(&path, "not json").unwrap();

        assert!(LocalSession::load(&dir, "game-2").is_none());
        assert!(!path.exists());
    }

    #[test]
    fn schema_mismatch_is_treated_as_absent() {
        let dir = tempdir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = LocalSession::path(&dir, "game-3");
        std::fs::write(&path, r#"{"schema_version":99,"game_id":"game-3","inputs":{},"elapsed_seconds":0}"#).unwrap();

        assert!(LocalSession::load(&dir, "game-3").is_none());
    }

    #[test]
    fn save_coalesces_writes_within_a_second() {
        let dir = tempdir();
        let mut session = LocalSession::new("game-4");
        assert!(session.save(&dir).unwrap());
        assert!(!session.save(&dir).unwrap());
    }

    fn tempdir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "unquote-grid-test-{}-{:?}",
            std::process::id(),
            Instant::now()
        ));
        dir
    }
}
