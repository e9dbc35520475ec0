//! Wire DTOs shared by `unquote-server` and `unquote-client` — the
//! payload shapes of spec.md §6, kept in their own crate the way the
//! teacher keeps `words-list` and `search` separate from `server` so
//! either side can depend on the shape without depending on the other's
//! implementation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use unquote_engine::puzzle::Puzzle as EnginePuzzle;
use unquote_engine::Hint;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HintPayload {
    #[serde(rename = "cipherLetter")]
    pub cipher_letter: char,
    #[serde(rename = "plainLetter")]
    pub plain_letter: char,
}

impl From<Hint> for HintPayload {
    fn from(hint: Hint) -> Self {
        Self {
            cipher_letter: hint.cipher_letter,
            plain_letter: hint.plain_letter,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzlePayload {
    pub id: String,
    pub date: String,
    pub ciphertext: String,
    pub author: String,
    pub category: String,
    pub difficulty: u8,
    pub hints: Vec<HintPayload>,
}

impl From<EnginePuzzle> for PuzzlePayload {
    fn from(puzzle: EnginePuzzle) -> Self {
        Self {
            id: puzzle.id,
            date: puzzle.date.format("%Y-%m-%d").to_string(),
            ciphertext: puzzle.ciphertext,
            author: puzzle.author,
            category: puzzle.category,
            difficulty: puzzle.difficulty,
            hints: puzzle.hints.into_iter().map(HintPayload::from).collect(),
        }
    }
}

impl PuzzlePayload {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub solution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResponse {
    pub correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub already_recorded: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    pub claim_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub solved: u32,
    pub median_seconds: u64,
    pub current_streak: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Error,
    Unconfigured,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub status: DatabaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveHealthResponse {
    pub status: &'static str,
}

impl Default for LiveHealthResponse {
    fn default() -> Self {
        Self { status: "ok" }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyHealthResponse {
    pub status: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: Some(code.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn puzzle_payload_serializes_hints_with_camel_case_keys() {
        let payload = PuzzlePayload {
            id: "abc".into(),
            date: "2026-07-27".into(),
            ciphertext: "WKRF".into(),
            author: "A".into(),
            category: "c".into(),
            difficulty: 10,
            hints: vec![HintPayload {
                cipher_letter: 'W',
                plain_letter: 'T',
            }],
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"cipherLetter\":\"W\""));
        assert!(json.contains("\"plainLetter\":\"T\""));
    }

    #[test]
    fn puzzle_payload_date_round_trips() {
        let payload = PuzzlePayload {
            id: "abc".into(),
            date: "2026-07-27".into(),
            ciphertext: "".into(),
            author: "".into(),
            category: "".into(),
            difficulty: 0,
            hints: vec![],
        };
        assert_eq!(
            payload.parsed_date(),
            Some(NaiveDate::from_ymd_opt(2026, 7, 27).unwrap())
        );
    }
}
