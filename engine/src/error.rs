use std::fmt::Display;

/// The only two error kinds the puzzle engine itself ever raises
/// (§7: "the puzzle engine itself raises only `InvalidInput` ... and
/// `NotFound`").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidInput(String),
    NotFound(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            EngineError::NotFound(msg) => write!(f, "not found: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
