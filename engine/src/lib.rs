//! The Unquote puzzle engine: a deterministic keyword-cipher generator.
//!
//! Everything in this crate is pure or read-only after construction
//! (spec.md §5), so it needs no synchronization of its own; callers
//! (the server, the quote-lint utility) own whatever caching or
//! concurrency they need around it.

pub mod cipher;
pub mod difficulty;
pub mod error;
pub mod game_id;
pub mod hints;
pub mod keywords;
pub mod puzzle;
pub mod quote;
pub mod rng;
pub mod solution;

pub use cipher::CipherMapping;
pub use error::EngineError;
pub use hints::Hint;
pub use puzzle::{GeneratedPuzzle, Puzzle};
pub use quote::{Quote, QuoteCorpus, QuoteSource};
