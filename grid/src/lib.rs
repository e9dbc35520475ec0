//! The interactive puzzle state machine's data structures: the cell
//! grid model, cursor navigation, and local session persistence
//! (spec.md §4.10-§4.13). Kept as a library, independent of any
//! terminal, so it is testable without a TTY.

pub mod cell;
pub mod nav;
pub mod session;

pub use cell::{Cell, CellKind, GridState};
pub use session::LocalSession;
