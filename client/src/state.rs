//! The client state machine (spec.md §4.12): an explicit `ClientState`
//! plus a pure `reduce(state, msg) -> (state, Vec<Command>)`, in the
//! Elm style spec.md §9 calls for. `Command`s are interpreted by the
//! event loop (`event.rs`), which dispatches them as background `tokio`
//! tasks and feeds completions back in as `Msg`s — `reduce` itself stays
//! synchronous and needs no runtime to unit test.

use std::collections::HashMap;

use unquote_api_types::PuzzlePayload;
use unquote_grid::GridState;

#[derive(Debug, Clone)]
pub enum ClientState {
    Loading,
    Playing(PlayingState),
    Checking(PlayingState),
    Solved(PlayingState),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct PlayingState {
    pub puzzle: PuzzlePayload,
    pub grid: GridState,
    pub cursor: isize,
    pub elapsed_seconds: u64,
}

#[derive(Debug, Clone)]
pub enum Msg {
    PuzzleLoaded(PuzzlePayload),
    PuzzleLoadFailed(String),
    KeyLetter(char),
    KeyBackspace,
    CursorLeft,
    CursorRight,
    /// A left-click at a terminal `(col, row)`, with the frame size it
    /// was captured against (the layout the click must be resolved
    /// through can change between frames as the terminal is resized).
    MouseClick { area_width: u16, area_height: u16, col: u16, row: u16 },
    Submit,
    CheckResult { correct: bool, already_recorded: Option<bool> },
    CheckFailed(String),
    /// A claim code obtained from the registration endpoint on first
    /// run. Handled by the event loop directly (config persistence),
    /// never reaching a `ClientState` transition.
    Registered(String),
    Tick,
    Quit,
}

#[derive(Debug, Clone)]
pub enum Command {
    FetchPuzzle { date: Option<String> },
    Register,
    SubmitCheck { game_id: String, solution: String, completion_time: u64 },
    PersistSession { game_id: String, inputs: HashMap<char, char>, elapsed_seconds: u64 },
    Quit,
}

/// Advances the state machine one step. Pure: no I/O, no clock reads —
/// the caller supplies `Tick` and timestamps belong to the event loop.
pub fn reduce(state: ClientState, msg: Msg) -> (ClientState, Vec<Command>) {
    match (state, msg) {
        (ClientState::Loading, Msg::PuzzleLoaded(puzzle)) => {
            let hints: HashMap<char, char> = puzzle
                .hints
                .iter()
                .map(|h| (h.cipher_letter, h.plain_letter))
                .collect();
            let grid = GridState::new(&puzzle.ciphertext, &hints);
            let cursor = grid.cursor();
            let game_id = puzzle.id.clone();
            let playing = PlayingState {
                puzzle,
                grid,
                cursor,
                elapsed_seconds: 0,
            };
            (
                ClientState::Playing(playing),
                vec![Command::PersistSession {
                    game_id,
                    inputs: HashMap::new(),
                    elapsed_seconds: 0,
                }],
            )
        }
        (ClientState::Loading, Msg::PuzzleLoadFailed(message)) => (ClientState::Error(message), vec![]),

        (ClientState::Playing(mut playing), Msg::KeyLetter(letter)) => {
            let pos = playing.cursor;
            if pos >= 0 && playing.grid.set(pos as usize, letter) {
                playing.cursor = unquote_grid::nav::advance_after_set(&playing.grid, pos);
            }
            let game_id = playing.puzzle.id.clone();
            let inputs = playing.grid.current_inputs();
            let elapsed = playing.elapsed_seconds;
            (
                ClientState::Playing(playing),
                vec![Command::PersistSession {
                    game_id,
                    inputs,
                    elapsed_seconds: elapsed,
                }],
            )
        }
        (ClientState::Playing(mut playing), Msg::KeyBackspace) => {
            let pos = playing.cursor;
            if pos >= 0 {
                playing.grid.clear(pos as usize);
            }
            (ClientState::Playing(playing), vec![])
        }
        (ClientState::Playing(mut playing), Msg::CursorLeft) => {
            let to = unquote_grid::nav::prev_letter(&playing.grid, playing.cursor);
            if to != -1 {
                playing.cursor = to;
                playing.grid.set_cursor(to);
            }
            (ClientState::Playing(playing), vec![])
        }
        (ClientState::Playing(mut playing), Msg::CursorRight) => {
            let to = unquote_grid::nav::next_letter(&playing.grid, playing.cursor);
            if to != -1 {
                playing.cursor = to;
                playing.grid.set_cursor(to);
            }
            (ClientState::Playing(playing), vec![])
        }
        (ClientState::Playing(mut playing), Msg::MouseClick { area_width, area_height, col, row }) => {
            if let Some((grid_row, grid_col)) = crate::ui::click_to_grid_coordinate(area_width, area_height, col, row)
            {
                let words = unquote_grid::nav::words(&playing.puzzle.ciphertext);
                let total_len = playing.puzzle.ciphertext.chars().count();
                let lines = unquote_grid::nav::wrap(&words, total_len, crate::ui::body_width(area_width), 2);
                let cell_col = grid_col / 2;
                let index = unquote_grid::nav::coordinate_to_index(&lines, grid_row, cell_col);
                if index >= 0 {
                    if let Some(cell) = playing.grid.cell(index as usize) {
                        if cell.kind == unquote_grid::CellKind::Letter {
                            playing.cursor = index;
                            playing.grid.set_cursor(index);
                        }
                    }
                }
            }
            (ClientState::Playing(playing), vec![])
        }
        (ClientState::Playing(playing), Msg::Submit) => {
            let game_id = playing.puzzle.id.clone();
            let solution = playing.grid.assemble();
            let completion_time = playing.elapsed_seconds;
            (
                ClientState::Checking(playing),
                vec![Command::SubmitCheck { game_id, solution, completion_time }],
            )
        }
        (ClientState::Playing(mut playing), Msg::Tick) => {
            playing.elapsed_seconds += 1;
            (ClientState::Playing(playing), vec![])
        }

        (ClientState::Checking(playing), Msg::CheckResult { correct: true, .. }) => {
            (ClientState::Solved(playing), vec![])
        }
        (ClientState::Checking(playing), Msg::CheckResult { correct: false, .. }) => {
            (ClientState::Playing(playing), vec![])
        }
        (ClientState::Checking(playing), Msg::CheckFailed(message)) => {
            let _ = playing;
            (ClientState::Error(message), vec![])
        }
        (ClientState::Checking(mut playing), Msg::Tick) => {
            playing.elapsed_seconds += 1;
            (ClientState::Checking(playing), vec![])
        }

        (state, Msg::Quit) => (state, vec![Command::Quit]),
        (state, _) => (state, vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unquote_api_types::HintPayload;

    fn sample_puzzle() -> PuzzlePayload {
        PuzzlePayload {
            id: "abc123xyz".into(),
            date: "2026-07-27".into(),
            ciphertext: "BLHHK".into(),
            author: "A".into(),
            category: "c".into(),
            difficulty: 10,
            hints: vec![HintPayload {
                cipher_letter: 'K',
                plain_letter: 'O',
            }],
        }
    }

    #[test]
    fn puzzle_loaded_transitions_loading_to_playing() {
        let (state, commands) = reduce(ClientState::Loading, Msg::PuzzleLoaded(sample_puzzle()));
        assert!(matches!(state, ClientState::Playing(_)));
        assert!(!commands.is_empty());
    }

    #[test]
    fn puzzle_load_failure_transitions_to_error() {
        let (state, _) = reduce(ClientState::Loading, Msg::PuzzleLoadFailed("boom".into()));
        assert!(matches!(state, ClientState::Error(msg) if msg == "boom"));
    }

    #[test]
    fn submit_freezes_into_checking_and_emits_submit_command() {
        let (playing, _) = reduce(ClientState::Loading, Msg::PuzzleLoaded(sample_puzzle()));
        let (state, commands) = reduce(playing, Msg::Submit);
        assert!(matches!(state, ClientState::Checking(_)));
        assert!(matches!(commands[0], Command::SubmitCheck { .. }));
    }

    #[test]
    fn correct_check_result_solves_the_puzzle() {
        let (playing, _) = reduce(ClientState::Loading, Msg::PuzzleLoaded(sample_puzzle()));
        let (checking, _) = reduce(playing, Msg::Submit);
        let (state, commands) = reduce(
            checking,
            Msg::CheckResult {
                correct: true,
                already_recorded: Some(false),
            },
        );
        assert!(matches!(state, ClientState::Solved(_)));
        assert!(commands.is_empty());
    }

    #[test]
    fn already_recorded_check_result_still_solves() {
        let (playing, _) = reduce(ClientState::Loading, Msg::PuzzleLoaded(sample_puzzle()));
        let (checking, _) = reduce(playing, Msg::Submit);
        let (state, commands) = reduce(
            checking,
            Msg::CheckResult {
                correct: true,
                already_recorded: Some(true),
            },
        );
        assert!(matches!(state, ClientState::Solved(_)));
        assert!(commands.is_empty());
    }

    #[test]
    fn incorrect_check_result_returns_to_playing() {
        let (playing, _) = reduce(ClientState::Loading, Msg::PuzzleLoaded(sample_puzzle()));
        let (checking, _) = reduce(playing, Msg::Submit);
        let (state, _) = reduce(
            checking,
            Msg::CheckResult {
                correct: false,
                already_recorded: None,
            },
        );
        assert!(matches!(state, ClientState::Playing(_)));
    }

    #[test]
    fn cursor_right_then_left_returns_to_the_starting_letter_cell() {
        let (playing, _) = reduce(ClientState::Loading, Msg::PuzzleLoaded(sample_puzzle()));
        let start = match &playing {
            ClientState::Playing(p) => p.cursor,
            _ => unreachable!(),
        };
        let (moved, _) = reduce(playing, Msg::CursorRight);
        let (back, _) = reduce(moved, Msg::CursorLeft);
        match back {
            ClientState::Playing(p) => assert_eq!(p.cursor, start),
            _ => unreachable!(),
        }
    }

    #[test]
    fn mouse_click_on_a_letter_cell_moves_the_cursor_there() {
        let (playing, _) = reduce(ClientState::Loading, Msg::PuzzleLoaded(sample_puzzle()));
        // "BLHHK" (5 cells) renders on row 0 starting at body col 1, row
        // 4, per `click_to_grid_coordinate`'s header(3)+border(1) offset.
        // Cell 2 ('H') sits at screen column 1 + 2*2 = 5.
        let (state, _) = reduce(
            playing,
            Msg::MouseClick {
                area_width: 60,
                area_height: 20,
                col: 5,
                row: 4,
            },
        );
        match state {
            ClientState::Playing(p) => assert_eq!(p.cursor, 2),
            _ => unreachable!(),
        }
    }

    #[test]
    fn mouse_click_outside_the_body_is_ignored() {
        let (playing, _) = reduce(ClientState::Loading, Msg::PuzzleLoaded(sample_puzzle()));
        let start = match &playing {
            ClientState::Playing(p) => p.cursor,
            _ => unreachable!(),
        };
        let (state, _) = reduce(
            playing,
            Msg::MouseClick {
                area_width: 60,
                area_height: 20,
                col: 0,
                row: 0,
            },
        );
        match state {
            ClientState::Playing(p) => assert_eq!(p.cursor, start),
            _ => unreachable!(),
        }
    }

    #[test]
    fn quit_emits_quit_command_from_any_state() {
        let (_, commands) = reduce(ClientState::Error("x".into()), Msg::Quit);
        assert!(matches!(commands[0], Command::Quit));
    }
}
