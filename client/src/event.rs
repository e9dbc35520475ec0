//! The single-threaded cooperative event loop (spec.md §5 "Client").
//! Background I/O (API calls, session persistence) is dispatched as
//! `tokio::spawn` tasks whose completion arrives back as a `Msg` over a
//! channel; the grid model itself is only ever touched from this loop,
//! matching the teacher's preference for explicit message passing over
//! shared-memory callbacks.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config;
use crate::state::{Command, Msg};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The one local session being persisted, shared across `dispatch` calls
/// so coalescing (`LocalSession::save`'s one-write-per-second rule) has
/// somewhere to remember the last write time.
pub type SessionHandle = Arc<Mutex<Option<unquote_grid::LocalSession>>>;

/// Polls the terminal for input and forwards it as a `Msg`, without
/// blocking the async runtime (a short poll timeout yields control back
/// between polls).
pub fn spawn_input_reader(tx: mpsc::UnboundedSender<Msg>) {
    std::thread::spawn(move || loop {
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    let msg = match key.code {
                        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                            Msg::KeyLetter(c.to_ascii_uppercase())
                        }
                        KeyCode::Backspace | KeyCode::Delete => Msg::KeyBackspace,
                        KeyCode::Enter => Msg::Submit,
                        KeyCode::Esc | KeyCode::Char('q') => Msg::Quit,
                        KeyCode::Left => Msg::CursorLeft,
                        KeyCode::Right => Msg::CursorRight,
                        _ => continue,
                    };
                    if tx.send(msg).is_err() {
                        return;
                    }
                }
                Ok(Event::Mouse(mouse)) => {
                    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
                        continue;
                    }
                    let Ok((area_width, area_height)) = crossterm::terminal::size() else {
                        continue;
                    };
                    let msg = Msg::MouseClick {
                        area_width,
                        area_height,
                        col: mouse.column,
                        row: mouse.row,
                    };
                    if tx.send(msg).is_err() {
                        return;
                    }
                }
                Ok(_) => continue,
                Err(_) => return,
            },
            Ok(false) => continue,
            Err(_) => return,
        }
    });
}

pub fn spawn_ticker(tx: mpsc::UnboundedSender<Msg>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;
            if tx.send(Msg::Tick).is_err() {
                return;
            }
        }
    });
}

/// Interprets a `Command` produced by `reduce` as a background task,
/// feeding its result back in as a `Msg`.
pub fn dispatch(
    command: Command,
    api: ApiClient,
    tx: mpsc::UnboundedSender<Msg>,
    claim_code: Option<String>,
    session: SessionHandle,
) {
    match command {
        Command::FetchPuzzle { date } => {
            tokio::spawn(async move {
                let result = match date {
                    Some(date) => api.by_date(&date).await,
                    None => api.today().await,
                };
                let msg = match result {
                    Ok(puzzle) => Msg::PuzzleLoaded(puzzle),
                    Err(e) => Msg::PuzzleLoadFailed(e.to_string()),
                };
                let _ = tx.send(msg);
            });
        }
        Command::Register => {
            tokio::spawn(async move {
                match api.register().await {
                    Ok(response) => {
                        let _ = tx.send(Msg::Registered(response.claim_code));
                    }
                    Err(e) => tracing::warn!(error = %e, "failed to register player"),
                }
            });
        }
        Command::SubmitCheck { game_id, solution, completion_time } => {
            tokio::spawn(async move {
                let result = api
                    .check(&game_id, solution, claim_code, Some(completion_time))
                    .await;
                let msg = match result {
                    Ok(response) => Msg::CheckResult {
                        correct: response.correct,
                        already_recorded: response.already_recorded,
                    },
                    Err(e) => Msg::CheckFailed(e.to_string()),
                };
                let _ = tx.send(msg);
            });
        }
        Command::PersistSession { game_id, inputs, elapsed_seconds } => {
            tokio::task::spawn_blocking(move || {
                let dir = config::session_dir();
                let mut guard = session.lock().unwrap_or_else(|e| e.into_inner());
                match guard.as_mut() {
                    Some(existing) if existing.game_id == game_id => {
                        existing.inputs = inputs;
                        existing.elapsed_seconds = elapsed_seconds;
                        if let Err(e) = existing.save(&dir) {
                            tracing::warn!(error = %e, "failed to persist local session");
                        }
                    }
                    _ => {
                        let mut fresh = unquote_grid::LocalSession::new(game_id);
                        fresh.inputs = inputs;
                        fresh.elapsed_seconds = elapsed_seconds;
                        if let Err(e) = fresh.save(&dir) {
                            tracing::warn!(error = %e, "failed to persist local session");
                        }
                        *guard = Some(fresh);
                    }
                }
            });
        }
        Command::Quit => {}
    }
}
