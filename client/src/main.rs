mod api;
mod config;
mod event;
mod state;
mod ui;

use std::io::stdout;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use api::ApiClient;
use config::ClientConfig;
use state::{ClientState, Command, Msg};

/// Unquote — a daily cryptoquip puzzle, solved from the terminal.
#[derive(Parser, Debug)]
#[command(name = "unquote", version, about)]
struct Cli {
    /// Permit plain HTTP to non-localhost hosts.
    #[arg(long)]
    insecure: bool,

    /// Solve a puzzle from a wall-clock-derived seed instead of today's.
    #[arg(long)]
    random: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("unquote")
        .join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&log_dir, "unquote.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt().with_writer(writer).with_ansi(false).init();

    let cli = Cli::parse();

    let config = ClientConfig::load();
    let api = ApiClient::new(config::api_url(), cli.insecure)?;

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, api, config, cli.random).await;
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        eprintln!("unquote: {e}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    api: ApiClient,
    mut config: ClientConfig,
    random: bool,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    event::spawn_input_reader(tx.clone());
    event::spawn_ticker(tx.clone());

    let session: event::SessionHandle = Default::default();

    let mut claim_code = if config.claim_code.is_empty() {
        None
    } else {
        Some(config.claim_code.clone())
    };

    let mut client_state = ClientState::Loading;
    let seed_date = random.then(|| {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        chrono::DateTime::from_timestamp(now as i64, 0)
            .unwrap_or_else(chrono::Utc::now)
            .format("%Y-%m-%d")
            .to_string()
    });
    event::dispatch(
        Command::FetchPuzzle { date: seed_date },
        api.clone(),
        tx.clone(),
        claim_code.clone(),
        session.clone(),
    );
    if claim_code.is_none() {
        event::dispatch(Command::Register, api.clone(), tx.clone(), None, session.clone());
    }

    terminal.draw(|frame| ui::draw(frame, &client_state))?;

    while let Some(msg) = rx.recv().await {
        if let Msg::Registered(code) = msg {
            claim_code = Some(code.clone());
            config.claim_code = code;
            if let Err(e) = config.save() {
                tracing::warn!(error = %e, "failed to persist claim code");
            }
            continue;
        }

        let quit = matches!(msg, Msg::Quit);
        let (next_state, commands) = state::reduce(client_state, msg);
        client_state = next_state;

        for command in commands {
            if matches!(command, Command::Quit) {
                return Ok(());
            }
            event::dispatch(command, api.clone(), tx.clone(), claim_code.clone(), session.clone());
        }

        terminal.draw(|frame| ui::draw(frame, &client_state))?;

        if quit {
            return Ok(());
        }
    }

    Ok(())
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
