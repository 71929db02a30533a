//! GoBarber TUI - a terminal client for the GoBarber booking service.
//!
//! On launch the saved session is restored from device storage. Until that
//! finishes a loading indicator is shown; afterwards the user lands on the
//! dashboard when signed in, or on the sign-in screen otherwise.

mod app;
mod routes;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gobarber_core::{
    ApiClient, Config, FileStore, KeyValueStore, MemoryStore, SessionStore,
};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Prefills the sign-in e-mail, ahead of the remembered one
const EMAIL_ENV: &str = "GOBARBER_EMAIL";

const LOG_FILE: &str = "gobarber.log";

#[derive(Debug, Parser)]
#[command(name = "gobarber", version, about = "Terminal client for GoBarber")]
struct Cli {
    /// Base URL of the GoBarber API (overrides GOBARBER_API_URL and config)
    #[arg(long)]
    api_url: Option<String>,

    /// Keep the session in memory only; nothing is read from or written to disk
    #[arg(long)]
    ephemeral: bool,

    /// Print the saved session's user as JSON and exit
    #[arg(long, conflicts_with = "sign_out")]
    whoami: bool,

    /// Remove the saved session and exit
    #[arg(long)]
    sign_out: bool,
}

/// Initialize the tracing subscriber, writing to a log file so the
/// terminal stays clean. Use RUST_LOG to control the level.
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = match Config::log_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            return None;
        }
    };
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Logging disabled: {}: {}", log_dir.display(), e);
        return None;
    }

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _log_guard = init_tracing();
    info!("GoBarber TUI starting");

    let config_path = Config::default_path().ok();
    let config = match config_path.as_deref().map(Config::load_from) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
        None => Config::default(),
    };
    let api_url = cli.api_url.clone().unwrap_or_else(|| config.api_url());

    let session = Arc::new(build_session(&config, &api_url, cli.ephemeral)?);

    if cli.whoami {
        return whoami(&session).await;
    }
    if cli.sign_out {
        return sign_out(&session).await;
    }

    // Restore runs alongside the UI, which shows the loading view meanwhile
    let restoring = Arc::clone(&session);
    tokio::spawn(async move {
        restoring.restore().await;
    });

    let initial_email = std::env::var(EMAIL_ENV)
        .ok()
        .filter(|e| !e.trim().is_empty())
        .or_else(|| config.last_email.clone());
    let config_path: Option<PathBuf> = if cli.ephemeral { None } else { config_path };

    let mut app = App::new(config, config_path, session, initial_email);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("GoBarber TUI shutting down");
    Ok(())
}

/// Wire the session store to the API and the chosen storage backend
fn build_session(config: &Config, api_url: &str, ephemeral: bool) -> Result<SessionStore> {
    let api = ApiClient::new(api_url, config.request_timeout())
        .with_context(|| format!("Invalid API URL: {}", api_url))?;

    let storage: Arc<dyn KeyValueStore> = if ephemeral {
        info!("Using in-memory storage");
        Arc::new(MemoryStore::new())
    } else {
        let dir = Config::data_dir()?;
        let store = FileStore::new(&dir)?;
        info!(path = %store.path().display(), "Using file storage");
        Arc::new(store)
    };

    Ok(SessionStore::new(storage, Arc::new(api)))
}

async fn whoami(session: &SessionStore) -> Result<()> {
    let state = session.restore().await;
    match state.user() {
        Some(user) => println!("{}", serde_json::to_string_pretty(user.as_value())?),
        None => println!("Not signed in"),
    }
    Ok(())
}

async fn sign_out(session: &SessionStore) -> Result<()> {
    session.restore().await;
    session
        .sign_out()
        .await
        .context("Failed to remove the saved session")?;
    println!("Signed out");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Pick up restore or sign-in results before drawing
        app.sync_auth_state();

        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout so the spinner keeps moving
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        app.on_tick();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
