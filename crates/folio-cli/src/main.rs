//! `folio`: browse and publish student portfolios from the terminal.
//!
//! # Usage
//!
//! ```text
//! folio                                   # interactive listing
//! folio --config ~/.config/folio.toml list --skill Rust --year 2026卒
//! folio --email me@example.com --password secret post \
//!   --title "Robot Arm" --genre ゲーム開発 --skill Go --image shot.png
//! ```

mod app;
mod commands;
mod settings;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use commands::Command;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_client::ApiClient;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Browse and publish student portfolios")]
struct Args {
  /// Path to a TOML config file (base_url, timeout_secs, email, password).
  #[arg(short, long, value_name = "FILE", default_value = "folio.toml")]
  config: PathBuf,

  /// Base URL of the backend (default: http://localhost:8080).
  #[arg(long)]
  url: Option<String>,

  /// Account email; logs in at startup together with --password.
  #[arg(long)]
  email: Option<String>,

  /// Account password (plaintext).
  #[arg(long)]
  password: Option<String>,

  /// Where the interactive UI writes its logs.
  #[arg(long, value_name = "FILE", default_value = "folio.log")]
  log_file: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let settings = Settings::load(&args.config)?.with_overrides(args.url, args.email, args.password);

  match args.command {
    Some(command) => {
      tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();
      commands::run(command, &settings).await
    }
    None => {
      // Logs would corrupt the alternate screen.
      let log = File::create(&args.log_file)
        .with_context(|| format!("creating log file {}", args.log_file.display()))?;
      tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();
      run_tui(settings).await
    }
  }
}

fn env_filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn run_tui(settings: Settings) -> Result<()> {
  let client = ApiClient::new(settings.api_config()).context("building HTTP client")?;
  if let Err(e) = commands::login(&client, &settings).await {
    // Browsing works without a session.
    tracing::warn!(error = %e, "continuing without a session");
  }

  let mut app = App::new(client);
  app.load().await;

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      // Release events would double every keystroke on Windows.
      Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key).await? {
          break;
        }
      }
      // Resize is picked up by the next draw.
      _ => {}
    }
  }

  Ok(())
}
