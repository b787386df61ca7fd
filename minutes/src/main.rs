//! auspol-minutes - live draft minutes from the command line.
//!
//! # Commands
//!
//! - `auspol-minutes fetch`: Print the current minutes once
//! - `auspol-minutes watch`: Poll the page and print each new revision
//!
//! # Environment Variables
//!
//! See the [`config`] module for available configuration options.

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use auspol_minutes::config::{Chamber, Config};
use auspol_minutes::session::{flatten, MinutesSession};
use auspol_minutes::types::{Entry, MinutesSnapshot, MinutesView};

/// Width of the timestamp column in listings, including padding.
const TIME_COLUMN_WIDTH: usize = 10;

/// auspol-minutes - live draft minutes of the Australian Parliament.
///
/// Fetches the live draft minutes page of a House of Representatives chamber
/// and prints its proceedings.
#[derive(Parser, Debug)]
#[command(name = "auspol-minutes")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    AUSPOL_CHAMBER             Chamber to follow: house or federation (default: house)
    AUSPOL_MINUTES_URL         Override the live minutes URL
    AUSPOL_TIMEOUT_SECS        HTTP request timeout (default: 30)
    AUSPOL_POLL_INTERVAL_SECS  Seconds between polls for 'watch' (default: 60)
    RUST_LOG                   Log filter (default: info)

EXAMPLES:
    # Print today's House minutes as plain text
    auspol-minutes fetch --flat

    # Print Federation Chamber minutes as JSON
    auspol-minutes fetch --chamber federation --json

    # Follow the House minutes, polling every 30 seconds
    auspol-minutes watch --interval 30
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the current minutes once and print them.
    Fetch {
        /// Chamber to fetch (house or federation).
        #[arg(short, long)]
        chamber: Option<Chamber>,

        /// Print entry text only, one block per entry.
        #[arg(long, conflicts_with = "json")]
        flat: bool,

        /// Print the structured minutes as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Poll the minutes page and print each new revision.
    ///
    /// Runs until interrupted with Ctrl+C.
    Watch {
        /// Chamber to follow (house or federation).
        #[arg(short, long)]
        chamber: Option<Chamber>,

        /// Seconds between polls.
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
}

/// Output format for `fetch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Listing,
    Flat,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    match cli.command {
        Command::Fetch {
            chamber,
            flat,
            json,
        } => {
            let output = match (flat, json) {
                (true, _) => Output::Flat,
                (_, true) => Output::Json,
                _ => Output::Listing,
            };
            runtime.block_on(run_fetch(apply_chamber(config, chamber), output))
        }
        Command::Watch { chamber, interval } => {
            let mut config = apply_chamber(config, chamber);
            if let Some(secs) = interval {
                config.poll_interval_secs = secs;
            }
            runtime.block_on(run_watch(config))
        }
    }
}

/// A chamber given on the command line takes precedence over the environment.
fn apply_chamber(config: Config, chamber: Option<Chamber>) -> Config {
    match chamber {
        Some(chamber) => config.with_chamber(chamber),
        None => config,
    }
}

/// Runs the fetch command.
async fn run_fetch(config: Config, output: Output) -> Result<()> {
    let mut session =
        MinutesSession::from_config(&config).context("Failed to create minutes session")?;

    let view = session
        .refresh(output == Output::Flat)
        .await
        .with_context(|| format!("Failed to fetch minutes from {}", config.minutes_url))?;

    let mut stdout = io::stdout().lock();
    match view {
        MinutesView::Flat(text) => write!(stdout, "{text}")?,
        MinutesView::Structured(snapshot) if output == Output::Json => {
            let json = serde_json::to_string_pretty(&snapshot)
                .context("Failed to serialize minutes")?;
            writeln!(stdout, "{json}")?;
        }
        MinutesView::Structured(snapshot) => write!(stdout, "{}", render_listing(&snapshot))?,
    }
    stdout.flush()?;

    Ok(())
}

/// Runs the watch command.
async fn run_watch(config: Config) -> Result<()> {
    let mut session =
        MinutesSession::from_config(&config).context("Failed to create minutes session")?;

    info!(
        chamber = %config.chamber,
        url = %config.minutes_url,
        interval_secs = config.poll_interval_secs,
        "Watching live minutes. Press Ctrl+C to stop."
    );

    let mut ticker = tokio::time::interval(config.poll_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut printed: Option<(NaiveDate, u64)> = None;

    loop {
        tokio::select! {
            _ = wait_for_shutdown() => {
                info!("Shutdown signal received");
                break;
            }

            _ = ticker.tick() => {
                match session.refresh(false).await {
                    Ok(MinutesView::Structured(snapshot)) => {
                        let key = (snapshot.date, snapshot.revision);
                        if printed != Some(key) {
                            info!(
                                date = %snapshot.date,
                                revision = snapshot.revision,
                                entries = snapshot.entries.len(),
                                "New minutes revision"
                            );
                            let mut stdout = io::stdout().lock();
                            write!(stdout, "{}", flatten(&snapshot))?;
                            stdout.flush()?;
                            printed = Some(key);
                        }
                    }
                    Ok(MinutesView::Flat(text)) => print!("{text}"),
                    Err(e) if e.is_unavailable() => {
                        warn!(error = %e, "Minutes unavailable, will retry");
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to refresh minutes");
                    }
                }
            }
        }
    }

    info!("Watch stopped");
    Ok(())
}

/// Renders a snapshot as a timestamped listing with children indented.
fn render_listing(snapshot: &MinutesSnapshot) -> String {
    let mut out = format!(
        "{} (revision {})\n\n",
        snapshot.date.format("%A, %-d %B %Y"),
        snapshot.revision
    );
    for entry in &snapshot.entries {
        push_entry(&mut out, entry, 0);
        for child in &entry.children {
            push_entry(&mut out, child, 1);
        }
    }
    out
}

fn push_entry(out: &mut String, entry: &Entry, depth: usize) {
    let indent = "    ".repeat(depth);
    let time = entry
        .timestamp
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    let mut lines = entry.content.lines();
    let first = lines.next().unwrap_or_default();
    out.push_str(&format!("{indent}{time:<TIME_COLUMN_WIDTH$}{first}\n"));
    for line in lines {
        out.push_str(&format!("{indent}{:<TIME_COLUMN_WIDTH$}{line}\n", ""));
    }
}

/// Initializes the logging subsystem.
///
/// Logs go to stderr so stdout carries only the minutes.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
