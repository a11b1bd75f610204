//! Headless runner for the ramen stall.
//!
//! Wires the game orchestrator to the wall clock, a JSON save file, and
//! a tracing observer, then lets the autopilot cook play one session.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line arguments
//! 2. Load configuration from `ramen-config.yaml` (defaults if missing)
//! 3. Initialize structured logging (tracing)
//! 4. Open the save file and build the game
//! 5. Spawn the game loop and start a session
//! 6. Let the autopilot play until game over or the time limit
//! 7. Shut the loop down and log the result

mod autopilot;
mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use ramen_core::clock::SystemClock;
use ramen_core::config::{GameConfig, LogFormat, LoggingConfig};
use ramen_core::game::Game;
use ramen_core::observer::TracingObserver;
use ramen_core::runner;
use ramen_store::JsonFileStore;
use ramen_types::GameState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::autopilot::Autopilot;
use crate::error::EngineError;

const DEFAULT_CONFIG_PATH: &str = "ramen-config.yaml";
const CONFIG_ENV: &str = "RAMEN_CONFIG";
const DEFAULT_SECONDS: u64 = 120;
const AUTOPILOT_STEP: Duration = Duration::from_millis(250);

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    config: PathBuf,
    seconds: u64,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if startup fails or the game loop dies.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments.
    let args = parse_args(std::env::args().skip(1), std::env::var(CONFIG_ENV).ok())?;

    // 2. Load configuration.
    let config = load_config(&args.config)?;

    // 3. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        config = %args.config.display(),
        seconds = args.seconds,
        seats = config.stall.seats,
        pots = config.stall.pots,
        tick_interval_ms = config.timing.tick_interval_ms,
        "ramen-engine starting"
    );

    // 4. Build the game.
    let store = JsonFileStore::new(config.save.path.clone());
    let catalog = config.catalog.clone();
    let tick_interval = Duration::from_millis(config.timing.tick_interval_ms);
    let game = Game::new(
        config,
        Arc::new(SystemClock::new()),
        Box::new(store),
        Box::new(TracingObserver),
    )
    .map_err(EngineError::from)?;
    info!(
        money = game.money(),
        high_score = game.save_record().high_score,
        "Save record loaded"
    );

    // 5. Spawn the loop and start a session.
    let (handle, task) = runner::spawn_game(game, tick_interval);
    handle.start_game().await.map_err(EngineError::from)?;

    // 6. Play.
    let deadline = tokio::time::Instant::now()
        .checked_add(Duration::from_secs(args.seconds))
        .ok_or_else(|| EngineError::Args {
            message: format!("--seconds {} is too large", args.seconds),
        })?;
    let pilot = Autopilot::new(handle.clone(), catalog);
    let mut steps = tokio::time::interval(AUTOPILOT_STEP);
    loop {
        steps.tick().await;
        let snapshot = pilot.step().await?;
        if snapshot.state == GameState::GameOver {
            info!(served = snapshot.session.served, "Game over");
            break;
        }
        if tokio::time::Instant::now() >= deadline {
            info!(served = snapshot.session.served, "Time limit reached");
            break;
        }
    }

    // 7. Shut down and report.
    handle.shutdown().await.map_err(EngineError::from)?;
    let game = task.await.map_err(EngineError::from)?;
    let record = game.save_record();
    info!(
        currency = record.currency,
        high_score = record.high_score,
        total_served = record.total_served,
        best_streak = record.best_streak,
        "ramen-engine stopped"
    );
    Ok(())
}

/// Parse `--config <path>` and `--seconds <n>`.
///
/// The config path falls back to `env_config`, then to
/// `ramen-config.yaml`.
fn parse_args(
    args: impl IntoIterator<Item = String>,
    env_config: Option<String>,
) -> Result<Args, EngineError> {
    let mut config = env_config.map(PathBuf::from);
    let mut seconds = DEFAULT_SECONDS;

    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let value = args.next().ok_or_else(|| EngineError::Args {
            message: format!("{flag} needs a value"),
        })?;
        match flag.as_str() {
            "--config" => config = Some(PathBuf::from(value)),
            "--seconds" => {
                seconds = value.parse().map_err(|e| EngineError::Args {
                    message: format!("--seconds {value}: {e}"),
                })?;
            }
            other => {
                return Err(EngineError::Args {
                    message: format!("unknown flag {other}"),
                });
            }
        }
    }

    Ok(Args {
        config: config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        seconds,
    })
}

/// Load and validate the configuration, using defaults when the file is
/// missing.
fn load_config(path: &Path) -> Result<GameConfig, EngineError> {
    let config = if path.exists() {
        GameConfig::from_file(path)?
    } else {
        GameConfig::default()
    };
    config.validate()?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
