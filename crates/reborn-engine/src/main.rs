//! Engine binary for the Reborn simulation.
//!
//! Wires the live [`GameStore`] to its three drivers: the timed tick loop,
//! the autosave task, and the HTTP API. It runs until a configured bound
//! is reached, the operator stops it over HTTP, or `Ctrl-C` arrives, then
//! writes a final save.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `reborn-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Restore the save, or start a first life
//! 4. Create operator state from simulation bounds
//! 5. Start the API server and the autosave task
//! 6. Run the tick loop
//! 7. Write the final save and log the result

mod autosave;
mod error;
mod narrator;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reborn_content::Catalog;
use reborn_core::{GameStore, OperatorState, SimulationConfig, TickConfig};
use reborn_observer::server::{ServerConfig, ServerError, start_server};
use reborn_observer::state::AppState;
use reborn_save::FileSaveStore;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::autosave::spawn_autosave;
use crate::error::EngineError;
use crate::narrator::Narrator;

/// Configuration file, relative to the working directory.
const CONFIG_PATH: &str = "reborn-config.yaml";

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config = SimulationConfig::load_or_default(Path::new(CONFIG_PATH))?;

    // 2. Initialize structured logging.
    init_logging(&config.logging.level)?;
    info!("reborn-engine starting");
    info!(
        tick_interval_ms = config.engine.tick_interval_ms,
        autosave_interval_ms = config.engine.autosave_interval_ms,
        max_step_seconds = config.engine.max_step_seconds,
        save_path = config.storage.save_path,
        observer_enabled = config.observer.enabled,
        "Configuration loaded"
    );

    // 3. Restore the save.
    let saves = Arc::new(FileSaveStore::new(&config.storage.save_path));
    let initial = reborn_save::load_or_default(saves.as_ref()).await;
    let store = Arc::new(GameStore::new(
        initial,
        Catalog::standard(),
        TickConfig::from(&config.engine),
    ));

    // 4. Create operator state.
    let operator = Arc::new(OperatorState::new(
        config.engine.tick_interval_ms,
        &config.simulation,
    ));
    info!(
        max_ticks = operator.max_ticks(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        tick_interval_ms = operator.tick_interval_ms(),
        "Operator state initialized"
    );

    // 5. Start the API server and the autosave task.
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = if config.observer.enabled {
        let app_state = AppState::new(Arc::clone(&store)).with_operator(Arc::clone(&operator));
        Some(spawn_server(
            ServerConfig::from(&config.observer),
            Arc::new(app_state),
            shutdown_rx,
        ))
    } else {
        info!("API server disabled");
        None
    };

    let autosave = spawn_autosave(
        Arc::clone(&store),
        Arc::clone(&saves),
        Duration::from_millis(config.engine.autosave_interval_ms),
    );

    {
        let operator = Arc::clone(&operator);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, stopping");
                operator.request_stop();
            }
        });
    }

    // 6. Run the tick loop.
    let mut narrator = Narrator::new();
    let result = reborn_core::run_simulation(&store, &operator, &mut narrator).await;
    autosave.abort();

    // 7. Final save, server shutdown, report.
    if config.storage.save_on_shutdown {
        reborn_save::save(saves.as_ref(), &store.snapshot()).await?;
        info!(path = %saves.path().display(), "Final save written");
    }

    if let Some(handle) = server {
        shutdown_tx.send(()).ok();
        match handle.await {
            Ok(served) => served?,
            Err(e) => warn!(error = %e, "API server task did not finish cleanly"),
        }
    }

    reborn_core::log_simulation_end(&result, &store.snapshot());
    info!(
        milestones = narrator.milestones(),
        levels_gained = narrator.levels(),
        lives_ended = narrator.lives_ended(),
        "reborn-engine shutdown complete"
    );

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_logging(level: &str) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| EngineError::Logging {
            message: format!("invalid log level {level:?}: {e}"),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| EngineError::Logging {
            message: e.to_string(),
        })
}

/// Run the API server in its own task until `shutdown` fires.
fn spawn_server(
    config: ServerConfig,
    state: Arc<AppState>,
    shutdown: oneshot::Receiver<()>,
) -> JoinHandle<Result<(), ServerError>> {
    tokio::spawn(async move {
        let served = start_server(&config, state, async move {
            shutdown.await.ok();
        })
        .await;
        if let Err(e) = &served {
            error!(error = %e, "API server failed");
        }
        served
    })
}
