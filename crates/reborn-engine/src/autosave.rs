//! Periodic saving of the live state.
//!
//! The autosave task runs beside the tick loop and never blocks it: it
//! takes a snapshot from the [`GameStore`], encodes it, and writes it to a
//! [`SaveStore`]. A failed write is logged and retried on the next
//! interval.

use std::sync::Arc;
use std::time::Duration;

use reborn_core::GameStore;
use reborn_save::SaveStore;
use reborn_types::GameState;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Tracks the last snapshot written so an unchanged state (a paused game)
/// is not rewritten every interval.
#[derive(Debug, Default)]
pub struct Autosaver {
    last_saved: Option<Arc<GameState>>,
    saves: u64,
    failures: u64,
}

impl Autosaver {
    /// A saver that has written nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful writes so far.
    pub const fn saves(&self) -> u64 {
        self.saves
    }

    /// Failed writes so far.
    pub const fn failures(&self) -> u64 {
        self.failures
    }

    /// Write the current snapshot if it differs from the last one written.
    ///
    /// Returns whether a record was written.
    pub async fn save_if_changed<S: SaveStore>(&mut self, store: &GameStore, saves: &S) -> bool {
        let snapshot = store.snapshot();
        if self
            .last_saved
            .as_ref()
            .is_some_and(|last| Arc::ptr_eq(last, &snapshot))
        {
            debug!("State unchanged since last save, skipping");
            return false;
        }
        match reborn_save::save(saves, &snapshot).await {
            Ok(()) => {
                self.last_saved = Some(snapshot);
                self.saves = self.saves.saturating_add(1);
                true
            }
            Err(e) => {
                self.failures = self.failures.saturating_add(1);
                warn!(error = %e, "Autosave failed, retrying next interval");
                false
            }
        }
    }
}

/// Spawn the autosave task. It runs until the handle is aborted.
pub fn spawn_autosave<S: SaveStore + 'static>(
    store: Arc<GameStore>,
    saves: Arc<S>,
    every: Duration,
) -> JoinHandle<()> {
    info!(interval_ms = every.as_millis(), "Autosave started");
    tokio::spawn(async move {
        let mut autosaver = Autosaver::new();
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the state was just loaded.
        interval.tick().await;
        loop {
            interval.tick().await;
            if autosaver.save_if_changed(&store, saves.as_ref()).await {
                debug!(
                    saves = autosaver.saves(),
                    failures = autosaver.failures(),
                    "Autosaved"
                );
            }
        }
    })
}
