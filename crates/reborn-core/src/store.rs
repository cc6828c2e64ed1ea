//! The single owner of the live game state.
//!
//! [`GameStore`] serializes every transition -- ticks from the runner and
//! commands from the HTTP surface -- through one [`watch`] channel. Each
//! transition reads the current snapshot, computes the next one with the
//! pure functions in [`tick`](crate::tick) and [`command`](crate::command),
//! and publishes it. Readers hold cheap [`Arc`] snapshots and never block a
//! writer for longer than a pointer swap.

use std::sync::Arc;

use reborn_content::Catalog;
use reborn_types::GameState;
use tokio::sync::watch;
use tracing::info;

use crate::command::{Command, apply_command};
use crate::tick::{TickConfig, TickSummary, run_tick};

/// Shared, serialized access to the current [`GameState`].
#[derive(Debug)]
pub struct GameStore {
    catalog: &'static Catalog,
    tick_config: TickConfig,
    sender: watch::Sender<Arc<GameState>>,
}

impl GameStore {
    /// Create a store holding `initial`.
    pub fn new(initial: GameState, catalog: &'static Catalog, tick_config: TickConfig) -> Self {
        let (sender, _receiver) = watch::channel(Arc::new(initial));
        Self {
            catalog,
            tick_config,
            sender,
        }
    }

    /// A store over the standard catalog with default tick parameters.
    pub fn standard(initial: GameState) -> Self {
        Self::new(initial, Catalog::standard(), TickConfig::default())
    }

    /// The catalog every transition reads.
    pub const fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// Time parameters of the tick.
    pub const fn tick_config(&self) -> &TickConfig {
        &self.tick_config
    }

    /// The current state.
    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.sender.borrow())
    }

    /// Receive every published state.
    pub fn subscribe(&self) -> watch::Receiver<Arc<GameState>> {
        self.sender.subscribe()
    }

    /// Advance the live state by `dt_raw` seconds.
    pub fn tick(&self, dt_raw: f64) -> TickSummary {
        let mut summary = TickSummary::default();
        self.sender.send_modify(|current| {
            let (next, tick_summary) = run_tick(self.catalog, &self.tick_config, &**current, dt_raw);
            *current = Arc::new(next);
            summary = tick_summary;
        });
        if let Some(reason) = summary.reset {
            info!(reason = %reason, "Life ended");
        }
        summary
    }

    /// Apply a player command and return the resulting state.
    pub fn apply(&self, command: &Command) -> Arc<GameState> {
        let mut published = None;
        self.sender.send_modify(|current| {
            let next = Arc::new(apply_command(self.catalog, &**current, command));
            published = Some(Arc::clone(&next));
            *current = next;
        });
        info!(command = command.kind(), "Command applied");
        published.unwrap_or_else(|| self.snapshot())
    }

    /// Replace the live state wholesale, e.g. after loading a save.
    pub fn replace(&self, state: GameState) {
        self.sender.send_replace(Arc::new(state));
    }
}
