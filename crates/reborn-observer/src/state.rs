//! Shared application state for the API server.
//!
//! Handlers never hold game state of their own: every read takes a
//! snapshot from the [`GameStore`] and every command goes through it, so
//! the HTTP surface and the tick loop see one serialized history.

use std::sync::Arc;

use reborn_core::{GameStore, OperatorState};

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The live game state.
    pub store: Arc<GameStore>,
    /// Run loop controls, when a runner is attached.
    pub operator_state: Option<Arc<OperatorState>>,
}

impl AppState {
    /// State for a server without a run loop (queries and commands only).
    pub const fn new(store: Arc<GameStore>) -> Self {
        Self {
            store,
            operator_state: None,
        }
    }

    /// Attach run loop controls.
    #[must_use]
    pub fn with_operator(mut self, operator: Arc<OperatorState>) -> Self {
        self.operator_state = Some(operator);
        self
    }
}
