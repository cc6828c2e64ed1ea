//! `WebSocket` stream of the live state.
//!
//! Clients connect to `GET /ws/state`, receive the current state view at
//! once, then one JSON text frame each time a tick or command publishes a
//! new state. Intermediate states a slow client misses are skipped; it
//! always receives the newest.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use reborn_core::view::state_view;
use reborn_types::GameState;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade to a `WebSocket` and begin streaming state views.
///
/// # Route
///
/// `GET /ws/state`
pub async fn ws_state(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Send the view of `snapshot`. Returns `false` once the client is gone.
async fn send_view(socket: &mut WebSocket, state: &AppState, snapshot: &GameState) -> bool {
    let json = match serde_json::to_string(&state_view(state.store.catalog(), snapshot)) {
        Ok(j) => j,
        Err(e) => {
            warn!("Failed to serialize state view: {e}");
            return true;
        }
    };
    if socket.send(Message::Text(json.into())).await.is_err() {
        debug!("WebSocket client disconnected (send failed)");
        return false;
    }
    true
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    let mut rx = state.store.subscribe();
    let first = Arc::clone(&rx.borrow_and_update());
    if !send_view(&mut socket, &state, &first).await {
        return;
    }

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    debug!("State channel closed, shutting down WebSocket");
                    return;
                }
                let snapshot = Arc::clone(&rx.borrow_and_update());
                if !send_view(&mut socket, &state, &snapshot).await {
                    return;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {}
                }
            }
        }
    }
}
