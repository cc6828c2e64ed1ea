//! Operator endpoints for run loop control.
//!
//! These act on the [`OperatorState`](reborn_core::OperatorState) shared
//! with the runner. A server started without a runner answers every one
//! of them with `503`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/operator/pause` | Freeze in-game time |
//! | `POST` | `/api/operator/resume` | Unfreeze in-game time |
//! | `POST` | `/api/operator/speed` | Set the tick interval (ms) |
//! | `POST` | `/api/operator/stop` | End the run after the current tick |
//! | `GET` | `/api/operator/status` | Run status |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use reborn_core::OperatorState;
use reborn_core::operator::MIN_TICK_INTERVAL_MS;
use tracing::info;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/operator/speed`.
#[derive(Debug, serde::Deserialize)]
pub struct SetSpeedRequest {
    /// New tick interval in milliseconds.
    pub tick_interval_ms: u64,
}

/// Generic success response.
#[derive(Debug, serde::Serialize)]
struct OperatorResponse {
    ok: bool,
    message: String,
}

fn operator(state: &AppState) -> Result<&Arc<OperatorState>, ObserverError> {
    state
        .operator_state
        .as_ref()
        .ok_or_else(|| ObserverError::Unavailable("no run loop attached".to_owned()))
}

fn acknowledged(message: impl Into<String>) -> Json<OperatorResponse> {
    Json(OperatorResponse {
        ok: true,
        message: message.into(),
    })
}

// ---------------------------------------------------------------------------
// POST /api/operator/pause
// ---------------------------------------------------------------------------

/// Pause the tick loop. Commands are still accepted while paused.
pub async fn pause(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ObserverError> {
    operator(&state)?.pause();
    info!("Simulation paused by operator");
    Ok(acknowledged("Simulation paused"))
}

// ---------------------------------------------------------------------------
// POST /api/operator/resume
// ---------------------------------------------------------------------------

/// Resume the tick loop after a pause.
pub async fn resume(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    operator(&state)?.resume();
    info!("Simulation resumed by operator");
    Ok(acknowledged("Simulation resumed"))
}

// ---------------------------------------------------------------------------
// POST /api/operator/speed
// ---------------------------------------------------------------------------

/// Change the tick interval at runtime.
///
/// The interval only changes how often the loop ticks; each tick still
/// advances by the wall time measured since the previous one.
pub async fn set_speed(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetSpeedRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let previous = operator(&state)?
        .set_tick_interval_ms(body.tick_interval_ms)
        .ok_or_else(|| {
            ObserverError::InvalidRequest(format!(
                "tick_interval_ms must be at least {MIN_TICK_INTERVAL_MS}"
            ))
        })?;

    info!(
        previous_ms = previous,
        new_ms = body.tick_interval_ms,
        "Tick interval changed by operator"
    );
    Ok(Json(serde_json::json!({
        "ok": true,
        "message": format!(
            "Tick interval changed from {previous}ms to {}ms",
            body.tick_interval_ms
        ),
        "previous_interval_ms": previous,
        "new_interval_ms": body.tick_interval_ms,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/operator/stop
// ---------------------------------------------------------------------------

/// Ask the run loop to finish. The loop ends before its next tick and the
/// engine writes a final save.
pub async fn stop(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ObserverError> {
    operator(&state)?.request_stop();
    info!("Stop requested by operator");
    Ok(acknowledged("Stop requested, the simulation will end after the current tick"))
}

// ---------------------------------------------------------------------------
// GET /api/operator/status
// ---------------------------------------------------------------------------

/// Run status: tick count, pause state, speed, limits, and end reason.
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    Ok(Json(operator(&state)?.status().await))
}
