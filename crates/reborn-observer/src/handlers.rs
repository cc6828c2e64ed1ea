//! Query and command endpoint handlers.
//!
//! Every query reads one snapshot from the [`GameStore`](reborn_core::GameStore)
//! and derives its read model from it, so a single response is always
//! internally consistent.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/health` | Liveness and a one-line summary |
//! | `GET` | `/api/state` | Full state plus derived values |
//! | `GET` | `/api/activities` | Activities with unlock status |
//! | `GET` | `/api/activities/{id}` | One activity |
//! | `GET` | `/api/jobs` | Jobs with unlock status |
//! | `GET` | `/api/jobs/{id}` | One job |
//! | `GET` | `/api/upgrades` | Upgrade levels and prices |
//! | `GET` | `/api/shop` | Housing, food, and other items |
//! | `GET` | `/api/reincarnation` | What ending this life now yields |
//! | `GET` | `/api/log` | Recent log lines |
//! | `POST` | `/api/commands` | Apply a player command |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use reborn_core::Command;
use reborn_core::view::{
    activity_views, job_views, reincarnation_view, shop_view, state_view, upgrade_views,
};
use tracing::debug;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/log`.
#[derive(Debug, serde::Deserialize)]
pub struct LogQuery {
    /// Return only the most recent `limit` lines.
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "day": snapshot.current_day(),
        "total_lives": snapshot.total_lives,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/state
// ---------------------------------------------------------------------------

/// The current state with derived values (day, age, joy, upkeep,
/// multipliers).
pub async fn get_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    Json(state_view(state.store.catalog(), &snapshot))
}

// ---------------------------------------------------------------------------
// GET /api/activities, /api/activities/{id}
// ---------------------------------------------------------------------------

/// All activities in unlock order.
pub async fn list_activities(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    let activities = activity_views(state.store.catalog(), &snapshot);
    Json(serde_json::json!({
        "count": activities.len(),
        "activities": activities,
    }))
}

/// One activity by id.
pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.store.snapshot();
    activity_views(state.store.catalog(), &snapshot)
        .into_iter()
        .find(|view| view.def.id == id.as_str())
        .map(Json)
        .ok_or_else(|| ObserverError::NotFound(format!("activity {id} not found")))
}

// ---------------------------------------------------------------------------
// GET /api/jobs, /api/jobs/{id}
// ---------------------------------------------------------------------------

/// All jobs in unlock order.
pub async fn list_jobs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    let jobs = job_views(state.store.catalog(), &snapshot);
    Json(serde_json::json!({
        "count": jobs.len(),
        "jobs": jobs,
    }))
}

/// One job by id.
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.store.snapshot();
    job_views(state.store.catalog(), &snapshot)
        .into_iter()
        .find(|view| view.def.id == id.as_str())
        .map(Json)
        .ok_or_else(|| ObserverError::NotFound(format!("job {id} not found")))
}

// ---------------------------------------------------------------------------
// GET /api/upgrades
// ---------------------------------------------------------------------------

/// Permanent upgrades with their next price.
pub async fn list_upgrades(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    Json(serde_json::json!({
        "echoes": snapshot.echoes,
        "upgrades": upgrade_views(state.store.catalog(), &snapshot),
    }))
}

// ---------------------------------------------------------------------------
// GET /api/shop
// ---------------------------------------------------------------------------

/// The shop tables with selection and ownership.
pub async fn get_shop(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    Json(shop_view(state.store.catalog(), &snapshot))
}

// ---------------------------------------------------------------------------
// GET /api/reincarnation
// ---------------------------------------------------------------------------

/// Echo gain and starting credits if this life ended now.
pub async fn get_reincarnation(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(reincarnation_view(&state.store.snapshot()))
}

// ---------------------------------------------------------------------------
// GET /api/log
// ---------------------------------------------------------------------------

/// Log lines, oldest first.
pub async fn get_log(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    let skip = query
        .limit
        .map_or(0, |limit| snapshot.log.len().saturating_sub(limit));
    let lines: Vec<&String> = snapshot.log.iter().skip(skip).collect();
    Json(serde_json::json!({
        "count": lines.len(),
        "lines": lines,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/commands
// ---------------------------------------------------------------------------

/// Apply one player command and return the resulting state.
///
/// Commands are accepted while the run loop is paused. An id the catalog
/// does not know is not an error: the command falls back or does nothing,
/// and the unchanged state is returned.
pub async fn post_command(
    State(state): State<Arc<AppState>>,
    Json(command): Json<Command>,
) -> impl IntoResponse {
    let next = state.store.apply(&command);
    debug!(command = command.kind(), "Command received over HTTP");
    Json(state_view(state.store.catalog(), &next))
}
