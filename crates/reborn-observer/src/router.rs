//! Route table for the API server.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, operator, ws};

/// Build the complete router.
///
/// Queries live under `/api`, commands at `POST /api/commands`, run loop
/// controls under `/api/operator`, and the live stream at `/ws/state`.
/// CORS allows any origin so a browser client can be served from
/// anywhere.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws/state", get(ws::ws_state))
        // Queries
        .route("/api/health", get(handlers::health))
        .route("/api/state", get(handlers::get_state))
        .route("/api/activities", get(handlers::list_activities))
        .route("/api/activities/{id}", get(handlers::get_activity))
        .route("/api/jobs", get(handlers::list_jobs))
        .route("/api/jobs/{id}", get(handlers::get_job))
        .route("/api/upgrades", get(handlers::list_upgrades))
        .route("/api/shop", get(handlers::get_shop))
        .route("/api/reincarnation", get(handlers::get_reincarnation))
        .route("/api/log", get(handlers::get_log))
        // Commands
        .route("/api/commands", post(handlers::post_command))
        // Operator
        .route("/api/operator/pause", post(operator::pause))
        .route("/api/operator/resume", post(operator::resume))
        .route("/api/operator/speed", post(operator::set_speed))
        .route("/api/operator/stop", post(operator::stop))
        .route("/api/operator/status", get(operator::status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
