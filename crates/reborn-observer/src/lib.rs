//! Command and query API for the Reborn simulation.
//!
//! Serves read models of the live [`GameState`](reborn_types::GameState),
//! accepts player [`Command`](reborn_core::Command)s, streams every new
//! state over a `WebSocket`, and exposes operator controls over the run
//! loop.
//!
//! # Modules
//!
//! - [`error`] -- [`ObserverError`](error::ObserverError) and its HTTP mapping.
//! - [`handlers`] -- Query endpoints and the command endpoint.
//! - [`operator`] -- Pause, resume, speed, stop, and status endpoints.
//! - [`router`] -- Route table with CORS and request tracing.
//! - [`server`] -- TCP binding and serving.
//! - [`state`] -- [`AppState`](state::AppState) shared by every handler.
//! - [`ws`] -- Live state stream.

pub mod error;
pub mod handlers;
pub mod operator;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;
