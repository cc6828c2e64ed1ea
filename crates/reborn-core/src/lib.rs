//! Tick transition, command surface, and run loop for the Reborn simulation.
//!
//! The pure transitions ([`tick::run_tick`], [`command::apply_command`]) turn
//! one [`GameState`](reborn_types::GameState) into the next. [`GameStore`]
//! serializes them over the live state, and [`runner::run_simulation`]
//! drives ticks on a timer under [`OperatorState`] controls.
//!
//! # Modules
//!
//! - [`command`] -- The [`Command`] enum and how each command changes state.
//! - [`config`] -- Configuration loading from `reborn-config.yaml`.
//! - [`operator`] -- Pause, resume, speed, and stop controls.
//! - [`runner`] -- The timed tick loop.
//! - [`store`] -- [`GameStore`], the single owner of the live state.
//! - [`tick`] -- The tick transition and its [`TickSummary`].
//! - [`view`] -- Read models for presentation.

pub mod command;
pub mod config;
pub mod operator;
pub mod runner;
pub mod store;
pub mod tick;
pub mod view;

pub use command::{Command, apply_command};
pub use config::{ConfigError, SimulationConfig};
pub use operator::{OperatorState, SimulationEndReason, SimulationStatus};
pub use runner::{NoOpCallback, SimulationResult, TickCallback, log_simulation_end, run_simulation};
pub use store::GameStore;
pub use tick::{TickConfig, TickSummary, run_tick, tick};
