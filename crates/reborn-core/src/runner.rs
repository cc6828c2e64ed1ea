//! Simulation loop runner with operator controls.
//!
//! [`run_simulation`] drives [`GameStore::tick`] on a timer with:
//!
//! - **Bounded runs**: stop after `max_ticks` or `max_real_time_seconds`
//! - **Pause/resume**: paused time does not count as elapsed
//! - **Variable tick speed**: the interval is re-read every iteration
//! - **Operator stop**: a clean stop requested over HTTP or on shutdown
//!
//! Each tick is fed the real time elapsed since the previous one; the tick
//! itself clamps long gaps.

use std::sync::Arc;

use reborn_types::GameState;
use tokio::time::{Duration, Instant};
use tracing::{info, warn};

use crate::operator::{OperatorState, SimulationEndReason};
use crate::store::GameStore;
use crate::tick::TickSummary;

/// Result of a simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the run ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick ran.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
    /// Lives that ended during the run.
    pub lives_ended: u64,
}

/// Callback invoked after each tick.
pub trait TickCallback: Send {
    /// Called with the tick's summary and the state it produced.
    fn on_tick(&mut self, summary: &TickSummary, state: &GameState);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &GameState) {}
}

/// Run the tick loop until a termination condition is met.
pub async fn run_simulation(
    store: &GameStore,
    operator: &Arc<OperatorState>,
    callback: &mut dyn TickCallback,
) -> SimulationResult {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;
    let mut lives_ended: u64 = 0;
    let mut last_tick = Instant::now();

    info!(
        max_ticks = operator.max_ticks(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        tick_interval_ms = operator.tick_interval_ms(),
        "Simulation starting"
    );

    let end_reason = loop {
        // --- Check pause ---
        if operator.is_paused() {
            info!("Simulation paused, waiting for resume...");
            operator.wait_if_paused().await;
            last_tick = Instant::now();
            info!("Simulation resumed");
        }

        // --- Check stop request ---
        if operator.is_stop_requested() {
            info!("Operator stop requested");
            break SimulationEndReason::OperatorStop;
        }

        // --- Check time limit ---
        if operator.time_limit_reached() {
            info!(
                max_seconds = operator.max_real_time_seconds(),
                elapsed = operator.elapsed_seconds(),
                "Real-time limit reached"
            );
            break SimulationEndReason::MaxRealTimeReached;
        }

        // --- Execute tick ---
        let now = Instant::now();
        let dt = now.saturating_duration_since(last_tick).as_secs_f64();
        last_tick = now;

        let summary = store.tick(dt);
        total_ticks = total_ticks.saturating_add(1);
        operator.record_tick();
        if summary.reset.is_some() {
            lives_ended = lives_ended.saturating_add(1);
        }

        callback.on_tick(&summary, &store.snapshot());
        last_summary = Some(summary);

        // --- Check tick limit ---
        if operator.tick_limit_reached(total_ticks) {
            info!(
                ticks = total_ticks,
                max_ticks = operator.max_ticks(),
                "Tick limit reached"
            );
            break SimulationEndReason::MaxTicksReached;
        }

        // --- Sleep for tick interval ---
        let interval_ms = operator.tick_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
        }
    };

    operator.set_end_reason(end_reason.clone()).await;
    SimulationResult {
        end_reason,
        final_summary: last_summary,
        total_ticks,
        lives_ended,
    }
}

/// Log the end of a run together with the final state.
pub fn log_simulation_end(result: &SimulationResult, state: &GameState) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        lives_ended = result.lives_ended,
        "Simulation ended"
    );

    if result.final_summary.is_some() {
        info!(
            day = state.current_day(),
            age = state.age_years(),
            credits = state.credits,
            echoes = state.echoes,
            lives = state.total_lives,
            "Final state"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}
