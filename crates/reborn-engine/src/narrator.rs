//! Tick callback that turns notable ticks into log lines.
//!
//! The core logs transitions at `debug`; this callback surfaces the ones
//! a person watching the engine cares about (story milestones, the end of
//! a life) at `info`, and keeps running totals for the shutdown report.

use reborn_core::{TickCallback, TickSummary};
use reborn_types::GameState;
use tracing::{debug, info};

/// Counts and logs milestones as ticks complete.
#[derive(Debug, Default)]
pub struct Narrator {
    milestones: u64,
    levels: u64,
    lives_ended: u64,
}

impl Narrator {
    /// A narrator with nothing seen yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Story flags fired so far.
    pub const fn milestones(&self) -> u64 {
        self.milestones
    }

    /// Skill and mastery levels gained so far.
    pub const fn levels(&self) -> u64 {
        self.levels
    }

    /// Lives that ended so far.
    pub const fn lives_ended(&self) -> u64 {
        self.lives_ended
    }
}

impl TickCallback for Narrator {
    fn on_tick(&mut self, summary: &TickSummary, state: &GameState) {
        if summary.levels_gained > 0 {
            self.levels = self.levels.saturating_add(u64::from(summary.levels_gained));
            debug!(
                levels = summary.levels_gained,
                activity = %state.active_activity,
                "Levels gained"
            );
        }

        for flag in &summary.story_flags {
            self.milestones = self.milestones.saturating_add(1);
            info!(
                flag = flag.as_str(),
                day = state.current_day(),
                "Story milestone reached"
            );
        }

        if let Some(reason) = summary.reset {
            self.lives_ended = self.lives_ended.saturating_add(1);
            info!(
                reason = %reason,
                lives = state.total_lives,
                echoes = state.echoes,
                start_credits = state.credits,
                "A new life begins"
            );
        }
    }
}
