//! Player commands and how they transform the state.
//!
//! Every command is total: ids the catalog does not know leave the state
//! untouched (shop, upgrades) or fall back to a catalog default (activity,
//! job). Selecting a locked activity or job is allowed; the tick simply
//! pays nothing for it until it unlocks.

use reborn_content::Catalog;
use reborn_progression::{ResetReason, job_start_delay_seconds, reincarnate, try_buy_upgrade};
use reborn_types::{ActivityId, GameState, ItemId, JobId, UpgradeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A player intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Switch the active activity.
    SetActivity {
        /// Target activity.
        id: ActivityId,
    },
    /// Take a job, or quit with `None`.
    SetJob {
        /// Target job.
        id: Option<JobId>,
    },
    /// Move to another housing option.
    SelectHousing {
        /// Housing item.
        id: ItemId,
    },
    /// Change diet, or stop buying food with `None`.
    SelectFood {
        /// Food item.
        id: Option<ItemId>,
    },
    /// Buy an "other" item; it starts switched on.
    BuyOther {
        /// Item to buy.
        id: ItemId,
    },
    /// Switch an owned "other" item on or off.
    ToggleOtherActive {
        /// Owned item.
        id: ItemId,
    },
    /// Spend echoes on one level of an upgrade.
    BuyUpgrade {
        /// Upgrade to buy.
        id: UpgradeId,
    },
    /// End this life by choice.
    Reincarnate,
}

impl Command {
    /// Short name used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SetActivity { .. } => "set_activity",
            Self::SetJob { .. } => "set_job",
            Self::SelectHousing { .. } => "select_housing",
            Self::SelectFood { .. } => "select_food",
            Self::BuyOther { .. } => "buy_other",
            Self::ToggleOtherActive { .. } => "toggle_other_active",
            Self::BuyUpgrade { .. } => "buy_upgrade",
            Self::Reincarnate => "reincarnate",
        }
    }
}

/// Apply `command` to `state`, returning the next state.
pub fn apply_command(catalog: &Catalog, state: &GameState, command: &Command) -> GameState {
    let mut next = state.clone();
    match command {
        Command::SetActivity { id } => {
            next.active_activity = catalog.activity(id.as_str()).id.clone();
        }
        Command::SetJob { id } => set_job(catalog, &mut next, id.as_ref()),
        Command::SelectHousing { id } => {
            if catalog.housing(id.as_str()).is_some() {
                next.selected_housing = id.clone();
            } else {
                ignored(command);
            }
        }
        Command::SelectFood { id: None } => next.selected_food = None,
        Command::SelectFood { id: Some(id) } => {
            if catalog.food(id.as_str()).is_some() {
                next.selected_food = Some(id.clone());
            } else {
                ignored(command);
            }
        }
        Command::BuyOther { id } => {
            if catalog.other(id.as_str()).is_some() {
                next.owned_other.insert(id.clone());
                next.active_other.insert(id.clone());
            } else {
                ignored(command);
            }
        }
        Command::ToggleOtherActive { id } => {
            if !next.owned_other.contains(id) {
                ignored(command);
            } else if !next.active_other.remove(id) {
                next.active_other.insert(id.clone());
            }
        }
        Command::BuyUpgrade { id } => match try_buy_upgrade(catalog, state, id.as_str()) {
            Ok(bought) => next = bought,
            Err(e) => debug!(command = command.kind(), error = %e, "Upgrade not bought"),
        },
        Command::Reincarnate => next = reincarnate(state, ResetReason::Manual),
    }
    next
}

/// Switching to a different job restarts the start delay and quitting
/// clears it. Re-selecting the current job leaves a running wait as it is.
fn set_job(catalog: &Catalog, state: &mut GameState, id: Option<&JobId>) {
    let target = id.and_then(|id| catalog.job(id.as_str())).map(|job| job.id.clone());
    state.job_wait_seconds_remaining = match &target {
        Some(job) if state.active_job.as_ref() == Some(job) => state.job_wait_seconds_remaining,
        Some(_) => job_start_delay_seconds(state),
        None => 0.0,
    };
    state.active_job = target;
}

fn ignored(command: &Command) {
    debug!(command = command.kind(), "Unknown id, command ignored");
}
