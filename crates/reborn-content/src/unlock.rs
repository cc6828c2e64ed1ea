//! Sequential unlock resolution.
//!
//! Entry `i` of a table is unlocked iff its own skill gate holds, the
//! mastery recorded for entry `i - 1` is at least
//! [`required_prev_mastery_level(i)`](required_prev_mastery_level), and
//! every earlier entry is unlocked. The playable entries are therefore
//! always a contiguous prefix of the table.
//!
//! The tick and the presentation layer both call into this module, so an
//! entry shown as playable is exactly an entry the tick lets pay out.

use reborn_types::GameState;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::condition::{MissingRequirement, all_met};
use crate::defs::Gated;

/// Mastery step between consecutive entries.
const MASTERY_STEP: u32 = 5;

/// Mastery level the previous entry needs before entry `index` unlocks.
///
/// Grows by five per position: 0, 5, 10, 15, ...
pub fn required_prev_mastery_level(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(MASTERY_STEP)
}

/// Whether an entry is playable, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UnlockStatus {
    /// The entry is inside the unlocked prefix.
    Unlocked,
    /// The entry is past the unlocked prefix.
    Locked {
        /// Every requirement currently unmet, never empty.
        missing: Vec<MissingRequirement>,
    },
}

impl UnlockStatus {
    /// Whether the status is [`UnlockStatus::Unlocked`].
    pub const fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked)
    }
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// Index of the last unlocked activity, or `None` if even the first is
/// gated shut.
pub fn last_unlocked_activity_index(catalog: &Catalog, state: &GameState) -> Option<usize> {
    last_unlocked_index(catalog.activities(), state, |id| {
        state.activity_mastery(id).level
    })
}

/// Unlock status of an activity, or `None` for an id the catalog lacks.
pub fn activity_status(catalog: &Catalog, state: &GameState, id: &str) -> Option<UnlockStatus> {
    let index = catalog.activity_index(id)?;
    Some(status_at(catalog.activities(), index, state, |prev| {
        state.activity_mastery(prev).level
    }))
}

/// Whether the tick may apply the effects of activity `id`.
///
/// Unknown ids are never permitted.
pub fn is_activity_permitted(catalog: &Catalog, state: &GameState, id: &str) -> bool {
    let Some(index) = catalog.activity_index(id) else {
        return false;
    };
    let within_prefix =
        last_unlocked_activity_index(catalog, state).is_some_and(|last| index <= last);
    within_prefix && all_met(&catalog.activity(id).requires, state)
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// Index of the last unlocked job, or `None` if no job is unlocked.
pub fn last_unlocked_job_index(catalog: &Catalog, state: &GameState) -> Option<usize> {
    last_unlocked_index(catalog.jobs(), state, |id| state.job_mastery(id).level)
}

/// Unlock status of a job, or `None` for an id the catalog lacks.
pub fn job_status(catalog: &Catalog, state: &GameState, id: &str) -> Option<UnlockStatus> {
    let index = catalog.job_index(id)?;
    Some(status_at(catalog.jobs(), index, state, |prev| {
        state.job_mastery(prev).level
    }))
}

/// Whether the tick may apply the effects of job `id`.
///
/// Unknown ids are never permitted.
pub fn is_job_permitted(catalog: &Catalog, state: &GameState, id: &str) -> bool {
    let Some(job) = catalog.job(id) else {
        return false;
    };
    let within_prefix = catalog
        .job_index(id)
        .zip(last_unlocked_job_index(catalog, state))
        .is_some_and(|(index, last)| index <= last);
    within_prefix && all_met(&job.requires, state)
}

// ---------------------------------------------------------------------------
// Generic resolver
// ---------------------------------------------------------------------------

/// Whether entry `index` passes its own gate and the mastery step on its
/// predecessor.
fn passes_at<E: Gated>(
    entry: &E,
    prev: Option<&E>,
    index: usize,
    state: &GameState,
    mastery: &impl Fn(&str) -> u32,
) -> bool {
    let prev_ok = prev.is_none_or(|p| mastery(p.id()) >= required_prev_mastery_level(index));
    prev_ok && all_met(entry.requires(), state)
}

fn last_unlocked_index<E: Gated>(
    entries: &[E],
    state: &GameState,
    mastery: impl Fn(&str) -> u32,
) -> Option<usize> {
    let mut last = None;
    let mut prev: Option<&E> = None;
    for (index, entry) in entries.iter().enumerate() {
        if !passes_at(entry, prev, index, state, &mastery) {
            break;
        }
        last = Some(index);
        prev = Some(entry);
    }
    last
}

fn status_at<E: Gated>(
    entries: &[E],
    index: usize,
    state: &GameState,
    mastery: impl Fn(&str) -> u32,
) -> UnlockStatus {
    let unlocked = last_unlocked_index(entries, state, &mastery).is_some_and(|last| index <= last);
    if unlocked {
        return UnlockStatus::Unlocked;
    }

    let Some(entry) = entries.get(index) else {
        return UnlockStatus::Locked {
            missing: Vec::new(),
        };
    };
    let mut missing: Vec<MissingRequirement> = entry
        .requires()
        .iter()
        .filter_map(|condition| condition.missing(state))
        .collect();

    let prev = index.checked_sub(1).and_then(|p| entries.get(p).map(|e| (p, e)));
    if let Some((prev_index, prev_entry)) = prev {
        let required = required_prev_mastery_level(index);
        let current = mastery(prev_entry.id());
        if current < required {
            missing.push(MissingRequirement::PreviousMastery {
                previous: prev_entry.name().to_owned(),
                required,
                current,
            });
        }
        let prev_unlocked =
            last_unlocked_index(entries, state, &mastery).is_some_and(|last| prev_index <= last);
        if !prev_unlocked {
            missing.push(MissingRequirement::PreviousLocked {
                previous: prev_entry.name().to_owned(),
            });
        }
    }

    UnlockStatus::Locked { missing }
}
