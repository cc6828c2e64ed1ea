//! The simulation snapshot.
//!
//! A [`GameState`] is never mutated in place once published: every tick and
//! every command produces a new value from the previous one. Skill and
//! mastery lookups are total -- absent entries read as level 1 with no
//! experience, absent upgrades read as level 0.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ids::{ActivityId, ItemId, JobId, UpgradeId, upgrades};
use crate::skill::{Skill, SkillState};

/// Maximum number of log lines kept in a state; older lines are dropped first.
pub const LOG_CAPACITY: usize = 60;

/// In-game days per year.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Age (in days) at which every life starts: 16 years.
pub const STARTING_AGE_DAYS: f64 = 16.0 * DAYS_PER_YEAR;

/// Age (in days) at which the body fails and the life ends: 80 years.
pub const LIFESPAN_DAYS: f64 = 80.0 * DAYS_PER_YEAR;

/// Activity every life starts on.
const DEFAULT_ACTIVITY: &str = "explore";

/// Housing every life starts in.
const DEFAULT_HOUSING: &str = "shelter";

/// Opening lines of the very first life.
const AWAKENING_LOG: [&str; 2] = [
    "You open your eyes. The sky is streaked with artificial light. An unknown city hums around you.",
    "You understand neither the language nor the rules. But you are alive.",
];

/// The entire simulation snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Spendable currency, never negative.
    pub credits: f64,
    /// In-game age of the character, in days.
    pub age_days: f64,
    /// Simulated seconds elapsed in the current life.
    pub life_seconds: f64,
    /// The single activity the character is assigned to.
    pub active_activity: ActivityId,
    /// The job the character holds, if any.
    pub active_job: Option<JobId>,
    /// Seconds left before the active job starts paying after a switch.
    pub job_wait_seconds_remaining: f64,
    /// Selected housing (exclusive slot).
    pub selected_housing: ItemId,
    /// Selected food (exclusive slot), if any.
    pub selected_food: Option<ItemId>,
    /// "Other" shop items bought in this life.
    pub owned_other: BTreeSet<ItemId>,
    /// Owned "other" items currently switched on.
    pub active_other: BTreeSet<ItemId>,
    /// Character skills.
    pub skills: BTreeMap<Skill, SkillState>,
    /// Mastery track per activity (sparse).
    pub activity_mastery: BTreeMap<ActivityId, SkillState>,
    /// Mastery track per job (sparse).
    pub job_mastery: BTreeMap<JobId, SkillState>,
    /// Prestige currency; survives resets.
    pub echoes: u64,
    /// Permanent upgrade levels; survive resets.
    pub upgrades: BTreeMap<UpgradeId, u32>,
    /// Number of completed lives.
    pub total_lives: u32,
    /// One-shot narrative milestones already reached in this life.
    pub story_flags: BTreeSet<String>,
    /// Most recent narrative and event lines, oldest first.
    pub log: Vec<String>,
}

impl GameState {
    /// Level of a skill, defaulting to 1 when absent.
    pub fn skill_level(&self, skill: Skill) -> u32 {
        self.skill(skill).level
    }

    /// Full track of a skill, defaulting to level 1 with no experience.
    pub fn skill(&self, skill: Skill) -> SkillState {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    /// Mastery track of an activity, defaulting to level 1.
    pub fn activity_mastery(&self, id: &str) -> SkillState {
        self.activity_mastery.get(id).copied().unwrap_or_default()
    }

    /// Mastery track of a job, defaulting to level 1.
    pub fn job_mastery(&self, id: &str) -> SkillState {
        self.job_mastery.get(id).copied().unwrap_or_default()
    }

    /// Level of a permanent upgrade, defaulting to 0.
    pub fn upgrade_level(&self, id: &str) -> u32 {
        self.upgrades.get(id).copied().unwrap_or(0)
    }

    /// Day of the current life, starting at 1.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn current_day(&self) -> u64 {
        (self.life_seconds.max(0.0).floor() as u64).saturating_add(1)
    }

    /// Age of the character in whole years.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn age_years(&self) -> u32 {
        (self.age_days.max(0.0) / DAYS_PER_YEAR).floor() as u32
    }

    /// Append a line to the log, dropping the oldest lines beyond
    /// [`LOG_CAPACITY`].
    pub fn push_log(&mut self, line: impl Into<String>) {
        push_log_line(&mut self.log, line.into());
    }

    /// Default upgrade table: every well-known upgrade at level 0.
    pub fn default_upgrades() -> BTreeMap<UpgradeId, u32> {
        upgrades::ALL
            .into_iter()
            .map(|id| (UpgradeId::from(id), 0))
            .collect()
    }

    /// Default skill table: every skill at level 1 with no experience.
    pub fn default_skills() -> BTreeMap<Skill, SkillState> {
        Skill::ALL
            .into_iter()
            .map(|skill| (skill, SkillState::INITIAL))
            .collect()
    }

    /// Opening log of a first life.
    pub fn awakening_log() -> Vec<String> {
        AWAKENING_LOG.iter().map(|line| (*line).to_owned()).collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            credits: 0.0,
            age_days: STARTING_AGE_DAYS,
            life_seconds: 0.0,
            active_activity: ActivityId::from(DEFAULT_ACTIVITY),
            active_job: None,
            job_wait_seconds_remaining: 0.0,
            selected_housing: ItemId::from(DEFAULT_HOUSING),
            selected_food: None,
            owned_other: BTreeSet::new(),
            active_other: BTreeSet::new(),
            skills: Self::default_skills(),
            activity_mastery: BTreeMap::new(),
            job_mastery: BTreeMap::new(),
            echoes: 0,
            upgrades: Self::default_upgrades(),
            total_lives: 0,
            story_flags: BTreeSet::new(),
            log: Self::awakening_log(),
        }
    }
}

/// Append `line` to `log`, keeping only the most recent [`LOG_CAPACITY`]
/// entries.
pub fn push_log_line(log: &mut Vec<String>, line: String) {
    log.push(line);
    if log.len() > LOG_CAPACITY {
        let excess = log.len().saturating_sub(LOG_CAPACITY);
        log.drain(..excess);
    }
}
