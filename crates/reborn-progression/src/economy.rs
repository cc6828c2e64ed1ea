//! Multipliers, joy, and upkeep.
//!
//! All skill lookups default to level 1 and all upgrade lookups to level 0,
//! so every function here is defined for any state, including states whose
//! shop selections reference ids the catalog no longer has (those simply
//! contribute nothing).

use reborn_content::Catalog;
use reborn_types::upgrades::{CREDIT_BOOST, XP_BOOST};
use reborn_types::{GameState, Skill};
use serde::Serialize;

/// Extra experience per `xp_boost` level.
const XP_BOOST_PER_LEVEL: f64 = 0.05;

/// Extra credits per `credit_boost` level.
const CREDIT_BOOST_PER_LEVEL: f64 = 0.05;

/// Extra experience per point of (non-negative) joy.
const XP_PER_JOY: f64 = 0.01;

/// Activity speed per Adaptation level above 1.
const ACTIVITY_SPEED_PER_ADAPTATION: f64 = 0.03;

/// Activity speed per Mind level above 1.
const ACTIVITY_SPEED_PER_MIND: f64 = 0.02;

/// Job speed per Linguistics level above 1.
const JOB_SPEED_PER_LINGUISTICS: f64 = 0.03;

/// Bounds of both speed multipliers.
const SPEED_MIN: f64 = 1.0;
const SPEED_MAX: f64 = 3.0;

/// Job start delay before any Charisma reduction, in seconds.
const JOB_START_DELAY_BASE_SECONDS: f64 = 20.0;

/// Delay reduction per Charisma level above 1.
const DELAY_REDUCTION_PER_CHARISMA: f64 = 0.03;

/// Bounds of the delay factor.
const DELAY_FACTOR_MIN: f64 = 0.25;
const DELAY_FACTOR_MAX: f64 = 1.0;

/// Levels above 1, as a float.
fn levels_above_one(state: &GameState, skill: Skill) -> f64 {
    f64::from(state.skill_level(skill).saturating_sub(1))
}

/// Sum of the joy ratings of the selected housing, selected food, and all
/// active "other" items.
pub fn joy(catalog: &Catalog, state: &GameState) -> i32 {
    let housing = catalog
        .housing(state.selected_housing.as_str())
        .map_or(0, |item| item.joy);
    let food = state
        .selected_food
        .as_ref()
        .and_then(|id| catalog.food(id.as_str()))
        .map_or(0, |item| item.joy);
    state
        .active_other
        .iter()
        .filter_map(|id| catalog.other(id.as_str()))
        .fold(housing.saturating_add(food), |total, item| {
            total.saturating_add(item.joy)
        })
}

/// Upkeep in credits per in-game day for the current selections.
pub fn daily_cost(catalog: &Catalog, state: &GameState) -> f64 {
    let housing = catalog
        .housing(state.selected_housing.as_str())
        .map_or(0.0, |item| item.cost_per_day);
    let food = state
        .selected_food
        .as_ref()
        .and_then(|id| catalog.food(id.as_str()))
        .map_or(0.0, |item| item.cost_per_day);
    let other: f64 = state
        .active_other
        .iter()
        .filter_map(|id| catalog.other(id.as_str()))
        .map(|item| item.cost_per_day)
        .sum();
    housing + food + other
}

/// `(1 + 0.05 * xp_boost) * (1 + 0.01 * max(0, joy))`.
pub fn xp_multiplier(catalog: &Catalog, state: &GameState) -> f64 {
    let boost = f64::from(state.upgrade_level(XP_BOOST)).mul_add(XP_BOOST_PER_LEVEL, 1.0);
    let joy_bonus = f64::from(joy(catalog, state).max(0)).mul_add(XP_PER_JOY, 1.0);
    boost * joy_bonus
}

/// `1 + 0.05 * credit_boost`.
pub fn credit_multiplier(state: &GameState) -> f64 {
    f64::from(state.upgrade_level(CREDIT_BOOST)).mul_add(CREDIT_BOOST_PER_LEVEL, 1.0)
}

/// Activity speed from Adaptation and Mind, clamped to `[1, 3]`.
pub fn activity_speed_multiplier(state: &GameState) -> f64 {
    let adaptation = levels_above_one(state, Skill::Adaptation) * ACTIVITY_SPEED_PER_ADAPTATION;
    let mind = levels_above_one(state, Skill::Mind) * ACTIVITY_SPEED_PER_MIND;
    (1.0 + adaptation + mind).clamp(SPEED_MIN, SPEED_MAX)
}

/// Job speed from Linguistics, clamped to `[1, 3]`.
pub fn job_speed_multiplier(state: &GameState) -> f64 {
    levels_above_one(state, Skill::Linguistics)
        .mul_add(JOB_SPEED_PER_LINGUISTICS, 1.0)
        .clamp(SPEED_MIN, SPEED_MAX)
}

/// Seconds a newly selected job waits before paying: `20 * clamp(1 - 0.03 *
/// (charisma - 1), 0.25, 1)`.
pub fn job_start_delay_seconds(state: &GameState) -> f64 {
    let factor = levels_above_one(state, Skill::Charisma)
        .mul_add(-DELAY_REDUCTION_PER_CHARISMA, 1.0)
        .clamp(DELAY_FACTOR_MIN, DELAY_FACTOR_MAX);
    JOB_START_DELAY_BASE_SECONDS * factor
}

/// Every multiplier the tick uses, computed once per state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Multipliers {
    /// Applied to every skill and mastery gain.
    pub xp: f64,
    /// Applied to every credit gain.
    pub credit: f64,
    /// Scales activity time.
    pub activity_speed: f64,
    /// Scales job time.
    pub job_speed: f64,
}

impl Multipliers {
    /// Compute all multipliers for `state`.
    pub fn of(catalog: &Catalog, state: &GameState) -> Self {
        Self {
            xp: xp_multiplier(catalog, state),
            credit: credit_multiplier(state),
            activity_speed: activity_speed_multiplier(state),
            job_speed: job_speed_multiplier(state),
        }
    }
}
