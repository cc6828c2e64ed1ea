//! Tick transition: the single operation that advances game time.
//!
//! Each tick runs these steps, in order:
//!
//! 1. **Clamp** -- bound the elapsed time to `[0, max_step_seconds]`.
//! 2. **Age** -- advance life seconds and in-game age.
//! 3. **Job wait** -- count down the post-switch wait, recording how much of
//!    this tick it absorbed.
//! 4. **Lifespan** -- at 80 years the life ends: reincarnate and return.
//!    Nothing else happens on that tick.
//! 5. **Activity** -- if permitted, pay credits and grant skill and mastery
//!    experience, scaled by the activity speed.
//! 6. **Job** -- if permitted, do the same for the time left after the wait,
//!    scaled by the job speed.
//! 7. **Upkeep** -- charge the daily cost of the current selections,
//!    flooring credits at zero.
//! 8. **Story** -- fire any narrative beats now reached.
//!
//! The transition is a pure function of the previous state, the catalog, and
//! the elapsed time. It never fails.

use reborn_content::{Catalog, is_activity_permitted, is_job_permitted};
use reborn_progression::{
    Multipliers, ResetReason, daily_cost, emit_story_flags, gain_activity_mastery,
    gain_job_mastery, gain_skill_xp, reincarnate,
};
use reborn_types::{GameState, LIFESPAN_DAYS};
use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;

/// Time parameters of the transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickConfig {
    /// Upper bound of the elapsed time one tick may simulate.
    pub max_step_seconds: f64,
    /// In-game days advanced per simulated second.
    pub days_per_second: f64,
}

impl TickConfig {
    /// Largest step: half a second.
    pub const DEFAULT_MAX_STEP_SECONDS: f64 = 0.5;
    /// One simulated second is one in-game day.
    pub const DEFAULT_DAYS_PER_SECOND: f64 = 1.0;

    /// Bound `dt_raw` to `[0, max_step_seconds]`; NaN reads as zero.
    pub fn clamp_step(&self, dt_raw: f64) -> f64 {
        dt_raw.max(0.0).min(self.max_step_seconds.max(0.0))
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            max_step_seconds: Self::DEFAULT_MAX_STEP_SECONDS,
            days_per_second: Self::DEFAULT_DAYS_PER_SECOND,
        }
    }
}

impl From<&EngineConfig> for TickConfig {
    fn from(engine: &EngineConfig) -> Self {
        Self {
            max_step_seconds: engine.max_step_seconds,
            days_per_second: engine.days_per_second,
        }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickSummary {
    /// Elapsed time actually simulated, after clamping.
    pub dt: f64,
    /// Whether the active activity paid out.
    pub activity_permitted: bool,
    /// Whether the active job passed its unlock check.
    pub job_permitted: bool,
    /// Credits earned from the activity.
    pub activity_credits: f64,
    /// Credits earned from the job.
    pub job_credits: f64,
    /// Credits actually removed by upkeep (never more than the balance).
    pub upkeep_paid: f64,
    /// Part of `dt` absorbed by the job start wait.
    pub job_wait_consumed: f64,
    /// Skill and mastery levels crossed this tick.
    pub levels_gained: u32,
    /// Story flags fired this tick, in order.
    pub story_flags: Vec<String>,
    /// Set when the tick ended the life.
    pub reset: Option<ResetReason>,
}

/// Advance `state` by `dt_raw` seconds using the standard catalog and the
/// default time parameters.
pub fn tick(state: &GameState, dt_raw: f64) -> GameState {
    run_tick(Catalog::standard(), &TickConfig::default(), state, dt_raw).0
}

/// Advance `state` by `dt_raw` seconds, returning the next state and a
/// summary of what happened.
pub fn run_tick(
    catalog: &Catalog,
    config: &TickConfig,
    state: &GameState,
    dt_raw: f64,
) -> (GameState, TickSummary) {
    let dt = config.clamp_step(dt_raw);
    let dt_days = dt * config.days_per_second;
    let mut summary = TickSummary {
        dt,
        ..TickSummary::default()
    };

    // --- Age ---
    let mut next = state.clone();
    next.life_seconds += dt;
    next.age_days += dt_days;

    // --- Job wait ---
    let wait_before = next.job_wait_seconds_remaining.max(0.0);
    let waited = dt.min(wait_before);
    next.job_wait_seconds_remaining = (wait_before - dt).max(0.0);
    summary.job_wait_consumed = waited;

    // --- Lifespan ---
    if next.age_days >= LIFESPAN_DAYS {
        let reset = reincarnate(&next, ResetReason::BodyFailure);
        summary.reset = Some(ResetReason::BodyFailure);
        return (reset, summary);
    }

    let multipliers = Multipliers::of(catalog, &next);
    let mut levels: u32 = 0;

    // --- Activity ---
    let activity = catalog.activity(next.active_activity.as_str());
    if is_activity_permitted(catalog, &next, activity.id.as_str()) {
        summary.activity_permitted = true;
        let scaled = dt * multipliers.activity_speed;
        let credits = activity.credits_per_sec * scaled * multipliers.credit;
        next.credits += credits;
        summary.activity_credits = credits;
        for (skill, rate) in &activity.xp {
            let gained = gain_skill_xp(&mut next, *skill, rate * scaled * multipliers.xp);
            levels = levels.saturating_add(gained);
        }
        let gained = gain_activity_mastery(&mut next, &activity.id, scaled * multipliers.xp);
        levels = levels.saturating_add(gained);
    }

    // --- Job ---
    let job = next.active_job.as_ref().and_then(|id| catalog.job(id.as_str()));
    if let Some(job) = job
        && is_job_permitted(catalog, &next, job.id.as_str())
    {
        summary.job_permitted = true;
        let effective = (dt - waited).max(0.0);
        if effective > 0.0 {
            let scaled = effective * multipliers.job_speed;
            let credits = job.credits_per_sec * scaled * multipliers.credit;
            next.credits += credits;
            summary.job_credits = credits;
            for (skill, rate) in &job.xp {
                let gained = gain_skill_xp(&mut next, *skill, rate * scaled * multipliers.xp);
                levels = levels.saturating_add(gained);
            }
            let gained = gain_job_mastery(&mut next, &job.id, scaled * multipliers.xp);
            levels = levels.saturating_add(gained);
        }
    }
    summary.levels_gained = levels;

    // --- Upkeep ---
    let upkeep = daily_cost(catalog, &next) * dt_days;
    if upkeep > 0.0 {
        let before = next.credits;
        next.credits = (next.credits - upkeep).max(0.0);
        summary.upkeep_paid = before - next.credits;
    }

    // --- Story ---
    summary.story_flags = emit_story_flags(&mut next)
        .into_iter()
        .map(str::to_owned)
        .collect();

    if levels > 0 {
        debug!(
            levels,
            day = next.current_day(),
            credits = next.credits,
            "Levels gained"
        );
    }

    (next, summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use reborn_content::ShopItemDef;
    use reborn_types::upgrades::START_BONUS;
    use reborn_types::{ActivityId, JobId, Skill, SkillState, UpgradeId};

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// The standard catalog with upkeep-free housing.
    fn free_housing_catalog() -> Catalog {
        let standard = Catalog::standard();
        let housing = standard
            .housing_items()
            .iter()
            .map(|item| ShopItemDef {
                cost_per_day: 0.0,
                ..item.clone()
            })
            .collect();
        Catalog::new(
            standard.activities().to_vec(),
            standard.jobs().to_vec(),
            standard.upgrades().to_vec(),
            housing,
            standard.food_items().to_vec(),
            standard.other_items().to_vec(),
        )
        .unwrap()
    }

    fn scrap_runner_ready() -> GameState {
        let mut state = GameState {
            active_job: Some(JobId::from("scrap_runner")),
            ..GameState::default()
        };
        state.skills.insert(Skill::Adaptation, SkillState::new(2, 0.0));
        state
    }

    #[test]
    fn one_second_of_exploring() {
        let catalog = free_housing_catalog();
        let config = TickConfig {
            max_step_seconds: 1.0,
            ..TickConfig::default()
        };
        let start = GameState::default();
        let (next, summary) = run_tick(&catalog, &config, &start, 1.0);

        assert!(summary.activity_permitted);
        assert!(approx(next.credits, 0.05));
        assert!(approx(next.life_seconds, 1.0));
        assert!(approx(next.age_days, 16.0 * 365.0 + 1.0));
    }

    #[test]
    fn one_second_as_two_default_steps() {
        let catalog = Catalog::standard();
        let config = TickConfig::default();
        let start = GameState::default();
        let (mid, first) = run_tick(catalog, &config, &start, 1.0);
        let (end, second) = run_tick(catalog, &config, &mid, 0.5);

        assert!(approx(first.dt, 0.5));
        assert!(approx(end.life_seconds, 1.0));
        assert!(approx(end.age_days, 16.0 * 365.0 + 1.0));
        assert!(approx(first.activity_credits + second.activity_credits, 0.05));
        // The shelter's upkeep exceeds the trickle, and credits floor at zero.
        assert!(approx(end.credits, 0.0));
    }

    #[test]
    fn elapsed_time_is_clamped() {
        let start = GameState::default();
        assert!(approx(tick(&start, 30.0).life_seconds, 0.5));
        assert!(approx(tick(&start, -3.0).life_seconds, 0.0));
        assert!(approx(tick(&start, f64::NAN).life_seconds, 0.0));
    }

    #[test]
    fn zero_step_moves_nothing() {
        let start = GameState::default();
        let next = tick(&start, 0.0);
        assert_eq!(next.skills, start.skills);
        assert_eq!(next.log, start.log);
        assert!(approx(next.credits, start.credits));
        assert!(approx(next.age_days, start.age_days));
        assert!(approx(next.activity_mastery("explore").xp, 0.0));
    }

    #[test]
    fn reaching_lifespan_reincarnates() {
        let mut state = GameState {
            age_days: LIFESPAN_DAYS - 0.5,
            credits: 600.0,
            echoes: 3,
            total_lives: 4,
            ..GameState::default()
        };
        state.upgrades.insert(UpgradeId::from(START_BONUS), 2);

        let (next, summary) = run_tick(Catalog::standard(), &TickConfig::default(), &state, 0.5);
        assert_eq!(summary.reset, Some(ResetReason::BodyFailure));
        assert_eq!(next.total_lives, 5);
        assert!(approx(next.credits, 100.0));
        // floor(600 / 250) + floor(1 / 2) + floor(1 / 3)
        assert_eq!(next.echoes, 5);
        assert!(approx(next.age_days, GameState::default().age_days));
        // No income or upkeep on the fatal tick.
        assert!(approx(summary.activity_credits, 0.0));
        assert!(approx(summary.upkeep_paid, 0.0));
    }

    #[test]
    fn job_pays_nothing_while_waiting() {
        let catalog = free_housing_catalog();
        let config = TickConfig::default();
        let mut state = GameState {
            job_wait_seconds_remaining: 1.0,
            ..scrap_runner_ready()
        };

        for _ in 0..2 {
            let (next, summary) = run_tick(&catalog, &config, &state, 0.5);
            assert!(summary.job_permitted);
            assert!(approx(summary.job_credits, 0.0));
            assert!(next.job_mastery.is_empty());
            state = next;
        }
        assert!(approx(state.job_wait_seconds_remaining, 0.0));

        let (_, summary) = run_tick(&catalog, &config, &state, 0.5);
        assert!(approx(summary.job_credits, 0.9 * 0.5));
    }

    #[test]
    fn wait_ending_mid_tick_pays_the_remainder() {
        let catalog = free_housing_catalog();
        let state = GameState {
            job_wait_seconds_remaining: 0.2,
            ..scrap_runner_ready()
        };
        let (next, summary) = run_tick(&catalog, &TickConfig::default(), &state, 0.5);
        assert!(approx(summary.job_wait_consumed, 0.2));
        assert!(approx(summary.job_credits, 0.9 * 0.3));
        assert!(approx(next.job_wait_seconds_remaining, 0.0));
    }

    #[test]
    fn locked_job_still_counts_down_its_wait() {
        let state = GameState {
            active_job: Some(JobId::from("district_mediator")),
            job_wait_seconds_remaining: 5.0,
            ..GameState::default()
        };
        let (next, summary) = run_tick(Catalog::standard(), &TickConfig::default(), &state, 0.5);
        assert!(!summary.job_permitted);
        assert!(approx(next.job_wait_seconds_remaining, 4.5));
        assert!(approx(summary.job_credits, 0.0));
    }

    #[test]
    fn locked_activity_grants_nothing() {
        let state = GameState {
            active_activity: ActivityId::from("study_tech"),
            ..GameState::default()
        };
        let (next, summary) = run_tick(Catalog::standard(), &TickConfig::default(), &state, 0.5);
        assert!(!summary.activity_permitted);
        assert_eq!(next.skills, state.skills);
        assert!(next.activity_mastery.is_empty());
    }

    #[test]
    fn unknown_activity_falls_back_to_the_first() {
        let state = GameState {
            active_activity: ActivityId::from("time_travel"),
            ..GameState::default()
        };
        let (next, summary) = run_tick(Catalog::standard(), &TickConfig::default(), &state, 0.5);
        assert!(summary.activity_permitted);
        assert!(next.activity_mastery("explore").xp > 0.0);
    }

    #[test]
    fn unknown_job_is_ignored() {
        let state = GameState {
            active_job: Some(JobId::from("astronaut")),
            ..GameState::default()
        };
        let (next, summary) = run_tick(Catalog::standard(), &TickConfig::default(), &state, 0.5);
        assert!(!summary.job_permitted);
        assert!(next.job_mastery.is_empty());
    }

    #[test]
    fn upkeep_floors_credits_at_zero() {
        let state = GameState {
            credits: 0.1,
            ..GameState::default()
        };
        let (next, summary) = run_tick(Catalog::standard(), &TickConfig::default(), &state, 0.5);
        assert!(approx(next.credits, 0.0));
        assert!(approx(summary.upkeep_paid, 0.1 + summary.activity_credits));
    }

    #[test]
    fn crossing_a_threshold_fires_its_story_beat() {
        let mut state = GameState::default();
        state
            .skills
            .insert(Skill::Adaptation, SkillState::new(2, 58.5));
        let (next, summary) = run_tick(Catalog::standard(), &TickConfig::default(), &state, 0.5);
        assert_eq!(next.skill_level(Skill::Adaptation), 3);
        assert_eq!(summary.story_flags, ["ad3"]);
        assert!(next.story_flags.contains("ad3"));
        assert!(summary.levels_gained >= 1);
    }
}
