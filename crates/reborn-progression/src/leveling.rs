//! Experience curves and level-up mechanics.
//!
//! Two curves share the form `needed(level) = base * max(1, level)^exponent`:
//!
//! - Skills: `20 * level^1.55`
//! - Activity and job mastery: `15 * level^1.35`
//!
//! A single gain may cross several levels; whatever is left over stays on
//! the track, always strictly below what the resulting level needs.
//! Negative and non-finite gains are treated as zero, so a track never
//! regresses.

use reborn_types::{ActivityId, GameState, JobId, Skill, SkillState};
use tracing::trace;

/// An experience curve `base * max(1, level)^exponent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    /// Experience needed to leave level 1.
    pub base: f64,
    /// Growth exponent.
    pub exponent: f64,
}

/// Curve for the six character skills.
pub const SKILL_CURVE: Curve = Curve {
    base: 20.0,
    exponent: 1.55,
};

/// Curve for activity and job mastery tracks.
pub const MASTERY_CURVE: Curve = Curve {
    base: 15.0,
    exponent: 1.35,
};

impl Curve {
    /// Experience needed to advance from `level` to `level + 1`.
    pub fn xp_needed(&self, level: u32) -> f64 {
        self.base * f64::from(level.max(1)).powf(self.exponent)
    }
}

/// Result of applying a gain to one track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainOutcome {
    /// The track after the gain.
    pub track: SkillState,
    /// Number of levels crossed by this gain.
    pub levels_gained: u32,
}

/// Apply `amount` experience to `track` along `curve`, cascading level-ups.
pub fn apply_gain(curve: Curve, track: SkillState, amount: f64) -> GainOutcome {
    let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
    let carried = if track.xp.is_finite() { track.xp.max(0.0) } else { 0.0 };

    let start_level = track.level.max(1);
    let mut level = start_level;
    let mut xp = carried + amount;

    loop {
        let needed = curve.xp_needed(level);
        if xp < needed || level == u32::MAX {
            break;
        }
        xp -= needed;
        level = level.saturating_add(1);
    }

    GainOutcome {
        track: SkillState::new(level, xp),
        levels_gained: level.saturating_sub(start_level),
    }
}

/// Add skill experience to `state`, returning the number of levels gained.
pub fn gain_skill_xp(state: &mut GameState, skill: Skill, amount: f64) -> u32 {
    let outcome = apply_gain(SKILL_CURVE, state.skill(skill), amount);
    if outcome.levels_gained > 0 {
        trace!(
            skill = skill.id(),
            level = outcome.track.level,
            "Skill level up"
        );
    }
    state.skills.insert(skill, outcome.track);
    outcome.levels_gained
}

/// Add mastery experience to an activity, returning the levels gained.
pub fn gain_activity_mastery(state: &mut GameState, activity: &ActivityId, amount: f64) -> u32 {
    let outcome = apply_gain(
        MASTERY_CURVE,
        state.activity_mastery(activity.as_str()),
        amount,
    );
    if outcome.levels_gained > 0 {
        trace!(
            activity = %activity,
            level = outcome.track.level,
            "Activity mastery up"
        );
    }
    state
        .activity_mastery
        .insert(activity.clone(), outcome.track);
    outcome.levels_gained
}

/// Add mastery experience to a job, returning the levels gained.
pub fn gain_job_mastery(state: &mut GameState, job: &JobId, amount: f64) -> u32 {
    let outcome = apply_gain(MASTERY_CURVE, state.job_mastery(job.as_str()), amount);
    if outcome.levels_gained > 0 {
        trace!(job = %job, level = outcome.track.level, "Job mastery up");
    }
    state.job_mastery.insert(job.clone(), outcome.track);
    outcome.levels_gained
}
