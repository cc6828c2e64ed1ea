//! Progression rules for the Reborn simulation.
//!
//! Everything here is a pure function of a [`GameState`](reborn_types::GameState)
//! and the content [`Catalog`](reborn_content::Catalog): no I/O, no clocks.
//! The tick transition in `reborn-core` composes these rules; the HTTP
//! surface calls the same functions to show derived values, so the two
//! never disagree.
//!
//! # Modules
//!
//! - [`economy`] -- Joy, upkeep, speed and gain multipliers, job start delay.
//! - [`error`] -- Rejections for upgrade purchases ([`UpgradeError`]).
//! - [`leveling`] -- Experience curves and cascading level-ups.
//! - [`prestige`] -- Reincarnation preview and the full-state reset.
//! - [`story`] -- One-shot narrative beats keyed on skill thresholds.
//! - [`upgrades`] -- Echo-priced permanent upgrades.

pub mod economy;
pub mod error;
pub mod leveling;
pub mod prestige;
pub mod story;
pub mod upgrades;

// Re-export primary types at crate root.
pub use economy::{
    Multipliers, activity_speed_multiplier, credit_multiplier, daily_cost,
    job_speed_multiplier, job_start_delay_seconds, joy, xp_multiplier,
};
pub use error::UpgradeError;
pub use leveling::{
    Curve, GainOutcome, MASTERY_CURVE, SKILL_CURVE, apply_gain, gain_activity_mastery,
    gain_job_mastery, gain_skill_xp,
};
pub use prestige::{ReincarnationPreview, ResetReason, preview_reincarnation, reincarnate};
pub use story::{STORY_BEATS, StoryBeat, emit_story_flags};
pub use upgrades::{try_buy_upgrade, upgrade_cost};
