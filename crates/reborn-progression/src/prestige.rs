//! Reincarnation: the prestige reset that ends one life and begins another.
//!
//! A reset keeps only echoes (plus the gain), permanent upgrades, and the
//! life counter. Everything else, including skills, mastery, story flags,
//! shop selections, and the active activity and job, returns to the
//! defaults of a new life.

use reborn_types::upgrades::START_BONUS;
use reborn_types::{GameState, Skill};
use serde::Serialize;
use tracing::debug;

/// Credits converted into one echo.
const CREDITS_PER_ECHO: f64 = 250.0;

/// Starting credits per `start_bonus` level.
const START_CREDITS_PER_LEVEL: u32 = 50;

/// Why a life ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    /// The character reached the end of their lifespan.
    BodyFailure,
    /// The player chose to start over.
    Manual,
}

impl ResetReason {
    /// First line of the new life's log.
    pub const fn opening_line(self) -> &'static str {
        match self {
            Self::BodyFailure => "Your body gave out. But something... persists.",
            Self::Manual => "You close your eyes... and choose to begin again.",
        }
    }
}

impl core::fmt::Display for ResetReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BodyFailure => write!(f, "body_failure"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// What a reset would yield right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReincarnationPreview {
    /// Echoes added on reset.
    pub echo_gain: u64,
    /// Credits the next life starts with.
    pub start_credits: u32,
}

/// `echo_gain = floor(credits / 250) + floor(adaptation / 2) +
/// floor(linguistics / 3)`; `start_credits = start_bonus * 50`.
pub fn preview_reincarnation(state: &GameState) -> ReincarnationPreview {
    let from_credits = credits_to_echoes(state.credits);
    let from_adaptation = u64::from(state.skill_level(Skill::Adaptation)) / 2;
    let from_linguistics = u64::from(state.skill_level(Skill::Linguistics)) / 3;

    ReincarnationPreview {
        echo_gain: from_credits
            .saturating_add(from_adaptation)
            .saturating_add(from_linguistics),
        start_credits: state
            .upgrade_level(START_BONUS)
            .saturating_mul(START_CREDITS_PER_LEVEL),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn credits_to_echoes(credits: f64) -> u64 {
    if !credits.is_finite() || credits <= 0.0 {
        return 0;
    }
    // Saturates at u64::MAX for absurd balances.
    (credits / CREDITS_PER_ECHO).floor() as u64
}

/// Start a new life from `old`.
pub fn reincarnate(old: &GameState, reason: ResetReason) -> GameState {
    let preview = preview_reincarnation(old);
    let next = GameState {
        credits: f64::from(preview.start_credits),
        echoes: old.echoes.saturating_add(preview.echo_gain),
        upgrades: old.upgrades.clone(),
        total_lives: old.total_lives.saturating_add(1),
        log: vec![
            reason.opening_line().to_owned(),
            "A new life begins. Your memories are blurry... but not your instincts.".to_owned(),
            format!("Echoes gained: +{}", preview.echo_gain),
        ],
        ..GameState::default()
    };

    debug!(
        reason = %reason,
        echo_gain = preview.echo_gain,
        echoes = next.echoes,
        lives = next.total_lives,
        "Reincarnated"
    );
    next
}
