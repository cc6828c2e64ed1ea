//! Gating conditions and their human-readable explanations.
//!
//! A catalog entry is gated by a list of [`SkillCondition`]s that must all
//! hold. The sequential unlock rule adds one more condition -- a minimum
//! mastery level on the previous entry -- which the resolver reports as
//! [`MissingRequirement::PreviousMastery`].

use reborn_types::{GameState, Skill};
use serde::{Deserialize, Serialize};

/// A minimum level on one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCondition {
    /// The skill being checked.
    pub skill: Skill,
    /// Minimum level required (inclusive).
    pub min_level: u32,
}

impl SkillCondition {
    /// Create a condition requiring `skill >= min_level`.
    pub const fn new(skill: Skill, min_level: u32) -> Self {
        Self { skill, min_level }
    }

    /// Whether the condition holds for `state`.
    pub fn is_met(&self, state: &GameState) -> bool {
        state.skill_level(self.skill) >= self.min_level
    }

    /// The unmet requirement for `state`, or `None` if the condition holds.
    pub fn missing(&self, state: &GameState) -> Option<MissingRequirement> {
        let current = state.skill_level(self.skill);
        (current < self.min_level).then_some(MissingRequirement::Skill {
            skill: self.skill,
            required: self.min_level,
            current,
        })
    }
}

/// Whether every condition in `conditions` holds for `state`.
pub fn all_met(conditions: &[SkillCondition], state: &GameState) -> bool {
    conditions.iter().all(|condition| condition.is_met(state))
}

/// One reason a catalog entry is not playable yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissingRequirement {
    /// A skill is below the level the entry's gate asks for.
    Skill {
        /// The skill that is too low.
        skill: Skill,
        /// Level the gate requires.
        required: u32,
        /// Level the character has.
        current: u32,
    },
    /// The previous entry in the catalog has not been mastered enough.
    PreviousMastery {
        /// Display name of the previous entry.
        previous: String,
        /// Mastery level required on the previous entry.
        required: u32,
        /// Mastery level the character has on it.
        current: u32,
    },
    /// The previous entry is itself still locked.
    PreviousLocked {
        /// Display name of the previous entry.
        previous: String,
    },
}

impl core::fmt::Display for MissingRequirement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Skill {
                skill,
                required,
                current,
            } => write!(f, "{skill} \u{2265} {required} (current: {current})"),
            Self::PreviousMastery {
                previous,
                required,
                current,
            } => write!(
                f,
                "{previous} mastery \u{2265} {required} (current: {current})"
            ),
            Self::PreviousLocked { previous } => write!(f, "unlock {previous} first"),
        }
    }
}
