//! The fixed skill set and the generic progress track.
//!
//! A [`SkillState`] records progress on one skill, one activity's mastery
//! track, or one job's mastery track. The level never drops below 1 and the
//! accumulated experience is always strictly below what the current level
//! needs; the leveling rules that keep it that way live in the progression
//! crate.

use serde::{Deserialize, Serialize};

/// The six character skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    /// Physical strength.
    Strength,
    /// Reasoning and memory.
    Mind,
    /// Social ease and persuasion.
    Charisma,
    /// Technical understanding.
    Tech,
    /// Command of the local language.
    Linguistics,
    /// Ability to cope with the unfamiliar city.
    Adaptation,
}

impl Skill {
    /// All skills in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Strength,
        Self::Mind,
        Self::Charisma,
        Self::Tech,
        Self::Linguistics,
        Self::Adaptation,
    ];

    /// Stable identifier used in saves and on the wire.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Mind => "mind",
            Self::Charisma => "charisma",
            Self::Tech => "tech",
            Self::Linguistics => "linguistics",
            Self::Adaptation => "adaptation",
        }
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Mind => "Mind",
            Self::Charisma => "Charisma",
            Self::Tech => "Tech",
            Self::Linguistics => "Linguistics",
            Self::Adaptation => "Adaptation",
        }
    }

    /// Look up a skill by its stable identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|skill| skill.id() == id)
    }
}

impl core::fmt::Display for Skill {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Level and partial experience on one progress track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillState {
    /// Current level, at least 1.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub xp: f64,
}

impl SkillState {
    /// A fresh track at level 1 with no experience.
    pub const INITIAL: Self = Self { level: 1, xp: 0.0 };

    /// Create a track at the given level and experience.
    pub const fn new(level: u32, xp: f64) -> Self {
        Self { level, xp }
    }
}

impl Default for SkillState {
    fn default() -> Self {
        Self::INITIAL
    }
}
