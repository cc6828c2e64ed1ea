//! Immutable catalog entry definitions.

use reborn_types::{ActivityId, ItemId, JobId, Skill, UpgradeId};
use serde::{Deserialize, Serialize};

use crate::condition::SkillCondition;

/// An entry that takes part in sequential unlocking.
///
/// Activities and jobs are each unlocked as a contiguous prefix of their
/// catalog table; the resolver only needs an entry's id, display name, and
/// gate to do so.
pub trait Gated {
    /// Stable identifier of the entry.
    fn id(&self) -> &str;
    /// Display name of the entry.
    fn name(&self) -> &str;
    /// Skill conditions that must all hold.
    fn requires(&self) -> &[SkillCondition];
}

/// A non-monetary occupation yielding skill experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDef {
    /// Stable identifier.
    pub id: ActivityId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Experience per second granted to each listed skill.
    pub xp: Vec<(Skill, f64)>,
    /// Credits per second (usually zero or a small trickle).
    pub credits_per_sec: f64,
    /// Gate on the character's skills.
    pub requires: Vec<SkillCondition>,
}

impl Gated for ActivityDef {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn requires(&self) -> &[SkillCondition] {
        &self.requires
    }
}

/// A currency-first occupation with a start delay after switching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDef {
    /// Stable identifier.
    pub id: JobId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Credits per second while working.
    pub credits_per_sec: f64,
    /// Experience per second granted to each listed skill.
    pub xp: Vec<(Skill, f64)>,
    /// Gate on the character's skills.
    pub requires: Vec<SkillCondition>,
}

impl Gated for JobDef {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn requires(&self) -> &[SkillCondition] {
        &self.requires
    }
}

/// A permanent upgrade bought with echoes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeDef {
    /// Stable identifier.
    pub id: UpgradeId,
    /// Display name.
    pub name: String,
    /// What one level does.
    pub description: String,
    /// Cost of the first level, and the floor for every later level.
    pub base_cost: u32,
    /// Multiplicative cost growth per level owned.
    pub cost_growth: f64,
}

/// Shop slot an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopCategory {
    /// Exclusive single choice, always one selected.
    Housing,
    /// Exclusive single choice, possibly none.
    Food,
    /// Bought once per life; any number may be active.
    Other,
}

/// A shop item with a recurring cost and a comfort rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItemDef {
    /// Stable identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Which shop slot the item fills.
    pub category: ShopCategory,
    /// Upkeep in credits per in-game day.
    pub cost_per_day: f64,
    /// Joy contributed while selected or active.
    pub joy: i32,
}
