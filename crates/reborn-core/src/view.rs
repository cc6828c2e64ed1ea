//! Read models for presentation.
//!
//! Everything here is derived from a [`GameState`] and the catalog with the
//! same functions the tick uses, so what a client sees always matches what
//! the next tick will do.

use reborn_content::{
    ActivityDef, Catalog, JobDef, ShopItemDef, UnlockStatus, UpgradeDef, activity_status,
    job_status, required_prev_mastery_level,
};
use reborn_progression::{
    Multipliers, ReincarnationPreview, daily_cost, job_start_delay_seconds, joy,
    preview_reincarnation, upgrade_cost,
};
use reborn_types::{DAYS_PER_YEAR, GameState, ItemId, LIFESPAN_DAYS, SkillState};
use serde::Serialize;

/// Values computed from a state rather than stored in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    /// Day of the current life, starting at 1.
    pub current_day: u64,
    /// Age in whole years.
    pub age_years: u32,
    /// Age at which the life ends, in years.
    pub lifespan_years: f64,
    /// Net joy of the current selections.
    pub joy: i32,
    /// Upkeep per in-game day.
    pub daily_cost: f64,
    /// Every multiplier the next tick will use.
    pub multipliers: Multipliers,
    /// Wait a newly selected job would impose, in seconds.
    pub job_start_delay_seconds: f64,
}

/// A snapshot with its derived values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateView {
    /// The stored state.
    #[serde(flatten)]
    pub state: GameState,
    /// Values derived from it.
    pub derived: DerivedView,
}

/// One activity as the player sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityView {
    /// Position in the unlock order.
    pub index: usize,
    /// Catalog definition.
    #[serde(flatten)]
    pub def: ActivityDef,
    /// Unlock status, with what is missing when locked.
    pub unlock: UnlockStatus,
    /// Mastery of the previous entry this one needs.
    pub required_previous_mastery: u32,
    /// Mastery track of this activity.
    pub mastery: SkillState,
    /// Whether this is the active activity.
    pub active: bool,
}

/// One job as the player sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobView {
    /// Position in the unlock order.
    pub index: usize,
    /// Catalog definition.
    #[serde(flatten)]
    pub def: JobDef,
    /// Unlock status, with what is missing when locked.
    pub unlock: UnlockStatus,
    /// Mastery of the previous entry this one needs.
    pub required_previous_mastery: u32,
    /// Mastery track of this job.
    pub mastery: SkillState,
    /// Whether this is the held job.
    pub active: bool,
}

/// One permanent upgrade with its next price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeView {
    /// Catalog definition.
    #[serde(flatten)]
    pub def: UpgradeDef,
    /// Levels owned.
    pub level: u32,
    /// Echo price of the next level.
    pub next_cost: u64,
    /// Whether the echoes on hand cover `next_cost`.
    pub affordable: bool,
}

/// One shop item with its selection state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopItemView {
    /// Catalog definition.
    #[serde(flatten)]
    pub def: ShopItemDef,
    /// Selected (housing, food) or switched on (other).
    pub active: bool,
    /// Owned; always true for the selected housing or food.
    pub owned: bool,
}

/// The three shop tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopView {
    /// Exclusive housing options.
    pub housing: Vec<ShopItemView>,
    /// Exclusive food options.
    pub food: Vec<ShopItemView>,
    /// Independent comforts.
    pub other: Vec<ShopItemView>,
}

/// What ending this life now would give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReincarnationView {
    /// Gain and starting credits.
    #[serde(flatten)]
    pub preview: ReincarnationPreview,
    /// Echo balance after the reset.
    pub echoes_after: u64,
    /// Life counter after the reset.
    pub lives_after: u32,
}

/// Derived values of `state`.
pub fn derived_view(catalog: &Catalog, state: &GameState) -> DerivedView {
    DerivedView {
        current_day: state.current_day(),
        age_years: state.age_years(),
        lifespan_years: LIFESPAN_DAYS / DAYS_PER_YEAR,
        joy: joy(catalog, state),
        daily_cost: daily_cost(catalog, state),
        multipliers: Multipliers::of(catalog, state),
        job_start_delay_seconds: job_start_delay_seconds(state),
    }
}

/// `state` with its derived values.
pub fn state_view(catalog: &Catalog, state: &GameState) -> StateView {
    StateView {
        state: state.clone(),
        derived: derived_view(catalog, state),
    }
}

/// Every activity in unlock order.
pub fn activity_views(catalog: &Catalog, state: &GameState) -> Vec<ActivityView> {
    catalog
        .activities()
        .iter()
        .enumerate()
        .map(|(index, def)| ActivityView {
            index,
            unlock: activity_status(catalog, state, def.id.as_str())
                .unwrap_or(UnlockStatus::Unlocked),
            required_previous_mastery: required_prev_mastery_level(index),
            mastery: state.activity_mastery(def.id.as_str()),
            active: state.active_activity == def.id,
            def: def.clone(),
        })
        .collect()
}

/// Every job in unlock order.
pub fn job_views(catalog: &Catalog, state: &GameState) -> Vec<JobView> {
    catalog
        .jobs()
        .iter()
        .enumerate()
        .map(|(index, def)| JobView {
            index,
            unlock: job_status(catalog, state, def.id.as_str()).unwrap_or(UnlockStatus::Unlocked),
            required_previous_mastery: required_prev_mastery_level(index),
            mastery: state.job_mastery(def.id.as_str()),
            active: state.active_job.as_ref() == Some(&def.id),
            def: def.clone(),
        })
        .collect()
}

/// Every permanent upgrade.
pub fn upgrade_views(catalog: &Catalog, state: &GameState) -> Vec<UpgradeView> {
    catalog
        .upgrades()
        .iter()
        .map(|def| {
            let level = state.upgrade_level(def.id.as_str());
            let next_cost = upgrade_cost(def, level);
            UpgradeView {
                def: def.clone(),
                level,
                next_cost,
                affordable: state.echoes >= next_cost,
            }
        })
        .collect()
}

/// The shop with selection and ownership flags.
pub fn shop_view(catalog: &Catalog, state: &GameState) -> ShopView {
    ShopView {
        housing: exclusive_items(
            catalog.housing_items(),
            Some(state.selected_housing.as_str()),
        ),
        food: exclusive_items(
            catalog.food_items(),
            state.selected_food.as_ref().map(ItemId::as_str),
        ),
        other: catalog
            .other_items()
            .iter()
            .map(|def| ShopItemView {
                def: def.clone(),
                active: state.active_other.contains(&def.id),
                owned: state.owned_other.contains(&def.id),
            })
            .collect(),
    }
}

/// Housing and food have no inventory: the selection is the only thing owned.
fn exclusive_items(items: &[ShopItemDef], selected: Option<&str>) -> Vec<ShopItemView> {
    items
        .iter()
        .map(|def| {
            let active = selected == Some(def.id.as_str());
            ShopItemView {
                def: def.clone(),
                active,
                owned: active,
            }
        })
        .collect()
}

/// The reincarnation preview with the balances it would leave.
pub fn reincarnation_view(state: &GameState) -> ReincarnationView {
    let preview = preview_reincarnation(state);
    ReincarnationView {
        preview,
        echoes_after: state.echoes.saturating_add(preview.echo_gain),
        lives_after: state.total_lives.saturating_add(1),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reborn_content::MissingRequirement;
    use reborn_types::upgrades::START_BONUS;
    use reborn_types::JobId;

    use super::*;

    #[test]
    fn fresh_life_derived_values() {
        let derived = derived_view(Catalog::standard(), &GameState::default());
        assert_eq!(derived.current_day, 1);
        assert_eq!(derived.age_years, 16);
        assert!((derived.lifespan_years - 80.0).abs() < f64::EPSILON);
        assert_eq!(derived.joy, 1);
        assert!((derived.daily_cost - 0.5).abs() < f64::EPSILON);
        assert!((derived.job_start_delay_seconds - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn state_view_flattens_the_snapshot() {
        let view = state_view(Catalog::standard(), &GameState::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["active_activity"], "explore");
        assert_eq!(json["derived"]["age_years"], 16);
    }

    #[test]
    fn activities_report_unlock_prefix() {
        let views = activity_views(Catalog::standard(), &GameState::default());
        assert_eq!(views.len(), Catalog::standard().activities().len());

        let unlocked: Vec<bool> = views.iter().map(|v| v.unlock.is_unlocked()).collect();
        let first_locked = unlocked.iter().position(|u| !u).unwrap();
        assert!(unlocked.iter().skip(first_locked).all(|u| !u));
        assert!(views.first().is_some_and(|v| v.active && v.index == 0));
    }

    #[test]
    fn locked_job_lists_its_missing_skill() {
        let views = job_views(Catalog::standard(), &GameState::default());
        let scrap = views.first().unwrap();
        assert_eq!(scrap.def.id, "scrap_runner");
        match &scrap.unlock {
            UnlockStatus::Locked { missing } => {
                assert!(
                    missing
                        .iter()
                        .any(|m| matches!(m, MissingRequirement::Skill { .. }))
                );
            }
            UnlockStatus::Unlocked => panic!("scrap_runner should start locked"),
        }
    }

    #[test]
    fn active_job_is_flagged() {
        let state = GameState {
            active_job: Some(JobId::from("translator_helper")),
            ..GameState::default()
        };
        let views = job_views(Catalog::standard(), &state);
        let active: Vec<&str> = views
            .iter()
            .filter(|v| v.active)
            .map(|v| v.def.id.as_str())
            .collect();
        assert_eq!(active, ["translator_helper"]);
    }

    #[test]
    fn upgrade_affordability() {
        let state = GameState {
            echoes: 12,
            ..GameState::default()
        };
        let views = upgrade_views(Catalog::standard(), &state);
        let bag = views.iter().find(|v| v.def.id == START_BONUS).unwrap();
        assert_eq!(bag.next_cost, 15);
        assert!(!bag.affordable);
        assert_eq!(views.iter().filter(|v| v.affordable).count(), 2);
    }

    #[test]
    fn shop_marks_selection_and_ownership() {
        let mut state = GameState {
            selected_food: Some(ItemId::from("soup")),
            ..GameState::default()
        };
        state.owned_other.insert(ItemId::from("music_player"));

        let shop = shop_view(Catalog::standard(), &state);
        assert!(shop.housing.iter().any(|i| i.active && i.def.id == "shelter"));
        assert!(shop.food.iter().any(|i| i.active && i.def.id == "soup"));
        let player = shop
            .other
            .iter()
            .find(|i| i.def.id == "music_player")
            .unwrap();
        assert!(player.owned);
        assert!(!player.active);
    }

    #[test]
    fn reincarnation_view_adds_up() {
        let state = GameState {
            credits: 750.0,
            echoes: 4,
            total_lives: 2,
            ..GameState::default()
        };
        let view = reincarnation_view(&state);
        assert_eq!(view.preview.echo_gain, 3);
        assert_eq!(view.echoes_after, 7);
        assert_eq!(view.lives_after, 3);
    }
}
