//! The content catalog and its lookups.
//!
//! A [`Catalog`] is validated once at construction and never mutated
//! afterwards. Entry order is significant: activities and jobs unlock as a
//! contiguous prefix of their table.

use std::collections::BTreeSet;

use crate::defs::{ActivityDef, JobDef, ShopCategory, ShopItemDef, UpgradeDef};
use crate::error::CatalogError;

/// Immutable tables of every activity, job, upgrade, and shop item.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    activities: Vec<ActivityDef>,
    fallback_activity: ActivityDef,
    jobs: Vec<JobDef>,
    upgrades: Vec<UpgradeDef>,
    housing: Vec<ShopItemDef>,
    food: Vec<ShopItemDef>,
    other: Vec<ShopItemDef>,
}

impl Catalog {
    /// Build and validate a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if there are no activities or no housing,
    /// if ids repeat within a table, or if a shop item sits in the wrong
    /// category table.
    pub fn new(
        activities: Vec<ActivityDef>,
        jobs: Vec<JobDef>,
        upgrades: Vec<UpgradeDef>,
        housing: Vec<ShopItemDef>,
        food: Vec<ShopItemDef>,
        other: Vec<ShopItemDef>,
    ) -> Result<Self, CatalogError> {
        if housing.is_empty() {
            return Err(CatalogError::NoHousing);
        }

        ensure_unique("activity", activities.iter().map(|a| a.id.as_str()))?;
        ensure_unique("job", jobs.iter().map(|j| j.id.as_str()))?;
        ensure_unique("upgrade", upgrades.iter().map(|u| u.id.as_str()))?;
        ensure_unique(
            "item",
            housing
                .iter()
                .chain(food.iter())
                .chain(other.iter())
                .map(|item| item.id.as_str()),
        )?;

        ensure_category(&housing, ShopCategory::Housing)?;
        ensure_category(&food, ShopCategory::Food)?;
        ensure_category(&other, ShopCategory::Other)?;

        let mut activities = activities.into_iter();
        let Some(first) = activities.next() else {
            return Err(CatalogError::NoActivities);
        };
        Ok(Self::from_validated(
            first,
            activities.collect(),
            jobs,
            upgrades,
            housing,
            food,
            other,
        ))
    }

    /// Assemble a catalog from tables already known to be valid.
    ///
    /// `first` is the fallback activity and heads the activity table.
    pub(crate) fn from_validated(
        first: ActivityDef,
        more_activities: Vec<ActivityDef>,
        jobs: Vec<JobDef>,
        upgrades: Vec<UpgradeDef>,
        housing: Vec<ShopItemDef>,
        food: Vec<ShopItemDef>,
        other: Vec<ShopItemDef>,
    ) -> Self {
        let activities = std::iter::once(first.clone())
            .chain(more_activities)
            .collect();
        Self {
            activities,
            fallback_activity: first,
            jobs,
            upgrades,
            housing,
            food,
            other,
        }
    }

    /// The built-in catalog, constructed on first use.
    pub fn standard() -> &'static Self {
        crate::standard::catalog()
    }

    /// All activities in unlock order.
    pub fn activities(&self) -> &[ActivityDef] {
        &self.activities
    }

    /// All jobs in unlock order.
    pub fn jobs(&self) -> &[JobDef] {
        &self.jobs
    }

    /// All permanent upgrades.
    pub fn upgrades(&self) -> &[UpgradeDef] {
        &self.upgrades
    }

    /// All housing items.
    pub fn housing_items(&self) -> &[ShopItemDef] {
        &self.housing
    }

    /// All food items.
    pub fn food_items(&self) -> &[ShopItemDef] {
        &self.food
    }

    /// All "other" items.
    pub fn other_items(&self) -> &[ShopItemDef] {
        &self.other
    }

    /// The first activity, used whenever an activity id is unknown.
    pub const fn default_activity(&self) -> &ActivityDef {
        &self.fallback_activity
    }

    /// Resolve an activity id, falling back to the first activity.
    pub fn activity(&self, id: &str) -> &ActivityDef {
        self.activities
            .iter()
            .find(|a| a.id == id)
            .unwrap_or_else(|| self.default_activity())
    }

    /// Position of an activity in the table, if present.
    pub fn activity_index(&self, id: &str) -> Option<usize> {
        self.activities.iter().position(|a| a.id == id)
    }

    /// Resolve a job id. Unknown ids resolve to no job.
    pub fn job(&self, id: &str) -> Option<&JobDef> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Position of a job in the table, if present.
    pub fn job_index(&self, id: &str) -> Option<usize> {
        self.jobs.iter().position(|j| j.id == id)
    }

    /// Resolve an upgrade id.
    pub fn upgrade(&self, id: &str) -> Option<&UpgradeDef> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    /// Resolve a housing id.
    pub fn housing(&self, id: &str) -> Option<&ShopItemDef> {
        self.housing.iter().find(|item| item.id == id)
    }

    /// Resolve a food id.
    pub fn food(&self, id: &str) -> Option<&ShopItemDef> {
        self.food.iter().find(|item| item.id == id)
    }

    /// Resolve an "other" item id.
    pub fn other(&self, id: &str) -> Option<&ShopItemDef> {
        self.other.iter().find(|item| item.id == id)
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

fn ensure_category(items: &[ShopItemDef], listed: ShopCategory) -> Result<(), CatalogError> {
    match items.iter().find(|item| item.category != listed) {
        Some(item) => Err(CatalogError::CategoryMismatch {
            id: item.id.to_string(),
            listed,
            declared: item.category,
        }),
        None => Ok(()),
    }
}
