//! Content catalog and unlock resolution for the Reborn simulation.
//!
//! This crate owns the static tables the simulation reads -- activities,
//! jobs, permanent upgrades, and shop items -- and the sequential unlock
//! rules over them. Gates are plain data ([`SkillCondition`] lists combined
//! by AND), so the same conditions both decide what is playable and explain
//! what is still missing.
//!
//! # Modules
//!
//! - [`catalog`] -- The [`Catalog`] container and its lookups.
//! - [`condition`] -- Gating conditions and missing-requirement reports.
//! - [`defs`] -- Entry definitions ([`ActivityDef`], [`JobDef`], ...).
//! - [`error`] -- Catalog validation errors.
//! - [`standard`] -- The built-in catalog shipped with the game.
//! - [`unlock`] -- The sequential unlock resolver shared by the tick and the
//!   presentation layer.

pub mod catalog;
pub mod condition;
pub mod defs;
pub mod error;
pub mod standard;
pub mod unlock;

// Re-export primary types at crate root.
pub use catalog::Catalog;
pub use condition::{MissingRequirement, SkillCondition};
pub use defs::{ActivityDef, Gated, JobDef, ShopCategory, ShopItemDef, UpgradeDef};
pub use error::CatalogError;
pub use unlock::{
    UnlockStatus, activity_status, is_activity_permitted, is_job_permitted,
    last_unlocked_activity_index, last_unlocked_job_index, job_status,
    required_prev_mastery_level,
};
