//! Shared type definitions for the Reborn progression simulation.
//!
//! This crate is the single source of truth for the data model that flows
//! between the simulation core, the save codec, and the HTTP surface.
//!
//! # Modules
//!
//! - [`ids`] -- String-backed identifier newtypes for catalog entries
//! - [`skill`] -- The fixed skill set and the generic [`SkillState`] track
//! - [`state`] -- The [`GameState`] snapshot and its default value

pub mod ids;
pub mod skill;
pub mod state;

// Re-export all public types at crate root for convenience.
pub use ids::{ActivityId, ItemId, JobId, UpgradeId, upgrades};
pub use skill::{Skill, SkillState};
pub use state::{
    DAYS_PER_YEAR, GameState, LIFESPAN_DAYS, LOG_CAPACITY, STARTING_AGE_DAYS, push_log_line,
};
