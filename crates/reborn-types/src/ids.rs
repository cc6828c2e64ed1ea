//! Type-safe identifier wrappers around [`String`].
//!
//! Catalog entries (activities, jobs, upgrades, shop items) are referenced by
//! stable string ids. Saved states may carry ids that no longer exist in the
//! catalog, so ids are open strings rather than enums; the newtypes only stop
//! an activity id from being passed where a job id is expected.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`] value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id! {
    /// Identifier of an activity in the content catalog.
    ActivityId
}

define_id! {
    /// Identifier of a job in the content catalog.
    JobId
}

define_id! {
    /// Identifier of a permanent (prestige) upgrade.
    UpgradeId
}

define_id! {
    /// Identifier of a shop item (housing, food, or other).
    ItemId
}

/// Ids of the permanent upgrades the simulation reads directly.
pub mod upgrades {
    /// Boosts all experience gains by 5% per level.
    pub const XP_BOOST: &str = "xp_boost";
    /// Boosts all credit income by 5% per level.
    pub const CREDIT_BOOST: &str = "credit_boost";
    /// Grants 50 starting credits per level on every new life.
    pub const START_BONUS: &str = "start_bonus";

    /// Every well-known upgrade id, in catalog order.
    pub const ALL: [&str; 3] = [XP_BOOST, CREDIT_BOOST, START_BONUS];
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn ids_compare_with_str() {
        let id = ActivityId::new("explore");
        assert_eq!(id, "explore");
        assert_eq!(id.as_str(), "explore");
        assert_eq!(id.to_string(), "explore");
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(JobId::from("scrap_runner"), 3_u32);
        assert_eq!(map.get("scrap_runner"), Some(&3));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = UpgradeId::from("xp_boost");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"xp_boost\""));
    }
}
