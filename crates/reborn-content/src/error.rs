//! Error types for the `reborn-content` crate.
//!
//! Catalog construction is the only fallible operation; every lookup on a
//! validated [`Catalog`](crate::Catalog) is total.

/// Errors raised while validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog has no activities; the first activity is the fallback
    /// for unknown ids, so at least one is required.
    #[error("catalog must define at least one activity")]
    NoActivities,

    /// The catalog has no housing; the default housing must exist.
    #[error("catalog must define at least one housing item")]
    NoHousing,

    /// Two entries of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// Kind of entry (activity, job, upgrade, item).
        kind: &'static str,
        /// The repeated id.
        id: String,
    },

    /// A shop item was filed under the wrong category table.
    #[error("item {id} is listed as {listed:?} but declares {declared:?}")]
    CategoryMismatch {
        /// The offending item.
        id: String,
        /// The table it was placed in.
        listed: crate::ShopCategory,
        /// The category it declares.
        declared: crate::ShopCategory,
    },
}
