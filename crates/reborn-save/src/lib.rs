//! Save codec and save storage for the Reborn simulation.
//!
//! # Modules
//!
//! - [`codec`] -- The `|`-delimited save record: [`encode`] and the
//!   backward-compatible [`decode`].
//! - [`error`] -- [`DecodeError`] and [`SaveError`].
//! - [`store`] -- The [`SaveStore`] trait with file and in-memory backends.

pub mod codec;
pub mod error;
pub mod store;

pub use codec::{FIELD_COUNT, MANDATORY_FIELDS, RecordLayout, decode, encode};
pub use error::{DecodeError, SaveError};
pub use store::{FileSaveStore, MemorySaveStore, SaveStore, load, load_or_default, save};
