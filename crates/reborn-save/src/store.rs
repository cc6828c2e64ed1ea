//! Save storage backends.
//!
//! A [`SaveStore`] holds at most one save record. The file backend writes a
//! temporary sibling and renames it over the real file, so a crash mid-write
//! leaves the previous save intact.

use std::future::Future;
use std::path::{Path, PathBuf};

use reborn_types::GameState;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::codec::{decode, encode};
use crate::error::SaveError;

/// Somewhere a single save record lives.
pub trait SaveStore: Send + Sync {
    /// Read the stored record, or `None` if nothing has been saved yet.
    fn read(&self) -> impl Future<Output = Result<Option<String>, SaveError>> + Send;

    /// Replace the stored record.
    fn write(&self, record: String) -> impl Future<Output = Result<(), SaveError>> + Send;
}

/// Load and decode the stored state.
///
/// # Errors
///
/// Returns [`SaveError::Io`] if the store cannot be read and
/// [`SaveError::Decode`] if the record is malformed.
pub async fn load<S: SaveStore>(store: &S) -> Result<Option<GameState>, SaveError> {
    match store.read().await? {
        Some(record) => Ok(Some(decode(&record)?)),
        None => Ok(None),
    }
}

/// Load the stored state, falling back to a new first life when nothing
/// usable is stored.
pub async fn load_or_default<S: SaveStore>(store: &S) -> GameState {
    match load(store).await {
        Ok(Some(state)) => {
            info!(
                lives = state.total_lives,
                echoes = state.echoes,
                day = state.current_day(),
                "Save restored"
            );
            state
        }
        Ok(None) => {
            info!("No save found, starting a new life");
            GameState::default()
        }
        Err(e) => {
            warn!(error = %e, "Save unusable, starting a new life");
            GameState::default()
        }
    }
}

/// Encode and store `state`.
///
/// # Errors
///
/// Returns [`SaveError::Io`] if the store cannot be written.
pub async fn save<S: SaveStore>(store: &S, state: &GameState) -> Result<(), SaveError> {
    store.write(encode(state)).await?;
    debug!(lives = state.total_lives, day = state.current_day(), "Saved");
    Ok(())
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

/// A save record in a single text file.
#[derive(Debug, Clone)]
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the save file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SaveStore for FileSaveStore {
    async fn read(&self) -> Result<Option<String>, SaveError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, record: String) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let temp = self.temp_path();
        tokio::fs::write(&temp, record).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

/// A save record held in memory, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySaveStore {
    record: Mutex<Option<String>>,
}

impl MemorySaveStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `record`.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(record.into())),
        }
    }
}

impl SaveStore for MemorySaveStore {
    async fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(self.record.lock().await.clone())
    }

    async fn write(&self, record: String) -> Result<(), SaveError> {
        *self.record.lock().await = Some(record);
        Ok(())
    }
}
