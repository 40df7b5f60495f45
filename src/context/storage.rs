//! Durable storage for the active context.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

use super::error::{ContextError, ContextResult};

/// The process-wide board/workspace selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActiveContext {
    pub active_board_id: Option<String>,
    pub active_workspace_id: Option<String>,
}

/// Where the active context lives between runs. Can be mocked in tests.
#[cfg_attr(test, automock)]
pub trait ContextStorage: Send + Sync + 'static {
    /// Read the saved context. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> ContextResult<Option<ActiveContext>>;

    /// Replace the saved context.
    fn save(&self, context: &ActiveContext) -> ContextResult<()>;
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileContextStorage {
    path: PathBuf,
}

impl FileContextStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContextStorage for FileContextStorage {
    fn load(&self) -> ContextResult<Option<ActiveContext>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, context: &ActiveContext) -> ContextResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Atomic replace: write a sibling file, then rename over the old one.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(context)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Process-local storage, used when no state file is available.
#[derive(Debug, Default)]
pub struct MemoryContextStorage {
    saved: Mutex<Option<ActiveContext>>,
}

impl MemoryContextStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: ActiveContext) -> Self {
        Self {
            saved: Mutex::new(Some(context)),
        }
    }
}

impl ContextStorage for MemoryContextStorage {
    fn load(&self) -> ContextResult<Option<ActiveContext>> {
        let saved = self.saved.lock().map_err(|e| ContextError::Storage {
            message: e.to_string(),
        })?;
        Ok(saved.clone())
    }

    fn save(&self, context: &ActiveContext) -> ContextResult<()> {
        let mut saved = self.saved.lock().map_err(|e| ContextError::Storage {
            message: e.to_string(),
        })?;
        *saved = Some(context.clone());
        Ok(())
    }
}

/// Either backend, picked at startup.
pub enum AnyContextStorage {
    File(FileContextStorage),
    Memory(MemoryContextStorage),
}

impl ContextStorage for AnyContextStorage {
    fn load(&self) -> ContextResult<Option<ActiveContext>> {
        match self {
            Self::File(s) => s.load(),
            Self::Memory(s) => s.load(),
        }
    }

    fn save(&self, context: &ActiveContext) -> ContextResult<()> {
        match self {
            Self::File(s) => s.save(context),
            Self::Memory(s) => s.save(context),
        }
    }
}
