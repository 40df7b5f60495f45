//! The active-context store.
//!
//! Owns the remembered board/workspace pair and the configured default
//! board. Readers always see a whole pair: every mutation builds the next
//! pair, persists it, then swaps it in under the write lock.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::trello::{Board, RemoteService, Workspace};

use super::error::{ContextError, ContextResult};
use super::storage::{ActiveContext, ContextStorage};

pub struct ActiveContextStore<S: ContextStorage> {
    state: RwLock<ActiveContext>,
    default_board_id: Option<String>,
    storage: Arc<S>,
}

impl<S: ContextStorage> ActiveContextStore<S> {
    /// Create a store with nothing active. Call [`load`](Self::load) to
    /// restore the previous run's selection.
    pub fn new(storage: S, default_board_id: Option<String>) -> Self {
        Self {
            state: RwLock::new(ActiveContext::default()),
            default_board_id,
            storage: Arc::new(storage),
        }
    }

    /// Restore the saved context.
    ///
    /// On any failure both ids stay unset and the error is returned for the
    /// caller to report; startup carries on either way.
    #[instrument(skip(self))]
    pub async fn load(&self) -> ContextResult<()> {
        let storage = Arc::clone(&self.storage);
        let loaded = blocking(move || storage.load()).await?;
        let mut state = self.state.write().await;
        *state = loaded.unwrap_or_default();
        debug!(context = ?*state, "active context restored");
        Ok(())
    }

    /// Effective board id: `explicit`, then the active board, then the
    /// configured default.
    pub async fn resolve_board_id(&self, explicit: Option<&str>) -> ContextResult<String> {
        if let Some(id) = explicit {
            return Ok(id.to_string());
        }
        if let Some(id) = self.state.read().await.active_board_id.clone() {
            return Ok(id);
        }
        self.default_board_id
            .clone()
            .ok_or(ContextError::NoBoardConfigured)
    }

    /// Make `board_id` the active board once Trello confirms it exists.
    ///
    /// A failed lookup or a failed save leaves the store unchanged.
    #[instrument(skip(self, remote))]
    pub async fn set_active_board<R: RemoteService>(
        &self,
        remote: &R,
        board_id: &str,
    ) -> ContextResult<Board> {
        let board = remote.get_board(board_id).await?;

        self.replace(|ctx| ctx.active_board_id = Some(board.id.clone()))
            .await?;
        info!(board_id = %board.id, name = %board.name, "active board set");
        Ok(board)
    }

    /// Make `workspace_id` the active workspace once Trello confirms it
    /// exists. The active board is left alone.
    #[instrument(skip(self, remote))]
    pub async fn set_active_workspace<R: RemoteService>(
        &self,
        remote: &R,
        workspace_id: &str,
    ) -> ContextResult<Workspace> {
        let workspace = remote.get_workspace(workspace_id).await?;

        self.replace(|ctx| ctx.active_workspace_id = Some(workspace.id.clone()))
            .await?;
        info!(workspace_id = %workspace.id, "active workspace set");
        Ok(workspace)
    }

    pub async fn active_board_id(&self) -> Option<String> {
        self.state.read().await.active_board_id.clone()
    }

    pub async fn active_workspace_id(&self) -> Option<String> {
        self.state.read().await.active_workspace_id.clone()
    }

    /// Both ids as one consistent pair.
    pub async fn snapshot(&self) -> ActiveContext {
        self.state.read().await.clone()
    }

    pub fn default_board_id(&self) -> Option<&str> {
        self.default_board_id.as_deref()
    }

    async fn replace(&self, change: impl FnOnce(&mut ActiveContext)) -> ContextResult<()> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        change(&mut next);
        let storage = Arc::clone(&self.storage);
        let next = blocking(move || storage.save(&next).map(|()| next)).await?;
        *state = next;
        Ok(())
    }
}

/// Storage backends do blocking file I/O; keep it off the runtime workers.
async fn blocking<T, F>(op: F) -> ContextResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ContextResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ContextError::Storage {
            message: e.to_string(),
        })?
}
