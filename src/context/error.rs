//! Active-context error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::trello::TrelloError;

#[derive(Error, Diagnostic, Debug)]
pub enum ContextError {
    #[error("No board ID provided and no active or default board is configured")]
    #[diagnostic(
        code(trello_mcp::context::no_board),
        help("Pass boardId, call set_active_board, or set TRELLO_BOARD_ID.")
    )]
    NoBoardConfigured,

    #[error(transparent)]
    #[diagnostic(code(trello_mcp::context::remote))]
    Remote(#[from] TrelloError),

    #[error("Failed to access context state file: {0}")]
    #[diagnostic(code(trello_mcp::context::io))]
    Io(#[from] std::io::Error),

    #[error("Context state file is corrupt: {0}")]
    #[diagnostic(code(trello_mcp::context::corrupt))]
    Corrupt(#[from] serde_json::Error),

    #[error("Context storage unavailable: {message}")]
    #[diagnostic(code(trello_mcp::context::storage))]
    Storage { message: String },
}

pub type ContextResult<T> = Result<T, ContextError>;
