//! Errors raised while handling a tool call.
//!
//! Every variant is rendered into the tool's error envelope; none of them
//! escape as protocol-level failures.

use miette::Diagnostic;
use thiserror::Error;

use crate::context::ContextError;
use crate::trello::TrelloError;

#[derive(Error, Diagnostic, Debug)]
pub enum ToolError {
    #[error("Invalid params: {message}")]
    #[diagnostic(code(trello_mcp::mcp::invalid_params))]
    InvalidParams { message: String },

    #[error("No board ID provided and no active or default board is configured")]
    #[diagnostic(
        code(trello_mcp::mcp::no_board),
        help("Pass boardId, call set_active_board, or set TRELLO_BOARD_ID.")
    )]
    NoBoardConfigured,

    #[error("Unknown tool: {name}")]
    #[diagnostic(code(trello_mcp::mcp::method_not_found))]
    MethodNotFound { name: String },

    /// Trello's failure, message passed through unchanged.
    #[error(transparent)]
    #[diagnostic(code(trello_mcp::mcp::remote))]
    Remote(TrelloError),

    #[error(transparent)]
    #[diagnostic(code(trello_mcp::mcp::context))]
    Context(ContextError),

    #[error("Failed to render response: {0}")]
    #[diagnostic(code(trello_mcp::mcp::serialization))]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ToolError::InvalidParams {
            message: message.into(),
        }
    }
}

impl From<TrelloError> for ToolError {
    fn from(e: TrelloError) -> Self {
        ToolError::Remote(e)
    }
}

impl From<ContextError> for ToolError {
    fn from(e: ContextError) -> Self {
        match e {
            ContextError::NoBoardConfigured => ToolError::NoBoardConfigured,
            ContextError::Remote(remote) => ToolError::Remote(remote),
            other => ToolError::Context(other),
        }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;
