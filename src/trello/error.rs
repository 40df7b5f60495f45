//! Trello API error types.

use miette::Diagnostic;
use thiserror::Error;

/// Failures raised while talking to the Trello REST API.
///
/// Messages are surfaced to tool callers verbatim, so `Api` carries the
/// response body exactly as Trello sent it.
#[derive(Error, Diagnostic, Debug)]
pub enum TrelloError {
    #[error("Failed to reach Trello: {source}")]
    #[diagnostic(
        code(trello_mcp::trello::connection_failed),
        help("Check network connectivity or the TRELLO_API_URL override.")
    )]
    Http {
        #[source]
        source: reqwest::Error,
    },

    #[error("Trello API error ({status}): {message}")]
    #[diagnostic(code(trello_mcp::trello::api_error))]
    Api { status: u16, message: String },

    #[error("Invalid response from Trello: {message}")]
    #[diagnostic(code(trello_mcp::trello::invalid_response))]
    InvalidResponse { message: String },
}

impl From<reqwest::Error> for TrelloError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TrelloError::InvalidResponse {
                message: e.to_string(),
            }
        } else {
            TrelloError::Http { source: e }
        }
    }
}

impl From<serde_json::Error> for TrelloError {
    fn from(e: serde_json::Error) -> Self {
        TrelloError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type TrelloResult<T> = Result<T, TrelloError>;
