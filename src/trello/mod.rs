//! Trello remote service.
//!
//! - `service`: the [`RemoteService`] trait the dispatcher calls through
//! - `client`: reqwest implementation against the Trello REST API
//! - `models`: the entities Trello returns
//! - `error`: transport and API failures

mod client;
mod error;
mod models;
mod service;

#[cfg(test)]
pub mod fake;

#[cfg(test)]
mod client_test;

pub use client::{DEFAULT_ACTIVITY_LIMIT, DEFAULT_API_URL, DEFAULT_ATTACHMENT_NAME, TrelloClient};
pub use error::{TrelloError, TrelloResult};
#[cfg(test)]
pub use fake::FakeTrello;
pub use models::*;
pub use service::RemoteService;
