//! Model Context Protocol (MCP) server implementation
//!
//! The server speaks MCP over stdio and exposes one tool per Trello
//! operation.
//!
//! - **catalog**: the static operation table (name, schema, validator)
//! - **validate**: argument checks producing typed [`ValidatedParams`]
//! - **dispatch**: routes a call through validation, board resolution and
//!   the remote call, then renders the result envelope
//! - **render**: response shaping shared by the dispatcher
//! - **server**: the rmcp `ServerHandler`

pub mod catalog;
mod dispatch;
mod error;
mod render;
pub mod server;
pub mod validate;

#[cfg(test)]
mod catalog_test;

pub use dispatch::Dispatcher;
pub use error::{ToolError, ToolResult};
pub use server::TrelloMcpServer;
pub use validate::ValidatedParams;
