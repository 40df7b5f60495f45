pub mod config;
pub mod context;
pub mod mcp;
pub mod paths;
pub mod trello;
