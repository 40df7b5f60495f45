//! Startup configuration.
//!
//! Every flag can also come from the environment, so the server can be
//! launched by an MCP host that only passes env vars.

use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use reqwest::Url;
use thiserror::Error;

use crate::paths::default_state_path;
use crate::trello::DEFAULT_API_URL;

#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} is required")]
    #[diagnostic(
        code(trello_mcp::config::missing_credential),
        help("Set TRELLO_API_KEY and TRELLO_TOKEN in the server's environment.")
    )]
    MissingCredential { name: &'static str },

    #[error("Invalid Trello API URL '{url}': {message}")]
    #[diagnostic(code(trello_mcp::config::invalid_api_url))]
    InvalidApiUrl { url: String, message: String },
}

#[derive(Parser, Debug)]
#[command(name = "trello-mcp")]
#[command(author, version, about = "Trello MCP server (stdio)", long_about = None)]
pub struct Cli {
    /// Trello API key
    #[arg(long, env = "TRELLO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Trello member token
    #[arg(long, env = "TRELLO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Board used when a call names none and no board is active
    #[arg(long, env = "TRELLO_BOARD_ID")]
    pub board_id: Option<String>,

    /// Active-context state file (defaults to XDG config dir: ~/.config/trello-mcp/context.json)
    #[arg(long, env = "TRELLO_MCP_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Trello REST base URL
    #[arg(long, env = "TRELLO_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

/// Validated server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub token: String,
    pub default_board_id: Option<String>,
    /// `None` keeps the active context in memory only.
    pub state_file: Option<PathBuf>,
    pub api_url: Url,
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let api_key = required(cli.api_key, "TRELLO_API_KEY")?;
        let token = required(cli.token, "TRELLO_TOKEN")?;
        let api_url = Url::parse(&cli.api_url).map_err(|e| ConfigError::InvalidApiUrl {
            url: cli.api_url.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            api_key,
            token,
            default_board_id: cli.board_id.filter(|id| !id.is_empty()),
            state_file: cli.state_file.or_else(default_state_path),
            api_url,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingCredential { name })
}
