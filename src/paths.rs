//! Path resolution for trello-mcp state.
//!
//! Provides XDG-compliant path resolution for the persisted active context.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "trello-mcp";
const STATE_FILE: &str = "context.json";

/// Get the default state file path.
///
/// # Returns
/// `$XDG_CONFIG_HOME/trello-mcp/context.json`, falling back to
/// `~/.config/trello-mcp/context.json`. `None` when neither variable is set.
pub fn default_state_path() -> Option<PathBuf> {
    state_path_from(env::var("XDG_CONFIG_HOME").ok(), env::var("HOME").ok())
}

fn state_path_from(xdg_config_home: Option<String>, home: Option<String>) -> Option<PathBuf> {
    let config_home = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|dir| !dir.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })?;

    Some(config_home.join(APP_DIR).join(STATE_FILE))
}
