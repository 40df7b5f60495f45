//! Trello MCP server binary.
//!
//! Builds the concrete Trello client and context storage, then serves the
//! MCP protocol over stdin/stdout. Logs go to stderr so they never mix with
//! protocol frames.

use clap::Parser;
use miette::Diagnostic;
use rmcp::ServiceExt;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trello_mcp::config::{Cli, Config, ConfigError};
use trello_mcp::context::{
    ActiveContextStore, AnyContextStorage, FileContextStorage, MemoryContextStorage,
};
use trello_mcp::mcp::TrelloMcpServer;
use trello_mcp::trello::{TrelloClient, TrelloError};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build Trello client: {0}")]
    #[diagnostic(code(trello_mcp::binary::client))]
    Client(#[from] TrelloError),

    #[error("MCP transport error: {message}")]
    #[diagnostic(code(trello_mcp::binary::transport))]
    Transport { message: String },
}

/// Initialize tracing subscriber with env filter, writing to stderr
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trello_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    run().await?;
    Ok(())
}

async fn run() -> Result<(), BinaryError> {
    let config = Config::try_from(Cli::parse())?;

    init_tracing();
    let _ = rustls::crypto::ring::default_provider().install_default();

    let client = TrelloClient::new(config.api_url, config.api_key, config.token)?;

    let storage = match &config.state_file {
        Some(path) => {
            let file = FileContextStorage::new(path);
            info!("Active context stored at {:?}", file.path());
            AnyContextStorage::File(file)
        }
        None => {
            warn!("No state directory available; active context will not survive restarts");
            AnyContextStorage::Memory(MemoryContextStorage::new())
        }
    };

    let store = ActiveContextStore::new(storage, config.default_board_id);
    if let Err(e) = store.load().await {
        warn!(error = %e, "Could not restore active context, starting with none");
    }
    match store.default_board_id() {
        Some(board_id) => info!(%board_id, "Default board configured"),
        None => info!("No default board configured"),
    }

    info!("Trello MCP server listening on stdio ({})", client.base_url());
    let server = TrelloMcpServer::new(client, store);

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| BinaryError::Transport {
            message: e.to_string(),
        })?;

    tokio::select! {
        quit = service.waiting() => {
            let reason = quit.map_err(|e| BinaryError::Transport { message: e.to_string() })?;
            info!(?reason, "MCP session ended");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
