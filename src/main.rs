mod config;

use anyhow::{Context, Result};
use docmcp_server::{DocumentServer, serve_http, serve_stdio};
use docmcp_store::initialize_store;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ServerConfig, Transport};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout はstdioトランスポートが使うため、ログは stderr に出す
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ServerConfig::from_env().context("Failed to read configuration")?;
    info!(?config, "Starting docmcp...");

    let store = initialize_store(config.documents_dir.as_deref())
        .context("Failed to initialize document store")?;
    let server = DocumentServer::new(store);

    match config.transport {
        Transport::Stdio => serve_stdio(server).await?,
        Transport::Http { bind_address } => serve_http(server, bind_address).await?,
    }

    info!("docmcp finished.");
    Ok(())
}
