//! Paper assistant server binary
//!
//! Run with: cargo run -p paper-assistant --bin paper-assistant-server -- --config papers.toml

use clap::Parser;
use paper_assistant::{config::AppConfig, server::PaperServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "paper-assistant-server", version, about = "Research paper assistant API")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paper_assistant=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - LLM backend: {:?}", config.llm.backend);
    tracing::info!("  - Database: {}", config.database.path.display());

    let server = PaperServer::new(config)?;

    match server.state().assistant().paper_count().await {
        Ok(count) => tracing::info!("{} papers in store", count),
        Err(e) => tracing::warn!("Could not count stored papers: {}", e),
    }

    let health = server.state().assistant().health().await;
    if !health.embedder {
        tracing::warn!("Embedding service not reachable; uploads and retrieval will fail until it is");
    }
    if !health.llm {
        tracing::warn!("LLM backend not reachable");
    }

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
