//! Key-value relay service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ timeout ─▶ body limit ─▶ router
//!                                                                      │
//!                    ┌───────────────┬───────────────┬─────────────────┤
//!                    ▼               ▼               ▼                 ▼
//!               /ping, /test     /user/{name}      /posts       basic auth gate
//!                                    │               │                 │
//!                                    ▼               ▼                 ▼
//!                                 KvStore ◀──────────┼──────────── /admin
//!                                                    ▼
//!                                            PostsClient ────▶ upstream
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use kv_relay::config::{load_config, ServiceConfig};
use kv_relay::lifecycle::signals::shutdown_signal;
use kv_relay::observability::logging::init_logging;
use kv_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "kv-relay")]
#[command(about = "Key-value store and posts relay over HTTP", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!("kv-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.posts_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on(shutdown_signal());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
