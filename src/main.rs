//! trie-router demo server.
//!
//! Serves the [`trie_router::site`] demo routes.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use trie_router::config::{load_config, ServerConfig};
use trie_router::http::HttpServer;
use trie_router::lifecycle::{signals, Shutdown};
use trie_router::observability::{logging, metrics};
use trie_router::{site, Error, RouterOptions};

#[derive(Parser)]
#[command(name = "trie-router")]
#[command(about = "Demo HTTP server built on the trie router", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory holding index.html, 404.html, css/ and js/.
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_filter);
    tracing::info!("trie-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        case_sensitive = config.routing.case_sensitive,
        sibling_order = ?config.routing.sibling_order,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let dispatcher = site::routes(RouterOptions::from(&config.routing), cli.static_dir);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config, dispatcher);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
