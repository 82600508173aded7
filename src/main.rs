use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use kakao_bridge::config::{loader, BridgeConfig};
use kakao_bridge::http::HttpServer;
use kakao_bridge::launcher::{self, manager, static_files, PortPolicy, DEFAULT_PORT};
use kakao_bridge::lifecycle::{signals, Shutdown};
use kakao_bridge::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "kakao-bridge", version)]
#[command(about = "Kakao skill gateway and process launcher", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults plus environment otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the embedded skill gateway (PORT defaults to 8080)
    Serve,
    /// Delegate to the external application server (PORT required)
    Exec,
    /// Serve the working directory's files over HTTP (PORT defaults to 8080)
    Static {
        /// Directory to expose instead of the configured root
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => loader::from_env()?,
    };

    logging::init(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "kakao-bridge starting");

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Exec => exec(config).await,
        Command::Static { root } => serve_static(config, root).await,
    }
}

/// Variant: embedded gateway. Binds the listener, then serves until a
/// shutdown signal drains it.
async fn serve(config: BridgeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let port = launcher::resolve_port(config.listener.port, PortPolicy::Fallback(DEFAULT_PORT))?;
    let addr = format!("{}:{}", config.listener.host, port);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %addr,
        request_timeout_secs = config.timeouts.request_secs,
        upstream_url = %config.upstream.url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(metrics_addr) => metrics::init_metrics(metrics_addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new(Duration::from_secs(config.timeouts.graceful_secs));
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Variant: delegation. The external application server owns the socket;
/// this process only launches, waits, and propagates the exit status.
async fn exec(config: BridgeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let port = launcher::resolve_port(config.listener.port, PortPolicy::Required)?;

    let shutdown = Shutdown::new(Duration::from_secs(config.timeouts.graceful_secs));
    shutdown.trigger_on_signal();

    let code = manager::run(&config, port, shutdown).await?;
    std::process::exit(code);
}

/// Variant: file server over the working directory.
async fn serve_static(
    mut config: BridgeConfig,
    root: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(root) = root {
        config.static_files.root = root.display().to_string();
    }

    let port = launcher::resolve_port(config.listener.port, PortPolicy::Fallback(DEFAULT_PORT))?;
    let addr = format!("{}:{}", config.listener.host, port);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %addr,
        root = %config.static_files.root,
        "Serving files"
    );

    let router = static_files::router(&config.static_files);
    axum::serve(listener, router)
        .with_graceful_shutdown(signals::shutdown_signal())
        .await?;

    tracing::info!("File server stopped");
    Ok(())
}
