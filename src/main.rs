//! Feddit Sentiment main entry point
//!
//! Starts the HTTP service that serves comment sentiment for Feddit forums.

use anyhow::Context;
use clap::Parser;
use feddit_sentiment::aggregate::{CancelHandle, CancelSignal};
use feddit_sentiment::config::{load_config_with_hash, validate, Config};
use feddit_sentiment::server::{build_router, AppState};
use feddit_sentiment::{FedditClient, LexiconScorer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Feddit Sentiment: comment sentiment for Feddit forums
///
/// Serves `GET /comments/{forum_name}`, returning recent comments of a forum with
/// a polarity score and a positive/negative label for each.
#[derive(Parser, Debug)]
#[command(name = "feddit-sentiment")]
#[command(version)]
#[command(about = "Comment sentiment for Feddit forums", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Interface to bind, overriding the config file
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the config file
    #[arg(long)]
    port: Option<u16>,

    /// Feddit API base URL, overriding the config file
    #[arg(long, value_name = "URL")]
    feddit_url: Option<String>,

    /// Log format: compact, pretty or json
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_hash) = load_config_with_hash(cli.config.as_deref())
        .context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    setup_logging(&config, cli.verbose, cli.quiet);

    match &cli.config {
        Some(path) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            config_hash
        ),
        None => tracing::info!("No configuration file given, using defaults"),
    }
    tracing::info!(
        "Feddit API: {} (page size {}, timeout {}s)",
        config.feddit.base_url,
        config.feddit.page_size,
        config.feddit.timeout_secs
    );

    let client = FedditClient::new(&config.feddit).context("Failed to build HTTP client")?;
    let (cancel_handle, shutdown) = CancelSignal::pair();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(
        config,
        Arc::new(client),
        Arc::new(LexiconScorer::new()),
        shutdown,
    ));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_handle))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(url) = &cli.feddit_url {
        config.feddit.base_url = url.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
}

/// Sets up the logging/tracing subscriber
///
/// RUST_LOG wins when set; otherwise verbosity flags pick the filter, falling back
/// to the configured level.
fn setup_logging(config: &Config, verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
            0 => EnvFilter::try_new(&config.logging.level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
            1 => EnvFilter::new("feddit_sentiment=debug,info"),
            2 => EnvFilter::new("feddit_sentiment=trace,debug"),
            _ => EnvFilter::new("trace"),
        })
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        "pretty" => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .init(),
    }
}

/// Waits for Ctrl-C, then cancels in-flight aggregations
async fn shutdown_signal(cancel: CancelHandle) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
    cancel.cancel();
}
