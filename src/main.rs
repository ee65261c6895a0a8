//! Bands and songs API entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bandas_api::api::{create_router, AppState};
use bandas_api::config::Config;
use bandas_api::metrics;
use bandas_api::store::Database;
use bandas_api::utils::shutdown_signal;
use bandas_api::AppError;

/// CRUD HTTP API for bands and their songs.
#[derive(Parser, Debug)]
#[command(name = "bandas-api")]
#[command(about = "CRUD HTTP API for bands and their songs")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create the bands and songs tables if missing.
    InitDb,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("bandas_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    // Handle subcommands
    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        Some(Command::InitDb) => cmd_init_db().await,
        Some(Command::CheckConfig) => cmd_check_config(),
        None => cmd_serve(args.port).await,
    }
}

/// Load and validate configuration.
fn load_config() -> Result<Config, AppError> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        AppError::InvalidConfig(e)
    })?;

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    let config = load_config()?;

    println!("Configuration Summary:");
    println!("  Database URL: {}", config.database_url);
    println!("  Pool Size: {}", config.db_max_connections);
    println!("  Port: {}", config.port);
    println!(
        "  Metrics: {}",
        config
            .metrics_port
            .map(|p| format!("port {}", p))
            .unwrap_or_else(|| "Disabled".to_string())
    );
    println!(
        "  Strict Band References: {}",
        if config.strict_band_refs { "Enabled" } else { "Disabled" }
    );
    println!("CONFIGURATION CHECK PASSED");

    Ok(())
}

/// Create the schema on the configured database.
async fn cmd_init_db() -> anyhow::Result<()> {
    let config = load_config()?;
    let db = Database::connect(&config.database_url, config.db_max_connections)
        .await
        .map_err(AppError::from)?;

    db.ensure_schema().await.map_err(AppError::from)?;
    db.close().await;

    info!("Schema initialized at {}", config.database_url);
    Ok(())
}

/// Serve the HTTP API until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config()?;

    if let Some(port) = port_override {
        config.port = port;
    }

    if let Some(metrics_port) = config.metrics_port {
        metrics::install_exporter(SocketAddr::from(([0, 0, 0, 0], metrics_port)))?;
    }

    let db = Database::connect(&config.database_url, config.db_max_connections)
        .await
        .map_err(|e| {
            error!("Failed to open database {}: {}", config.database_url, e);
            AppError::from(e)
        })?;

    let state = AppState::new(db.clone()).with_strict_band_refs(config.strict_band_refs);
    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.map_err(AppError::from)?;
    info!("Servidor rodando na porta {}", config.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::from)?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}
