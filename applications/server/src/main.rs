/// MusicDB Server - read-only HTTP API over a music-track catalog
use clap::{Parser, Subcommand};
use musicdb_core::TrackRepository;
use musicdb_server::{
    app::{cors_layer, create_router},
    commands,
    config::ServerConfig,
    services::MediaFiles,
    state::AppState,
};
use musicdb_storage::SqliteTrackRepository;
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "musicdb-server")]
#[command(about = "Read-only music catalog API server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print catalog statistics as JSON
    Stats {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "musicdb_server=info,musicdb_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Stats { config } => {
            print_stats(config).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = load_config(config_path)?;
    let addr = config.bind_address()?;

    tracing::info!("Starting MusicDB Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("CORS origins: {:?}", config.cors.allowed_origins);

    // Initialize database
    let repo = SqliteTrackRepository::connect(&config.storage.database_url).await?;
    let tracks: Arc<dyn TrackRepository> = Arc::new(repo);
    tracing::info!("Database connected");

    let media = MediaFiles::new(config.storage.media_root.clone());
    if let Some(root) = media.root() {
        tracing::info!("Media root: {:?}", root);
    }

    // Build application state and router
    let app_state = AppState::new(Arc::clone(&tracks), Arc::new(media));
    let app = create_router(app_state, cors_layer(&config.cors)?);

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracks.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn print_stats(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    println!("{}", commands::stats_report(&config).await?);
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
