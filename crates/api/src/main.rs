use std::net::SocketAddr;
use std::sync::Arc;

use notemaster_api::config::{ServerConfig, StoreBackend};
use notemaster_api::router::build_app_router;
use notemaster_api::state::AppState;
use notemaster_core::store::{MemoryNoteStore, NoteStore};
use notemaster_db::{DbConfig, PgNoteStore};
use notemaster_services::NoteService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notemaster_api=debug,notemaster_db=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        store = %config.store_backend,
        "Loaded server configuration",
    );

    // --- Store ---
    let store = open_store(config.store_backend).await?;

    // --- App state ---
    let state = AppState {
        notes: NoteService::new(store),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Open the configured store. For PostgreSQL this connects, checks health
/// and applies pending migrations before anything is served.
async fn open_store(backend: StoreBackend) -> Result<Arc<dyn NoteStore>, BoxError> {
    match backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryNoteStore::new()))
        }
        StoreBackend::Postgres => {
            let db_config = DbConfig::from_env()?;
            let pool = notemaster_db::create_pool(&db_config).await?;
            tracing::info!(max_connections = db_config.max_connections, "Database connection pool created");

            notemaster_db::health_check(&pool).await?;
            tracing::info!("Database health check passed");

            notemaster_db::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgNoteStore::new(pool, db_config.retry)))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
