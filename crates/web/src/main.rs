use std::net::SocketAddr;
use std::sync::Arc;

use notemaster_web::client::NoteApiClient;
use notemaster_web::config::WebConfig;
use notemaster_web::site::{build_site_router, WebState};
use notemaster_web::templates::MiniJinjaEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notemaster_web=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "Web server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    let config = WebConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        api = %config.api.base_url,
        "Loaded web configuration",
    );

    let state = WebState {
        api: NoteApiClient::new(&config.api)?,
        templates: Arc::new(MiniJinjaEngine::new()?),
    };
    let app = build_site_router(state);

    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting web server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "Failed to install Ctrl-C handler");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl-C, shutting down");
        })
        .await?;

    Ok(())
}
