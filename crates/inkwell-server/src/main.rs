mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use inkwell_api::AppStateInner;
use inkwell_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "inkwell_server=debug,inkwell_api=debug,inkwell_db=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;
    info!("Displaying timestamps in {}", config.display_zone.name());

    // Init database
    let db = Arc::new(Database::open(&config.db_path)?);

    // Surface an unreachable store at startup; the request path only sees the sentinel.
    if let Err(e) = db.try_latest_entry_id() {
        warn!("Could not read latest entry id at startup: {}", e);
    }

    // Never serve an empty history
    if let Err(e) = db.seed_if_empty() {
        error!("Failed to seed bootstrap entry: {}", e);
    }

    let state = AppStateInner::new(db, config.display_zone);
    let app = inkwell_api::router(state).layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Inkwell listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Connect info gives /save the writer's address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
