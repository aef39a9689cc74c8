use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::{
    loader::VehicleJsonFile,
    vehicle::{repository::VehicleMap, service::VehicleDefault, VehicleIndex},
};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Seed the store from the configured data file and wire the service.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let path = &cfg.data.vehicles_path;
    // absent file: empty store; unreadable or malformed file: startup error
    let db = if common::env::ensure_data_file(path).await? {
        VehicleJsonFile::new(path).load().await?
    } else {
        VehicleIndex::new()
    };
    let repo = Arc::new(VehicleMap::new(db));
    Ok(ServerState { vehicles: Arc::new(VehicleDefault::new(repo)) })
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("{raw}: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    // host/port come straight from config; a bad host is reported before binding
    let addr = bind_addr(&cfg)?;
    info!(%addr, data = %cfg.data.vehicles_path, "starting vehicle server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
