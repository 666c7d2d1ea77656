use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::{AuthSettings, ServerState};
use crate::routes;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

/// The API sits behind a browser frontend on another origin.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: load config, connect the store, build the app and
/// serve indefinitely.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;

    let store = models::db::connect(&cfg.database).await?;

    let state = ServerState {
        store,
        auth: AuthSettings {
            access_token_secret: cfg.auth.access_token_secret.clone(),
        },
    };

    let app: Router = routes::build_router(build_cors(), state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "server running");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
