use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use shared::protocol::PREDICT_ROUTE;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod scoring;

use app_state::AppState;
use config::{load_settings, Settings};
use scoring::FixedScorer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let scorer = FixedScorer::uniform(settings.stub_frame_count, settings.stub_frame_score)
        .context("invalid stub frame score")?;
    let state = AppState {
        scorer: Arc::new(scorer),
        min_usable_frames: settings.min_usable_frames,
    };
    let app = build_router(Arc::new(state), &settings)?;

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, origin = %settings.allowed_origin, "prediction server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, settings: &Settings) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(&settings.allowed_origin)
        .with_context(|| format!("invalid CORS origin '{}'", settings.allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Ok(Router::new()
        .route("/healthz", get(api::healthz))
        .route(PREDICT_ROUTE, post(api::predict))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(settings.max_upload_bytes))
        .layer(cors)
        .with_state(state))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
