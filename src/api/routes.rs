use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::response;
use crate::config::RELAY_GENERATE_PATH;
use crate::error::Result;
use crate::AppState;

// Shared outbound client so relayed calls reuse backend connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(90))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route(RELAY_GENERATE_PATH, post(generate_brief_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// Forwards the body untouched to the backend and replays whatever it answers.
async fn generate_brief_handler(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let url = state.config.generate_url();
    let start_time = Instant::now();
    info!(%url, bytes = body.len(), "relaying brief request");

    let backend_response = CLIENT
        .post(&url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await?;

    let status = backend_response.status().as_u16();
    let data: Value = backend_response.json().await?;

    info!(status, elapsed = ?start_time.elapsed(), "backend answered");
    if status >= 400 {
        warn!(status, "backend returned failure status");
    }

    Ok(response::relay(status, data))
}

async fn not_found() -> impl IntoResponse {
    response::error(StatusCode::NOT_FOUND, "Not found")
}
