//! HTTP surface of the dataset.
//!
//! The server loads the [`Dataset`] once at startup and shares it read-only between requests.
//!
//! # Routes
//!
//! - `GET /api/health` → `{status, timestamp, dataCount, message}`
//! - `GET /api/search?query=<text>[&limit=<n>]` → matching characters; a blank or missing query
//!   returns every character, otherwise at most 20 case-insensitive substring matches on names.
//!   A positive `limit` lowers that cap; other values are ignored
//! - `GET /api/all-characters` → every character
//! - `GET /api/random-character` → one uniformly drawn character, `404` if there is none
//!
//! CORS accepts the origin configured through `FRONTEND_URL` (any origin for `*`), without
//! credentials.
//!
//! # Example
//!
//! ```no_run
//! use guess_classmate::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Configuration::from_env().with_port(8080);
//!     serve(config).await
//! }
//! ```

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, error, info, instrument, warn};

use crate::{configuration::Configuration, dataset::Dataset, entity::Entity, error::ApiError};

/// State shared by the handlers.
pub struct AppState {
    /// Loaded once, never modified.
    pub dataset: Dataset,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `/api/health`.
pub struct Health {
    /// Always `ok`.
    pub status: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    /// Number of characters served.
    pub data_count: usize,
    /// Human readable note.
    pub message: String,
}

/// Query string of `/api/search`.
///
/// `limit` is read leniently: anything that is not a positive integer is ignored, so a bad
/// value never turns into a rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
    limit: Option<String>,
}

impl SearchParams {
    fn limit(&self) -> Option<usize> {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse().ok())
            .filter(|&l| l > 0)
    }
}

/// Builds the router over an already loaded dataset.
pub fn router(dataset: Dataset, config: &Configuration) -> Router {
    let state = Arc::new(AppState { dataset });

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/search", get(search_handler))
        .route("/api/all-characters", get(all_characters_handler))
        .route("/api/random-character", get(random_character_handler))
        .layer(cors_layer(&config.frontend_url))
        .with_state(state)
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let origin = if frontend_url.trim() == "*" || frontend_url.trim().is_empty() {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(frontend_url.trim()) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                warn!("Invalid FRONTEND_URL '{frontend_url}' ({e}), allowing any origin");
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(false)
        .max_age(Duration::from_secs(60 * 60))
}

/// Loads the dataset and serves it until Ctrl+C or SIGTERM.
pub async fn serve(config: Configuration) -> anyhow::Result<()> {
    info!("Loading dataset...");
    let dataset = Dataset::load(&config.data_path);
    info!(
        "{} characters in memory (source: {})",
        dataset.len(),
        dataset.source()
    );

    let app = router(dataset, &config);

    let address = format!("0.0.0.0:{}", config.port());
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("cannot bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Result<Json<Health>, ApiError> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("cannot format timestamp")?;

    Ok(Json(Health {
        status: "ok".to_owned(),
        timestamp,
        data_count: state.dataset.len(),
        message: "in-memory dataset, no database required".to_owned(),
    }))
}

#[instrument(skip(state))]
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Entity>> {
    let limit = params.limit();
    let query = params.query.unwrap_or_default();
    let results = state.dataset.search(&query, limit);
    debug!(
        count = results.len(),
        "search results: {:?}",
        results.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
    );
    Json(results)
}

async fn all_characters_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Entity>> {
    Json(state.dataset.all().to_vec())
}

async fn random_character_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Entity>, ApiError> {
    let mut rng = rand::rng();
    state
        .dataset
        .random(&mut rng)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NoCharacters)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
}
