use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use clubstats_stats::StatsEngine;
use clubstats_store::RecordStore;

pub mod error;
pub mod rest;

pub struct AppState {
    pub engine: StatsEngine,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            engine: StatsEngine::new(store.clone()),
            store,
        }
    }
}

pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        // Health check
        .route("/health", get(|| async { "ok" }))
        // Statistics
        .route("/api/stats", get(rest::stats::api_overall_summary))
        .route("/api/stats/charts", get(rest::stats::api_chart))
        .route("/api/matches/{id}", get(rest::stats::api_match_detail))
        // Record listings
        .route("/api/matches", get(rest::records::api_matches))
        .route("/api/players", get(rest::records::api_players))
        .route("/api/tournaments", get(rest::records::api_tournaments))
        .with_state(state)
        .layer(cors)
        // Dashboard numbers change on every admin write
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
