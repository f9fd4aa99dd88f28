mod health;
mod leaderboard;
mod levels;
mod params;
mod series;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

use crate::state::AppState;

pub(crate) fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/levels", get(levels::level_table))
        .route("/api/levels/classify", get(levels::classify_capacity))
        .route("/api/series/{series}/buckets", get(series::get_buckets))
        .route("/api/series/{series}/forecast", get(series::get_forecast))
        .route("/api/leaderboard", get(leaderboard::get_leaderboard))
        .route(
            "/api/leaderboard/distribution",
            get(leaderboard::get_distribution),
        )
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(state)
}
