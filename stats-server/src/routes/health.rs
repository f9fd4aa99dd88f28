use axum::{response::IntoResponse, Json};
use minestats_core::level::LEVEL_TABLE_VERSION;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    level_table: String,
}

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        level_table: LEVEL_TABLE_VERSION.to_string(),
    })
}
