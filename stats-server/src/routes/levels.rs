use std::collections::HashMap;

use axum::{extract::Query, Json};
use minestats_core::level::{
    level_progress, level_table_checksum, LEVEL_FLOORS, LEVEL_TABLE_VERSION, TOP_LEVEL_CEILING,
};
use minestats_core::{Level, Thresholds};
use serde::Serialize;

use super::params::capacity_param;
use crate::error::Result;

#[derive(Serialize)]
pub struct LevelTableResponse {
    version: &'static str,
    checksum: String,
    floors: Vec<f64>,
    top_ceiling: f64,
}

#[derive(Serialize)]
pub struct ClassifyResponse {
    th: f64,
    level: Option<Level>,
    thresholds: Option<Thresholds>,
    progress: f64,
}

pub async fn level_table() -> Json<LevelTableResponse> {
    Json(LevelTableResponse {
        version: LEVEL_TABLE_VERSION,
        checksum: level_table_checksum(),
        floors: LEVEL_FLOORS.to_vec(),
        top_ceiling: TOP_LEVEL_CEILING,
    })
}

pub async fn classify_capacity(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ClassifyResponse>> {
    let th = capacity_param(&params)?;
    let progress = level_progress(th);

    Ok(Json(ClassifyResponse {
        th,
        level: progress.map(|p| p.level),
        thresholds: progress.map(|p| p.thresholds),
        progress: progress.map_or(0.0, |p| p.progress),
    }))
}
