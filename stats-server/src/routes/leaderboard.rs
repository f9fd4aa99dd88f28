use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use minestats_core::roster::{LevelDistribution, RankedRow};
use minestats_core::{filter_by_level, level_distribution, rank};

use super::params::level_param;
use crate::error::Result;
use crate::state::AppState;

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<RankedRow>>> {
    let level = level_param(&params)?;
    let rows = state.webhook.fetch_leaderboard().await?;
    let ranked = rank(&rows);

    Ok(Json(match level {
        Some(level) => filter_by_level(&ranked, level),
        None => ranked,
    }))
}

pub async fn get_distribution(State(state): State<AppState>) -> Result<Json<LevelDistribution>> {
    let rows = state.webhook.fetch_leaderboard().await?;
    Ok(Json(level_distribution(&rows)))
}
