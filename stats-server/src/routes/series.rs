use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use minestats_core::summary::SeriesSummary;
use minestats_core::{bucket, chronological, damping_rng, forecast, summarize};
use models::{Bucket, ForecastPoint, Horizon, Series, Window};
use serde::Serialize;

use super::params::{parse_series, person_id_param, seed_param, window_param};
use crate::error::Result;
use crate::state::AppState;

#[derive(Serialize)]
pub struct BucketsResponse {
    series: Series,
    window: Window,
    summary: SeriesSummary,
    buckets: Vec<Bucket>,
}

#[derive(Serialize)]
pub struct ForecastResponse {
    series: Series,
    horizon: Horizon,
    /// `None` when the series is too short to project.
    points: Option<Vec<ForecastPoint>>,
}

pub async fn get_buckets(
    State(state): State<AppState>,
    Path(series): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<BucketsResponse>> {
    let series = parse_series(&series)?;
    let window = window_param(&params, "window", Window::Day)?;

    let samples = state
        .webhook
        .fetch_series(series, person_id_param(&params))
        .await?;
    let buckets = bucket(&samples, window)?;

    Ok(Json(BucketsResponse {
        series,
        window,
        summary: summarize(&samples),
        buckets,
    }))
}

pub async fn get_forecast(
    State(state): State<AppState>,
    Path(series): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ForecastResponse>> {
    let series = parse_series(&series)?;
    let horizon = window_param(&params, "horizon", Horizon::Day)?;
    let seed = seed_param(&params)?;

    let samples = state
        .webhook
        .fetch_series(series, person_id_param(&params))
        .await?;
    let samples = chronological(&samples)?;
    let points = forecast(
        &samples,
        horizon,
        state.clock.today(),
        &mut damping_rng(seed),
    );
    if points.is_none() {
        tracing::info!(%series, samples = samples.len(), "series too short to forecast");
    }

    Ok(Json(ForecastResponse {
        series,
        horizon,
        points,
    }))
}
