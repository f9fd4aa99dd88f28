use std::collections::HashMap;
use std::str::FromStr;

use minestats_core::{parse_capacity, Level};
use models::{Series, Window};

use crate::error::{AppError, Result};

pub(crate) fn parse_series(raw: &str) -> Result<Series> {
    Series::from_str(raw.trim()).map_err(|_| AppError::NotFound(format!("unknown series: {raw}")))
}

/// Optional window-like param (`window`, `horizon`), defaulting to `default`.
pub(crate) fn window_param(
    params: &HashMap<String, String>,
    key: &str,
    default: Window,
) -> Result<Window> {
    match params.get(key) {
        None => Ok(default),
        Some(value) => Window::from_str(value.trim())
            .map_err(|_| AppError::BadRequest(format!("{key} must be one of day, week, month"))),
    }
}

pub(crate) fn person_id_param(params: &HashMap<String, String>) -> Option<&str> {
    params
        .get("person_id")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

pub(crate) fn seed_param(params: &HashMap<String, String>) -> Result<Option<u64>> {
    params
        .get("seed")
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| AppError::BadRequest("seed must be a valid u64".to_string()))
        })
        .transpose()
}

pub(crate) fn level_param(params: &HashMap<String, String>) -> Result<Option<Level>> {
    let Some(value) = params.get("level") else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Level::new)
        .map(Some)
        .ok_or_else(|| AppError::BadRequest("level must be an integer in 0..=10".to_string()))
}

pub(crate) fn capacity_param(params: &HashMap<String, String>) -> Result<f64> {
    let value = params
        .get("th")
        .ok_or_else(|| AppError::BadRequest("missing query param: th".to_string()))?;
    parse_capacity(value).map_err(|e| AppError::BadRequest(e.to_string()))
}
