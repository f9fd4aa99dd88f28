use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use eyre::WrapErr;
use minestats_core::date::parse_day;
use models::config::DashboardClock;
use serde::de::DeserializeOwned;

/// Read and decode a JSON input file; `-` reads stdin.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> eyre::Result<T> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .wrap_err("read stdin")?;
        buf
    } else {
        std::fs::read(path).wrap_err_with(|| format!("read input file: {}", path.display()))?
    };
    serde_json::from_slice(&bytes).wrap_err_with(|| format!("parse json: {}", path.display()))
}

pub fn resolve_today(today: Option<&str>) -> eyre::Result<NaiveDate> {
    match today {
        Some(raw) => parse_day(raw).wrap_err("--today"),
        None => Ok(DashboardClock::from_env()?.today()),
    }
}
