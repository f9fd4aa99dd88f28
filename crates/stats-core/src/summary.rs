use models::DailyCount;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub total: u64,
    pub mean: f64,
    pub days: usize,
}

pub fn summarize(samples: &[DailyCount]) -> SeriesSummary {
    let total = samples
        .iter()
        .fold(0u64, |total, s| total.saturating_add(s.count));
    let mean = if samples.is_empty() {
        0.0
    } else {
        total as f64 / samples.len() as f64
    };
    SeriesSummary {
        total,
        mean,
        days: samples.len(),
    }
}
