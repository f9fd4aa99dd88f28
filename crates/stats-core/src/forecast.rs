//! Short-range projections from the tail of a daily series.
//!
//! The last [`REGRESSION_WINDOW`] raw daily counts are fitted with ordinary
//! least squares against day indices `0..7`; future days continue the index
//! sequence. Predictions that collapse below half of the window minimum are
//! replaced with a jittered window mean drawn from the caller's RNG.

use chrono::{Duration, NaiveDate};
use models::{DailyCount, ForecastPoint, Horizon};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::date::{format_day, format_month, format_week, month_start_after};
use crate::summary::summarize;

pub const REGRESSION_WINDOW: usize = 7;

const DAY_POINTS: usize = 7;
const WEEK_POINTS: usize = 3;
const MONTH_POINTS: usize = 3;
const DAYS_PER_WEEK: usize = 7;
const DAYS_PER_MONTH: usize = 30;

const DAMPING_RANGE: std::ops::RangeInclusive<f64> = 0.8..=1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Model {
    /// The window was all zeros; every point is the whole-series mean.
    Flat(u64),
    Linear {
        slope: f64,
        intercept: f64,
        window_min: f64,
        window_mean: f64,
    },
}

impl Model {
    fn fit(series: &[DailyCount]) -> Self {
        let window = &series[series.len() - REGRESSION_WINDOW..];
        let ys = window.iter().map(|s| s.count as f64).collect::<Vec<_>>();

        if ys.iter().all(|y| *y == 0.0) {
            let mean = summarize(series).mean;
            tracing::debug!(mean, "forecast window is all zeros; using series mean");
            return Self::Flat(mean.round().max(1.0) as u64);
        }

        let n = ys.len() as f64;
        let window_mean = ys.iter().sum::<f64>() / n;
        let window_min = ys.iter().copied().fold(f64::INFINITY, f64::min);

        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for (x, y) in ys.iter().enumerate() {
            let x = x as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator == 0.0 {
            tracing::debug!("singular regression; using window mean");
            return Self::Linear {
                slope: 0.0,
                intercept: window_mean,
                window_min,
                window_mean,
            };
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;
        Self::Linear {
            slope,
            intercept,
            window_min,
            window_mean,
        }
    }

    fn predict<R: Rng + ?Sized>(&self, day_index: usize, rng: &mut R) -> u64 {
        match *self {
            Self::Flat(value) => value,
            Self::Linear {
                slope,
                intercept,
                window_min,
                window_mean,
            } => {
                let mut predicted = intercept + slope * day_index as f64;
                if predicted < 0.5 * window_min {
                    let damped = window_mean * rng.gen_range(DAMPING_RANGE);
                    tracing::debug!(day_index, predicted, damped, "damping collapsing trend");
                    predicted = damped;
                }
                predicted.round().max(1.0) as u64
            }
        }
    }

    /// Sum of `days` consecutive daily predictions starting at `first_day`.
    fn predict_span<R: Rng + ?Sized>(&self, first_day: usize, days: usize, rng: &mut R) -> u64 {
        match *self {
            Self::Flat(value) => value,
            Self::Linear { .. } => (first_day..first_day + days)
                .map(|d| self.predict(d, rng))
                .fold(0u64, u64::saturating_add),
        }
    }
}

/// Project the series forward from `today`.
///
/// Returns `None` when fewer than [`REGRESSION_WINDOW`] samples are available.
/// `series` is expected in chronological order; only its tail is fitted, while
/// the whole series feeds the all-zero fallback.
pub fn forecast<R: Rng + ?Sized>(
    series: &[DailyCount],
    horizon: Horizon,
    today: NaiveDate,
    rng: &mut R,
) -> Option<Vec<ForecastPoint>> {
    if series.len() < REGRESSION_WINDOW {
        return None;
    }

    let model = Model::fit(series);
    let first_day = REGRESSION_WINDOW;
    let tomorrow = today + Duration::days(1);

    match horizon {
        Horizon::Day => Some(
            (0..DAY_POINTS)
                .map(|k| ForecastPoint {
                    label: format_day(tomorrow + Duration::days(k as i64)),
                    count: model.predict(first_day + k, rng),
                })
                .collect(),
        ),
        Horizon::Week => Some(
            (0..WEEK_POINTS)
                .map(|k| ForecastPoint {
                    label: format_week(tomorrow + Duration::days((k * DAYS_PER_WEEK) as i64)),
                    count: model.predict_span(first_day + k * DAYS_PER_WEEK, DAYS_PER_WEEK, rng),
                })
                .collect(),
        ),
        Horizon::Month => (0..MONTH_POINTS)
            .map(|k| {
                let month = month_start_after(today, k as u32 + 1)?;
                Some(ForecastPoint {
                    label: format_month(month),
                    count: model.predict_span(
                        first_day + k * DAYS_PER_MONTH,
                        DAYS_PER_MONTH,
                        rng,
                    ),
                })
            })
            .collect(),
    }
}

/// RNG for the damping branch: reproducible when a seed is given.
pub fn damping_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(counts: &[u64]) -> Vec<DailyCount> {
        counts
            .iter()
            .enumerate()
            .map(|(i, c)| DailyCount::new(format!("{:02}.01.24", i + 1), *c))
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn counts(points: &[ForecastPoint]) -> Vec<u64> {
        points.iter().map(|p| p.count).collect()
    }

    fn labels(points: &[ForecastPoint]) -> Vec<&str> {
        points.iter().map(|p| p.label.as_str()).collect()
    }

    #[test]
    fn needs_seven_samples() {
        let mut rng = damping_rng(Some(1));
        for h in [Horizon::Day, Horizon::Week, Horizon::Month] {
            assert!(forecast(&series(&[1, 2, 3, 4, 5, 6]), h, today(), &mut rng).is_none());
            assert!(forecast(&[], h, today(), &mut rng).is_none());
        }
    }

    #[test]
    fn linear_series_continues_trend() {
        let mut rng = damping_rng(Some(7));
        let out = forecast(&series(&[1, 2, 3, 4, 5, 6, 7]), Horizon::Day, today(), &mut rng)
            .unwrap();
        assert_eq!(counts(&out), vec![8, 9, 10, 11, 12, 13, 14]);
        assert_eq!(
            labels(&out),
            vec![
                "18.10.26", "19.10.26", "20.10.26", "21.10.26", "22.10.26", "23.10.26",
                "24.10.26"
            ]
        );
    }

    #[test]
    fn only_the_last_seven_samples_are_fitted() {
        let mut rng = damping_rng(Some(7));
        let out = forecast(
            &series(&[500, 900, 1, 2, 3, 4, 5, 6, 7]),
            Horizon::Day,
            today(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(out[0].count, 8);
    }

    #[test]
    fn weekly_and_monthly_sum_daily_predictions() {
        let mut rng = damping_rng(Some(7));
        let input = series(&[1, 2, 3, 4, 5, 6, 7]);

        let weeks = forecast(&input, Horizon::Week, today(), &mut rng).unwrap();
        assert_eq!(counts(&weeks), vec![77, 126, 175]);
        assert_eq!(
            labels(&weeks),
            vec![
                "18.10.26\u{2013}24.10.26",
                "25.10.26\u{2013}31.10.26",
                "01.11.26\u{2013}07.11.26"
            ]
        );

        let months = forecast(&input, Horizon::Month, today(), &mut rng).unwrap();
        assert_eq!(counts(&months), vec![675, 1575, 2475]);
        assert_eq!(labels(&months), vec!["11.26", "12.26", "01.27"]);
    }

    #[test]
    fn all_zero_window_uses_whole_series_mean() {
        let mut rng = damping_rng(Some(3));
        // 39 over 14 days rounds to 3.
        let mut input = series(&[3, 6, 9, 3, 3, 3, 12]);
        input.extend(series(&[0, 0, 0, 0, 0, 0, 0]));
        let total: u64 = input.iter().map(|s| s.count).sum();
        assert_eq!(total, 39);

        for h in [Horizon::Day, Horizon::Week, Horizon::Month] {
            let out = forecast(&input, h, today(), &mut rng).unwrap();
            assert!(out.iter().all(|p| p.count == 3), "{h}: {out:?}");
        }
    }

    #[test]
    fn all_zero_history_is_floored_at_one() {
        let mut rng = damping_rng(Some(3));
        let out = forecast(&series(&[0; 10]), Horizon::Day, today(), &mut rng).unwrap();
        assert_eq!(counts(&out), vec![1; 7]);
    }

    #[test]
    fn collapsing_trend_is_damped_around_window_mean() {
        let input = series(&[70, 60, 50, 40, 30, 20, 10]);
        let mut rng = damping_rng(Some(42));
        let out = forecast(&input, Horizon::Day, today(), &mut rng).unwrap();
        // Window mean is 40, so damped values fall within 32..=48.
        assert!(out.iter().all(|p| (32..=48).contains(&p.count)), "{out:?}");

        let mut again = damping_rng(Some(42));
        let repeat = forecast(&input, Horizon::Day, today(), &mut again).unwrap();
        assert_eq!(out, repeat);
    }

    #[test]
    fn trend_above_half_minimum_ignores_rng() {
        let input = series(&[10, 12, 11, 13, 12, 14, 13]);
        let a = forecast(&input, Horizon::Day, today(), &mut damping_rng(Some(1))).unwrap();
        let b = forecast(&input, Horizon::Day, today(), &mut damping_rng(Some(999))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn points_are_at_least_one() {
        let input = series(&[1, 0, 0, 0, 0, 0, 0]);
        let mut rng = damping_rng(Some(5));
        for h in [Horizon::Day, Horizon::Week, Horizon::Month] {
            let out = forecast(&input, h, today(), &mut rng).unwrap();
            assert!(out.iter().all(|p| p.count >= 1), "{h}: {out:?}");
        }
    }

    #[test]
    fn spans_of_huge_counts_saturate() {
        let input = series(&[u64::MAX / 2; 7]);
        let mut rng = damping_rng(Some(9));
        let weeks = forecast(&input, Horizon::Week, today(), &mut rng).unwrap();
        assert_eq!(counts(&weeks), vec![u64::MAX; 3]);
        let months = forecast(&input, Horizon::Month, today(), &mut rng).unwrap();
        assert_eq!(counts(&months), vec![u64::MAX; 3]);
    }
}
