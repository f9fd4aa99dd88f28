use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use models::{Bucket, DailyCount, Window};

use crate::date::{format_month, format_week, parse_day};
use crate::error::{Result, StatsError};

/// Re-aggregate daily samples into chart buckets.
///
/// `Day` passes samples through in input order without parsing their dates.
/// `Week` anchors 7-day windows at the earliest sample, not at a calendar
/// week boundary; windows without samples are not emitted. `Month` groups by
/// calendar month.
pub fn bucket(samples: &[DailyCount], window: Window) -> Result<Vec<Bucket>> {
    match window {
        Window::Day => Ok(samples
            .iter()
            .map(|s| Bucket {
                label: s.date.clone(),
                count: s.count,
            })
            .collect()),
        Window::Week => bucket_weeks(samples),
        Window::Month => bucket_months(samples),
    }
}

/// Samples ordered by calendar date; equal dates keep input order.
pub fn chronological(samples: &[DailyCount]) -> Result<Vec<DailyCount>> {
    let mut dated = samples
        .iter()
        .map(|s| Ok((parse_day(&s.date)?, s)))
        .collect::<Result<Vec<_>>>()?;
    dated.sort_by_key(|(date, _)| *date);
    Ok(dated.into_iter().map(|(_, s)| s.clone()).collect())
}

fn parse_all(samples: &[DailyCount]) -> Result<Vec<(NaiveDate, u64)>> {
    samples
        .iter()
        .map(|s| Ok((parse_day(&s.date)?, s.count)))
        .collect()
}

fn bucket_weeks(samples: &[DailyCount]) -> Result<Vec<Bucket>> {
    let mut dated = parse_all(samples)?;
    dated.sort_by_key(|(date, _)| *date);

    let Some(&(anchor, _)) = dated.first() else {
        return Ok(Vec::new());
    };

    let mut weeks: BTreeMap<i64, u64> = BTreeMap::new();
    for (date, count) in dated {
        let week_index = (date - anchor).num_days().div_euclid(7);
        let total = weeks.entry(week_index).or_insert(0);
        *total = total.saturating_add(count);
    }

    Ok(weeks
        .into_iter()
        .map(|(week_index, count)| Bucket {
            label: format_week(anchor + Duration::days(7 * week_index)),
            count,
        })
        .collect())
}

fn bucket_months(samples: &[DailyCount]) -> Result<Vec<Bucket>> {
    let mut months: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for sample in samples {
        let date = parse_day(&sample.date)?;
        let first_of_month = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).ok_or_else(
            || StatsError::InvalidDateFormat {
                input: sample.date.clone(),
            },
        )?;
        let total = months.entry(first_of_month).or_insert(0);
        *total = total.saturating_add(sample.count);
    }

    Ok(months
        .into_iter()
        .map(|(first_of_month, count)| Bucket {
            label: format_month(first_of_month),
            count,
        })
        .collect())
}
