use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod config;
mod lenient;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Window {
    Day,
    Week,
    Month,
}

/// Forecast horizons use the same granularities as bucketing windows.
pub type Horizon = Window;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Series {
    Users,
    Wallets,
    Referrals,
    Pools,
}

impl Series {
    pub const ALL: [Series; 4] = [Self::Users, Self::Wallets, Self::Referrals, Self::Pools];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Wallets => "wallets",
            Self::Referrals => "referrals",
            Self::Pools => "pools",
        }
    }
}

/// One day of an upstream time series. `date` is `DD.MM.YY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    #[serde(deserialize_with = "lenient::u64_from_number_or_string")]
    pub count: u64,
}

impl DailyCount {
    pub fn new(date: impl Into<String>, count: u64) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    #[serde(deserialize_with = "lenient::string_from_string_or_number")]
    pub person_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::f64_from_number_or_string")]
    pub th: f64,
}

/// Upstream series endpoints answer either with a bare array or with the
/// array wrapped in a `data` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SeriesPayload {
    Bare(Vec<DailyCount>),
    Wrapped { data: Vec<DailyCount> },
}

impl SeriesPayload {
    pub fn into_samples(self) -> Vec<DailyCount> {
        match self {
            Self::Bare(samples) => samples,
            Self::Wrapped { data } => data,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LeaderboardPayload {
    Bare(Vec<LeaderboardRow>),
    Wrapped { data: Vec<LeaderboardRow> },
}

impl LeaderboardPayload {
    pub fn into_rows(self) -> Vec<LeaderboardRow> {
        match self {
            Self::Bare(rows) => rows,
            Self::Wrapped { data } => data,
        }
    }
}
