//! Capacity tiers for leaderboards, level-filtered rosters and progress bars.
//!
//! The floors below mirror the level classification used by the upstream
//! leaderboard query. Any change must land on both sides together; bump
//! [`LEVEL_TABLE_VERSION`] and the pinned checksum in the contract test.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{Result, StatsError};

pub const LEVEL_TABLE_VERSION: &str = "levels-v1";

/// Inclusive lower bound of each level, indexed by level.
pub const LEVEL_FLOORS: [f64; 11] = [
    234.0, 936.0, 4_914.0, 14_976.0, 24_804.0, 49_842.0, 99_918.0, 249_912.0, 499_824.0,
    999_882.0, 7_999_992.0,
];

/// Upper bound reported for the top level, which has no next floor.
pub const TOP_LEVEL_CEILING: f64 = 1e9;

pub const MAX_LEVEL: u8 = (LEVEL_FLOORS.len() - 1) as u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub fn new(index: u8) -> Option<Self> {
        (index <= MAX_LEVEL).then_some(Self(index))
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Level> {
        (0..=MAX_LEVEL).map(Level)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub current: f64,
    pub next: f64,
}

impl Thresholds {
    /// Fraction of the way from `current` to `next`, clamped to `0.0..=1.0`.
    pub fn progress(&self, capacity: f64) -> f64 {
        let span = self.next - self.current;
        if capacity.is_nan() || span <= 0.0 {
            return 0.0;
        }
        ((capacity - self.current) / span).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub level: Level,
    pub thresholds: Thresholds,
    pub progress: f64,
}

/// Level whose range contains `capacity`, or `None` below the level-0 floor.
pub fn classify(capacity: f64) -> Option<Level> {
    if capacity.is_nan() || capacity < LEVEL_FLOORS[0] {
        return None;
    }
    let above = LEVEL_FLOORS.partition_point(|floor| *floor <= capacity);
    Some(Level((above - 1) as u8))
}

pub fn thresholds_of(level: Level) -> Thresholds {
    let i = level.index() as usize;
    Thresholds {
        current: LEVEL_FLOORS[i],
        next: LEVEL_FLOORS.get(i + 1).copied().unwrap_or(TOP_LEVEL_CEILING),
    }
}

pub fn level_progress(capacity: f64) -> Option<LevelProgress> {
    let level = classify(capacity)?;
    let thresholds = thresholds_of(level);
    Some(LevelProgress {
        level,
        thresholds,
        progress: thresholds.progress(capacity),
    })
}

/// Coerce an upstream capacity string (e.g. `"4914.5"`) to a number.
pub fn parse_capacity(input: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| StatsError::InvalidCapacity {
            input: input.to_string(),
        })
}

/// Hex SHA-256 over the version tag and the floors, for cross-system
/// contract checks.
pub fn level_table_checksum() -> String {
    let mut hasher = Sha256::new();
    hasher.update(LEVEL_TABLE_VERSION.as_bytes());
    for floor in LEVEL_FLOORS {
        hasher.update(floor.to_be_bytes());
    }
    hasher.update(TOP_LEVEL_CEILING.to_be_bytes());
    hex::encode(hasher.finalize())
}
