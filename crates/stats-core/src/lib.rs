pub mod bucket;
pub mod date;
pub mod error;
pub mod forecast;
pub mod level;
pub mod roster;
pub mod summary;

pub use bucket::{bucket, chronological};
pub use error::StatsError;
pub use forecast::{damping_rng, forecast};
pub use level::{classify, level_progress, parse_capacity, thresholds_of, Level, Thresholds};
pub use roster::{filter_by_level, level_distribution, rank};
pub use summary::summarize;
