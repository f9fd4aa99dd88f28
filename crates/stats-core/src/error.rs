use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A sample date is not a valid `DD.MM.YY` calendar date.
    InvalidDateFormat { input: String },
    /// A capacity string could not be coerced to a finite number.
    InvalidCapacity { input: String },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDateFormat { input } => {
                write!(f, "invalid date {input:?}: expected DD.MM.YY")
            }
            Self::InvalidCapacity { input } => write!(f, "invalid capacity value {input:?}"),
        }
    }
}

impl std::error::Error for StatsError {}

pub type Result<T> = std::result::Result<T, StatsError>;
