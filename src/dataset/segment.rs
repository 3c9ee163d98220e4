use serde::{Deserialize, Serialize};
use std::fmt;

/// The three splits a dataset handler prepares from raw time-indexed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    /// Rows the model is fitted on.
    Train,
    /// Rows used for early stopping.
    Valid,
    /// Held-out rows for scoring.
    Test,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Train => "train",
            Self::Valid => "valid",
            Self::Test => "test",
        };
        write!(f, "{name}")
    }
}

/// An inclusive date range, `start <= datetime <= end`.
/// Dates are ISO-8601 strings, so lexicographic order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub(crate) start: String,
    pub(crate) end: String,
}

impl DateRange {
    /// Construct a new inclusive range.
    pub fn new<S, T>(start: S, end: T) -> Self
    where
        S: ToString,
        T: ToString,
    {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Returns `true` if `date` falls inside the range.
    pub fn contains(&self, date: &str) -> bool {
        self.start.as_str() <= date && date <= self.end.as_str()
    }
}

impl<S, T> From<(S, T)> for DateRange
where
    S: ToString,
    T: ToString,
{
    fn from((start, end): (S, T)) -> Self {
        Self::new(start, end)
    }
}
