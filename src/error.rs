//! Errors
//!
//! Custom error types used throughout the `qboost` crate.
use polars::prelude::PolarsError;
use thiserror::Error;

use crate::dataset::Segment;

/// Errors that can occur while preparing data or fitting/scoring a model.
#[derive(Debug, Error)]
pub enum QBoostError {
    /// The named column is missing from the source frame.
    #[error("column `{0}` does not exist in the data frame")]
    MissingColumn(String),
    /// A feature column has a non-numeric dtype.
    #[error("feature `{0}` has non-numeric dtype `{1}`")]
    NonNumericFeature(String, String),
    /// A null value was found where a number is required.
    #[error("null value in column `{0}` at row {1}")]
    NullValue(String, usize),
    /// A NaN or infinite value was found in a feature column.
    #[error("non-finite value in column `{0}` at row {1}")]
    NonFiniteValue(String, usize),
    /// The scored frame's feature columns differ from the columns
    /// the model was fitted on.
    #[error("feature columns {found:?} do not match the fitted model's {expected:?}")]
    FeatureMismatch {
        /// The feature names recorded at fit.
        expected: Vec<String>,
        /// The feature names of the scored frame.
        found: Vec<String>,
    },
    /// The label frame has more than one column.
    #[error("multi-label training is not supported: got {0} label columns, expected 1")]
    MultiLabel(usize),
    /// The segment has no configured date range.
    #[error("no date range is configured for segment `{0}`")]
    UnknownSegment(Segment),
    /// The segment's date range selected no rows.
    #[error("segment `{0}` selected no rows")]
    EmptySegment(Segment),
    /// A label value is outside the objective's domain.
    #[error("objective `{objective}` expects labels in {expected}, found {found}")]
    InvalidLabel {
        /// The objective name.
        objective: String,
        /// The expected label domain.
        expected: String,
        /// The offending value.
        found: f64,
    },
    /// `predict` was called before a successful `fit`.
    #[error("model is not fitted yet")]
    NotFitted,
    /// The objective name is not recognized.
    #[error("unsupported objective `{0}`, expected one of: mse, binary")]
    UnsupportedObjective(String),
    /// A hyperparameter value is out of its valid range.
    #[error("invalid value for parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why the value is rejected.
        reason: String,
    },
    /// An error bubbled up from polars.
    #[error(transparent)]
    Polars(#[from] PolarsError),
    /// An I/O error while reading or writing a model file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A (de)serialization error on params or model files.
    #[error("failed to (de)serialize: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, QBoostError>;
