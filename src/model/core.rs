//! Provides the uniform `Model` trait every model implementation
//! in the pipeline is used through.
use polars::prelude::*;

use crate::booster::FitReport;
use crate::dataset::{DatasetHandler, RowIndex, Segment};
use crate::error::Result;

/// Prediction values aligned to the `(datetime, instrument)` keys
/// of the segment they were computed on.
#[derive(Debug, Clone)]
pub struct Scores {
    index: RowIndex,
    values: Vec<f64>,
}

impl Scores {
    /// Pair prediction values with their row index.
    pub fn new(index: RowIndex, values: Vec<f64>) -> Self {
        debug_assert_eq!(index.len(), values.len());
        Self { index, values }
    }

    /// The prediction values, in row order.
    pub fn values(&self) -> &[f64] {
        &self.values[..]
    }

    /// The row keys, in row order.
    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    /// The number of scored rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was scored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert to a frame with `datetime`, `instrument` (when the
    /// handler has one), and `score` columns.
    pub fn into_dataframe(self) -> Result<DataFrame> {
        let mut columns = vec![Series::new("datetime", self.index.datetime)];
        if let Some(instrument) = self.index.instrument {
            columns.push(Series::new("instrument", instrument));
        }
        columns.push(Series::new("score", self.values));

        Ok(DataFrame::new(columns)?)
    }
}

/// The uniform model interface of the pipeline.
/// Implementations are trained and used for inference
/// interchangeably.
pub trait Model {
    /// The name of the model implementation.
    fn name(&self) -> &str;

    /// Fit the model on the dataset's train split, using its valid
    /// split (when configured) for early stopping.
    fn fit(&mut self, dataset: &DatasetHandler) -> Result<FitReport>;

    /// Score the rows of `segment` with the fitted model.
    fn predict(&self, dataset: &DatasetHandler, segment: Segment) -> Result<Scores>;
}
