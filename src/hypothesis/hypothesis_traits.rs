use rayon::prelude::*;

use crate::Sample;

/// A trait that defines the behavior of a fitted regressor.
/// You only need to implement the `predict` method.
pub trait Regressor {
    /// Predicts the target value of the `row`-th row of `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> f64;

    /// Predicts the target values of all rows of `sample`.
    fn predict_all(&self, sample: &Sample) -> Vec<f64>
    where
        Self: Sync,
    {
        let n_sample = sample.shape().0;
        (0..n_sample)
            .into_par_iter()
            .map(|row| self.predict(sample, row))
            .collect::<Vec<_>>()
    }
}
