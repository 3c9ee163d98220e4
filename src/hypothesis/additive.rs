use serde::{Deserialize, Serialize};

use super::hypothesis_traits::Regressor;
use crate::Sample;

/// The fitted model a boosting run returns: a base score plus
/// weighted hypotheses. The weights are the shrinkage factors
/// applied at each round, so they are not normalized.
/// You can read/write this struct via `serde`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditiveModel<H> {
    /// The constant prediction before any hypothesis is applied.
    pub base_score: f64,
    /// Weight on each hypothesis in `self.hypotheses`.
    pub weights: Vec<f64>,
    /// The hypotheses, in the order they were fitted.
    pub hypotheses: Vec<H>,
}

impl<H> AdditiveModel<H> {
    /// Construct an empty model that always predicts `base_score`.
    pub fn new(base_score: f64) -> Self {
        Self {
            base_score,
            weights: Vec::new(),
            hypotheses: Vec::new(),
        }
    }

    /// Append a pair `(weight, hypothesis)`.
    pub fn push(&mut self, weight: f64, hypothesis: H) {
        self.weights.push(weight);
        self.hypotheses.push(hypothesis);
    }

    /// The number of hypotheses in the model.
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    /// Returns `true` if the model holds no hypotheses.
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    /// Keep only the first `n` hypotheses.
    /// Used to roll the model back to the best round after early stopping.
    pub fn truncate(&mut self, n: usize) {
        self.weights.truncate(n);
        self.hypotheses.truncate(n);
    }
}

impl<H> Regressor for AdditiveModel<H>
where
    H: Regressor,
{
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        self.base_score
            + self
                .weights
                .iter()
                .zip(&self.hypotheses[..])
                .map(|(w, h)| *w * h.predict(sample, row))
                .sum::<f64>()
    }
}
