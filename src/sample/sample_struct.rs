use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;
use rayon::prelude::*;

use super::feature::Feature;
use crate::error::{QBoostError, Result};

/// Struct `Sample` holds a batch of training or scoring rows
/// in a dense, column-oriented layout.
/// A `Sample` always carries its features; the target vector is
/// empty for scoring-only samples.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(crate) name_to_index: HashMap<String, usize>,
    pub(crate) features: Vec<Feature>,
    pub(crate) target: Vec<f64>,
    pub(crate) n_sample: usize,
    pub(crate) n_feature: usize,
}

impl Sample {
    /// Convert a `polars::DataFrame` of numeric columns into a `Sample`
    /// without a target. This method takes ownership of `data`.
    pub fn from_dataframe(data: DataFrame) -> Result<Self> {
        let (n_sample, n_feature) = data.shape();

        let features = data
            .get_columns()
            .par_iter()
            .map(Feature::from_series)
            .collect::<Result<Vec<_>>>()?;

        let name_to_index = features
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        Ok(Self {
            name_to_index,
            features,
            target: Vec::new(),
            n_sample,
            n_feature,
        })
    }

    /// Attach the target column to `self`.
    /// The series must be numeric, null-free, and have one value per row.
    pub fn set_target(mut self, target: &Series) -> Result<Self> {
        let target = Feature::from_series(target)?;
        if target.len() != self.n_sample {
            return Err(QBoostError::InvalidParameter {
                name: "target".into(),
                reason: format!(
                    "expected {} rows, got {}",
                    self.n_sample,
                    target.len()
                ),
            });
        }
        self.target = target.values;
        Ok(self)
    }

    /// Returns the target values as a slice.
    /// Empty for samples built without a target.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }

    /// Returns a slice of the feature columns.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }

    /// Returns the pair of the number of rows and the number of features.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }

    /// Returns the `row`-th instance `(x, y)`.
    pub fn at(&self, row: usize) -> (Vec<f64>, f64) {
        let x = self
            .features
            .iter()
            .map(|feat| feat[row])
            .collect::<Vec<f64>>();
        let y = self.target[row];

        (x, y)
    }
}

impl<S> Index<S> for Sample
where
    S: AsRef<str>,
{
    type Output = Feature;

    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self
            .name_to_index
            .get(name)
            .expect("indexed `Sample` with an unknown feature name");
        &self.features[k]
    }
}
