use polars::prelude::*;
use std::collections::HashSet;
use std::ops::Index;

use crate::error::{QBoostError, Result};

/// A named, dense feature column.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Feature name.
    pub(crate) name: String,
    /// Feature values, one per row.
    pub(crate) values: Vec<f64>,
}

impl Feature {
    /// Convert a `polars::Series` into a `Feature`.
    /// Integer and float dtypes are accepted; anything else errors,
    /// as do null, NaN, and infinite values.
    pub fn from_series(series: &Series) -> Result<Self> {
        let name = series.name().to_string();
        if !series.dtype().is_numeric() {
            return Err(QBoostError::NonNumericFeature(
                name,
                series.dtype().to_string(),
            ));
        }

        let ca = series.cast(&DataType::Float64)?;
        let ca = ca.f64()?;

        let mut values = Vec::with_capacity(ca.len());
        for (row, value) in ca.into_iter().enumerate() {
            match value {
                Some(x) if x.is_finite() => values.push(x),
                Some(_) => return Err(QBoostError::NonFiniteValue(name, row)),
                None => return Err(QBoostError::NullValue(name, row)),
            }
        }

        Ok(Self { name, values })
    }

    /// The feature name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of rows in this feature.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if this feature has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw values of this feature.
    pub fn values(&self) -> &[f64] {
        &self.values[..]
    }

    /// The number of distinct values this feature takes.
    pub(crate) fn distinct_value_count(&self) -> usize {
        self.values
            .iter()
            .map(|v| v.to_bits())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl Index<usize> for Feature {
    type Output = f64;

    fn index(&self, row: usize) -> &Self::Output {
        &self.values[row]
    }
}
