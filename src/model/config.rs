//! Hyperparameters of the boosted-tree model.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::booster::Objective;
use crate::error::{QBoostError, Result};

/// The hyperparameters forwarded to the boosting engine.
///
/// Defaults follow the common gradient-boosting conventions; any
/// subset can be overridden from a JSON object via
/// [`GbdtParams::with_overrides`], unknown keys being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GbdtParams {
    /// The training objective, `mse` or `binary`.
    pub objective: Objective,
    /// Maximal number of boosting rounds.
    pub num_boost_round: usize,
    /// Early-stopping patience in rounds; `0` disables.
    pub early_stopping_rounds: usize,
    /// Log evaluation losses every this many rounds; `0` silences.
    pub verbose_eval: usize,
    /// Shrinkage applied to every tree.
    pub learning_rate: f64,
    /// Maximal tree depth.
    pub max_depth: usize,
    /// L2 regularization on the leaf values.
    pub lambda_l2: f64,
    /// Fraction of rows drawn per round.
    pub subsample: f64,
    /// Cap on the number of histogram bins per feature.
    pub max_bin: usize,
    /// Seed of the row-subsampling RNG.
    pub seed: u64,
}

impl Default for GbdtParams {
    fn default() -> Self {
        Self {
            objective: Objective::Mse,
            num_boost_round: 1_000,
            early_stopping_rounds: 50,
            verbose_eval: 20,
            learning_rate: 0.3,
            max_depth: 6,
            lambda_l2: 1.0,
            subsample: 1.0,
            max_bin: 255,
            seed: 0,
        }
    }
}

impl GbdtParams {
    /// Default parameters with the given objective.
    pub fn new(objective: Objective) -> Self {
        Self {
            objective,
            ..Self::default()
        }
    }

    /// Overlay a JSON object of overrides onto the defaults.
    /// `Null` means "no overrides"; anything else non-object errors,
    /// as do unknown keys and out-of-range values.
    pub fn with_overrides(overrides: Value) -> Result<Self> {
        let mut base = serde_json::to_value(Self::default())?;

        match overrides {
            Value::Null => {}
            Value::Object(map) => {
                let merged = base
                    .as_object_mut()
                    .expect("params serialize to a JSON object");
                for (key, value) in map {
                    merged.insert(key, value);
                }
            }
            other => {
                return Err(QBoostError::InvalidParameter {
                    name: "overrides".into(),
                    reason: format!("expected a JSON object, got `{other}`"),
                });
            }
        }

        let params: Self = serde_json::from_value(base)?;
        params.validate()?;
        Ok(params)
    }

    /// Check every value is in its valid range.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(QBoostError::InvalidParameter {
                name: "learning_rate".into(),
                reason: format!("must be positive, got {}", self.learning_rate),
            });
        }
        if !(self.subsample > 0.0 && self.subsample <= 1.0) {
            return Err(QBoostError::InvalidParameter {
                name: "subsample".into(),
                reason: format!("must be in (0, 1], got {}", self.subsample),
            });
        }
        if self.max_depth == 0 {
            return Err(QBoostError::InvalidParameter {
                name: "max_depth".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.max_bin < 2 {
            return Err(QBoostError::InvalidParameter {
                name: "max_bin".into(),
                reason: format!("must be at least 2, got {}", self.max_bin),
            });
        }
        if !(self.lambda_l2.is_finite() && self.lambda_l2 >= 0.0) {
            return Err(QBoostError::InvalidParameter {
                name: "lambda_l2".into(),
                reason: format!("must be non-negative, got {}", self.lambda_l2),
            });
        }
        Ok(())
    }
}
