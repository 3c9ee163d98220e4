//! The training objectives the engine can optimize.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{QBoostError, Result};
use crate::weak_learner::GradHess;

/// Clamp for probabilities before taking logs.
const PROB_EPS: f64 = 1e-15;

/// The objective a boosting run optimizes.
/// `Mse` fits raw values, `Binary` fits log-odds of `{0, 1}` labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Mean squared error regression.
    Mse,
    /// Binary classification with the logistic loss.
    Binary,
}

impl Objective {
    /// The name of the evaluation metric reported for this objective.
    pub fn eval_name(&self) -> &str {
        match self {
            Self::Mse => "mse",
            Self::Binary => "logloss",
        }
    }

    /// The constant prediction the ensemble starts from:
    /// the target mean for `Mse`, the target log-odds for `Binary`.
    pub fn base_score(&self, target: &[f64]) -> f64 {
        let mean = target.iter().sum::<f64>() / target.len() as f64;
        match self {
            Self::Mse => mean,
            Self::Binary => {
                let p = mean.clamp(PROB_EPS, 1.0 - PROB_EPS);
                (p / (1.0 - p)).ln()
            }
        }
    }

    /// First and second derivatives of the loss at `predictions`.
    pub fn grad_hess(&self, target: &[f64], predictions: &[f64]) -> Vec<GradHess> {
        match self {
            Self::Mse => target
                .iter()
                .zip(predictions)
                .map(|(y, p)| GradHess::new(p - y, 1.0))
                .collect(),
            Self::Binary => target
                .iter()
                .zip(predictions)
                .map(|(y, p)| {
                    let s = sigmoid(*p);
                    GradHess::new(s - y, s * (1.0 - s))
                })
                .collect(),
        }
    }

    /// The mean evaluation loss of `predictions` against `target`.
    /// Predictions are in the raw (untransformed) domain.
    pub fn loss(&self, target: &[f64], predictions: &[f64]) -> f64 {
        let n_sample = target.len() as f64;
        match self {
            Self::Mse => {
                target
                    .iter()
                    .zip(predictions)
                    .map(|(y, p)| (y - p).powi(2))
                    .sum::<f64>()
                    / n_sample
            }
            Self::Binary => {
                target
                    .iter()
                    .zip(predictions)
                    .map(|(y, p)| {
                        let s = sigmoid(*p).clamp(PROB_EPS, 1.0 - PROB_EPS);
                        -(y * s.ln() + (1.0 - y) * (1.0 - s).ln())
                    })
                    .sum::<f64>()
                    / n_sample
            }
        }
    }

    /// Map raw ensemble outputs to the reporting domain:
    /// identity for `Mse`, probabilities for `Binary`.
    pub fn transform(&self, predictions: &mut [f64]) {
        if let Self::Binary = self {
            for p in predictions.iter_mut() {
                *p = sigmoid(*p);
            }
        }
    }

    /// Check that every label lies in the objective's domain.
    pub fn validate_labels(&self, target: &[f64]) -> Result<()> {
        match self {
            Self::Mse => {
                for &y in target {
                    if !y.is_finite() {
                        return Err(QBoostError::InvalidLabel {
                            objective: self.to_string(),
                            expected: "finite values".into(),
                            found: y,
                        });
                    }
                }
            }
            Self::Binary => {
                for &y in target {
                    if y != 0.0 && y != 1.0 {
                        return Err(QBoostError::InvalidLabel {
                            objective: self.to_string(),
                            expected: "{0, 1}".into(),
                            found: y,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mse => "mse",
            Self::Binary => "binary",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Objective {
    type Err = QBoostError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mse" => Ok(Self::Mse),
            "binary" => Ok(Self::Binary),
            other => Err(QBoostError::UnsupportedObjective(other.to_string())),
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_objective_names() {
        assert_eq!("mse".parse::<Objective>().unwrap(), Objective::Mse);
        assert_eq!("binary".parse::<Objective>().unwrap(), Objective::Binary);
        assert!("rank".parse::<Objective>().is_err());
    }

    #[test]
    fn base_score_matches_target_mean() {
        let target = [1.0, 2.0, 3.0];
        assert!((Objective::Mse.base_score(&target) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn binary_transform_yields_probabilities() {
        let mut preds = [-2.0, 0.0, 2.0];
        Objective::Binary.transform(&mut preds);
        assert!(preds.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!((preds[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn binary_rejects_labels_outside_domain() {
        assert!(Objective::Binary.validate_labels(&[0.0, 1.0]).is_ok());
        assert!(Objective::Binary.validate_labels(&[0.0, 0.5]).is_err());
    }
}
