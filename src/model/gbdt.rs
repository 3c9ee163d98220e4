//! The boosted-tree model behind the uniform [`Model`] interface.
//!
//! `GbdtModel` is the adapter between the dataset handler and the
//! boosting engine: it marshals prepared splits into [`Sample`]s,
//! forwards the hyperparameters, and wraps the fitted ensemble for
//! prediction.
use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::config::GbdtParams;
use super::core::{Model, Scores};
use crate::booster::{Booster, FitReport, GradientBoost};
use crate::dataset::{DatasetHandler, Segment, Split};
use crate::error::{QBoostError, Result};
use crate::hypothesis::{AdditiveModel, Regressor};
use crate::weak_learner::{RegressionTreeBuilder, TreeRegressor};
use crate::Sample;

/// A gradient-boosted regression-tree model.
///
/// # Example
/// ```no_run
/// use qboost::prelude::*;
/// use serde_json::json;
///
/// # fn main() -> qboost::Result<()> {
/// # let dataset: qboost::DatasetHandler = unimplemented!();
/// let mut model = GbdtModel::with_overrides(json!({
///     "objective": "mse",
///     "num_boost_round": 200,
///     "learning_rate": 0.1,
/// }))?;
///
/// let report = model.fit(&dataset)?;
/// println!("best round: {}", report.best_round);
///
/// let scores = model.predict(&dataset, Segment::Test)?;
/// let frame = scores.into_dataframe()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtModel {
    params: GbdtParams,
    // The feature columns seen at fit, in frame order.
    // Scoring a frame with different columns is an error.
    feature_names: Vec<String>,
    ensemble: Option<AdditiveModel<TreeRegressor>>,
}

impl GbdtModel {
    /// Construct an unfitted model from validated parameters.
    pub fn new(params: GbdtParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            feature_names: Vec::new(),
            ensemble: None,
        })
    }

    /// Construct an unfitted model from a JSON object of parameter
    /// overrides. See [`GbdtParams::with_overrides`].
    pub fn with_overrides(overrides: serde_json::Value) -> Result<Self> {
        Self::new(GbdtParams::with_overrides(overrides)?)
    }

    /// The model's hyperparameters.
    pub fn params(&self) -> &GbdtParams {
        &self.params
    }

    /// Returns `true` once `fit` has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.ensemble.is_some()
    }

    /// The fitted ensemble, if any.
    pub fn ensemble(&self) -> Option<&AdditiveModel<TreeRegressor>> {
        self.ensemble.as_ref()
    }

    /// Write the model (parameters and fitted ensemble) to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Read a model back from a JSON file written by
    /// [`GbdtModel::save_json`].
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let model: Self = serde_json::from_reader(BufReader::new(file))?;
        model.params.validate()?;
        Ok(model)
    }

    /// Convert a labeled split into a training sample.
    /// The label frame must have exactly one column; the 2-D label is
    /// squeezed to the 1-D vector the engine trains on.
    fn labeled_sample(&self, split: Split) -> Result<Sample> {
        let Split {
            features, labels, ..
        } = split;

        let n_label = labels.width();
        if n_label != 1 {
            return Err(QBoostError::MultiLabel(n_label));
        }
        let label = &labels.get_columns()[0];

        let sample = Sample::from_dataframe(features)?.set_target(label)?;
        self.params.objective.validate_labels(sample.target())?;
        Ok(sample)
    }
}

impl Model for GbdtModel {
    fn name(&self) -> &str {
        "GBDT"
    }

    fn fit(&mut self, dataset: &DatasetHandler) -> Result<FitReport> {
        let train = dataset.prepare(Segment::Train)?;
        let valid = match dataset.prepare(Segment::Valid) {
            Ok(split) => Some(split),
            Err(QBoostError::UnknownSegment(_)) => None,
            Err(e) => return Err(e),
        };

        let train_sample = self.labeled_sample(train)?;
        let valid_sample = valid.map(|split| self.labeled_sample(split)).transpose()?;

        let weak_learner = RegressionTreeBuilder::new(&train_sample)
            .max_depth(self.params.max_depth)
            .lambda_l2(self.params.lambda_l2)
            .max_bin(self.params.max_bin)
            .build();
        log::debug!("{weak_learner}");

        let mut booster = GradientBoost::init(&train_sample)
            .objective(self.params.objective)
            .num_boost_round(self.params.num_boost_round)
            .early_stopping_rounds(self.params.early_stopping_rounds)
            .verbose_eval(self.params.verbose_eval)
            .learning_rate(self.params.learning_rate)
            .subsample(self.params.subsample)
            .seed(self.params.seed);
        if let Some(valid_sample) = &valid_sample {
            booster = booster.valid_sample(valid_sample);
        }

        let ensemble = booster.run(&weak_learner);
        let report = booster.report();

        self.feature_names = dataset.feature_names().to_vec();
        self.ensemble = Some(ensemble);
        Ok(report)
    }

    fn predict(&self, dataset: &DatasetHandler, segment: Segment) -> Result<Scores> {
        let ensemble = self.ensemble.as_ref().ok_or(QBoostError::NotFitted)?;
        if dataset.feature_names() != self.feature_names.as_slice() {
            return Err(QBoostError::FeatureMismatch {
                expected: self.feature_names.clone(),
                found: dataset.feature_names().to_vec(),
            });
        }

        let split = dataset.prepare(segment)?;
        let sample = Sample::from_dataframe(split.features)?;

        let mut values = ensemble.predict_all(&sample);
        self.params.objective.transform(&mut values);

        Ok(Scores::new(split.index, values))
    }
}
