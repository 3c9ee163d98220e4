//! Provides the gradient-boosting engine ([`GradientBoost`])
//! after Friedman, 2001, with second-order weak learners,
//! shrinkage, row subsampling, and validation-based early stopping.
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use std::mem;
use std::ops::ControlFlow;

use super::core::Booster;
use super::objective::Objective;
use super::report::FitReport;
use crate::hypothesis::{AdditiveModel, Regressor};
use crate::weak_learner::WeakLearner;
use crate::Sample;

/// The gradient-boosting engine.
///
/// Each round fits a weak hypothesis to the objective's
/// gradient/hessian at the current prediction, shrinks it by the
/// learning rate, and adds it to the ensemble. When a validation
/// sample is attached, the run stops once the validation loss has
/// not improved for `early_stopping_rounds` rounds and the returned
/// model is truncated to the best round.
///
/// # Example
/// ```no_run
/// use qboost::prelude::*;
///
/// # let train: qboost::Sample = unimplemented!();
/// # let valid: qboost::Sample = unimplemented!();
/// let weak_learner = RegressionTreeBuilder::new(&train)
///     .max_depth(4)
///     .build();
///
/// let mut booster = GradientBoost::init(&train)
///     .objective(Objective::Mse)
///     .valid_sample(&valid)
///     .num_boost_round(500)
///     .early_stopping_rounds(50)
///     .learning_rate(0.1);
///
/// let model = booster.run(&weak_learner);
/// let report = booster.report();
/// ```
pub struct GradientBoost<'a, H> {
    // Training data.
    train: &'a Sample,
    // Validation data for early stopping.
    valid: Option<&'a Sample>,

    objective: Objective,
    n_rounds: usize,
    // `0` disables early stopping.
    early_stopping_rounds: usize,
    // Log losses every `verbose_eval` rounds; `0` silences.
    verbose_eval: usize,
    learning_rate: f64,
    // Fraction of rows drawn per round.
    subsample: f64,
    rng: StdRng,

    // Weights on the hypotheses (the shrinkage factors).
    weights: Vec<f64>,
    // Hypotheses obtained from the weak learner.
    hypotheses: Vec<H>,

    base_score: f64,
    // Cached raw predictions at the current round.
    train_predictions: Vec<f64>,
    valid_predictions: Vec<f64>,

    // Per-round losses.
    train_curve: Vec<f64>,
    valid_curve: Vec<f64>,

    best_round: usize,
    best_loss: f64,
}

impl<'a, H> GradientBoost<'a, H> {
    /// Initialize the booster on a training sample.
    pub fn init(train: &'a Sample) -> Self {
        Self {
            train,
            valid: None,

            objective: Objective::Mse,
            n_rounds: 1_000,
            early_stopping_rounds: 50,
            verbose_eval: 20,
            learning_rate: 0.3,
            subsample: 1.0,
            rng: StdRng::seed_from_u64(0),

            weights: Vec::new(),
            hypotheses: Vec::new(),

            base_score: 0.0,
            train_predictions: Vec::new(),
            valid_predictions: Vec::new(),

            train_curve: Vec::new(),
            valid_curve: Vec::new(),

            best_round: 0,
            best_loss: f64::MAX,
        }
    }

    /// Attach a validation sample for early stopping.
    pub fn valid_sample(mut self, valid: &'a Sample) -> Self {
        self.valid = Some(valid);
        self
    }

    /// Set the objective. Default is [`Objective::Mse`].
    pub fn objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Set the maximal number of boosting rounds. Default is `1000`.
    pub fn num_boost_round(mut self, n_rounds: usize) -> Self {
        self.n_rounds = n_rounds;
        self
    }

    /// Set the early-stopping patience. `0` disables early stopping.
    /// Default is `50`.
    pub fn early_stopping_rounds(mut self, rounds: usize) -> Self {
        self.early_stopping_rounds = rounds;
        self
    }

    /// Log the losses every `verbose_eval` rounds. `0` silences.
    /// Default is `20`.
    pub fn verbose_eval(mut self, verbose_eval: usize) -> Self {
        self.verbose_eval = verbose_eval;
        self
    }

    /// Set the shrinkage applied to every hypothesis. Default is `0.3`.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the fraction of rows drawn per round. Default is `1.0`.
    pub fn subsample(mut self, subsample: f64) -> Self {
        self.subsample = subsample;
        self
    }

    /// Seed the row-subsampling RNG.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The evaluation record of the last run.
    pub fn report(&self) -> FitReport {
        FitReport {
            train_loss: self.train_curve.clone(),
            valid_loss: self.valid_curve.clone(),
            best_round: self.best_round,
            best_score: self.valid.map(|_| self.best_loss),
        }
    }

    /// The rows the next weak hypothesis is fitted on.
    fn sample_rows(&mut self) -> Vec<usize> {
        let n_sample = self.train.shape().0;
        if self.subsample >= 1.0 {
            return (0..n_sample).collect();
        }

        let k = ((n_sample as f64) * self.subsample).ceil().max(1.0) as usize;
        let mut rows = rand::seq::index::sample(&mut self.rng, n_sample, k).into_vec();
        rows.sort_unstable();
        rows
    }
}

impl<H> Booster<H> for GradientBoost<'_, H>
where
    H: Regressor + Sync,
{
    type Output = AdditiveModel<H>;

    fn name(&self) -> &str {
        "Gradient Boosting Machine"
    }

    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_sample, n_feature) = self.train.shape();
        let info = Vec::from([
            ("# of examples", format!("{n_sample}")),
            ("# of features", format!("{n_feature}")),
            ("Objective", format!("{}", self.objective)),
            ("Max rounds", format!("{}", self.n_rounds)),
            ("Early stopping", format!("{}", self.early_stopping_rounds)),
            ("Learning rate", format!("{}", self.learning_rate)),
            ("Subsample", format!("{}", self.subsample)),
        ]);
        Some(info)
    }

    fn preprocess<W>(&mut self, _weak_learner: &W)
    where
        W: WeakLearner<Hypothesis = H>,
    {
        let n_train = self.train.shape().0;

        self.weights = Vec::with_capacity(self.n_rounds);
        self.hypotheses = Vec::with_capacity(self.n_rounds);

        self.base_score = self.objective.base_score(self.train.target());
        self.train_predictions = vec![self.base_score; n_train];
        self.valid_predictions = self
            .valid
            .map(|valid| vec![self.base_score; valid.shape().0])
            .unwrap_or_default();

        self.train_curve = Vec::with_capacity(self.n_rounds);
        self.valid_curve = Vec::with_capacity(self.n_rounds);

        self.best_round = 0;
        self.best_loss = f64::MAX;

        if self.valid.is_none() && self.early_stopping_rounds > 0 {
            warn!("no valid sample is attached; early stopping is disabled");
        }
    }

    fn boost<W>(&mut self, weak_learner: &W, iteration: usize) -> ControlFlow<usize>
    where
        W: WeakLearner<Hypothesis = H>,
    {
        if iteration > self.n_rounds {
            return ControlFlow::Break(self.n_rounds);
        }

        let target = self.train.target();
        let gh = self.objective.grad_hess(target, &self.train_predictions);
        let indices = self.sample_rows();

        let h = weak_learner.produce(self.train, &gh, &indices);

        let learning_rate = self.learning_rate;
        let predictions = h.predict_all(self.train);
        self.train_predictions
            .par_iter_mut()
            .zip(predictions)
            .for_each(|(p, q)| {
                *p += learning_rate * q;
            });

        let train_loss = self
            .objective
            .loss(self.train.target(), &self.train_predictions);
        self.train_curve.push(train_loss);

        let valid_loss = self.valid.map(|valid| {
            let predictions = h.predict_all(valid);
            self.valid_predictions
                .par_iter_mut()
                .zip(predictions)
                .for_each(|(p, q)| {
                    *p += learning_rate * q;
                });
            self.objective.loss(valid.target(), &self.valid_predictions)
        });

        self.weights.push(learning_rate);
        self.hypotheses.push(h);

        let eval = self.objective.eval_name();
        match valid_loss {
            Some(valid_loss) => {
                self.valid_curve.push(valid_loss);
                if valid_loss < self.best_loss {
                    self.best_loss = valid_loss;
                    self.best_round = iteration;
                }

                if self.verbose_eval > 0 && iteration % self.verbose_eval == 0 {
                    info!(
                        "[{iteration}] train-{eval}: {train_loss:.6}\t\
                         valid-{eval}: {valid_loss:.6}"
                    );
                }

                if self.early_stopping_rounds > 0
                    && iteration - self.best_round >= self.early_stopping_rounds
                {
                    info!(
                        "early stopping at round {iteration}; \
                         best round is {} with valid-{eval}: {:.6}",
                        self.best_round, self.best_loss,
                    );
                    return ControlFlow::Break(iteration);
                }
            }
            None => {
                self.best_round = iteration;
                if self.verbose_eval > 0 && iteration % self.verbose_eval == 0 {
                    info!("[{iteration}] train-{eval}: {train_loss:.6}");
                }
            }
        }

        ControlFlow::Continue(())
    }

    fn postprocess<W>(&mut self, _weak_learner: &W) -> Self::Output
    where
        W: WeakLearner<Hypothesis = H>,
    {
        let weights = mem::take(&mut self.weights);
        let hypotheses = mem::take(&mut self.hypotheses);

        let mut model = AdditiveModel::new(self.base_score);
        for (weight, hypothesis) in weights.into_iter().zip(hypotheses) {
            model.push(weight, hypothesis);
        }

        // Roll back to the best validation round. With early stopping
        // disabled, every round is kept.
        if self.valid.is_some() && self.early_stopping_rounds > 0 {
            model.truncate(self.best_round);
        }

        model
    }
}
