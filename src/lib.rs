#![warn(missing_docs)]

//!
//! A crate that trains gradient-boosted tree models behind a uniform
//! model interface for quantitative-research pipelines.
//!
//! The pieces fit together like this:
//!
//! - A [`DatasetHandler`](dataset::DatasetHandler) prepares labeled
//!   feature/label splits (train/valid/test) from one raw
//!   time-indexed `polars::DataFrame`.
//! - A [`Model`](model::Model) is fitted on the train split and
//!   scored on any split; every model implementation in a pipeline
//!   is interchangeable behind this trait.
//! - [`GbdtModel`](model::GbdtModel) is the boosted-tree model: it
//!   marshals splits into the engine's [`Sample`] format, forwards
//!   hyperparameters, trains with validation-based early stopping,
//!   and wraps the fitted ensemble for prediction.
//!
//! The engine itself follows the classic boosting split:
//! a [`Booster`](booster::Booster) drives the rounds and a
//! [`WeakLearner`](weak_learner::WeakLearner) produces one
//! regression tree per round from the objective's
//! gradient/hessian.

pub mod booster;
pub mod dataset;
pub mod error;
pub mod hypothesis;
pub mod model;
pub mod prelude;
pub mod sample;
pub mod weak_learner;

pub use booster::{Booster, FitReport, GradientBoost, Objective};
pub use dataset::{DatasetBuilder, DatasetHandler, DateRange, RowIndex, Segment, Split};
pub use error::{QBoostError, Result};
pub use hypothesis::{AdditiveModel, Regressor};
pub use model::{GbdtModel, GbdtParams, Model, Scores};
pub use sample::{Feature, Sample};
pub use weak_learner::{RegressionTree, RegressionTreeBuilder, TreeRegressor, WeakLearner};
