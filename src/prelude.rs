//! Exports the names most programs need.
//!
pub use crate::booster::{
    // Booster trait
    Booster,

    // The engine and its objective
    GradientBoost,
    Objective,

    // The per-round evaluation record
    FitReport,
};

pub use crate::weak_learner::{
    // Base learner trait
    WeakLearner,

    // Regression tree
    RegressionTree,
    RegressionTreeBuilder,
    TreeRegressor,
};

pub use crate::dataset::{
    DatasetBuilder,
    DatasetHandler,
    DateRange,
    Segment,
};

pub use crate::model::{
    GbdtModel,
    GbdtParams,
    Model,
    Scores,
};

pub use crate::hypothesis::{
    AdditiveModel,
    Regressor,
};

pub use crate::sample::Sample;

pub use crate::error::{QBoostError, Result};
