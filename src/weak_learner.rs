//! The files in the `weak_learner/` directory define the
//! `WeakLearner` trait and the weak learners.

/// Provides the `WeakLearner` trait.
pub mod core;

pub(crate) mod common;

/// Defines the histogram regression tree.
pub mod regression_tree;

pub use self::core::WeakLearner;

pub use self::regression_tree::{
    GradHess, RegressionTree, RegressionTreeBuilder, TreeRegressor,
};
