//! Defines the histogram regression tree.

// Binning and derivative accumulation.
pub(crate) mod bin;
// The tree-growing algorithm.
pub(crate) mod algorithm;
// The builder for the algorithm.
pub(crate) mod builder;
// The frozen tree a fitted regressor predicts with.
pub(crate) mod node;
// The hypothesis the algorithm produces.
pub(crate) mod regressor;
// The mutable tree used while growing.
pub(crate) mod train_node;

pub use algorithm::RegressionTree;
pub use bin::{Bins, GradHess};
pub use builder::{
    RegressionTreeBuilder, DEFAULT_LAMBDA_L2, DEFAULT_MAX_BIN, DEFAULT_MAX_DEPTH,
};
pub use node::Node;
pub use regressor::TreeRegressor;
