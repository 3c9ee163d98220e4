use std::collections::HashMap;

use super::algorithm::RegressionTree;
use super::bin::Bins;
use crate::Sample;

/// The number of bins set as default.
pub const DEFAULT_MAX_BIN: usize = 255;
/// The maximal depth set as default.
pub const DEFAULT_MAX_DEPTH: usize = 6;
/// Default L2 regularization parameter.
pub const DEFAULT_LAMBDA_L2: f64 = 1.0;

/// A struct that builds [`RegressionTree`].
/// `RegressionTreeBuilder` keeps the parameters for constructing
/// `RegressionTree`.
///
/// # Example
///
/// ```no_run
/// use qboost::prelude::*;
///
/// # let sample: qboost::Sample = unimplemented!();
/// let weak_learner = RegressionTreeBuilder::new(&sample)
///     .max_depth(4)
///     .lambda_l2(0.1)
///     .build();
/// ```
#[derive(Clone)]
pub struct RegressionTreeBuilder<'a> {
    sample: &'a Sample,
    /// Number of distinct values per feature.
    distinct_counts: HashMap<&'a str, usize>,
    /// Cap on the number of bins, applied at `build`.
    max_bin: usize,
    max_depth: usize,
    /// L2 regularization on the leaf values.
    lambda_l2: f64,
}

impl<'a> RegressionTreeBuilder<'a> {
    /// Construct a new instance of `RegressionTreeBuilder`.
    /// Features with fewer distinct values than the bin cap get
    /// one bin per distinct value.
    pub fn new(sample: &'a Sample) -> Self {
        let distinct_counts = sample
            .features()
            .iter()
            .map(|feat| (feat.name(), feat.distinct_value_count()))
            .collect();

        Self {
            sample,
            distinct_counts,
            max_bin: DEFAULT_MAX_BIN,
            max_depth: DEFAULT_MAX_DEPTH,
            lambda_l2: DEFAULT_LAMBDA_L2,
        }
    }

    /// Specify the maximal depth of the tree.
    /// Default maximal depth is `6`.
    pub fn max_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0);
        self.max_depth = depth;
        self
    }

    /// Set the L2 regularization parameter.
    pub fn lambda_l2(mut self, lambda_l2: f64) -> Self {
        self.lambda_l2 = lambda_l2;
        self
    }

    /// Cap the number of bins for every feature.
    /// Default cap is `255`.
    pub fn max_bin(mut self, max_bin: usize) -> Self {
        assert!(max_bin > 1);
        self.max_bin = max_bin;
        self
    }

    /// Build a [`RegressionTree`].
    /// This method consumes `self`.
    pub fn build(self) -> RegressionTree<'a> {
        let bins = self
            .sample
            .features()
            .iter()
            .map(|feature| {
                let name = feature.name();
                let n_bins = self.distinct_counts[name].min(self.max_bin);

                (name, Bins::cut(feature, n_bins))
            })
            .collect::<HashMap<_, _>>();

        RegressionTree::from_components(bins, self.max_depth, self.lambda_l2)
    }
}
