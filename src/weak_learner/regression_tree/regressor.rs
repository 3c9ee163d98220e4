use serde::{Deserialize, Serialize};

use super::node::Node;
use crate::hypothesis::Regressor;
use crate::Sample;

/// The regression-tree hypothesis
/// [`RegressionTree`](super::algorithm::RegressionTree) produces.
/// This struct is just a wrapper of [`Node`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeRegressor {
    root: Node,
}

impl From<Node> for TreeRegressor {
    #[inline]
    fn from(root: Node) -> Self {
        Self { root }
    }
}

impl TreeRegressor {
    /// The number of leaves of this tree.
    pub fn leaves(&self) -> usize {
        self.root.leaves()
    }
}

impl Regressor for TreeRegressor {
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        self.root.predict(sample, row)
    }
}
