//! This file defines split rules for the regression tree.
use serde::{Deserialize, Serialize};

use crate::weak_learner::common::type_and_struct::Threshold;
use crate::Sample;

/// The output of the `split` method of [`Splitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LR {
    /// Goes to the left child.
    Left,
    /// Goes to the right child.
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Splitter {
    pub(crate) feature: String,
    pub(crate) threshold: Threshold,
}

impl Splitter {
    #[inline]
    pub(crate) fn new(name: &str, threshold: Threshold) -> Self {
        let feature = name.to_string();
        Self { feature, threshold }
    }

    /// Defines the splitting.
    #[inline]
    pub(crate) fn split(&self, sample: &Sample, row: usize) -> LR {
        let value = sample[&self.feature][row];

        if value < self.threshold.0 {
            LR::Left
        } else {
            LR::Right
        }
    }
}
