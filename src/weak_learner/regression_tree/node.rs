//! Defines the immutable tree representation a fitted
//! [`TreeRegressor`](super::regressor::TreeRegressor) predicts with.
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use super::train_node::{TrainBranchNode, TrainLeafNode, TrainNode};
use crate::weak_learner::common::{split_rule::*, type_and_struct::Prediction};
use crate::Sample;

/// A node of a fitted regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that has two children.
    Branch(BranchNode),
    /// A node that has no child.
    Leaf(LeafNode),
}

/// A branch node, holding its splitting rule and two children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(crate) rule: Splitter,
    pub(crate) left: Box<Node>,
    pub(crate) right: Box<Node>,
}

/// A leaf node, holding the prediction value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(crate) prediction: Prediction<f64>,
}

impl Node {
    /// Descend the tree and return the leaf value for `row`.
    #[inline]
    pub(crate) fn predict(&self, sample: &Sample, row: usize) -> f64 {
        match self {
            Node::Branch(branch) => match branch.rule.split(sample, row) {
                LR::Left => branch.left.predict(sample, row),
                LR::Right => branch.right.predict(sample, row),
            },
            Node::Leaf(leaf) => leaf.prediction.0,
        }
    }

    /// The number of leaves of this sub-tree.
    pub fn leaves(&self) -> usize {
        match self {
            Node::Branch(branch) => branch.left.leaves() + branch.right.leaves(),
            Node::Leaf(_) => 1,
        }
    }
}

impl From<TrainNode> for Node {
    #[inline]
    fn from(node: TrainNode) -> Self {
        match node {
            TrainNode::Branch(branch) => Node::Branch(BranchNode::from(branch)),
            TrainNode::Leaf(leaf) => Node::Leaf(LeafNode::from(leaf)),
        }
    }
}

impl From<TrainBranchNode> for BranchNode {
    #[inline]
    fn from(node: TrainBranchNode) -> Self {
        let left = unwrap_train_node(node.left);
        let right = unwrap_train_node(node.right);
        Self {
            rule: node.rule,
            left: Box::new(Node::from(left)),
            right: Box::new(Node::from(right)),
        }
    }
}

impl From<TrainLeafNode> for LeafNode {
    #[inline]
    fn from(node: TrainLeafNode) -> Self {
        Self {
            prediction: node.prediction,
        }
    }
}

fn unwrap_train_node(node: Rc<RefCell<TrainNode>>) -> TrainNode {
    Rc::try_unwrap(node)
        .expect("train node has reference counter >= 1")
        .into_inner()
}
