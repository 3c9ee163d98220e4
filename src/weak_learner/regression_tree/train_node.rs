//! Defines the mutable tree representation used while growing
//! a regression tree. It is frozen into [`Node`](super::node::Node)
//! before the hypothesis is returned.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::weak_learner::common::{split_rule::*, type_and_struct::*};

/// Enumeration of `TrainBranchNode` and `TrainLeafNode`.
pub(super) enum TrainNode {
    /// A node that has two children.
    Branch(TrainBranchNode),
    /// A node that has no child.
    Leaf(TrainLeafNode),
}

pub(super) struct TrainBranchNode {
    pub(super) rule: Splitter,
    pub(super) left: Rc<RefCell<TrainNode>>,
    pub(super) right: Rc<RefCell<TrainNode>>,

    // The best prediction if this node were a leaf.
    pub(super) prediction: Prediction<f64>,
    // Training loss of this node as a leaf.
    pub(self) loss_as_leaf: LossValue,
    pub(self) leaves: usize,
}

pub(super) struct TrainLeafNode {
    pub(super) prediction: Prediction<f64>,
    pub(self) loss_as_leaf: LossValue,
}

impl From<TrainBranchNode> for TrainLeafNode {
    #[inline]
    fn from(branch: TrainBranchNode) -> Self {
        Self {
            prediction: branch.prediction,
            loss_as_leaf: branch.loss_as_leaf,
        }
    }
}

impl TrainNode {
    /// Construct a leaf node from the given arguments.
    #[inline]
    pub(super) fn leaf(
        prediction: Prediction<f64>,
        loss_as_leaf: LossValue,
    ) -> Rc<RefCell<Self>> {
        let leaf = TrainLeafNode {
            prediction,
            loss_as_leaf,
        };
        Rc::new(RefCell::new(TrainNode::Leaf(leaf)))
    }

    /// Construct a branch node from the given arguments.
    #[inline]
    pub(super) fn branch(
        rule: Splitter,
        left: Rc<RefCell<TrainNode>>,
        right: Rc<RefCell<TrainNode>>,
        prediction: Prediction<f64>,
        loss_as_leaf: LossValue,
    ) -> Rc<RefCell<Self>> {
        let leaves = left.borrow().leaves() + right.borrow().leaves();
        let node = TrainBranchNode {
            rule,
            left,
            right,
            prediction,
            loss_as_leaf,
            leaves,
        };
        Rc::new(RefCell::new(TrainNode::Branch(node)))
    }

    /// Returns the number of leaves of this sub-tree.
    #[inline]
    pub(super) fn leaves(&self) -> usize {
        match self {
            TrainNode::Branch(ref node) => node.leaves,
            TrainNode::Leaf(_) => 1_usize,
        }
    }

    /// Collapse branches whose children are leaves with the same
    /// prediction. Such a split has no effect on the output.
    pub(super) fn remove_redundant_nodes(&mut self) {
        let replacement = match self {
            TrainNode::Branch(branch) => {
                branch.left.borrow_mut().remove_redundant_nodes();
                branch.right.borrow_mut().remove_redundant_nodes();

                let left = branch.left.borrow();
                let right = branch.right.borrow();
                match (&*left, &*right) {
                    (TrainNode::Leaf(l), TrainNode::Leaf(r))
                        if l.prediction == r.prediction =>
                    {
                        Some(TrainLeafNode {
                            prediction: branch.prediction,
                            loss_as_leaf: branch.loss_as_leaf,
                        })
                    }
                    _ => None,
                }
            }
            TrainNode::Leaf(_) => None,
        };

        if let Some(leaf) = replacement {
            *self = TrainNode::Leaf(leaf);
        }
    }
}

impl fmt::Debug for TrainBranchNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainBranchNode")
            .field("rule", &self.rule)
            .field("leaves", &self.leaves)
            .field("r(t)", &self.loss_as_leaf.0)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl fmt::Debug for TrainLeafNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainLeafNode")
            .field("prediction", &self.prediction.0)
            .field("r(t)", &self.loss_as_leaf.0)
            .finish()
    }
}

impl fmt::Debug for TrainNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainNode::Branch(branch) => write!(f, "{branch:?}"),
            TrainNode::Leaf(leaf) => write!(f, "{leaf:?}"),
        }
    }
}
