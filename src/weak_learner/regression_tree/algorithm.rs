use rayon::prelude::*;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::{
    bin::{Bins, GradHess},
    node::Node,
    regressor::TreeRegressor,
    train_node::TrainNode,
};
use crate::weak_learner::common::{split_rule::*, type_and_struct::*};
use crate::weak_learner::WeakLearner;
use crate::Sample;

/// This struct produces a regression tree fitted to the given
/// gradient/hessian vector by maximizing the second-order gain
/// `G_L^2 / (H_L + λ) + G_R^2 / (H_R + λ)`
/// over the histogram bins of every feature.
pub struct RegressionTree<'a> {
    bins: HashMap<&'a str, Bins>,
    // The maximal depth of the output trees.
    max_depth: usize,
    // L2 regularization on the leaf values.
    lambda_l2: f64,
}

impl<'a> RegressionTree<'a> {
    #[inline]
    pub(super) fn from_components(
        bins: HashMap<&'a str, Bins>,
        max_depth: usize,
        lambda_l2: f64,
    ) -> Self {
        Self {
            bins,
            max_depth,
            lambda_l2,
        }
    }

    /// The best constant prediction over `indices` and the training
    /// loss that prediction attains on this node.
    fn prediction_and_loss(
        &self,
        indices: &[usize],
        gh: &[GradHess],
    ) -> (Prediction<f64>, LossValue) {
        let grad_sum = indices.par_iter().map(|&i| gh[i].grad).sum::<f64>();
        let hess_sum = indices.par_iter().map(|&i| gh[i].hess).sum::<f64>();

        let prediction = -grad_sum / (hess_sum + self.lambda_l2);
        let loss_value = -0.5 * grad_sum.powi(2) / (hess_sum + self.lambda_l2);

        (prediction.into(), loss_value.into())
    }

    /// Returns the best splitting rule over all features.
    fn best_split(
        &self,
        sample: &Sample,
        gh: &[GradHess],
        indices: &[usize],
    ) -> (String, Threshold) {
        sample
            .features()
            .par_iter()
            .map(|feature| {
                let name = feature.name();
                let bin = self
                    .bins
                    .get(name)
                    .expect("the tree was built over a different sample");
                let pack = bin.pack(indices, feature, gh);
                let (score, threshold) = self.best_split_at(pack);

                (score, name, threshold)
            })
            .max_by(|x, y| x.0.partial_cmp(&y.0).unwrap())
            .map(|(_, name, threshold)| (name.to_string(), threshold))
            .expect("no feature that maximizes the score")
    }

    fn best_split_at(
        &self,
        pack: Vec<(Threshold, GradHess)>,
    ) -> (LossValue, Threshold) {
        let mut right_grad_sum = pack.iter().map(|(_, gh)| gh.grad).sum::<f64>();
        let mut right_hess_sum = pack.iter().map(|(_, gh)| gh.hess).sum::<f64>();

        let mut left_grad_sum = 0.0;
        let mut left_hess_sum = 0.0;

        let mut best_score = f64::MIN;
        let mut best_threshold = f64::MIN;

        for (threshold, gh) in pack {
            left_grad_sum += gh.grad;
            left_hess_sum += gh.hess;
            right_grad_sum -= gh.grad;
            right_hess_sum -= gh.hess;

            let score = left_grad_sum.powi(2) / (left_hess_sum + self.lambda_l2)
                + right_grad_sum.powi(2) / (right_hess_sum + self.lambda_l2);
            if best_score < score {
                best_score = score;
                best_threshold = threshold.0;
            }
        }

        (best_score.into(), best_threshold.into())
    }

    #[inline]
    fn full_tree(
        &self,
        sample: &Sample,
        gh: &[GradHess],
        indices: Vec<usize>,
        max_depth: usize,
    ) -> Rc<RefCell<TrainNode>> {
        let (pred, loss) = self.prediction_and_loss(&indices, gh);

        // Nothing left to split, or the depth limit is reached.
        // A zero gradient sum is no reason to stop: the children can
        // still carry opposite gradients.
        if indices.len() <= 1 || max_depth <= 1 {
            return TrainNode::leaf(pred, loss);
        }

        let (feature, threshold) = self.best_split(sample, gh, &indices);
        let rule = Splitter::new(&feature, threshold);

        // Split the rows for the left/right children.
        let mut lindices = Vec::new();
        let mut rindices = Vec::new();
        for i in indices.into_iter() {
            match rule.split(sample, i) {
                LR::Left => lindices.push(i),
                LR::Right => rindices.push(i),
            }
        }

        // If the split has no meaning, construct a leaf node.
        if lindices.is_empty() || rindices.is_empty() {
            return TrainNode::leaf(pred, loss);
        }

        let ltree = self.full_tree(sample, gh, lindices, max_depth - 1);
        let rtree = self.full_tree(sample, gh, rindices, max_depth - 1);

        TrainNode::branch(rule, ltree, rtree, pred, loss)
    }
}

impl<'a> WeakLearner for RegressionTree<'a> {
    type Hypothesis = TreeRegressor;

    fn name(&self) -> &str {
        "Regression Tree"
    }

    fn produce(
        &self,
        sample: &Sample,
        gh: &[GradHess],
        indices: &[usize],
    ) -> Self::Hypothesis {
        let active = indices
            .iter()
            .copied()
            .filter(|&i| gh[i].grad != 0.0 || gh[i].hess != 0.0)
            .collect::<Vec<usize>>();

        let tree = if active.is_empty() {
            TrainNode::leaf(0.0.into(), 0.0.into())
        } else {
            self.full_tree(sample, gh, active, self.max_depth)
        };

        tree.borrow_mut().remove_redundant_nodes();

        let root = Node::from(
            Rc::try_unwrap(tree)
                .expect("root node has reference counter >= 1")
                .into_inner(),
        );

        TreeRegressor::from(root)
    }
}

impl fmt::Display for RegressionTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\
            ----------\n\
            # Regression Tree Weak Learner\n\n\
            - Max depth: {}\n\
            - L2 regularization: {}\n\
            - Bins:\
            ",
            self.max_depth, self.lambda_l2,
        )?;

        for (feat_name, feat_bins) in self.bins.iter() {
            let n_bins = feat_bins.len();
            writeln!(f, "\t* [{feat_name} | {n_bins} bins]  {feat_bins}")?;
        }

        write!(f, "----------")
    }
}
