//! Provides `WeakLearner` trait.
use crate::weak_learner::regression_tree::GradHess;
use crate::Sample;

/// The trait [`WeakLearner`] defines the base-learner protocol
/// of the boosting framework.
/// Given the gradient/hessian of the objective at the current
/// prediction and the active row set, a weak learner produces a
/// hypothesis that approximates the negative gradient.
pub trait WeakLearner {
    /// The hypothesis this weak learner produces.
    type Hypothesis;

    /// The name of the weak learner.
    fn name(&self) -> &str;

    /// Produce a hypothesis fitted to `gh` over the rows in `indices`.
    fn produce(
        &self,
        sample: &Sample,
        gh: &[GradHess],
        indices: &[usize],
    ) -> Self::Hypothesis;
}
