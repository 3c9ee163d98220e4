//! Provides `Booster` trait.
use std::ops::ControlFlow;

use crate::WeakLearner;

/// The trait [`Booster`] defines the standard framework of boosting.
///
/// You need to implement [`Booster::preprocess`],
/// [`Booster::boost`], and [`Booster::postprocess`]
/// to write a new boosting algorithm.
pub trait Booster<H> {
    /// The fitted model this booster returns.
    type Output;

    /// The name of the boosting algorithm.
    fn name(&self) -> &str;

    /// A summary of the booster's configuration,
    /// logged at the start of a run.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }

    /// A main function that runs the boosting algorithm.
    fn run<W>(&mut self, weak_learner: &W) -> Self::Output
    where
        W: WeakLearner<Hypothesis = H>,
    {
        if let Some(info) = self.info() {
            log::debug!("---------- {} ----------", self.name());
            for (key, value) in info {
                log::debug!("{key}: {value}");
            }
        }

        self.preprocess(weak_learner);

        let _ = (1..).try_for_each(|iter| self.boost(weak_learner, iter));

        self.postprocess(weak_learner)
    }

    /// Pre-processing for `self`.
    /// As you can see in [`Booster::run`],
    /// this method is called before the boosting process.
    fn preprocess<W>(&mut self, weak_learner: &W)
    where
        W: WeakLearner<Hypothesis = H>;

    /// Boosting step per iteration.
    /// This method returns
    /// `ControlFlow::Continue(())` if the stopping criterion is not
    /// reached, `ControlFlow::Break(terminated_iter)` otherwise.
    fn boost<W>(&mut self, weak_learner: &W, iteration: usize) -> ControlFlow<usize>
    where
        W: WeakLearner<Hypothesis = H>;

    /// Post-processing.
    /// This method returns the fitted model.
    fn postprocess<W>(&mut self, weak_learner: &W) -> Self::Output
    where
        W: WeakLearner<Hypothesis = H>;
}
