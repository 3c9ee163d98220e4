//! The core library for `Hypothesis` traits.

pub(crate) mod additive;
pub(crate) mod hypothesis_traits;

pub use additive::AdditiveModel;
pub use hypothesis_traits::Regressor;
