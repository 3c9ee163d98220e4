//! Provides the boosting protocol and the gradient-boosting engine.

mod core;
mod gradient_boost;
mod objective;
mod report;

/// Booster trait.
pub use self::core::Booster;

pub use self::gradient_boost::GradientBoost;
pub use self::objective::Objective;
pub use self::report::FitReport;
