//! The uniform model interface and the model implementations
//! behind it.

// Provides the `Model` trait and `Scores`.
pub(crate) mod core;
// Provides the hyperparameter struct.
pub(crate) mod config;
// Provides the boosted-tree model.
pub(crate) mod gbdt;

pub use self::config::GbdtParams;
pub use self::core::{Model, Scores};
pub use self::gbdt::GbdtModel;
