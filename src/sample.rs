//! Struct `Sample` represents a batch of rows in the dense,
//! column-oriented layout the boosting engine trains on.

// Provides feature struct.
pub(crate) mod feature;
// Provides sample struct.
pub(crate) mod sample_struct;

pub use feature::Feature;
pub use sample_struct::Sample;
