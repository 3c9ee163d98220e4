//! The dataset handler: prepares labeled feature/label splits
//! (train/valid/test) from raw time-indexed data.

// Provides the segment and date-range types.
pub(crate) mod segment;
// Provides the handler and its builder.
pub(crate) mod handler;

pub use handler::{DatasetBuilder, DatasetHandler, RowIndex, Split};
pub use segment::{DateRange, Segment};
