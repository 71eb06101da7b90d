//! Range math and batch planning.
//!
//! Splits an inclusive `[from, to]` interval (ascending or descending) into
//! fixed-size batches and summarises a configured sweep as a `BatchPlan`.

mod batch;
mod error;
mod iter;
mod plan;

pub use batch::Batch;
pub use error::ConfigError;
pub use iter::BatchIter;
pub use plan::BatchPlan;
