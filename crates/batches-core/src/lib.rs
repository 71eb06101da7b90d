pub mod config;
pub mod logging;

pub mod progress;
pub mod range;
pub mod runner;

pub use progress::{ProgressSink, TextProgress, TracingProgress};
pub use range::{Batch, BatchIter, BatchPlan, ConfigError};
pub use runner::Batches;
