//! Configuration errors detected while planning a range.

use thiserror::Error;

/// A `(from, to, batch_size)` combination that cannot be swept.
///
/// Returned (inside `anyhow::Error`) by `Batches::run` before any batch runs;
/// use `downcast_ref::<ConfigError>()` to tell it apart from a work failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The planned batch count came out as zero.
    #[error("range [{from} ~ {to}] yields no batches")]
    EmptyRange { from: i64, to: i64 },
    /// The batch count does not fit in a `u64` (only the full `i64` span with batch size 1).
    #[error("range [{from} ~ {to}] with batch size {batch_size} yields more than u64::MAX batches")]
    TooManyBatches { from: i64, to: i64, batch_size: u32 },
}
