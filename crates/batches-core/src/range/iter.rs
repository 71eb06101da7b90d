//! Batch iterator over an inclusive range.

use std::iter::FusedIterator;

use super::batch::Batch;
use super::error::ConfigError;
use super::plan::BatchPlan;

/// Lazy, forward-only sequence of batches covering `[from, to]` exactly once.
///
/// Traversal is ascending when `from <= to`, descending otherwise. Every batch
/// spans `batch_size` elements except possibly the last one, which is clamped
/// to `to`. A batch size of 0 is treated as 1.
#[derive(Debug, Clone)]
pub struct BatchIter {
    asc: bool,
    start: i64,
    /// Start of the next batch.
    cursor: i64,
    to: i64,
    /// Signed distance between consecutive batch starts.
    step: i64,
    /// Signed distance from a batch's start to its end.
    last_offset: i64,
    batch_size: u32,
    total_count: u64,
    remaining: u64,
}

impl BatchIter {
    /// Plans the batches for `[from, to]`.
    ///
    /// Fails only when the batch count cannot be represented (see `ConfigError`).
    pub fn new(from: i64, to: i64, batch_size: u32) -> Result<Self, ConfigError> {
        let batch_size = batch_size.max(1);
        let asc = from <= to;
        let size = i64::from(batch_size);
        let (step, last_offset) = if asc {
            (size, size - 1)
        } else {
            (-size, -(size - 1))
        };

        // step carries the sign of (to - from), so the quotient is never negative.
        let count = (i128::from(to) - i128::from(from)) / i128::from(step) + 1;
        if count <= 0 {
            return Err(ConfigError::EmptyRange { from, to });
        }
        let total_count = u64::try_from(count).map_err(|_| ConfigError::TooManyBatches {
            from,
            to,
            batch_size,
        })?;

        Ok(Self {
            asc,
            start: from,
            cursor: from,
            to,
            step,
            last_offset,
            batch_size,
            total_count,
            remaining: total_count,
        })
    }

    /// Total number of batches in the range (not just the remaining ones).
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Batches not yet yielded.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// True when every batch is a single element.
    pub fn is_single_step(&self) -> bool {
        self.last_offset == 0
    }

    pub fn is_ascending(&self) -> bool {
        self.asc
    }

    /// Summary of this sweep for `concurrency` configured workers.
    pub fn plan(&self, concurrency: u16) -> BatchPlan {
        BatchPlan::new(
            self.start,
            self.to,
            self.batch_size,
            self.total_count,
            self.is_single_step(),
            concurrency,
        )
    }

    fn past_end(&self, at: i64) -> bool {
        if self.asc {
            at > self.to
        } else {
            at < self.to
        }
    }
}

impl Iterator for BatchIter {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.remaining == 0 || self.past_end(self.cursor) {
            self.remaining = 0;
            return None;
        }

        let from = self.cursor;
        // An overflowing end lies beyond `to` in the traversal direction.
        let to = match from.checked_add(self.last_offset) {
            Some(end) if self.past_end(end) => self.to,
            Some(end) => end,
            None => self.to,
        };

        self.remaining -= 1;
        match from.checked_add(self.step) {
            Some(next) => self.cursor = next,
            None => self.remaining = 0,
        }

        Some(Batch { from, to })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for BatchIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(from: i64, to: i64, batch_size: u32) -> Vec<(i64, i64)> {
        BatchIter::new(from, to, batch_size)
            .unwrap()
            .map(Into::into)
            .collect()
    }

    #[test]
    fn ascending_last_batch_is_short() {
        assert_eq!(
            collect(1, 307, 100),
            vec![(1, 100), (101, 200), (201, 300), (301, 307)]
        );
    }

    #[test]
    fn descending_last_batch_is_short() {
        assert_eq!(
            collect(307, 7, 100),
            vec![(307, 208), (207, 108), (107, 8), (7, 7)]
        );
    }

    #[test]
    fn single_element_any_batch_size() {
        for size in [0, 1, 3, 100, u32::MAX] {
            assert_eq!(collect(3, 3, size), vec![(3, 3)], "batch size {}", size);
        }
    }

    #[test]
    fn zero_batch_size_is_single_step() {
        let itr = BatchIter::new(3, 1, 0).unwrap();
        assert!(itr.is_single_step());
        assert_eq!(itr.total_count(), 3);
        let batches: Vec<(i64, i64)> = itr.map(Into::into).collect();
        assert_eq!(batches, vec![(3, 3), (2, 2), (1, 1)]);
    }

    #[test]
    fn batch_size_covering_range_gives_one_batch() {
        assert_eq!(collect(3, 1, 100), vec![(3, 1)]);
        assert_eq!(collect(1, 100, 100), vec![(1, 100)]);
        assert_eq!(collect(-50, 50, 101), vec![(-50, 50)]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_batch() {
        assert_eq!(collect(1, 200, 100), vec![(1, 100), (101, 200)]);
        assert_eq!(collect(200, 1, 100), vec![(200, 101), (100, 1)]);
    }

    #[test]
    fn negative_ranges() {
        assert_eq!(collect(-10, -1, 4), vec![(-10, -7), (-6, -3), (-2, -1)]);
        assert_eq!(collect(-1, -10, 4), vec![(-1, -4), (-5, -8), (-9, -10)]);
    }

    #[test]
    fn total_count_matches_yielded_batches() {
        let itr = BatchIter::new(1, 307, 100).unwrap();
        assert_eq!(itr.total_count(), 4);
        assert_eq!(itr.size_hint(), (4, Some(4)));
        assert_eq!(itr.count(), 4);
    }

    #[test]
    fn remaining_decreases_and_iterator_is_fused() {
        let mut itr = BatchIter::new(1, 3, 2).unwrap();
        assert_eq!(itr.remaining(), 2);
        assert_eq!(itr.next(), Some(Batch::new(1, 2)));
        assert_eq!(itr.remaining(), 1);
        assert_eq!(itr.next(), Some(Batch::new(3, 3)));
        assert_eq!(itr.remaining(), 0);
        assert_eq!(itr.next(), None);
        assert_eq!(itr.next(), None);
        assert_eq!(itr.total_count(), 2);
    }

    #[test]
    fn batches_partition_the_range() {
        let bounds = [-17i64, -1, 0, 1, 5, 23, 64];
        for &from in &bounds {
            for &to in &bounds {
                for size in [0u32, 1, 2, 3, 7, 10, 64, 1000] {
                    let batches: Vec<Batch> = BatchIter::new(from, to, size).unwrap().collect();
                    let len = from.abs_diff(to) + 1;
                    let size = u64::from(size.max(1));
                    assert_eq!(batches.len() as u64, len.div_ceil(size));

                    assert_eq!(batches.first().map(|b| b.from), Some(from));
                    assert_eq!(batches.last().map(|b| b.to), Some(to));
                    let asc = from <= to;
                    for (i, b) in batches.iter().enumerate() {
                        if !b.is_single() {
                            assert_eq!(b.is_ascending(), asc);
                        }
                        if i + 1 < batches.len() {
                            assert_eq!(b.len(), size);
                            let next = batches[i + 1].from;
                            let expected = if asc { b.to + 1 } else { b.to - 1 };
                            assert_eq!(next, expected, "gap/overlap in {:?}", batches);
                        } else {
                            assert!(b.len() <= size);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn near_i64_max_does_not_overflow() {
        assert_eq!(
            collect(i64::MAX - 4, i64::MAX, 3),
            vec![(i64::MAX - 4, i64::MAX - 2), (i64::MAX - 1, i64::MAX)]
        );
        assert_eq!(collect(i64::MAX, i64::MAX, 10), vec![(i64::MAX, i64::MAX)]);
    }

    #[test]
    fn near_i64_min_does_not_overflow() {
        assert_eq!(
            collect(i64::MIN + 4, i64::MIN, 3),
            vec![(i64::MIN + 4, i64::MIN + 2), (i64::MIN + 1, i64::MIN)]
        );
    }

    #[test]
    fn full_i64_span() {
        let itr = BatchIter::new(i64::MIN, i64::MAX, u32::MAX).unwrap();
        let step = u64::from(u32::MAX);
        assert_eq!(itr.total_count(), u64::MAX / step + 1);

        let mut itr = BatchIter::new(i64::MAX, i64::MIN, 2).unwrap();
        assert_eq!(itr.total_count(), 1u64 << 63);
        assert_eq!(itr.next(), Some(Batch::new(i64::MAX, i64::MAX - 1)));
    }

    #[test]
    fn full_i64_span_single_step_is_rejected() {
        let err = BatchIter::new(i64::MIN, i64::MAX, 1).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooManyBatches {
                from: i64::MIN,
                to: i64::MAX,
                batch_size: 1
            }
        );
    }

    #[test]
    fn plan_carries_normalized_batch_size() {
        let plan = BatchIter::new(307, 7, 0).unwrap().plan(1);
        assert_eq!(plan.from, 307);
        assert_eq!(plan.to, 7);
        assert_eq!(plan.batch_size, 1);
        assert_eq!(plan.total_batches, 301);
        assert!(plan.single_step);
    }
}
