//! Batch type.

use std::fmt;

/// A single batch: inclusive interval `[from, to]`, oriented like its range.
///
/// For descending ranges `from > to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Batch {
    /// First element handed to the work function.
    pub from: i64,
    /// Last element (inclusive).
    pub to: i64,
}

impl Batch {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// Number of elements covered, independent of direction.
    pub fn len(&self) -> u64 {
        self.from.abs_diff(self.to) + 1
    }

    /// True when the batch covers exactly one element.
    pub fn is_single(&self) -> bool {
        self.from == self.to
    }

    pub fn is_ascending(&self) -> bool {
        self.from <= self.to
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} ~ {}]", self.from, self.to)
    }
}

impl From<Batch> for (i64, i64) {
    fn from(b: Batch) -> Self {
        (b.from, b.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_counts_elements_both_directions() {
        assert_eq!(Batch::new(1, 100).len(), 100);
        assert_eq!(Batch::new(307, 208).len(), 100);
        assert_eq!(Batch::new(7, 7).len(), 1);
    }

    #[test]
    fn len_at_i64_limits() {
        assert_eq!(Batch::new(i64::MAX, i64::MAX).len(), 1);
        assert_eq!(Batch::new(i64::MIN, i64::MIN + 9).len(), 10);
    }

    #[test]
    fn single_and_direction() {
        assert!(Batch::new(3, 3).is_single());
        assert!(Batch::new(3, 3).is_ascending());
        assert!(!Batch::new(3, 1).is_ascending());
        assert!(!Batch::new(3, 1).is_single());
    }

    #[test]
    fn display() {
        assert_eq!(Batch::new(101, 200).to_string(), "[101 ~ 200]");
        assert_eq!(Batch::new(-5, -9).to_string(), "[-5 ~ -9]");
    }
}
