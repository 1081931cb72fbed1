//! The comparable capability.
//!
//! A type adopts the capability by implementing one method,
//! [`Comparable::compare_to`], and gets the relational operators for free:
//!
//! | Method                          | Holds when                       |
//! |---------------------------------|----------------------------------|
//! | `equals`                        | identical, or ordering is `Equal`|
//! | `is_lower_than`                 | `Less`                           |
//! | `is_greater_than`               | `Greater`                        |
//! | `is_lower_than_or_equal_to`     | `Less` or `Equal`                |
//! | `is_greater_than_or_equal_to`   | `Greater` or `Equal`             |
//! | `is_between(min, max)`          | `>= min` and `<= max`            |
//!
//! `compare_to` returns `None` when two values have no ordering (different
//! subtypes, mismatched kinds). Every relational method except `equals`
//! turns that into a [`ComparisonError`]; `equals` simply answers `false`.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::error::ComparisonError;

/// A type that can be ordered through a single three-way comparison.
pub trait Comparable: fmt::Debug {
    /// Three-way comparison against `other`, or `None` when the two values
    /// are not comparable.
    fn compare_to(&self, other: &Self) -> Option<Ordering>;

    /// Human-readable rendering used in comparison failures.
    fn inspect(&self) -> String {
        format!("{self:?}")
    }

    /// `true` if `other` is this very value, or orders as equal to it.
    ///
    /// The identity check means a value always equals itself, even when its
    /// `compare_to` has no answer for the pair.
    fn equals(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.compare_to(other) == Some(Ordering::Equal)
    }

    fn is_lower_than(&self, other: &Self) -> Result<bool, ComparisonError> {
        Ok(compare(self, other)?.is_lt())
    }

    fn is_greater_than(&self, other: &Self) -> Result<bool, ComparisonError> {
        Ok(compare(self, other)?.is_gt())
    }

    fn is_lower_than_or_equal_to(&self, other: &Self) -> Result<bool, ComparisonError> {
        Ok(compare(self, other)?.is_le())
    }

    fn is_greater_than_or_equal_to(&self, other: &Self) -> Result<bool, ComparisonError> {
        Ok(compare(self, other)?.is_ge())
    }

    /// Inclusive range test. Bounds are not reordered: with `min > max`
    /// nothing is between them.
    fn is_between(&self, min: &Self, max: &Self) -> Result<bool, ComparisonError> {
        Ok(compare(self, min)?.is_ge() && compare(self, max)?.is_le())
    }
}

/// Compare two values, failing when `compare_to` yields no ordering.
pub fn compare<T>(left: &T, right: &T) -> Result<Ordering, ComparisonError>
where
    T: Comparable + ?Sized,
{
    left.compare_to(right).ok_or_else(|| {
        let err = ComparisonError::new(left.inspect(), right.inspect());
        debug!(left = %err.left, right = %err.right, "comparison failed");
        err
    })
}

/// Sort `items` in place into ascending order using [`compare`].
///
/// The sort is stable. It stops at the first pair that cannot be compared
/// and returns that failure; the slice then still holds every element, in
/// an unspecified order.
pub fn sort_comparable<T: Comparable>(items: &mut [T]) -> Result<(), ComparisonError> {
    for next in 1..items.len() {
        // first slot in the sorted prefix holding a value greater than `items[next]`
        let (mut lo, mut hi) = (0, next);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if compare(&items[mid], &items[next])?.is_gt() {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        items[lo..=next].rotate_right(1);
    }
    Ok(())
}

// ── Sequences ────────────────────────────────────────────────────────────────

/// Lexicographic: the first unequal pair decides, then the shorter sequence
/// sorts first.
impl<T: Comparable> Comparable for [T] {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        for (a, b) in self.iter().zip(other) {
            match a.compare_to(b)? {
                Ordering::Equal => continue,
                decided => return Some(decided),
            }
        }
        Some(self.len().cmp(&other.len()))
    }

    fn inspect(&self) -> String {
        let items: Vec<String> = self.iter().map(Comparable::inspect).collect();
        format!("[{}]", items.join(", "))
    }
}

impl<T: Comparable> Comparable for Vec<T> {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().compare_to(other.as_slice())
    }

    fn inspect(&self) -> String {
        self.as_slice().inspect()
    }
}

impl<A: Comparable, B: Comparable> Comparable for (A, B) {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        match self.0.compare_to(&other.0)? {
            Ordering::Equal => self.1.compare_to(&other.1),
            decided => Some(decided),
        }
    }

    fn inspect(&self) -> String {
        format!("[{}, {}]", self.0.inspect(), self.1.inspect())
    }
}

impl<A: Comparable, B: Comparable, C: Comparable> Comparable for (A, B, C) {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        match self.0.compare_to(&other.0)? {
            Ordering::Equal => (&self.1, &self.2).compare_to(&(&other.1, &other.2)),
            decided => Some(decided),
        }
    }

    fn inspect(&self) -> String {
        format!(
            "[{}, {}, {}]",
            self.0.inspect(),
            self.1.inspect(),
            self.2.inspect()
        )
    }
}

impl<T: Comparable + ?Sized> Comparable for &T {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        (**self).compare_to(*other)
    }

    fn inspect(&self) -> String {
        (**self).inspect()
    }
}
