//! Binary-search primitives over a sorted, byte-lexicographically ordered
//! slice.
//!
//! Grounded on the `binary_search_by` idiom used throughout `robt::reader`,
//! but exposing the three distinct query shapes this crate needs directly
//! instead of threading a single `Ordering`-returning comparator through
//! call sites.

/// True iff `x` is present in `a`.
///
/// If this returns `true`, [`floor_index`] and [`ceil_index`] are
/// guaranteed to return the same index.
pub fn contains<T: Ord>(x: &T, a: &[T]) -> bool {
    a.binary_search(x).is_ok()
}

/// Largest `i` with `a[i] <= x`, or `None` if `a` is empty or `x < a[0]`.
pub fn floor_index<T: Ord>(x: &T, a: &[T]) -> Option<usize> {
    if a.is_empty() || x < &a[0] {
        return None;
    }
    match a.binary_search(x) {
        Ok(i) => Some(i),
        Err(i) => Some(i - 1),
    }
}

/// Smallest `i` with `a[i] >= x`, or `None` if `a` is empty or `x` is
/// greater than `a`'s last element.
pub fn ceil_index<T: Ord>(x: &T, a: &[T]) -> Option<usize> {
    if a.is_empty() || x > &a[a.len() - 1] {
        return None;
    }
    match a.binary_search(x) {
        Ok(i) => Some(i),
        Err(i) => Some(i),
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;
