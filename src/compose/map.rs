//! Element mapping combinators.
//!
//! This module provides [`Map`] for one-to-one transforms, plus [`MapSplit`] and
//! [`MapMerge`] for moving between single elements and pairs.

use crate::Sequence;

use super::relay_into;

/// Transforms every element of the wrapped sequence.
pub struct Map<S, F> {
    source: S,
    f: F,
}

/// Create a sequence yielding `f(element)` for every element of `source`.
///
/// # Examples
///
/// ```
/// use pushseq::prelude::*;
///
/// let lengths = map(values(["a", "bcd"]), |s: &str| s.len());
/// assert_eq!(lengths.collect_vec(), vec![1, 3]);
/// ```
pub fn map<S, U, F>(source: S, f: F) -> Map<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
{
    Map { source, f }
}

impl<S, U, F> Sequence for Map<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
{
    type Item = U;

    fn drive(&self, consumer: &mut dyn FnMut(U) -> bool) {
        relay_into(&self.source, consumer, |item, emit| emit((self.f)(item)))
    }
}

/// Splits every element into a pair.
pub struct MapSplit<S, F> {
    source: S,
    f: F,
}

/// Create a sequence of pairs by applying `f` to every element.
///
/// # Examples
///
/// ```
/// use pushseq::prelude::*;
///
/// let parity = map_split(values([1, 2]), |x: i32| (x, x % 2 == 1));
/// assert_eq!(parity.collect_vec(), vec![(1, true), (2, false)]);
/// ```
pub fn map_split<S, A, B, F>(source: S, f: F) -> MapSplit<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> (A, B),
{
    MapSplit { source, f }
}

impl<S, A, B, F> Sequence for MapSplit<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> (A, B),
{
    type Item = (A, B);

    fn drive(&self, consumer: &mut dyn FnMut((A, B)) -> bool) {
        relay_into(&self.source, consumer, |item, emit| emit((self.f)(item)))
    }
}

/// Merges the two halves of every pair.
pub struct MapMerge<S, F> {
    source: S,
    f: F,
}

/// Create a sequence yielding `f(a, b)` for every pair `(a, b)` of `source`.
///
/// # Examples
///
/// ```
/// use pushseq::prelude::*;
///
/// let sums = map_merge(values([(1, 4), (2, 5)]), |a: i32, b: i32| a + b);
/// assert_eq!(sums.collect_vec(), vec![5, 7]);
/// ```
pub fn map_merge<S, A, B, U, F>(source: S, f: F) -> MapMerge<S, F>
where
    S: Sequence<Item = (A, B)>,
    F: Fn(A, B) -> U,
{
    MapMerge { source, f }
}

impl<S, A, B, U, F> Sequence for MapMerge<S, F>
where
    S: Sequence<Item = (A, B)>,
    F: Fn(A, B) -> U,
{
    type Item = U;

    fn drive(&self, consumer: &mut dyn FnMut(U) -> bool) {
        relay_into(&self.source, consumer, |(a, b), emit| emit((self.f)(a, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{empty, values};

    #[test]
    fn test_map_basic() {
        let seq = map(values([1, 2, 3]), |x: i32| x * 2);
        assert_eq!(seq.collect_vec(), vec![2, 4, 6]);
    }

    #[test]
    fn test_map_changes_type() {
        let seq = values([1, 2, 3]).map(|x: i32| x as f64 / 2.0);
        assert_eq!(seq.collect_vec(), vec![0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_map_empty() {
        let seq = empty::<i32>().map(|x| x + 1);
        assert!(seq.collect_vec().is_empty());
    }

    #[test]
    fn test_map_is_lazy() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = AtomicUsize::new(0);
        let seq = values([1, 2, 3]).map(|x: i32| {
            calls.fetch_add(1, Ordering::Relaxed);
            x
        });
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert_eq!(seq.first(), Some(1));
        // stopping after the first element leaves the rest untouched
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_split_then_merge() {
        let pairs = values([1, 2, 3]).map_split(|x: i32| (x, x * 10));
        let seq = pairs.map_merge(|a, b| a + b);
        assert_eq!(seq.collect_vec(), vec![11, 22, 33]);
    }

    #[test]
    fn test_merge_subtracts_in_order() {
        let seq = map_merge(values([(1, 4), (2, 5), (3, 6)]), |a: i32, b: i32| a - b);
        assert_eq!(seq.collect_vec(), vec![-3, -3, -3]);
    }
}
