//! Predicate-driven combinators.
//!
//! [`Filter`] and [`Exclude`] select elements; [`TakeWhile`] and [`DropAfter`]
//! end the sequence the first time their predicate says so. Predicates see each
//! element by reference.

use crate::Sequence;

use super::relay_into;

/// Keeps elements for which the predicate holds.
pub struct Filter<S, F> {
    source: S,
    pred: F,
}

/// Create a sequence of the elements of `source` matching `pred`.
pub fn filter<S, F>(source: S, pred: F) -> Filter<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> bool,
{
    Filter { source, pred }
}

impl<S, F> Sequence for Filter<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(S::Item) -> bool) {
        relay_into(&self.source, consumer, |item, emit| {
            !(self.pred)(&item) || emit(item)
        })
    }
}

/// Drops elements for which the predicate holds.
pub struct Exclude<S, F> {
    source: S,
    pred: F,
}

/// Create a sequence of the elements of `source` not matching `pred`.
pub fn exclude<S, F>(source: S, pred: F) -> Exclude<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> bool,
{
    Exclude { source, pred }
}

impl<S, F> Sequence for Exclude<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(S::Item) -> bool) {
        relay_into(&self.source, consumer, |item, emit| {
            (self.pred)(&item) || emit(item)
        })
    }
}

/// Yields elements until the predicate first fails.
pub struct TakeWhile<S, F> {
    source: S,
    pred: F,
}

/// Create a sequence that yields elements while `pred` holds.
///
/// The first element failing `pred` is not yielded, and the source is stopped.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let small = count(1u32).take_while(|x| *x < 4);
/// assert_eq!(small.collect_vec(), vec![1, 2, 3]);
/// ```
pub fn take_while<S, F>(source: S, pred: F) -> TakeWhile<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> bool,
{
    TakeWhile { source, pred }
}

impl<S, F> Sequence for TakeWhile<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(S::Item) -> bool) {
        relay_into(&self.source, consumer, |item, emit| {
            (self.pred)(&item) && emit(item)
        })
    }
}

/// Yields elements until the predicate first holds.
pub struct DropAfter<S, F> {
    source: S,
    pred: F,
}

/// Create a sequence that yields elements until `pred` holds.
///
/// The first element matching `pred` is not yielded, and the source is stopped.
pub fn drop_after<S, F>(source: S, pred: F) -> DropAfter<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> bool,
{
    DropAfter { source, pred }
}

impl<S, F> Sequence for DropAfter<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(S::Item) -> bool) {
        relay_into(&self.source, consumer, |item, emit| {
            !(self.pred)(&item) && emit(item)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::{count, forever, values},
        inspect::count_uses,
    };
    use std::sync::atomic::Ordering;

    fn is_odd(x: &i32) -> bool {
        x % 2 != 0
    }

    #[test]
    fn test_filter_and_exclude_partition() {
        let data = values([1, 2, 3, 4, 5]);
        assert_eq!(filter(&data, is_odd).collect_vec(), vec![1, 3, 5]);
        assert_eq!(exclude(&data, is_odd).collect_vec(), vec![2, 4]);
    }

    #[test]
    fn test_filter_keeps_order_of_matches() {
        let seq = values(["b", "a", "bb", "c", "ba"]).filter(|s| s.starts_with('b'));
        assert_eq!(seq.collect_vec(), vec!["b", "bb", "ba"]);
    }

    #[test]
    fn test_take_while_stops_examining() {
        let (source, uses) = count_uses(values([1, 2, 10, 3, 4]));
        let seen = std::cell::RefCell::new(Vec::new());
        let seq = take_while(&source, |x: &i32| {
            seen.borrow_mut().push(*x);
            *x < 5
        });
        assert_eq!(seq.collect_vec(), vec![1, 2]);
        assert_eq!(*seen.borrow(), vec![1, 2, 10]);
        assert_eq!(uses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_after_excludes_trigger() {
        let seq = values([3, 5, 8, 7, 9]).drop_after(|x| x % 2 == 0);
        assert_eq!(seq.collect_vec(), vec![3, 5]);
    }

    #[test]
    fn test_drop_after_halts_infinite_source() {
        let seq = count(0i64).drop_after(|x| *x == 3);
        assert_eq!(seq.collect_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_take_while_on_forever_with_false_predicate() {
        assert!(forever(1).take_while(|_| false).collect_vec().is_empty());
    }
}
