//! Core trait for push-style sequences.
//!
//! This module defines the [`Sequence`] trait, the single abstraction every other
//! part of the crate builds on. A sequence is driven by handing it a consumer
//! callback; it calls the consumer once per element, in order, and stops as soon
//! as the consumer returns `false`.
//!
//! # Examples
//!
//! ```rust
//! use pushseq::prelude::*;
//!
//! let evens = count_up(0u32, 1).filter(|n| n % 2 == 0).limit(4).collect_vec();
//! assert_eq!(evens, vec![0, 2, 4, 6]);
//! ```
//!
//! Whether a sequence can be driven more than once is a property of how it was
//! built. [`values`](crate::build::values) replays its collection on every
//! drive, while [`drain`](crate::build::drain) empties its iterator once.

use std::{fmt, hash::Hash, sync::Arc};

use crate::{
    collect,
    compose::{
        self, Chain, DropAfter, Exclude, Filter, Limit, Map, MapMerge, MapSplit, Relay,
        TakeWhile, Unique,
    },
    error::invalid_sequence,
    materialize::Materialized,
};

/// A lazily evaluated, push-style producer of ordered elements.
///
/// `drive` feeds elements to `consumer` until the sequence is exhausted or the
/// consumer returns `false`. Once the consumer has returned `false` the sequence
/// must not produce another element.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let mut seen = Vec::new();
/// values([1, 2, 3, 4]).for_each(|x| {
///     seen.push(x);
///     x < 2
/// });
/// assert_eq!(seen, vec![1, 2]);
/// ```
pub trait Sequence {
    /// Type of the produced elements
    type Item;

    /// Push elements into `consumer` until it returns `false` or the sequence ends.
    fn drive(&self, consumer: &mut dyn FnMut(Self::Item) -> bool);

    /// Drive with a generic closure.
    fn for_each<F>(&self, mut consumer: F)
    where
        Self: Sized,
        F: FnMut(Self::Item) -> bool,
    {
        self.drive(&mut consumer)
    }

    /// Build a new sequence by handing each element to `step` along with the
    /// downstream consumer. See [`relay`](crate::compose::relay).
    fn relay<U, F>(self, step: F) -> Relay<Self, F, U>
    where
        Self: Sized,
        F: Fn(Self::Item, &mut dyn FnMut(U) -> bool) -> bool,
    {
        compose::relay(self, step)
    }

    /// Transform every element with `f`.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> U,
    {
        compose::map(self, f)
    }

    /// Transform every element into a pair.
    fn map_split<A, B, F>(self, f: F) -> MapSplit<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> (A, B),
    {
        compose::map_split(self, f)
    }

    /// Combine the two halves of every pair with `f`.
    fn map_merge<A, B, U, F>(self, f: F) -> MapMerge<Self, F>
    where
        Self: Sized + Sequence<Item = (A, B)>,
        F: Fn(A, B) -> U,
    {
        compose::map_merge(self, f)
    }

    /// Keep only elements matching `pred`.
    fn filter<F>(self, pred: F) -> Filter<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> bool,
    {
        compose::filter(self, pred)
    }

    /// Drop elements matching `pred`.
    fn exclude<F>(self, pred: F) -> Exclude<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> bool,
    {
        compose::exclude(self, pred)
    }

    /// Yield at most `n` elements.
    fn limit(self, n: isize) -> Limit<Self>
    where
        Self: Sized,
    {
        compose::limit(self, n)
    }

    /// Yield elements while `pred` holds, then stop.
    fn take_while<F>(self, pred: F) -> TakeWhile<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> bool,
    {
        compose::take_while(self, pred)
    }

    /// Yield elements until `pred` first holds, then stop.
    fn drop_after<F>(self, pred: F) -> DropAfter<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> bool,
    {
        compose::drop_after(self, pred)
    }

    /// Yield only the first occurrence of each distinct element.
    fn unique(self) -> Unique<Self>
    where
        Self: Sized,
        Self::Item: Eq + Hash + Clone,
    {
        compose::unique(self)
    }

    /// Yield every element of `self`, then every element of `next`.
    fn chain<R>(self, next: R) -> Chain<Self, R>
    where
        Self: Sized,
        R: Sequence<Item = Self::Item>,
    {
        compose::chain(self, next)
    }

    /// Cache the elements on first drive and replay them afterwards.
    fn materialize(self) -> Materialized<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Materialized::new(self)
    }

    /// Erase the concrete sequence type.
    fn boxed(self) -> BoxSeq<Self::Item>
    where
        Self: Sized + Send + Sync + 'static,
    {
        BoxSeq::new(self)
    }

    /// First element, stopping right after it.
    fn first(&self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        collect::first(self)
    }

    /// Last element, after driving to completion.
    fn last(&self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        collect::last(self)
    }

    /// Thread an accumulator through every element.
    fn fold<A, F>(&self, init: A, combine: F) -> A
    where
        Self: Sized,
        F: FnMut(A, Self::Item) -> A,
    {
        collect::fold(self, init, combine)
    }

    /// Drive to completion, collecting into a `Vec`.
    fn collect_vec(&self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        collect::collect_vec(self)
    }

    /// Drive to completion, collecting into any extendable container.
    fn collect_into<C>(&self) -> C
    where
        Self: Sized,
        C: Default + Extend<Self::Item>,
    {
        collect::collect_into(self)
    }

    /// Number of elements produced by one full drive.
    fn count_elements(&self) -> usize
    where
        Self: Sized,
    {
        collect::count_elements(self)
    }
}

impl<S> Sequence for &S
where
    S: Sequence + ?Sized,
{
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(Self::Item) -> bool) {
        (**self).drive(consumer)
    }
}

impl<S> Sequence for Box<S>
where
    S: Sequence + ?Sized,
{
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(Self::Item) -> bool) {
        (**self).drive(consumer)
    }
}

impl<S> Sequence for Arc<S>
where
    S: Sequence + ?Sized,
{
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(Self::Item) -> bool) {
        (**self).drive(consumer)
    }
}

/// `None` is an absent sequence: driving it panics with
/// [`Error::InvalidSequence`](crate::Error::InvalidSequence).
///
/// `Option` has inherent `map` and `filter` methods, and those win over the
/// combinators in method-call position. Call the combinator through the trait
/// or the free function, or start from [`BoxSeq::absent`] instead:
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let maybe = Some(values([1, 2, 3]));
/// assert_eq!(Sequence::map(maybe, |x| x * 10).collect_vec(), vec![10, 20, 30]);
///
/// let maybe = Some(values([1, 2, 3]));
/// assert_eq!(filter(maybe, |x: &i32| *x > 1).collect_vec(), vec![2, 3]);
/// ```
impl<S> Sequence for Option<S>
where
    S: Sequence,
{
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(Self::Item) -> bool) {
        match self {
            Some(s) => s.drive(consumer),
            None => invalid_sequence(),
        }
    }
}

impl<L, R> Sequence for either::Either<L, R>
where
    L: Sequence,
    R: Sequence<Item = L::Item>,
{
    type Item = L::Item;

    fn drive(&self, consumer: &mut dyn FnMut(Self::Item) -> bool) {
        match self {
            either::Either::Left(l) => l.drive(consumer),
            either::Either::Right(r) => r.drive(consumer),
        }
    }
}

/// A type-erased, cheaply clonable sequence.
///
/// Clones share the underlying sequence. A `BoxSeq` may also be absent
/// ([`BoxSeq::absent`]), in which case driving it panics with
/// [`Error::InvalidSequence`](crate::Error::InvalidSequence).
pub struct BoxSeq<T> {
    inner: Option<Arc<dyn Sequence<Item = T> + Send + Sync>>,
}

impl<T> BoxSeq<T> {
    pub fn new<S>(seq: S) -> Self
    where
        S: Sequence<Item = T> + Send + Sync + 'static,
    {
        BoxSeq {
            inner: Some(Arc::new(seq)),
        }
    }

    /// A sequence reference that points at nothing.
    pub fn absent() -> Self {
        BoxSeq { inner: None }
    }

    pub fn is_absent(&self) -> bool {
        self.inner.is_none()
    }
}

impl<T> Clone for BoxSeq<T> {
    fn clone(&self) -> Self {
        BoxSeq {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for BoxSeq<T> {
    fn default() -> Self {
        BoxSeq::absent()
    }
}

impl<T> fmt::Debug for BoxSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxSeq")
            .field("item", &std::any::type_name::<T>())
            .field("absent", &self.is_absent())
            .finish()
    }
}

impl<T> Sequence for BoxSeq<T> {
    type Item = T;

    fn drive(&self, consumer: &mut dyn FnMut(Self::Item) -> bool) {
        match &self.inner {
            Some(seq) => seq.drive(consumer),
            None => invalid_sequence(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bridge::catch,
        build::{drain, values},
        Error,
    };

    #[test]
    fn test_for_each_stops_when_consumer_declines() {
        let mut seen = Vec::new();
        values([1, 2, 3, 4, 5]).for_each(|x| {
            seen.push(x);
            x != 3
        });
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_absent_option_panics_with_invalid_sequence() {
        let absent: Option<crate::build::Values<i32>> = None;
        assert_eq!(catch(|| absent.for_each(|_| true)), Err(Error::InvalidSequence));
    }

    #[test]
    fn test_present_option_combinators_by_path() {
        let doubled = Sequence::map(Some(values([1, 2])), |x| x * 2);
        assert_eq!(doubled.collect_vec(), vec![2, 4]);

        let odd = crate::compose::filter(Some(values([1, 2, 3])), |x: &i32| x % 2 == 1);
        assert_eq!(odd.collect_vec(), vec![1, 3]);

        let absent: Option<crate::build::Values<i32>> = None;
        let mapped = Sequence::map(absent, |x| x + 1);
        assert_eq!(catch(|| mapped.for_each(|_| true)), Err(Error::InvalidSequence));
    }

    #[test]
    fn test_absent_box_seq_panics_with_invalid_sequence() {
        let absent = BoxSeq::<u8>::absent();
        assert!(absent.is_absent());
        assert_eq!(catch(|| absent.for_each(|_| true)), Err(Error::InvalidSequence));
    }

    #[test]
    fn test_box_seq_clones_share_source() {
        let seq = drain(vec![1, 2, 3]).boxed();
        let other = seq.clone();
        assert_eq!(seq.first(), Some(1));
        assert_eq!(other.collect_vec(), vec![2, 3]);
        assert!(seq.collect_vec().is_empty());
    }

    #[test]
    fn test_either_drives_active_side() {
        let left: either::Either<_, crate::build::Values<i32>> =
            either::Either::Left(values([1, 2]));
        let right: either::Either<crate::build::Values<i32>, _> =
            either::Either::Right(values([3]));
        assert_eq!(left.collect_vec(), vec![1, 2]);
        assert_eq!(right.collect_vec(), vec![3]);
    }

    #[test]
    fn test_drive_through_references_and_arcs() {
        let seq = Arc::new(values(["a", "b"]));
        assert_eq!((&seq).collect_vec(), vec!["a", "b"]);
        let boxed: Box<dyn Sequence<Item = &str>> = Box::new(values(["c"]));
        assert_eq!(boxed.collect_vec(), vec!["c"]);
    }
}
