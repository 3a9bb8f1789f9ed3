use std::marker::PhantomData;

use parking_lot::Mutex;

use crate::{
    compose::{limit, Limit},
    Sequence,
};

/// Yields a single value.
#[derive(Debug, Clone)]
pub struct One<T>(T);

/// Create a sequence that yields `value` exactly once per drive.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// assert_eq!(one("hi").collect_vec(), vec!["hi"]);
/// ```
pub fn one<T: Clone>(value: T) -> One<T> {
    One(value)
}

impl<T: Clone> Sequence for One<T> {
    type Item = T;

    fn drive(&self, consumer: &mut dyn FnMut(T) -> bool) {
        consumer(self.0.clone());
    }
}

/// Yields the same value indefinitely.
///
/// Never ends on its own; only a consumer returning `false` stops it.
#[derive(Debug, Clone)]
pub struct Forever<T>(T);

/// Create a sequence that yields `value` until the consumer stops it.
pub fn forever<T: Clone>(value: T) -> Forever<T> {
    Forever(value)
}

impl<T: Clone> Sequence for Forever<T> {
    type Item = T;

    fn drive(&self, consumer: &mut dyn FnMut(T) -> bool) {
        while consumer(self.0.clone()) {}
    }
}

/// Create a sequence that yields `value` exactly `max(n, 0)` times.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// assert_eq!(repeat('x', 3).collect_vec(), vec!['x', 'x', 'x']);
/// assert!(repeat('x', -1).collect_vec().is_empty());
/// ```
pub fn repeat<T: Clone>(value: T, n: isize) -> Limit<Forever<T>> {
    limit(forever(value), n)
}

/// Yields nothing.
pub struct Empty<T>(PhantomData<fn() -> T>);

/// Create a sequence with no elements.
pub fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

impl<T> Sequence for Empty<T> {
    type Item = T;

    fn drive(&self, _consumer: &mut dyn FnMut(T) -> bool) {}
}

/// Replays an owned collection on every drive.
#[derive(Debug, Clone)]
pub struct Values<T>(Vec<T>);

/// Wrap an ordered collection as a replayable sequence.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let seq = values(vec![1, 2, 3]);
/// assert_eq!(seq.collect_vec(), vec![1, 2, 3]);
/// assert_eq!(seq.collect_vec(), vec![1, 2, 3]);
/// ```
pub fn values<T, I>(items: I) -> Values<T>
where
    T: Clone,
    I: IntoIterator<Item = T>,
{
    Values(items.into_iter().collect())
}

impl<T> Values<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T: Clone> Sequence for Values<T> {
    type Item = T;

    fn drive(&self, consumer: &mut dyn FnMut(T) -> bool) {
        for item in &self.0 {
            if !consumer(item.clone()) {
                return;
            }
        }
    }
}

/// Pulls from an iterator shared by every drive.
///
/// Single pass: once the iterator is exhausted, further drives yield nothing.
/// A stopped drive leaves the remaining items for the next one.
pub struct Drain<I> {
    iter: Mutex<I>,
}

/// Wrap an iterator as a single-pass sequence.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let seq = drain(vec![1, 2, 3]);
/// assert_eq!(seq.collect_vec(), vec![1, 2, 3]);
/// assert!(seq.collect_vec().is_empty());
/// ```
pub fn drain<I: IntoIterator>(items: I) -> Drain<I::IntoIter> {
    Drain {
        iter: Mutex::new(items.into_iter()),
    }
}

impl<I: Iterator> Sequence for Drain<I> {
    type Item = I::Item;

    fn drive(&self, consumer: &mut dyn FnMut(I::Item) -> bool) {
        loop {
            // the lock is released before the consumer runs
            let next = self.iter.lock().next();
            let Some(item) = next else {
                return;
            };
            if !consumer(item) {
                return;
            }
        }
    }
}

/// Wraps a closure as a sequence.
pub struct FromFn<F, T> {
    f: F,
    _item: PhantomData<fn() -> T>,
}

/// Create a sequence from a closure that pushes elements into a consumer.
///
/// The closure must stop pushing once the consumer returns `false`.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let squares = from_fn(|consumer: &mut dyn FnMut(u64) -> bool| {
///     for i in 1.. {
///         if !consumer(i * i) {
///             return;
///         }
///     }
/// });
/// assert_eq!(squares.limit(4).collect_vec(), vec![1, 4, 9, 16]);
/// ```
pub fn from_fn<T, F>(f: F) -> FromFn<F, T>
where
    F: Fn(&mut dyn FnMut(T) -> bool),
{
    FromFn {
        f,
        _item: PhantomData,
    }
}

impl<T, F> Sequence for FromFn<F, T>
where
    F: Fn(&mut dyn FnMut(T) -> bool),
{
    type Item = T;

    fn drive(&self, consumer: &mut dyn FnMut(T) -> bool) {
        (self.f)(consumer)
    }
}
