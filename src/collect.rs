//! Functions for driving sequences to a result.
//!
//! Each function here consumes a sequence and produces a plain value. They take
//! the sequence by value; pass a reference (`&seq`) to keep using it.

use crate::Sequence;

/// Return the first element, stopping the sequence right after it.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// assert_eq!(first(count(10u8)), Some(10));
/// assert_eq!(first(empty::<u8>()), None);
/// ```
pub fn first<S: Sequence>(seq: S) -> Option<S::Item> {
    let mut out = None;
    seq.drive(&mut |item| {
        out = Some(item);
        false
    });
    out
}

/// Return the last element, driving the sequence to completion.
///
/// Never returns for an infinite sequence.
pub fn last<S: Sequence>(seq: S) -> Option<S::Item> {
    let mut out = None;
    seq.drive(&mut |item| {
        out = Some(item);
        true
    });
    out
}

/// Thread an accumulator through every element, starting from `init`.
///
/// An empty sequence returns `init` unchanged.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let total = fold(range(1, 5), 0, |acc, x| acc + x);
/// assert_eq!(total, 10);
/// ```
pub fn fold<S, A, F>(seq: S, init: A, mut combine: F) -> A
where
    S: Sequence,
    F: FnMut(A, S::Item) -> A,
{
    let mut acc = Some(init);
    seq.drive(&mut |item| {
        // only empty while `combine` runs; a panic there aborts the drive
        if let Some(prev) = acc.take() {
            acc = Some(combine(prev, item));
        }
        true
    });
    match acc {
        Some(acc) => acc,
        None => unreachable!("accumulator is restored after every step"),
    }
}

/// Drive to completion, collecting into a `Vec` in order.
pub fn collect_vec<S: Sequence>(seq: S) -> Vec<S::Item> {
    fold(seq, Vec::new(), |mut out, item| {
        out.push(item);
        out
    })
}

/// Drive to completion, collecting into any extendable container.
///
/// ```rust
/// use std::collections::BTreeSet;
/// use pushseq::prelude::*;
///
/// let set: BTreeSet<_> = collect_into(values([3, 1, 3]));
/// assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 3]);
/// ```
pub fn collect_into<S, C>(seq: S) -> C
where
    S: Sequence,
    C: Default + Extend<S::Item>,
{
    fold(seq, C::default(), |mut out, item| {
        out.extend(std::iter::once(item));
        out
    })
}

/// Count the elements produced by one full drive.
pub fn count_elements<S: Sequence>(seq: S) -> usize {
    fold(seq, 0, |n, _| n + 1)
}
