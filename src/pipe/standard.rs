//! Stage wrappers around the sequence combinators.

use std::{hash::Hash, sync::Arc};

use super::stage::{Passthrough, Processor};
use crate::{sequence::BoxSeq, Sequence};

/// Stage form of [`Sequence::map`].
pub fn map<T, U, F>(f: F) -> Processor<T, U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    let f = Arc::new(f);
    Processor::new(move |input: BoxSeq<T>| {
        let f = Arc::clone(&f);
        input.map(move |x| f(x)).boxed()
    })
    .named("map")
}

/// Stage form of [`Sequence::filter`].
pub fn filter<T, F>(pred: F) -> Processor<T, T>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    let pred = Arc::new(pred);
    Processor::new(move |input: BoxSeq<T>| {
        let pred = Arc::clone(&pred);
        input.filter(move |x| pred(x)).boxed()
    })
    .named("filter")
}

/// Stage form of [`Sequence::exclude`].
pub fn exclude<T, F>(pred: F) -> Processor<T, T>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    let pred = Arc::new(pred);
    Processor::new(move |input: BoxSeq<T>| {
        let pred = Arc::clone(&pred);
        input.exclude(move |x| pred(x)).boxed()
    })
    .named("exclude")
}

/// Stage form of [`Sequence::take_while`].
pub fn take_while<T, F>(pred: F) -> Processor<T, T>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    let pred = Arc::new(pred);
    Processor::new(move |input: BoxSeq<T>| {
        let pred = Arc::clone(&pred);
        input.take_while(move |x| pred(x)).boxed()
    })
    .named("take_while")
}

/// Stage form of [`Sequence::drop_after`].
pub fn drop_after<T, F>(pred: F) -> Processor<T, T>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    let pred = Arc::new(pred);
    Processor::new(move |input: BoxSeq<T>| {
        let pred = Arc::clone(&pred);
        input.drop_after(move |x| pred(x)).boxed()
    })
    .named("drop_after")
}

pub fn limit<T: 'static>(n: isize) -> Processor<T, T> {
    Processor::new(move |input: BoxSeq<T>| input.limit(n).boxed()).named("limit")
}

/// Stage form of [`Sequence::materialize`].
///
/// Each conversion gets its own cache, so a pipeline can be processed many
/// times without sharing results between runs.
pub fn materialize<T>() -> Processor<T, T>
where
    T: Clone + Send + Sync + 'static,
{
    Processor::new(|input: BoxSeq<T>| input.materialize().boxed()).named("materialize")
}

pub fn unique<T>() -> Processor<T, T>
where
    T: Eq + Hash + Clone + 'static,
{
    Processor::new(|input: BoxSeq<T>| input.unique().boxed()).named("unique")
}

/// A stage that accepts any sequence and returns it unchanged.
pub fn passthrough() -> Passthrough {
    Passthrough
}
