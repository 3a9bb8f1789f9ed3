//! Run-once caching of a sequence.
//!
//! [`Materialized`] turns a single-pass sequence into one that can be replayed
//! any number of times, by any number of threads. The source is driven to
//! completion exactly once, on the first drive of the materialized sequence,
//! and every drive afterwards replays the cached elements.
//!
//! A failed evaluation is cached too. If the source panics, every later drive
//! panics with the same [`Error`] and the source is not run again.
//!
//! Do not materialize an infinite sequence without bounding it first: the
//! cache would grow until memory runs out.

use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, OnceLock},
};

use tracing::{debug, warn};

use crate::{bridge, collect::collect_vec, Error, Sequence};

/// A sequence backed by a lazily filled, shared cache.
///
/// Clones share the same cache and source.
pub struct Materialized<S: Sequence> {
    inner: Arc<Inner<S>>,
}

struct Inner<S: Sequence> {
    source: S,
    cache: OnceLock<Result<Vec<S::Item>, Error>>,
}

/// Wrap `source` so it is evaluated at most once and replayed afterwards.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let once_only = materialize(drain(vec![1, 2, 3]));
/// assert_eq!(once_only.collect_vec(), vec![1, 2, 3]);
/// assert_eq!(once_only.collect_vec(), vec![1, 2, 3]);
/// ```
pub fn materialize<S>(source: S) -> Materialized<S>
where
    S: Sequence,
    S::Item: Clone,
{
    Materialized::new(source)
}

impl<S: Sequence> Materialized<S> {
    pub fn new(source: S) -> Self {
        Materialized {
            inner: Arc::new(Inner {
                source,
                cache: OnceLock::new(),
            }),
        }
    }

    /// The cached elements, evaluating the source first if needed.
    ///
    /// Concurrent first callers block until the single evaluation finishes; all
    /// callers observe the same slice.
    ///
    /// # Panics
    ///
    /// Panics with the stored [`Error`] if the evaluation failed. A payload
    /// that is neither an `Error` nor a message is re-raised as is on the
    /// evaluating call and recorded as a [`Error::StageExecutionFault`] for
    /// later ones.
    pub fn values(&self) -> &[S::Item] {
        let mut foreign = None;
        let outcome = self.inner.cache.get_or_init(|| {
            debug!(
                item = std::any::type_name::<S::Item>(),
                "materializing sequence"
            );
            match panic::catch_unwind(AssertUnwindSafe(|| collect_vec(&self.inner.source))) {
                Ok(items) => {
                    debug!(len = items.len(), "sequence materialized");
                    Ok(items)
                }
                Err(payload) => {
                    let err = bridge::to_error(payload).unwrap_or_else(|payload| {
                        foreign = Some(payload);
                        Error::StageExecutionFault {
                            message: "materialized source panicked".into(),
                        }
                    });
                    warn!(%err, "materialization failed");
                    Err(err)
                }
            }
        });
        if let Some(payload) = foreign {
            panic::resume_unwind(payload);
        }
        match outcome {
            Ok(items) => items,
            Err(err) => panic::panic_any(err.clone()),
        }
    }

    /// Whether the source has already been evaluated, successfully or not.
    pub fn is_materialized(&self) -> bool {
        self.inner.cache.get().is_some()
    }
}

impl<S: Sequence> Clone for Materialized<S> {
    fn clone(&self) -> Self {
        Materialized {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Sequence> fmt::Debug for Materialized<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Materialized")
            .field("item", &std::any::type_name::<S::Item>())
            .field(
                "cached",
                &self.inner.cache.get().map(|r| r.as_ref().map(Vec::len)),
            )
            .finish()
    }
}

impl<S> Sequence for Materialized<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(S::Item) -> bool) {
        for item in self.values() {
            if !consumer(item.clone()) {
                return;
            }
        }
    }
}
