//! Diagnostics wrappers for observing how sequences are driven.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tracing::trace;

use crate::Sequence;

/// Counts how many times the wrapped sequence has been driven.
#[derive(Debug, Clone)]
pub struct CountUses<S> {
    source: S,
    uses: Arc<AtomicUsize>,
}

/// Wrap `source`, returning it together with a shared drive counter.
///
/// The counter is bumped each time a drive starts, whether or not it runs to
/// completion.
///
/// ```rust
/// use std::sync::atomic::Ordering;
/// use pushseq::prelude::*;
/// use pushseq::inspect::count_uses;
///
/// let (seq, uses) = count_uses(values([1, 2]));
/// seq.collect_vec();
/// seq.first();
/// assert_eq!(uses.load(Ordering::SeqCst), 2);
/// ```
pub fn count_uses<S: Sequence>(source: S) -> (CountUses<S>, Arc<AtomicUsize>) {
    let uses = Arc::new(AtomicUsize::new(0));
    (
        CountUses {
            source,
            uses: Arc::clone(&uses),
        },
        uses,
    )
}

impl<S> CountUses<S> {
    pub fn uses(&self) -> usize {
        self.uses.load(Ordering::SeqCst)
    }
}

impl<S: Sequence> Sequence for CountUses<S> {
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(S::Item) -> bool) {
        let n = self.uses.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(uses = n, "sequence driven");
        self.source.drive(consumer)
    }
}
