use crate::Sequence;

/// Yields at most `n` elements of the wrapped sequence.
#[derive(Debug, Clone)]
pub struct Limit<S> {
    source: S,
    n: isize,
}

/// Create a sequence of at most `n` elements of `source`.
///
/// The count restarts on every drive. The source is stopped as soon as the
/// `n`-th element has been handed downstream, so `limit` terminates infinite
/// sources. With `n <= 0` nothing is yielded, though the source is still
/// started.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// assert_eq!(forever(7).limit(3).collect_vec(), vec![7, 7, 7]);
/// ```
pub fn limit<S: Sequence>(source: S, n: isize) -> Limit<S> {
    Limit { source, n }
}

impl<S: Sequence> Sequence for Limit<S> {
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(S::Item) -> bool) {
        let n = self.n;
        let mut taken: isize = 0;
        self.source.drive(&mut |item| {
            if taken >= n {
                return false;
            }
            taken += 1;
            consumer(item) && taken < n
        })
    }
}
