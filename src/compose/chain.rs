use crate::Sequence;

/// Run the first sequence to its end, then the second.
///
/// If the consumer stops during the first sequence, the second is never started.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let seq = chain(values([1, 2]), one(3));
/// assert_eq!(seq.collect_vec(), vec![1, 2, 3]);
/// ```
pub fn chain<L, R>(l: L, r: R) -> Chain<L, R>
where
    L: Sequence,
    R: Sequence<Item = L::Item>,
{
    Chain(l, r)
}

/// Concatenates two sequences with the same element type.
///
/// Created via [`chain()`] or [`Sequence::chain`].
#[derive(Debug, Clone)]
pub struct Chain<S1, S2>(S1, S2);

impl<L, R> Sequence for Chain<L, R>
where
    L: Sequence,
    R: Sequence<Item = L::Item>,
{
    type Item = L::Item;

    fn drive(&self, consumer: &mut dyn FnMut(Self::Item) -> bool) {
        let mut open = true;
        self.0.drive(&mut |item| {
            open = consumer(item);
            open
        });
        if open {
            self.1.drive(consumer)
        }
    }
}
