use std::marker::PhantomData;

use crate::Sequence;

/// Hand each element of `source` to `step` along with the downstream consumer.
///
/// `step` may call the consumer zero or more times. It returns the consumer's
/// answer (or `true` if it chose not to call it) to say whether the source
/// should keep producing.
pub(crate) fn relay_into<S, U, F>(source: &S, consumer: &mut dyn FnMut(U) -> bool, mut step: F)
where
    S: Sequence + ?Sized,
    F: FnMut(S::Item, &mut dyn FnMut(U) -> bool) -> bool,
{
    source.drive(&mut |item| step(item, &mut *consumer))
}

/// A sequence built from a source and a per-element step function.
pub struct Relay<S, F, U> {
    source: S,
    step: F,
    _item: PhantomData<fn() -> U>,
}

/// Create a sequence that passes each source element through `step`.
///
/// This is the general form behind [`map`](super::map),
/// [`filter`](super::filter) and friends. The step may emit any number of
/// elements for each input:
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let doubled = relay(values([1, 2]), |x: i32, emit: &mut dyn FnMut(i32) -> bool| {
///     emit(x) && emit(x)
/// });
/// assert_eq!(doubled.collect_vec(), vec![1, 1, 2, 2]);
/// ```
pub fn relay<S, U, F>(source: S, step: F) -> Relay<S, F, U>
where
    S: Sequence,
    F: Fn(S::Item, &mut dyn FnMut(U) -> bool) -> bool,
{
    Relay {
        source,
        step,
        _item: PhantomData,
    }
}

impl<S, U, F> Sequence for Relay<S, F, U>
where
    S: Sequence,
    F: Fn(S::Item, &mut dyn FnMut(U) -> bool) -> bool,
{
    type Item = U;

    fn drive(&self, consumer: &mut dyn FnMut(U) -> bool) {
        relay_into(&self.source, consumer, &self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::values;

    #[test]
    fn test_relay_can_skip_and_expand() {
        let seq = relay(values([1, 2, 3]), |x: i32, emit: &mut dyn FnMut(String) -> bool| {
            if x == 2 {
                return true;
            }
            emit(x.to_string()) && emit(format!("{x}!"))
        });
        assert_eq!(seq.collect_vec(), vec!["1", "1!", "3", "3!"]);
    }

    #[test]
    fn test_relay_stops_source_when_consumer_declines() {
        use crate::build::count;

        // expands an infinite source, still halts on the consumer
        let seq = relay(count(0u32), |x, emit: &mut dyn FnMut(u32) -> bool| {
            emit(x) && emit(x)
        });
        assert_eq!(seq.limit(5).collect_vec(), vec![0, 0, 1, 1, 2]);
    }
}
