use std::{collections::HashSet, hash::Hash};

use crate::Sequence;

use super::relay_into;

/// Yields only the first occurrence of each distinct element.
#[derive(Debug, Clone)]
pub struct Unique<S> {
    source: S,
}

/// Create a sequence that skips elements equal to one already yielded.
///
/// The set of seen elements belongs to a single drive, so each drive starts
/// fresh.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let seq = unique(values([3, 1, 3, 2, 1]));
/// assert_eq!(seq.collect_vec(), vec![3, 1, 2]);
/// ```
pub fn unique<S>(source: S) -> Unique<S>
where
    S: Sequence,
    S::Item: Eq + Hash + Clone,
{
    Unique { source }
}

impl<S> Sequence for Unique<S>
where
    S: Sequence,
    S::Item: Eq + Hash + Clone,
{
    type Item = S::Item;

    fn drive(&self, consumer: &mut dyn FnMut(S::Item) -> bool) {
        let mut seen = HashSet::new();
        relay_into(&self.source, consumer, |item, emit| {
            if seen.insert(item.clone()) {
                emit(item)
            } else {
                true
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{count_up, empty, values};

    #[test]
    fn test_unique_keeps_first_occurrence_order() {
        let seq = values([3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]).unique();
        assert_eq!(seq.collect_vec(), vec![3, 1, 4, 5, 9, 2, 6]);
    }

    #[test]
    fn test_unique_fresh_per_drive() {
        let seq = values(["a", "b", "a"]).unique();
        assert_eq!(seq.collect_vec(), vec!["a", "b"]);
        assert_eq!(seq.collect_vec(), vec!["a", "b"]);
    }

    #[test]
    fn test_unique_empty() {
        assert!(empty::<u8>().unique().collect_vec().is_empty());
    }

    #[test]
    fn test_unique_over_wrapping_counter() {
        // steps of 64 cycle through four values
        let seq = count_up(0u8, 64).unique().limit(4);
        assert_eq!(seq.collect_vec(), vec![0, 64, 128, 192]);
    }
}
