use std::cell::Cell;

use crate::{compose::take_while, Sequence};

/// Numeric types usable by the counting and range generators.
///
/// Integers step with wrapping arithmetic: counting past the maximum wraps to
/// the minimum and counting below the minimum wraps to the maximum. Floats use
/// ordinary IEEE arithmetic.
pub trait Countable: Copy + PartialOrd {
    /// The unit step.
    const ONE: Self;

    fn step_up(self, step: Self) -> Self;

    fn step_down(self, step: Self) -> Self;
}

macro_rules! countable_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Countable for $t {
                const ONE: Self = 1;

                #[inline]
                fn step_up(self, step: Self) -> Self {
                    self.wrapping_add(step)
                }

                #[inline]
                fn step_down(self, step: Self) -> Self {
                    self.wrapping_sub(step)
                }
            }
        )*
    };
}

macro_rules! countable_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Countable for $t {
                const ONE: Self = 1.0;

                #[inline]
                fn step_up(self, step: Self) -> Self {
                    self + step
                }

                #[inline]
                fn step_down(self, step: Self) -> Self {
                    self - step
                }
            }
        )*
    };
}

countable_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
countable_float!(f32, f64);

/// Counts upward from `start` by `step`, forever.
#[derive(Debug, Clone, Copy)]
pub struct CountUp<T> {
    start: T,
    step: T,
}

/// Create an infinite ascending progression that wraps on overflow.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// let wrapped = count_up(254u8, 1).limit(4).collect_vec();
/// assert_eq!(wrapped, vec![254, 255, 0, 1]);
/// ```
pub fn count_up<T: Countable>(start: T, step: T) -> CountUp<T> {
    CountUp { start, step }
}

/// Count upward from `start` by one.
pub fn count<T: Countable>(start: T) -> CountUp<T> {
    count_up(start, T::ONE)
}

impl<T: Countable> Sequence for CountUp<T> {
    type Item = T;

    fn drive(&self, consumer: &mut dyn FnMut(T) -> bool) {
        let mut i = self.start;
        while consumer(i) {
            i = i.step_up(self.step);
        }
    }
}

/// Counts downward from `start` by `step`, forever.
#[derive(Debug, Clone, Copy)]
pub struct CountDown<T> {
    start: T,
    step: T,
}

/// Create an infinite descending progression that wraps on underflow.
pub fn count_down<T: Countable>(start: T, step: T) -> CountDown<T> {
    CountDown { start, step }
}

impl<T: Countable> Sequence for CountDown<T> {
    type Item = T;

    fn drive(&self, consumer: &mut dyn FnMut(T) -> bool) {
        let mut i = self.start;
        while consumer(i) {
            i = i.step_down(self.step);
        }
    }
}

/// A bounded progression from `start` towards `end`, excluding `end`.
#[derive(Debug, Clone, Copy)]
pub struct Range<T> {
    start: T,
    end: T,
    step: T,
}

/// Count from `start` towards `end` (exclusive) by one.
///
/// Counts up when `start < end` and down otherwise. The range also ends if a
/// step would wrap around the numeric type or fails to move.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// assert_eq!(range(0, 3).collect_vec(), vec![0, 1, 2]);
/// assert_eq!(range(3, 0).collect_vec(), vec![3, 2, 1]);
/// assert!(range(3, 3).collect_vec().is_empty());
/// ```
pub fn range<T: Countable>(start: T, end: T) -> Range<T> {
    range_by(start, end, T::ONE)
}

/// Count from `start` towards `end` (exclusive) by `step`.
///
/// `step` is a magnitude: the direction comes from comparing `start` with
/// `end`. The range ends early if the next value would wrap around the
/// numeric type, and a zero step yields `start` once.
///
/// ```rust
/// use pushseq::prelude::*;
///
/// assert_eq!(range_by(0, 10, 3).collect_vec(), vec![0, 3, 6, 9]);
/// assert_eq!(range_by(9, 0, 4).collect_vec(), vec![9, 5, 1]);
///
/// // 254 + 4 would wrap past 255
/// assert_eq!(range_by(250u8, 255, 4).collect_vec(), vec![250, 254]);
/// // 1 - 2 would wrap below 0
/// assert_eq!(range_by(3u8, 0, 2).collect_vec(), vec![3, 1]);
/// assert_eq!(range_by(7, 20, 0).collect_vec(), vec![7]);
/// ```
pub fn range_by<T: Countable>(start: T, end: T, step: T) -> Range<T> {
    Range { start, end, step }
}

impl<T: Countable> Sequence for Range<T> {
    type Item = T;

    fn drive(&self, consumer: &mut dyn FnMut(T) -> bool) {
        let end = self.end;
        // a step that wraps around (or does not move) ends the range
        let prev = Cell::new(None::<T>);
        if self.start < end {
            let ascending = |i: &T| {
                *i < end && prev.replace(Some(*i)).map_or(true, |p| p < *i)
            };
            take_while(count_up(self.start, self.step), ascending).drive(consumer)
        } else {
            let descending = |i: &T| {
                *i > end && prev.replace(Some(*i)).map_or(true, |p| p > *i)
            };
            take_while(count_down(self.start, self.step), descending).drive(consumer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_up_wraps_unsigned() {
        let got = count_up(250u8, 1).limit(10).collect_vec();
        assert_eq!(got, vec![250, 251, 252, 253, 254, 255, 0, 1, 2, 3]);
    }

    #[test]
    fn test_count_up_wraps_signed() {
        let got = count_up(120i8, 1).limit(10).collect_vec();
        assert_eq!(got, vec![120, 121, 122, 123, 124, 125, 126, 127, -128, -127]);
    }

    #[test]
    fn test_count_down_wraps_to_max() {
        let got = count_down(1u16, 1).limit(3).collect_vec();
        assert_eq!(got, vec![1, 0, u16::MAX]);

        let got = count_down(-127i8, 2).limit(3).collect_vec();
        assert_eq!(got, vec![-127, 127, 125]);
    }

    #[test]
    fn test_count_defaults_to_unit_step() {
        assert_eq!(count(5i64).limit(3).collect_vec(), vec![5, 6, 7]);
    }

    #[test]
    fn test_range_edges() {
        assert!(range(10, 10).collect_vec().is_empty());
        assert_eq!(range(10, 11).collect_vec(), vec![10]);
        assert_eq!(
            range(10, 0).collect_vec(),
            vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn test_range_by_steps_past_end() {
        assert_eq!(range_by(0, 10, 3).collect_vec(), vec![0, 3, 6, 9]);
        assert_eq!(range_by(10u32, 0, 4).collect_vec(), vec![10, 6, 2]);
    }

    #[test]
    fn test_range_stops_instead_of_wrapping() {
        assert_eq!(range_by(250u8, 255, 4).collect_vec(), vec![250, 254]);
        assert_eq!(range_by(0, 5, 0).collect_vec(), vec![0]);
        assert_eq!(range_by(3u8, 0, 2).collect_vec(), vec![3, 1]);
        assert_eq!(range_by(5u8, 0, 0).collect_vec(), vec![5]);
    }

    #[test]
    fn test_float_progression() {
        let got = range_by(0.0f64, 1.0, 0.25).collect_vec();
        assert_eq!(got, vec![0.0, 0.25, 0.5, 0.75]);
    }
}
