//! Building sequences from scratch
//!
//! This module provides functions and types for creating new sequences from
//! values, collections, closures, and arithmetic progressions.

mod count;
mod func;

// Re-export building blocks
pub use count::{
    count, count_down, count_up, range, range_by, CountDown, CountUp, Countable, Range,
};
pub use func::{
    drain, empty, forever, from_fn, one, repeat, values, Drain, Empty, Forever, FromFn, One,
    Values,
};
