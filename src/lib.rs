//! # pushseq: Push-Style Lazy Sequences
//!
//! Build lazy sequences that push their elements into a consumer callback, and
//! transform them with composable, allocation-free combinators.
//!
//! ## Core Trait
//!
//! - **[`Sequence`]**: something that can be driven with a consumer
//!   `FnMut(Item) -> bool`, which returns `false` to stop early
//!
//! ## Key Features
//!
//! - **Composable**: `.map()`, `.filter()`, `.limit()`, `.take_while()` and more,
//!   all built on one [`relay`](compose::relay) primitive
//! - **Replayable on demand**: [`materialize`](materialize::materialize) runs a
//!   single-pass source once and shares the result across threads
//! - **Dynamic pipelines**: [`pipe`] joins stages of different element types at
//!   runtime, checking their shapes before any data flows
//!
//! ## Example
//!
//! ```
//! use pushseq::prelude::*;
//!
//! // Odd squares below 50
//! let squares = count(1u32)
//!     .filter(|x| x % 2 == 1)
//!     .map(|x| x * x)
//!     .take_while(|x| *x < 50)
//!     .collect_vec();
//! assert_eq!(squares, vec![1, 9, 25, 49]);
//! ```
//!
//! ## Failures
//!
//! The combinator layer reports programmer errors by panicking with an
//! [`Error`] payload; driving an absent sequence panics with
//! [`Error::InvalidSequence`]. The [`pipe`] layer returns errors instead, using
//! [`bridge`] to turn panics into values at its boundary.
//!
//! ## Common Functions
//!
//! **Building Sequences:**
//! - [`one(v)`](build::one), [`forever(v)`](build::forever), [`repeat(v, n)`](build::repeat)
//! - [`count_up(start, step)`](build::count_up), [`range(start, end)`](build::range)
//! - [`values(items)`](build::values), [`drain(items)`](build::drain)
//!
//! **Consuming:**
//! - [`first`](collect::first), [`last`](collect::last), [`fold`](collect::fold),
//!   [`collect_vec`](collect::collect_vec)

pub mod bridge;
pub mod build;
pub mod cache;
pub mod collect;
pub mod compose;
mod error;
pub mod inspect;
pub mod materialize;
pub mod pipe;
pub mod prelude;
mod sequence;

pub use error::{Error, Result};
pub use sequence::{BoxSeq, Sequence};
