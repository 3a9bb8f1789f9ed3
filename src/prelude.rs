//! Commonly used imports
//!
//! Use `use pushseq::prelude::*;` for quick access to the most common types and functions.
//! Pipeline stage constructors share names with the combinators, so they stay
//! under [`crate::pipe`].

// Core types
pub use crate::{BoxSeq, Error, Sequence};

// Building sequences
pub use crate::build::{
    count, count_down, count_up, drain, empty, forever, from_fn, one, range, range_by, repeat,
    values,
};

// Composition
pub use crate::compose::{
    chain, drop_after, exclude, filter, limit, map, map_merge, map_split, relay, take_while,
    unique,
};

// Terminals
pub use crate::collect::{collect_into, collect_vec, count_elements, first, fold, last};

// Caching
pub use crate::materialize::{materialize, Materialized};
