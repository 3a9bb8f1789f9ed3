//! Combining and transforming sequences
//!
//! Every per-element combinator here is built on [`relay`], which hands each
//! source element to a step function together with the downstream consumer.
//! [`limit`] keeps its own counter instead, and [`chain`] concatenates two
//! sources.

mod chain;
mod filter;
mod limit;
mod map;
mod relay;
mod unique;

pub use chain::{chain, Chain};
pub use filter::{drop_after, exclude, filter, take_while, DropAfter, Exclude, Filter, TakeWhile};
pub use limit::{limit, Limit};
pub use map::{map, map_merge, map_split, Map, MapMerge, MapSplit};
pub use relay::{relay, Relay};
pub use unique::{unique, Unique};

pub(crate) use relay::relay_into;
