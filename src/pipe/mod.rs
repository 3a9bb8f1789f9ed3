//! Runtime-checked pipelines of typed stages
//!
//! The combinators in [`compose`](crate::compose) are checked at compile time.
//! This module trades that for flexibility: stages with unrelated element types
//! are stored side by side as [`Stage`] trait objects, joined into a
//! [`Pipeline`] whose adjacent types are checked once when it is built, and
//! executed with [`process`] or [`process_slice`].
//!
//! Failures here are returned as [`Error`](crate::Error) values. Panics raised
//! by stage functions are caught at the [`process_slice`] boundary.
//!
//! ```rust
//! use pushseq::{pipe, stages};
//!
//! let p = pipe::join(stages![
//!     pipe::filter(|x: &i32| x % 2 == 1),
//!     pipe::map(|x: i32| f64::from(x) * 1.1),
//!     pipe::take_while(|f: &f64| *f < 4.0),
//!     pipe::materialize::<f64>(),
//! ]);
//! let out = pipe::process_slice::<f64, i32>(vec![1, 2, 3, 4, 5], &p).unwrap();
//! assert_eq!(out.len(), 2);
//! ```

mod pipeline;
mod process;
mod stage;
mod standard;
mod types;

pub use pipeline::{join, try_join, Pipeline, PipelineBuilder};
pub use process::{process, process_slice};
pub use stage::{Passthrough, Processor, Stage};
pub use standard::{
    drop_after, exclude, filter, limit, map, materialize, passthrough, take_while, unique,
};
pub use types::{ErasedSeq, Port, TypeDesc};
