use std::{borrow::Cow, fmt, sync::Arc};

use tracing::trace;

use super::types::{ErasedSeq, Port};
use crate::{
    error::{Error, Result},
    sequence::BoxSeq,
};

/// A named transformation between erased sequences.
///
/// `input` and `output` declare the shapes the stage works with so a pipeline
/// can be checked before any data flows. `convert` only wires sequences
/// together; the work itself happens when the result is driven.
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;

    fn input(&self) -> Port;

    fn output(&self) -> Port;

    /// Turn the incoming sequence into the outgoing one.
    ///
    /// Fails with [`Error::PipelineShapeMismatch`] if `input` does not have
    /// the declared element type.
    fn convert(&self, input: ErasedSeq) -> Result<ErasedSeq>;
}

/// A typed stage turning a sequence of `T` into a sequence of `U`.
///
/// ```rust
/// use pushseq::prelude::*;
/// use pushseq::pipe::Processor;
///
/// let doubled = Processor::new(|seq: BoxSeq<i32>| seq.map(|x| x * 2).boxed());
/// assert_eq!(doubled.apply(values([1, 2]).boxed()).collect_vec(), vec![2, 4]);
/// ```
pub struct Processor<T, U> {
    name: Cow<'static, str>,
    f: Arc<dyn Fn(BoxSeq<T>) -> BoxSeq<U> + Send + Sync>,
}

impl<T, U> Processor<T, U>
where
    T: 'static,
    U: 'static,
{
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(BoxSeq<T>) -> BoxSeq<U> + Send + Sync + 'static,
    {
        Processor {
            name: Cow::Borrowed("processor"),
            f: Arc::new(f),
        }
    }

    /// Rename the stage. The name shows up in logs.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Apply the transformation directly, without erasing types.
    pub fn apply(&self, input: BoxSeq<T>) -> BoxSeq<U> {
        (self.f)(input)
    }
}

impl<T, U> Clone for Processor<T, U> {
    fn clone(&self) -> Self {
        Processor {
            name: self.name.clone(),
            f: Arc::clone(&self.f),
        }
    }
}

impl<T, U> fmt::Debug for Processor<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("name", &self.name)
            .field("input", &std::any::type_name::<T>())
            .field("output", &std::any::type_name::<U>())
            .finish()
    }
}

impl<T, U> Stage for Processor<T, U>
where
    T: 'static,
    U: 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn input(&self) -> Port {
        Port::seq_of::<T>()
    }

    fn output(&self) -> Port {
        Port::seq_of::<U>()
    }

    fn convert(&self, input: ErasedSeq) -> Result<ErasedSeq> {
        let seq = input.downcast::<T>().map_err(|got| Error::PipelineShapeMismatch {
            stage: 0,
            expected: self.input().to_string(),
            actual: got.port().to_string(),
        })?;
        trace!(stage = %self.name, "converting");
        Ok(ErasedSeq::new(self.apply(seq)))
    }
}

/// A stage that hands its input through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Stage for Passthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn input(&self) -> Port {
        Port::Any
    }

    fn output(&self) -> Port {
        Port::Any
    }

    fn convert(&self, input: ErasedSeq) -> Result<ErasedSeq> {
        Ok(input)
    }
}

impl<T: 'static, U: 'static> From<Processor<T, U>> for Arc<dyn Stage> {
    fn from(p: Processor<T, U>) -> Self {
        Arc::new(p)
    }
}

impl From<Passthrough> for Arc<dyn Stage> {
    fn from(p: Passthrough) -> Self {
        Arc::new(p)
    }
}

/// Collect stages of different types into a `Vec<Arc<dyn Stage>>`.
///
/// ```rust
/// use pushseq::{pipe, stages};
///
/// let list = stages![pipe::limit::<u8>(3), pipe::passthrough()];
/// assert_eq!(list.len(), 2);
/// ```
#[macro_export]
macro_rules! stages {
    ($($stage:expr),* $(,)?) => {
        ::std::vec![$(
            ::std::convert::Into::<::std::sync::Arc<dyn $crate::pipe::Stage>>::into($stage)
        ),*]
    };
}
