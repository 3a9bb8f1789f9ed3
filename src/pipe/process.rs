use tracing::debug;

use super::{
    pipeline::Pipeline,
    stage::Stage,
    types::{ErasedSeq, Port},
};
use crate::{
    bridge::catch_value,
    build::values,
    error::{Error, Result},
    sequence::BoxSeq,
    Sequence,
};

/// Run `input` through `pipeline`, returning a sequence of `Out`.
///
/// Stages are only wired together here; nothing is evaluated until the result
/// is driven. A panic raised while wiring is returned as an error. A panic
/// raised later, while the result is driven, reaches the caller of the drive;
/// wrap that in [`catch`](crate::bridge::catch) or use [`process_slice`].
///
/// ```rust
/// use pushseq::prelude::*;
/// use pushseq::{pipe, stages};
///
/// let p = pipe::join(stages![pipe::map(|x: u8| u32::from(x) * 100)]);
/// let out = pipe::process::<u32, u8>(values([1, 2]), &p).unwrap();
/// assert_eq!(out.collect_vec(), vec![100, 200]);
/// ```
pub fn process<Out, In>(
    input: impl Sequence<Item = In> + Send + Sync + 'static,
    pipeline: &Pipeline,
) -> Result<BoxSeq<Out>>
where
    Out: 'static,
    In: 'static,
{
    let erased = ErasedSeq::new(input.boxed());
    let output = catch_value(|| pipeline.convert(erased))??;
    output.downcast::<Out>().map_err(|got| {
        let err = Error::PipelineShapeMismatch {
            stage: pipeline.len(),
            expected: Port::seq_of::<Out>().to_string(),
            actual: got.port().to_string(),
        };
        debug!(%err, "pipeline output rejected");
        err
    })
}

/// Run a collection through `pipeline` and collect the results.
///
/// Any panic raised while the pipeline runs, including one from a user
/// function, is returned as an error.
pub fn process_slice<Out, In>(
    items: impl IntoIterator<Item = In>,
    pipeline: &Pipeline,
) -> Result<Vec<Out>>
where
    Out: 'static,
    In: Clone + Send + Sync + 'static,
{
    let output = process::<Out, In>(values(items), pipeline)?;
    catch_value(|| output.collect_vec())
}
