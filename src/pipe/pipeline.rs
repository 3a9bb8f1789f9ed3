use std::{borrow::Cow, fmt, sync::Arc};

use tracing::{debug, trace};

use super::{
    stage::Stage,
    types::{ErasedSeq, Port},
};
use crate::{
    bridge,
    error::{Error, Result},
};

/// An ordered, validated chain of stages.
///
/// A pipeline is itself a [`Stage`], so pipelines nest.
#[derive(Clone)]
pub struct Pipeline {
    name: Cow<'static, str>,
    stages: Vec<Arc<dyn Stage>>,
    input: Port,
    output: Port,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn stages(&self) -> &[Arc<dyn Stage>] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// An empty pipeline passes its input through.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("stages", &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("input", &self.input)
            .field("output", &self.output)
            .finish()
    }
}

impl Stage for Pipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn input(&self) -> Port {
        self.input
    }

    fn output(&self) -> Port {
        self.output
    }

    fn convert(&self, input: ErasedSeq) -> Result<ErasedSeq> {
        trace!(pipeline = %self.name, elem = %input.elem(), "converting");
        self.stages
            .iter()
            .enumerate()
            .try_fold(input, |seq, (i, stage)| {
                stage.convert(seq).map_err(|err| err.at_stage(i))
            })
    }
}

impl From<Pipeline> for Arc<dyn Stage> {
    fn from(p: Pipeline) -> Self {
        Arc::new(p)
    }
}

/// Check adjacent ports, returning the pipeline's overall input and output.
///
/// A stage with an `Any` input accepts whatever flows into it and an `Any`
/// output leaves the flowing type unchanged. The overall input is the first
/// concrete input seen before any concrete output.
fn validate(stages: &[Arc<dyn Stage>]) -> Result<(Port, Port)> {
    let mut input = Port::Any;
    let mut current = Port::Any;
    for (i, stage) in stages.iter().enumerate() {
        match (stage.input(), current) {
            (Port::Any, _) => {}
            (expected @ Port::Opaque(_), Port::Any) => {
                return Err(Error::UnsupportedInputShape {
                    actual: expected.to_string(),
                })
            }
            (expected, Port::Any) => input = expected,
            (expected, actual) if expected == actual => {}
            (expected, actual) => {
                return Err(Error::PipelineShapeMismatch {
                    stage: i,
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                })
            }
        }
        if !stage.output().is_any() {
            current = stage.output();
        }
    }
    Ok((input, current))
}

/// Assemble `stages` into a pipeline, checking that adjacent stages agree on
/// element types.
///
/// No stages gives a pipeline that passes its input through. A single stage is
/// wrapped in a one-stage pipeline that carries the stage's name. On error no
/// pipeline is returned.
///
/// ```rust
/// use pushseq::{pipe, stages, Error};
///
/// let ok = pipe::try_join(stages![
///     pipe::map(|x: i32| f64::from(x)),
///     pipe::filter(|x: &f64| *x > 0.5),
/// ]);
/// assert!(ok.is_ok());
///
/// let err = pipe::try_join(stages![
///     pipe::map(|x: i32| f64::from(x)),
///     pipe::filter(|x: &i32| *x > 0),
/// ]);
/// assert!(matches!(err, Err(Error::PipelineShapeMismatch { stage: 1, .. })));
/// ```
pub fn try_join<I>(stages: I) -> Result<Pipeline>
where
    I: IntoIterator<Item = Arc<dyn Stage>>,
{
    let stages: Vec<_> = stages.into_iter().collect();
    let (input, output) = validate(&stages).inspect_err(|err| {
        debug!(%err, "pipeline rejected");
    })?;
    let name = match stages.as_slice() {
        [only] => Cow::Owned(only.name().to_owned()),
        _ => Cow::Borrowed("pipeline"),
    };
    debug!(%name, stages = stages.len(), %input, %output, "pipeline joined");
    Ok(Pipeline {
        name,
        stages,
        input,
        output,
    })
}

/// Like [`try_join`] but panics with the error as payload.
pub fn join<I>(stages: I) -> Pipeline
where
    I: IntoIterator<Item = Arc<dyn Stage>>,
{
    bridge::must(try_join(stages))
}

/// Incremental construction of a [`Pipeline`].
///
/// ```rust
/// use pushseq::pipe::{self, Pipeline};
///
/// let p = Pipeline::builder()
///     .then(pipe::limit::<u8>(2))
///     .then(pipe::map(|x: u8| x as char))
///     .try_build()
///     .unwrap();
/// assert_eq!(p.len(), 2);
/// ```
#[derive(Default)]
pub struct PipelineBuilder {
    stages: Vec<Arc<dyn Stage>>,
}

impl PipelineBuilder {
    pub fn then(mut self, stage: impl Into<Arc<dyn Stage>>) -> Self {
        self.stages.push(stage.into());
        self
    }

    pub fn try_build(self) -> Result<Pipeline> {
        try_join(self.stages)
    }

    pub fn build(self) -> Pipeline {
        join(self.stages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bridge::catch,
        build::values,
        pipe::{self, TypeDesc},
        stages, Sequence,
    };

    struct Flag;

    impl Stage for Flag {
        fn name(&self) -> &str {
            "flag"
        }

        fn input(&self) -> Port {
            Port::Opaque(TypeDesc::of::<bool>())
        }

        fn output(&self) -> Port {
            Port::seq_of::<bool>()
        }

        fn convert(&self, input: ErasedSeq) -> Result<ErasedSeq> {
            Ok(input)
        }
    }

    fn run<T: 'static>(p: &Pipeline, input: ErasedSeq) -> Vec<T> {
        p.convert(input).unwrap().downcast::<T>().unwrap().collect_vec()
    }

    #[test]
    fn test_try_join_reports_mismatch() {
        let err = try_join(stages![
            pipe::map(|x: i32| x as f64 * 1.5),
            pipe::filter(|x: &i32| *x > 0),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::PipelineShapeMismatch {
                stage: 1,
                expected: "sequence of i32".into(),
                actual: "sequence of f64".into(),
            }
        );
    }

    #[test]
    fn test_try_join_records_ports() {
        let p = try_join(stages![
            pipe::filter(|x: &u32| x % 2 == 1),
            pipe::map(|x: u32| x.to_string()),
        ])
        .unwrap();
        assert_eq!(p.input(), Port::seq_of::<u32>());
        assert_eq!(p.output(), Port::seq_of::<String>());
        assert_eq!(
            run::<String>(&p, ErasedSeq::new(values([1u32, 2, 3]).boxed())),
            vec!["1", "3"]
        );
    }

    #[test]
    fn test_zero_stages_pass_through() {
        let p = try_join(Vec::new()).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.input(), Port::Any);
        assert_eq!(p.output(), Port::Any);
        assert_eq!(run::<u8>(&p, ErasedSeq::new(values([4u8]).boxed())), vec![4]);
    }

    #[test]
    fn test_single_stage_is_wrapped() {
        let p = try_join(stages![pipe::limit::<i32>(1)]).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.name(), p.stages()[0].name());
        assert_eq!(p.name(), "limit");
        assert_eq!(p.input(), Port::seq_of::<i32>());
        assert_eq!(run::<i32>(&p, ErasedSeq::new(values([9, 8]).boxed())), vec![9]);
    }

    #[test]
    fn test_wildcard_stages_adopt_flowing_type() {
        let p = try_join(stages![
            pipe::passthrough(),
            pipe::map(|x: i64| x + 1),
            pipe::passthrough(),
            pipe::limit::<i64>(2),
        ])
        .unwrap();
        assert_eq!(p.input(), Port::seq_of::<i64>());
        assert_eq!(p.output(), Port::seq_of::<i64>());
    }

    #[test]
    fn test_opaque_head_is_unsupported() {
        let err = try_join(stages![
            Arc::new(Flag) as Arc<dyn Stage>,
            pipe::limit::<bool>(1),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedInputShape {
                actual: "bool".into()
            }
        );

        let err = try_join(stages![pipe::passthrough(), Arc::new(Flag) as Arc<dyn Stage>]);
        assert!(matches!(err, Err(Error::UnsupportedInputShape { .. })));
    }

    #[test]
    fn test_join_panics_with_error_payload() {
        let err = catch(|| {
            join(stages![pipe::limit::<u8>(1), pipe::limit::<u16>(1)]);
        })
        .unwrap_err();
        assert!(matches!(err, Error::PipelineShapeMismatch { stage: 1, .. }));
    }

    #[test]
    fn test_nested_pipelines() {
        let inner = join(stages![
            pipe::map(|x: i32| x * 2),
            pipe::exclude(|x: &i32| *x == 4),
        ])
        .named("inner");
        let outer = join(stages![inner, pipe::map(|x: i32| x.to_string())]);
        assert_eq!(outer.stages()[0].name(), "inner");
        assert_eq!(
            run::<String>(&outer, ErasedSeq::new(values([1, 2, 3]).boxed())),
            vec!["2", "6"]
        );
    }

    #[test]
    fn test_join_outcomes_are_logged() {
        use std::sync::atomic::{AtomicU32, Ordering};

        use tracing_subscriber::prelude::*;

        static EVENTS: AtomicU32 = AtomicU32::new(0);

        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .with_writer(|| {
                    EVENTS.fetch_add(1, Ordering::SeqCst);
                    std::io::sink()
                })
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        );

        tracing::subscriber::with_default(subscriber, || {
            let before = EVENTS.load(Ordering::SeqCst);
            let _ = try_join(stages![pipe::limit::<u8>(1)]);
            let joined = EVENTS.load(Ordering::SeqCst);
            assert!(joined > before, "join logged nothing");

            let _ = try_join(stages![pipe::limit::<u8>(1), pipe::limit::<i8>(1)]);
            assert!(EVENTS.load(Ordering::SeqCst) > joined, "rejection logged nothing");
        });
    }

    #[test]
    fn test_convert_reports_stage_index_of_bad_input() {
        let p = join(stages![pipe::passthrough(), pipe::limit::<i32>(1)]);
        let err = p
            .convert(ErasedSeq::new(values(["nope"]).boxed()))
            .unwrap_err();
        assert!(matches!(err, Error::PipelineShapeMismatch { stage: 1, .. }));
    }
}
