//! Error types for sequences and pipelines.

use thiserror::Error;

/// Errors raised by the sequence engine and the pipeline layer.
///
/// Inside the combinator layer these travel as panic payloads (see
/// [`crate::bridge`]); the pipeline layer hands them back as ordinary values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An absent sequence was driven.
    #[error("invalid sequence: sequence is absent")]
    InvalidSequence,

    /// A user supplied function panicked while a sequence was being driven.
    #[error("stage execution fault: {message}")]
    StageExecutionFault { message: String },

    /// Adjacent element types disagree.
    #[error("stage {stage}: expected {expected}, got {actual}")]
    PipelineShapeMismatch {
        stage: usize,
        expected: String,
        actual: String,
    },

    /// The pipeline's first input is not a sequence.
    #[error("expected sequence input, got {actual}")]
    UnsupportedInputShape { actual: String },
}

impl Error {
    /// Re-label a shape mismatch with the index of the stage it occurred at.
    pub(crate) fn at_stage(self, index: usize) -> Self {
        match self {
            Error::PipelineShapeMismatch {
                expected, actual, ..
            } => Error::PipelineShapeMismatch {
                stage: index,
                expected,
                actual,
            },
            other => other,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Abort the current drive because an absent sequence was invoked.
#[cold]
pub(crate) fn invalid_sequence() -> ! {
    std::panic::panic_any(Error::InvalidSequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_stage_relabels_mismatch_only() {
        let err = Error::PipelineShapeMismatch {
            stage: 0,
            expected: "sequence of i32".into(),
            actual: "sequence of f64".into(),
        };
        assert_eq!(
            err.at_stage(3).to_string(),
            "stage 3: expected sequence of i32, got sequence of f64"
        );
        assert_eq!(Error::InvalidSequence.at_stage(3), Error::InvalidSequence);
    }
}
