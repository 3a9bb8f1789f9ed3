//! Converting between panics and returned errors.
//!
//! The combinator layer reports failures by panicking, usually with an
//! [`Error`] payload. The pipeline layer uses the functions here to turn those
//! panics into ordinary `Result`s at its public boundary, and back again.
//!
//! A caught payload is converted as follows:
//! - an [`Error`] is returned as is;
//! - a `&str` or `String` message (a plain `panic!`) becomes
//!   [`Error::StageExecutionFault`];
//! - anything else is re-raised with [`std::panic::resume_unwind`].

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use tracing::debug;

use crate::error::{Error, Result};

/// Run `f`, returning any error it panics with.
///
/// ```rust
/// use pushseq::{bridge::catch, Error};
///
/// assert_eq!(catch(|| ()), Ok(()));
/// let err = catch(|| panic!("boom")).unwrap_err();
/// assert_eq!(err, Error::StageExecutionFault { message: "boom".into() });
/// ```
pub fn catch<F>(f: F) -> Result<()>
where
    F: FnOnce(),
{
    catch_value(f)
}

/// Run `f` and return its value, or the error it panics with.
pub fn catch_value<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(into_error)
}

/// Unwrap `result`, panicking with the error as payload on `Err`.
///
/// The payload is the [`Error`] itself, so a surrounding [`catch`] recovers it
/// unchanged.
pub fn must<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic::panic_any(err),
    }
}

fn into_error(payload: Box<dyn Any + Send>) -> Error {
    match to_error(payload) {
        Ok(err) => err,
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Convert a caught payload, handing back payloads that are neither an
/// [`Error`] nor a message.
pub(crate) fn to_error(
    payload: Box<dyn Any + Send>,
) -> std::result::Result<Error, Box<dyn Any + Send>> {
    let payload = match payload.downcast::<Error>() {
        Ok(err) => {
            debug!(error = %err, "caught error panic");
            return Ok(*err);
        }
        Err(payload) => payload,
    };
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        return Err(payload);
    };
    debug!(%message, "caught panic as stage execution fault");
    Ok(Error::StageExecutionFault { message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_returns_ok_without_panic() {
        assert_eq!(catch(|| {}), Ok(()));
        assert_eq!(catch_value(|| 5), Ok(5));
    }

    #[test]
    fn test_catch_recovers_error_payload() {
        let err = catch(|| panic::panic_any(Error::InvalidSequence)).unwrap_err();
        assert_eq!(err, Error::InvalidSequence);
    }

    #[test]
    fn test_catch_converts_string_panics() {
        let n = 3;
        let err = catch_value(|| -> i32 { panic!("bad value {n}") }).unwrap_err();
        assert_eq!(
            err,
            Error::StageExecutionFault {
                message: "bad value 3".to_string()
            }
        );
    }

    #[test]
    fn test_catch_reraises_foreign_payloads() {
        let outer = panic::catch_unwind(|| {
            let _ = catch(|| panic::panic_any(17u32));
        });
        let payload = outer.unwrap_err();
        assert_eq!(payload.downcast_ref::<u32>(), Some(&17));
    }

    #[test]
    fn test_must_round_trips_through_catch() {
        assert_eq!(must(Ok::<_, Error>(1)), 1);
        let err = catch(|| {
            must::<()>(Err(Error::UnsupportedInputShape {
                actual: "i32".into(),
            }))
        })
        .unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedInputShape {
                actual: "i32".into()
            }
        );
    }
}
