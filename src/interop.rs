//! Conversions to and from ecosystem types.
//!
//! Everything here is behind a Cargo feature:
//!
//! | Feature | Adds |
//! |---|---|
//! | `tokio` | `Elapsed` and cancelled `JoinError` resolve as signals |
//! | `async_std` | `TimeoutError` resolves as a deadline signal |
//! | `http` | `HttpStatus` <-> `http::StatusCode` |
//! | `tonic` | `RpcStatus` <-> `tonic::Code`, `Error` <-> `tonic::Status` |
//!
//! Runtime timeout types are adopted as foreign errors, so the original
//! value stays reachable through [`crate::find`] while the status
//! resolves like the matching [`Signal`].

use crate::Signal;
use std::error::Error as StdError;

/// Recognise a host runtime's timeout or cancellation type.
pub(crate) fn runtime_signal(err: &(dyn StdError + 'static)) -> Option<Signal> {
    #[cfg(feature = "tokio")]
    {
        if err.is::<tokio::time::error::Elapsed>() {
            return Some(Signal::DeadlineExceeded);
        }
        if err
            .downcast_ref::<tokio::task::JoinError>()
            .is_some_and(tokio::task::JoinError::is_cancelled)
        {
            return Some(Signal::Canceled);
        }
    }

    #[cfg(feature = "async_std")]
    {
        if err.is::<async_std::future::TimeoutError>() {
            return Some(Signal::DeadlineExceeded);
        }
    }

    let _ = err;
    None
}

// ============================================================================
// tokio
// ============================================================================

#[cfg(feature = "tokio")]
mod tokio_impls {
    use crate::Error;

    impl From<tokio::time::error::Elapsed> for Error {
        fn from(err: tokio::time::error::Elapsed) -> Self {
            Error::foreign(err)
        }
    }

    impl From<tokio::task::JoinError> for Error {
        fn from(err: tokio::task::JoinError) -> Self {
            Error::foreign(err)
        }
    }
}

// ============================================================================
// async-std
// ============================================================================

#[cfg(feature = "async_std")]
mod async_std_impls {
    use crate::Error;

    impl From<async_std::future::TimeoutError> for Error {
        fn from(err: async_std::future::TimeoutError) -> Self {
            Error::foreign(err)
        }
    }
}

// ============================================================================
// http
// ============================================================================

#[cfg(feature = "http")]
mod http_impls {
    use crate::{Error, HttpStatus};
    use ::http::status::InvalidStatusCode;
    use ::http::StatusCode;

    impl From<StatusCode> for HttpStatus {
        fn from(code: StatusCode) -> Self {
            HttpStatus::new(u32::from(code.as_u16()))
        }
    }

    /// Fails for values outside `100..=999`.
    impl TryFrom<HttpStatus> for StatusCode {
        type Error = InvalidStatusCode;

        fn try_from(status: HttpStatus) -> Result<Self, Self::Error> {
            // 0 is rejected by `from_u16`, so oversized values fail the same way.
            StatusCode::from_u16(u16::try_from(status.value()).unwrap_or(0))
        }
    }

    /// Response status for an error, `500` if the code is not a valid HTTP status.
    impl From<&Error> for StatusCode {
        fn from(err: &Error) -> Self {
            StatusCode::try_from(err.status_http()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// ============================================================================
// tonic
// ============================================================================

#[cfg(feature = "tonic")]
mod tonic_impls {
    use crate::{Error, RpcStatus};
    use tonic::Code;

    impl From<Code> for RpcStatus {
        fn from(code: Code) -> Self {
            RpcStatus::new(code as i32 as u32)
        }
    }

    /// Codes outside the canonical set become `Code::Unknown`.
    impl From<RpcStatus> for Code {
        fn from(status: RpcStatus) -> Self {
            match i32::try_from(status.value()) {
                Ok(value) => Code::from_i32(value),
                Err(_) => Code::Unknown,
            }
        }
    }

    impl From<tonic::Status> for Error {
        fn from(status: tonic::Status) -> Self {
            Error::rpc(status.message().to_owned(), RpcStatus::from(status.code()))
        }
    }

    impl From<&Error> for tonic::Status {
        fn from(err: &Error) -> Self {
            tonic::Status::new(Code::from(err.status_rpc()), err.to_string())
        }
    }

    impl From<Error> for tonic::Status {
        fn from(err: Error) -> Self {
            tonic::Status::from(&err)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
