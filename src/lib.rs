//! # Protocol Errors
//!
//! Classify application errors once, answer in both HTTP and RPC.
//!
//! ## Design Philosophy
//!
//! 1. **An error is tagged where it happens**, with the status of the
//!    protocol the author was thinking in
//! 2. **Any boundary can ask for either view**: `status_http()` and
//!    `status_rpc()` translate on demand through fixed tables
//! 3. **Composition never invents a code**: wrapping copies the inner
//!    status, aggregating keeps member order
//! 4. **Nothing fails**: unknown codes and untagged errors degrade to
//!    `500` / `UNKNOWN`
//!
//! ## Error Shapes
//!
//! | Shape | Built by | Resolves to |
//! |---|---|---|
//! | [`TaggedError`] | [`Error::new`], [`Error::http`], [`Error::rpc`], [`http`], [`rpc`] | its own status, translated if needed |
//! | [`AggregateError`] | [`append`], [`AggregateError::push`] | first member with a status |
//! | [`Signal`] | [`Error::canceled`], [`Error::deadline_exceeded`] | `408`/`CANCELED`, `504`/`DEADLINE_EXCEEDED` |
//! | [`PlainError`] | [`Error::plain`], wrapping an untagged error | `500` / `UNKNOWN` |
//! | [`ForeignError`] | [`Error::foreign`] | whatever its `source()` chain carries |
//!
//! ## Quick Start
//!
//! ```rust
//! use protocol_errors::{http, rpc, HttpStatus, Result, RpcStatus};
//!
//! fn find_user(id: u64) -> Result<&'static str> {
//!     if id == 0 {
//!         return Err(http::bad_request("user id must be positive"));
//!     }
//!     Err(rpc::not_found("no such user"))
//! }
//!
//! let err = find_user(0).unwrap_err();
//! assert_eq!(err.status_http(), HttpStatus::BAD_REQUEST);
//! assert_eq!(err.status_rpc(), RpcStatus::INVALID_ARGUMENT);
//!
//! let err = find_user(7).unwrap_err().wrap("loading profile");
//! assert_eq!(err.to_string(), "loading profile: no such user");
//! assert_eq!(err.status_http(), HttpStatus::NOT_FOUND);
//! ```
//!
//! ## No Error At All
//!
//! Boundary code usually holds an `Option<&Error>`. The free functions
//! treat `None` as success:
//!
//! ```rust
//! use protocol_errors::{status_http, status_rpc, HttpStatus, RpcStatus};
//!
//! assert_eq!(status_http(None), HttpStatus::OK);
//! assert_eq!(status_rpc(None), RpcStatus::OK);
//! ```
//!
//! ## Features
//!
//! - `tokio`: `tokio` timeouts and cancelled tasks count as signals
//! - `async_std`: `async_std` timeouts count as deadline signals
//! - `http`: conversions to and from `http::StatusCode`
//! - `tonic`: conversions to and from `tonic::Code` and `tonic::Status`

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

pub mod aggregate;
pub mod chain;
pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod interop;
pub mod logging;
pub mod models;
pub mod translation;

pub use aggregate::{append, flatten, AggregateError};
pub use chain::{find, find_signal, find_tagged, is, prefix, unwrap, wrap, Chain};
pub use codes::{HttpStatus, Protocol, RpcStatus, Status};
pub use definitions::{http, rpc};
pub use logging::StatusLog;
pub use models::{ForeignError, Message, PlainError, Signal, TaggedError};
pub use translation::{http_to_rpc, rpc_to_http};

/// Result alias for operations that fail with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Error
// ============================================================================

/// Any error this crate can classify.
///
/// Cheap to clone: wrap chains and foreign errors are shared behind `Arc`.
/// `Send + Sync`, so it crosses task and thread boundaries freely.
#[must_use]
#[derive(Clone)]
pub enum Error {
    /// Message with a protocol-tagged status.
    Tagged(TaggedError),
    /// Message without a status.
    Plain(PlainError),
    /// Ordered list of errors.
    Aggregate(Box<AggregateError>),
    /// Cancellation or deadline sentinel.
    Signal(Signal),
    /// Error from outside this crate.
    Foreign(ForeignError),
}

impl Error {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create an error tagged with `code` in `protocol`'s enumeration.
    ///
    /// The code is not validated. An unregistered code is carried as-is and
    /// translates to the "unknown" bucket.
    ///
    /// ```rust
    /// use protocol_errors::{Error, HttpStatus, Protocol, RpcStatus};
    ///
    /// let err = Error::new("bad input", 400, Protocol::Http);
    /// assert_eq!(err.status_http(), HttpStatus::BAD_REQUEST);
    /// assert_eq!(err.status_rpc(), RpcStatus::INVALID_ARGUMENT);
    /// ```
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>, code: u32, protocol: Protocol) -> Self {
        Self::Tagged(TaggedError::new(message, Status::new(code, protocol)))
    }

    /// Create an HTTP-tagged error.
    #[inline]
    pub fn http(message: impl Into<Cow<'static, str>>, status: HttpStatus) -> Self {
        Self::Tagged(TaggedError::new(message, Status::Http(status)))
    }

    /// Create an RPC-tagged error.
    #[inline]
    pub fn rpc(message: impl Into<Cow<'static, str>>, status: RpcStatus) -> Self {
        Self::Tagged(TaggedError::new(message, Status::Rpc(status)))
    }

    /// Create an error without a status (`500` / `UNKNOWN`).
    #[inline]
    pub fn plain(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Plain(PlainError::new(message))
    }

    /// Adopt an error from outside this crate.
    #[inline]
    pub fn foreign<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Foreign(ForeignError::new(err))
    }

    /// The cancellation sentinel.
    #[inline]
    pub const fn canceled() -> Self {
        Self::Signal(Signal::Canceled)
    }

    /// The deadline sentinel.
    #[inline]
    pub const fn deadline_exceeded() -> Self {
        Self::Signal(Signal::DeadlineExceeded)
    }

    // ========================================================================
    // Classification
    // ========================================================================

    /// The protocol status this error carries, if any.
    ///
    /// Tagged errors carry their own; an aggregate carries its first
    /// member's; a foreign error carries that of a library error found in
    /// its `source()` chain. Plain errors and signals carry none.
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::Tagged(tagged) => Some(tagged.status()),
            Self::Aggregate(aggregate) => aggregate.status(),
            Self::Foreign(foreign) => foreign.status(),
            Self::Plain(_) | Self::Signal(_) => None,
        }
    }

    /// The sentinel signal this error carries, if any.
    pub fn signal(&self) -> Option<Signal> {
        match self {
            Self::Signal(signal) => Some(*signal),
            Self::Aggregate(aggregate) => aggregate.iter().find_map(Self::signal),
            Self::Foreign(foreign) => foreign.signal(),
            Self::Tagged(_) | Self::Plain(_) => None,
        }
    }

    /// HTTP status to answer with.
    ///
    /// A carried status wins, then a signal, then `500`.
    pub fn status_http(&self) -> HttpStatus {
        if let Some(status) = self.status() {
            return status.http();
        }
        match self.signal() {
            Some(signal) => signal.status_http(),
            None => HttpStatus::INTERNAL_SERVER_ERROR,
        }
    }

    /// RPC status to answer with.
    ///
    /// A carried status wins, then a signal, then `UNKNOWN`.
    pub fn status_rpc(&self) -> RpcStatus {
        if let Some(status) = self.status() {
            return status.rpc();
        }
        match self.signal() {
            Some(signal) => signal.status_rpc(),
            None => RpcStatus::UNKNOWN,
        }
    }

    /// Short name of the error's shape.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Tagged(_) => "tagged",
            Self::Plain(_) => "plain",
            Self::Aggregate(_) => "aggregate",
            Self::Signal(_) => "signal",
            Self::Foreign(_) => "foreign",
        }
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// See [`wrap`].
    #[inline]
    pub fn wrap(self, message: impl Into<Cow<'static, str>>) -> Self {
        chain::wrap(self, message)
    }

    /// See [`prefix`].
    #[inline]
    pub fn prefix(self, text: impl Into<Cow<'static, str>>) -> Self {
        chain::prefix(self, text)
    }

    /// See [`append`]. Always returns an aggregate.
    #[inline]
    pub fn append(self, errs: impl IntoIterator<Item = Error>) -> Self {
        Self::from(aggregate::append(Some(self), errs))
    }

    /// See [`flatten`].
    #[inline]
    pub fn flatten(self) -> Self {
        aggregate::flatten(self)
    }

    /// Same message and chain under a new status.
    ///
    /// Only tagged and plain errors are re-tagged; other shapes keep their
    /// own classification.
    pub(crate) fn retagged(self, status: Status) -> Self {
        match self {
            Self::Tagged(mut tagged) => {
                tagged.status = status;
                Self::Tagged(tagged)
            }
            Self::Plain(plain) => Self::Tagged(plain.into_tagged(status)),
            other => other,
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// See [`unwrap`].
    #[inline]
    pub fn unwrap_once(&self) -> Option<&Error> {
        chain::unwrap(self)
    }

    /// Walk this error and everything it wraps, outermost first.
    #[inline]
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// See [`is`].
    #[inline]
    pub fn is(&self, target: &Error) -> bool {
        chain::is(self, target)
    }

    /// See [`find_tagged`].
    #[inline]
    pub fn find_tagged(&self) -> Option<&TaggedError> {
        chain::find_tagged(self)
    }

    /// See [`find`].
    #[inline]
    pub fn find<T>(&self) -> Option<&T>
    where
        T: StdError + 'static,
    {
        chain::find::<T>(self)
    }

    // ========================================================================
    // Logging
    // ========================================================================

    /// Structured log view borrowing from this error.
    ///
    /// ```rust
    /// use protocol_errors::http;
    ///
    /// let err = http::conflict("order exists").wrap("submit");
    /// let log = err.status_log();
    /// assert_eq!(log.message(), "submit: order exists");
    /// assert_eq!(log.depth(), 1);
    /// ```
    pub fn status_log(&self) -> StatusLog<'_> {
        StatusLog::new(self)
    }

    /// Run `f` with a log view that cannot outlive the call.
    pub fn with_status_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&StatusLog<'_>) -> R,
    {
        let log = self.status_log();
        f(&log)
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// HTTP status for an optional error; `None` means `200 OK`.
#[inline]
pub fn status_http(err: Option<&Error>) -> HttpStatus {
    err.map_or(HttpStatus::OK, Error::status_http)
}

/// RPC status for an optional error; `None` means `OK`.
#[inline]
pub fn status_rpc(err: Option<&Error>) -> RpcStatus {
    err.map_or(RpcStatus::OK, Error::status_rpc)
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tagged(e) => fmt::Display::fmt(e, f),
            Self::Plain(e) => fmt::Display::fmt(e, f),
            Self::Aggregate(e) => fmt::Display::fmt(&**e, f),
            Self::Signal(e) => fmt::Display::fmt(e, f),
            Self::Foreign(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tagged(e) => fmt::Debug::fmt(e, f),
            Self::Plain(e) => fmt::Debug::fmt(e, f),
            Self::Aggregate(e) => f.debug_tuple("Aggregate").field(&**e).finish(),
            Self::Signal(e) => fmt::Debug::fmt(e, f),
            Self::Foreign(e) => fmt::Debug::fmt(e, f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Tagged(e) => e.source(),
            Self::Plain(e) => e.source(),
            Self::Foreign(e) => e.get().source(),
            Self::Aggregate(_) | Self::Signal(_) => None,
        }
    }
}

impl From<TaggedError> for Error {
    fn from(err: TaggedError) -> Self {
        Self::Tagged(err)
    }
}

impl From<PlainError> for Error {
    fn from(err: PlainError) -> Self {
        Self::Plain(err)
    }
}

impl From<Signal> for Error {
    fn from(signal: Signal) -> Self {
        Self::Signal(signal)
    }
}

impl From<ForeignError> for Error {
    fn from(err: ForeignError) -> Self {
        Self::Foreign(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::foreign(err)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug)]
    struct Outer(Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer: {}", self.0)
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn no_error_is_ok() {
        assert_eq!(status_http(None), HttpStatus::OK);
        assert_eq!(status_rpc(None), RpcStatus::OK);
    }

    #[test]
    fn http_tagged_translates_to_rpc() {
        let err = Error::new("m", 400, Protocol::Http);
        assert_eq!(status_http(Some(&err)), HttpStatus::BAD_REQUEST);
        assert_eq!(status_rpc(Some(&err)), RpcStatus::INVALID_ARGUMENT);
    }

    #[test]
    fn rpc_tagged_translates_to_http() {
        let err = Error::new("m", RpcStatus::INVALID_ARGUMENT.value(), Protocol::Rpc);
        assert_eq!(err.status_http(), HttpStatus::BAD_REQUEST);
        assert_eq!(err.status_rpc(), RpcStatus::INVALID_ARGUMENT);
    }

    #[test]
    fn same_protocol_is_never_translated() {
        let err = Error::http("i'm short and stout", HttpStatus::new(499));
        assert_eq!(err.status_http().value(), 499);
        assert_eq!(err.status_rpc(), RpcStatus::UNKNOWN);

        let err = Error::rpc("custom", RpcStatus::new(42));
        assert_eq!(err.status_rpc().value(), 42);
        assert_eq!(err.status_http(), HttpStatus::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn wrap_keeps_inner_status() {
        let err = Error::new("inner", 400, Protocol::Http).wrap("outer");
        assert_eq!(err.to_string(), "outer: inner");
        assert_eq!(err.status_http(), HttpStatus::BAD_REQUEST);
        assert_eq!(err.kind(), "tagged");
    }

    #[test]
    fn signals_resolve() {
        let err = Error::deadline_exceeded();
        assert_eq!(err.status_http(), HttpStatus::GATEWAY_TIMEOUT);
        assert_eq!(err.status_rpc(), RpcStatus::DEADLINE_EXCEEDED);

        let err = Error::canceled();
        assert_eq!(err.status_http(), HttpStatus::REQUEST_TIMEOUT);
        assert_eq!(err.status_rpc(), RpcStatus::CANCELED);
    }

    #[test]
    fn plain_resolves_to_defaults() {
        let err = Error::plain("boom");
        assert!(err.status().is_none());
        assert!(err.signal().is_none());
        assert_eq!(err.status_http(), HttpStatus::INTERNAL_SERVER_ERROR);
        assert_eq!(err.status_rpc(), RpcStatus::UNKNOWN);
    }

    #[test]
    fn empty_aggregate_resolves_to_defaults() {
        let err = Error::from(AggregateError::new());
        assert_eq!(err.status_http(), HttpStatus::INTERNAL_SERVER_ERROR);
        assert_eq!(err.status_rpc(), RpcStatus::UNKNOWN);
    }

    #[test]
    fn aggregate_status_beats_aggregate_signal() {
        let err = Error::canceled().append([Error::http("late", HttpStatus::GONE)]);
        assert_eq!(err.status_http(), HttpStatus::GONE);
        assert_eq!(err.signal(), Some(Signal::Canceled));
    }

    #[test]
    fn foreign_resolution_uses_source_chain() {
        let err = Error::foreign(Outer(Error::rpc("gone", RpcStatus::NOT_FOUND)));
        assert_eq!(err.status_http(), HttpStatus::NOT_FOUND);

        let err = Error::foreign(Outer(Error::deadline_exceeded()));
        assert_eq!(err.status_http(), HttpStatus::GATEWAY_TIMEOUT);

        let err = Error::from(io::Error::other("disk"));
        assert_eq!(err.status_http(), HttpStatus::INTERNAL_SERVER_ERROR);
        assert_eq!(err.status_rpc(), RpcStatus::UNKNOWN);
    }

    #[test]
    fn foreign_resolves_like_the_library_error_it_carries() {
        let wrapped = wrap(Error::canceled(), "x");
        let err = Error::foreign(Outer(wrapped.clone()));

        assert_eq!(err.status_http(), wrapped.status_http());
        assert_eq!(err.status_rpc(), RpcStatus::UNKNOWN);
        assert_eq!(err.signal(), None);
    }

    #[test]
    fn append_method_builds_aggregate() {
        let err = Error::new("e1", 400, Protocol::Http).append([Error::new("e2", 500, Protocol::Http)]);
        match &err {
            Error::Aggregate(agg) => {
                assert!(agg.iter().all(|e| e.status_http() == HttpStatus::BAD_REQUEST));
            }
            other => panic!("expected aggregate, got {:?}", other),
        }
    }

    #[test]
    fn source_follows_wrap_chain() {
        let err = Error::plain("inner").wrap("outer");
        let source = err.source().expect("wrapped error");
        assert_eq!(source.to_string(), "inner");
        assert!(source.source().is_none());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<Error>();
        assert_send_sync::<AggregateError>();
    }

    #[test]
    fn result_alias_propagates() {
        fn inner() -> Result<()> {
            Err(rpc::unavailable("shard draining"))
        }
        fn outer() -> Result<()> {
            inner().map_err(|e| e.wrap("replicate"))?;
            Ok(())
        }

        let err = outer().unwrap_err();
        assert_eq!(err.status_http(), HttpStatus::SERVICE_UNAVAILABLE);
    }
}
