//! The error shapes carried by [`Error`](crate::Error).
//!
//! # Shapes
//!
//! - [`TaggedError`]: message plus a protocol-tagged [`Status`]
//! - [`PlainError`]: message without a status (e.g. a wrapped foreign error)
//! - [`Signal`]: cancellation / deadline sentinels from the host runtime
//! - [`ForeignError`]: any other `std::error::Error`, shared behind an `Arc`
//!
//! [`AggregateError`](crate::AggregateError) lives in its own module.
//!
//! # Wrap Chain
//!
//! Tagged and plain errors may hold a back-reference to the error they wrap.
//! The reference is an `Arc`: cloning an error shares its history instead of
//! copying it, and the chain is immutable once built. It exists for lookup
//! only ([`crate::chain`]); status resolution never consults it.
//!
//! # Memory Hygiene
//!
//! Error text frequently quotes request data. Owned message buffers are
//! zeroized when the [`Message`] drops; `&'static str` text is left alone.

use crate::{AggregateError, Error, HttpStatus, RpcStatus, Status};
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroize;

// ============================================================================
// Message Text
// ============================================================================

/// Error message text with zeroization of owned buffers.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Message(Cow<'static, str>);

impl Message {
    /// Build a message from static or owned text.
    #[inline]
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self(text.into())
    }

    /// Borrow the text.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<&'static str> for Message {
    fn from(text: &'static str) -> Self {
        Self(Cow::Borrowed(text))
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self(Cow::Owned(text))
    }
}

impl Zeroize for Message {
    fn zeroize(&mut self) {
        if let Cow::Owned(ref mut s) = self.0 {
            s.zeroize();
        }
    }
}

impl Drop for Message {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

// ============================================================================
// Tagged Error
// ============================================================================

/// An error carrying a message and a protocol-tagged status.
///
/// The status is fixed at construction. There is no setter: re-tagging
/// (see [`crate::append`]) produces a new value.
#[derive(Clone)]
pub struct TaggedError {
    pub(crate) message: Message,
    pub(crate) status: Status,
    pub(crate) wrapped: Option<Arc<Error>>,
}

impl TaggedError {
    /// Create a tagged error. Codes are not validated.
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>, status: Status) -> Self {
        Self {
            message: Message::new(message),
            status,
            wrapped: None,
        }
    }

    pub(crate) fn wrapping(message: String, status: Status, wrapped: Error) -> Self {
        Self {
            message: Message::from(message),
            status,
            wrapped: Some(Arc::new(wrapped)),
        }
    }

    /// The message text.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// The tagged status.
    #[inline]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// HTTP view of the status.
    #[inline]
    pub const fn status_http(&self) -> HttpStatus {
        self.status.http()
    }

    /// RPC view of the status.
    #[inline]
    pub const fn status_rpc(&self) -> RpcStatus {
        self.status.rpc()
    }

    /// The error this one wraps, if any.
    #[inline]
    pub fn wrapped(&self) -> Option<&Error> {
        self.wrapped.as_deref()
    }
}

impl fmt::Display for TaggedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl fmt::Debug for TaggedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedError")
            .field("message", &self.message)
            .field("status", &self.status)
            .field("wrapped", &self.wrapped.is_some())
            .finish()
    }
}

impl StdError for TaggedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.wrapped
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

// ============================================================================
// Plain Error
// ============================================================================

/// A library error without a status.
///
/// Resolves to `500` / `UNKNOWN`. Produced by [`Error::plain`] and by
/// wrapping an error that carries no status.
#[derive(Clone)]
pub struct PlainError {
    pub(crate) message: Message,
    pub(crate) wrapped: Option<Arc<Error>>,
}

impl PlainError {
    /// Create a plain error.
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: Message::new(message),
            wrapped: None,
        }
    }

    pub(crate) fn wrapping(message: String, wrapped: Error) -> Self {
        Self {
            message: Message::from(message),
            wrapped: Some(Arc::new(wrapped)),
        }
    }

    /// The message text.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// The error this one wraps, if any.
    #[inline]
    pub fn wrapped(&self) -> Option<&Error> {
        self.wrapped.as_deref()
    }

    /// Attach a status, keeping message and wrap chain.
    pub(crate) fn into_tagged(self, status: Status) -> TaggedError {
        TaggedError {
            message: self.message,
            status,
            wrapped: self.wrapped,
        }
    }
}

impl fmt::Display for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl fmt::Debug for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainError")
            .field("message", &self.message)
            .field("wrapped", &self.wrapped.is_some())
            .finish()
    }
}

impl StdError for PlainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.wrapped
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

// ============================================================================
// Sentinel Signals
// ============================================================================

/// Cancellation and deadline sentinels.
///
/// These stand in for the host runtime's "operation was cancelled" and
/// "deadline expired" signals. With the `tokio` / `async_std` features the
/// runtimes' own timeout types are recognised as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The operation was cancelled by its caller.
    Canceled,
    /// The operation's deadline expired.
    DeadlineExceeded,
}

impl Signal {
    /// `408 Request Timeout` for cancellation, `504 Gateway Timeout` for deadlines.
    #[inline]
    pub const fn status_http(self) -> HttpStatus {
        match self {
            Self::Canceled => HttpStatus::REQUEST_TIMEOUT,
            Self::DeadlineExceeded => HttpStatus::GATEWAY_TIMEOUT,
        }
    }

    /// `CANCELED` or `DEADLINE_EXCEEDED`.
    #[inline]
    pub const fn status_rpc(self) -> RpcStatus {
        match self {
            Self::Canceled => RpcStatus::CANCELED,
            Self::DeadlineExceeded => RpcStatus::DEADLINE_EXCEEDED,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canceled => f.write_str("operation canceled"),
            Self::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

impl StdError for Signal {}

// ============================================================================
// Foreign Error
// ============================================================================

/// An error from outside this crate.
///
/// Display and `source()` are transparent. Status resolution inspects the
/// foreign `source()` chain for this crate's own errors and signals, so a
/// tagged error that passed through a third-party wrapper keeps its status.
#[derive(Clone)]
pub struct ForeignError(Arc<dyn StdError + Send + Sync + 'static>);

impl ForeignError {
    /// Share an external error.
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(err))
    }

    /// Adopt an already boxed error.
    pub fn from_boxed(err: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self(Arc::from(err))
    }

    /// Borrow the foreign error.
    #[inline]
    pub fn get(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }

    /// `true` when both values share the same underlying allocation.
    #[inline]
    pub fn same_allocation(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    /// Walk the foreign error and its `source()` chain.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        let root: &(dyn StdError + 'static) = &*self.0;
        std::iter::successors(Some(root), |&err| err.source())
    }

    /// Status and signal of the outermost classifiable value in the chain.
    ///
    /// The walk stops at the first library error (or runtime timeout type)
    /// and resolves it the way [`Error`] would, so nothing beneath a plain
    /// error is consulted.
    fn classify(&self) -> Option<(Option<Status>, Option<Signal>)> {
        self.iter().find_map(|err| {
            if let Some(err) = err.downcast_ref::<Error>() {
                return Some((err.status(), err.signal()));
            }
            if let Some(tagged) = err.downcast_ref::<TaggedError>() {
                return Some((Some(tagged.status()), None));
            }
            if err.is::<PlainError>() {
                return Some((None, None));
            }
            if let Some(signal) = err.downcast_ref::<Signal>() {
                return Some((None, Some(*signal)));
            }
            if let Some(aggregate) = err.downcast_ref::<AggregateError>() {
                return Some((aggregate.status(), aggregate.iter().find_map(Error::signal)));
            }
            crate::interop::runtime_signal(err).map(|signal| (None, Some(signal)))
        })
    }

    /// Status of the outermost library error in the chain.
    pub(crate) fn status(&self) -> Option<Status> {
        self.classify().and_then(|(status, _)| status)
    }

    /// Signal of the outermost library error in the chain.
    pub(crate) fn signal(&self) -> Option<Signal> {
        self.classify().and_then(|(_, signal)| signal)
    }
}

impl fmt::Display for ForeignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for ForeignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ForeignError").field(&self.0).finish()
    }
}

impl StdError for ForeignError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

// ============================================================================
// Tests
// ============================================================================
