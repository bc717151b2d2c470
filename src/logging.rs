//! Structured log view of an error.
//!
//! The library never logs by itself. Boundary code that does asks the
//! error for a [`StatusLog`], which borrows from it and resolves both
//! statuses once:
//!
//! ```rust
//! use protocol_errors::{rpc, HttpStatus, Protocol};
//!
//! let err = rpc::unavailable("shard draining").wrap("replicate");
//!
//! err.with_status_log(|log| {
//!     assert_eq!(log.kind(), "tagged");
//!     assert_eq!(log.origin(), Some(Protocol::Rpc));
//!     assert_eq!(log.http(), HttpStatus::SERVICE_UNAVAILABLE);
//!
//!     let mut line = String::new();
//!     log.write_to(&mut line).unwrap();
//!     assert_eq!(
//!         line,
//!         "[503 Service Unavailable/UNAVAILABLE] kind=tagged origin=rpc depth=1 message='replicate: shard draining'"
//!     );
//! });
//! ```
//!
//! # Bounded Output
//!
//! `write_to` emits exactly one line. The message is truncated at a UTF-8
//! boundary once it exceeds `MAX_LOGGED_MESSAGE_LEN` bytes, and newlines and
//! tabs (aggregate summaries contain both) are escaped.

use crate::{Error, HttpStatus, Protocol, RpcStatus, Signal};
use std::borrow::Cow;
use std::fmt;

/// Longest message, in bytes, that [`StatusLog::write_to`] emits untouched.
pub const MAX_LOGGED_MESSAGE_LEN: usize = 1024;

/// Ends a message that was cut short.
pub const TRUNCATED_MARKER: &str = "...[TRUNCATED]";

/// Borrowed, pre-resolved view of an error for structured loggers.
///
/// Cannot outlive the error it was built from.
#[derive(Debug, Clone)]
pub struct StatusLog<'a> {
    error: &'a Error,
    origin: Option<Protocol>,
    signal: Option<Signal>,
    http: HttpStatus,
    rpc: RpcStatus,
    depth: usize,
}

impl<'a> StatusLog<'a> {
    pub(crate) fn new(error: &'a Error) -> Self {
        Self {
            error,
            origin: error.status().map(|status| status.protocol()),
            signal: error.signal(),
            http: error.status_http(),
            rpc: error.status_rpc(),
            depth: error.chain().count() - 1,
        }
    }

    /// Write one log line without allocating for tagged or plain errors.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}/{}] kind={} origin={} depth={}",
            self.http,
            self.rpc,
            self.kind(),
            self.origin.map_or("-", Protocol::as_str),
            self.depth,
        )?;

        if let Some(signal) = self.signal {
            write!(f, " signal='{}'", signal)?;
        }

        f.write_str(" message='")?;
        write_bounded(f, &self.message())?;
        f.write_char('\'')
    }

    /// Full message text, untruncated.
    ///
    /// Borrowed for tagged and plain errors, rendered for the other shapes.
    pub fn message(&self) -> Cow<'a, str> {
        match self.error {
            Error::Tagged(tagged) => Cow::Borrowed(tagged.message()),
            Error::Plain(plain) => Cow::Borrowed(plain.message()),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Shape of the error (`"tagged"`, `"aggregate"`, ...).
    #[inline]
    pub const fn kind(&self) -> &'static str {
        self.error.kind()
    }

    /// Protocol of the carried status, `None` if the error carries none.
    #[inline]
    pub const fn origin(&self) -> Option<Protocol> {
        self.origin
    }

    /// Sentinel signal carried by the error.
    #[inline]
    pub const fn signal(&self) -> Option<Signal> {
        self.signal
    }

    /// Resolved HTTP status.
    #[inline]
    pub const fn http(&self) -> HttpStatus {
        self.http
    }

    /// Resolved RPC status.
    #[inline]
    pub const fn rpc(&self) -> RpcStatus {
        self.rpc
    }

    /// Number of errors wrapped beneath this one.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The error itself.
    #[inline]
    pub const fn error(&self) -> &'a Error {
        self.error
    }
}

impl fmt::Display for StatusLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

fn write_escaped(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    let mut rest = s;
    while let Some(idx) = rest.find(['\n', '\t', '\r']) {
        f.write_str(&rest[..idx])?;
        f.write_str(match rest.as_bytes()[idx] {
            b'\n' => "\\n",
            b'\t' => "\\t",
            _ => "\\r",
        })?;
        rest = &rest[idx + 1..];
    }
    f.write_str(rest)
}

/// Write `s` escaped, cut at a character boundary once it exceeds
/// `MAX_LOGGED_MESSAGE_LEN` bytes. The limit applies to the raw text.
fn write_bounded(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    if s.len() <= MAX_LOGGED_MESSAGE_LEN {
        return write_escaped(f, s);
    }

    let mut cut = MAX_LOGGED_MESSAGE_LEN - TRUNCATED_MARKER.len();
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }

    write_escaped(f, &s[..cut])?;
    f.write_str(TRUNCATED_MARKER)
}
