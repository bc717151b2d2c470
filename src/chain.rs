//! Wrapping, prefixing and chain inspection.
//!
//! # Wrap Chain
//!
//! [`wrap`] and [`prefix`] produce a new error that keeps an `Arc`
//! back-reference to the error it was built from. The references form an
//! immutable singly-linked list, walked by:
//!
//! - [`unwrap`]: one step back
//! - [`Chain`]: every step, outermost first
//! - [`is`]: equivalence anywhere in the chain (or inside aggregate members)
//! - [`find`] / [`find_tagged`]: typed lookup anywhere in the chain
//!
//! # Status Propagation
//!
//! Wrapping copies the wrapped error's status verbatim or, if it carries
//! none, produces an untagged error. It never invents a code:
//!
//! ```rust
//! use protocol_errors::{wrap, Error, HttpStatus, Protocol};
//!
//! let err = wrap(Error::new("inner", 400, Protocol::Http), "outer");
//! assert_eq!(err.to_string(), "outer: inner");
//! assert_eq!(err.status_http(), HttpStatus::BAD_REQUEST);
//!
//! let err = wrap(Error::deadline_exceeded(), "fetching profile");
//! assert_eq!(err.status_http(), HttpStatus::INTERNAL_SERVER_ERROR);
//! ```

use crate::models::{PlainError, TaggedError};
use crate::{Error, Signal};
use std::borrow::Cow;
use std::error::Error as StdError;

// ============================================================================
// Construction
// ============================================================================

/// Wrap `err` under `message`.
///
/// The new message is `"<message>: <err>"`. The status is copied from
/// [`Error::status`]; without one the result is a plain (untagged) error,
/// even when `err` was a signal.
///
/// Lookups walk the chain iteratively, but dropping the last handle
/// releases one layer per stack frame. Chains on the order of 100 000
/// layers can overflow the stack on drop; keep wrapping proportional to
/// call depth rather than loop iterations.
pub fn wrap(err: Error, message: impl Into<Cow<'static, str>>) -> Error {
    let text = format!("{}: {}", message.into(), err);
    wrap_with(err, text)
}

/// Prefix `err` with `text`.
///
/// For an aggregate every member becomes `"<text> <member>"`, each keeping
/// its own status. Any other error is prefixed the same way as a whole.
/// Status handling is that of [`wrap`].
pub fn prefix(err: Error, text: impl Into<Cow<'static, str>>) -> Error {
    let text = text.into();
    match err {
        Error::Aggregate(aggregate) => {
            Error::from(aggregate.map_members(|member| prefix_one(member, &text)))
        }
        other => prefix_one(other, &text),
    }
}

fn prefix_one(err: Error, text: &str) -> Error {
    let message = format!("{} {}", text, err);
    wrap_with(err, message)
}

fn wrap_with(err: Error, message: String) -> Error {
    match err.status() {
        Some(status) => Error::Tagged(TaggedError::wrapping(message, status, err)),
        None => Error::Plain(PlainError::wrapping(message, err)),
    }
}

// ============================================================================
// Inspection
// ============================================================================

/// The error directly wrapped by `err`, if any.
///
/// Only tagged and plain errors wrap. Aggregate members are not part of
/// the unwrap chain; [`is`] and [`find`] descend into them separately.
pub fn unwrap(err: &Error) -> Option<&Error> {
    match err {
        Error::Tagged(tagged) => tagged.wrapped(),
        Error::Plain(plain) => plain.wrapped(),
        Error::Aggregate(_) | Error::Signal(_) | Error::Foreign(_) => None,
    }
}

/// Iterator over an error and everything it wraps, outermost first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Chain<'a> {
    /// Start a walk at `err`.
    #[inline]
    pub fn new(err: &'a Error) -> Self {
        Self { next: Some(err) }
    }

    /// The innermost error of the chain.
    pub fn root(self) -> Option<&'a Error> {
        self.last()
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = unwrap(current);
        Some(current)
    }
}

/// `true` if `err`, anything it wraps, or any aggregate member along the
/// way is equivalent to `target`.
///
/// Equivalence is structural for library errors (same shape, same message,
/// same status) and identity for foreign errors (same allocation). A
/// foreign error is also equivalent to a [`Signal`] its source chain
/// carries.
pub fn is(err: &Error, target: &Error) -> bool {
    Chain::new(err).any(|node| {
        equivalent(node, target)
            || match node {
                Error::Aggregate(aggregate) => aggregate.iter().any(|member| is(member, target)),
                _ => false,
            }
    })
}

fn equivalent(node: &Error, target: &Error) -> bool {
    match (node, target) {
        (Error::Tagged(a), Error::Tagged(b)) => a.message() == b.message() && a.status() == b.status(),
        (Error::Plain(a), Error::Plain(b)) => a.message() == b.message(),
        (Error::Signal(a), Error::Signal(b)) => a == b,
        (Error::Foreign(a), Error::Foreign(b)) => a.same_allocation(b),
        (Error::Foreign(a), Error::Signal(b)) => a.signal() == Some(*b),
        (Error::Aggregate(a), Error::Aggregate(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| equivalent(x, y))
        }
        _ => false,
    }
}

/// First tagged error anywhere in `err`'s chain.
///
/// Searches the wrap chain, aggregate members and foreign `source()`
/// chains.
pub fn find_tagged(err: &Error) -> Option<&TaggedError> {
    find::<TaggedError>(err)
}

/// First value of type `T` anywhere in `err`'s chain.
///
/// `T` may be any of this crate's error shapes, [`Error`] itself, or a
/// foreign error type.
///
/// ```rust
/// use protocol_errors::{find, wrap, Error};
/// use std::io;
///
/// let io = io::Error::new(io::ErrorKind::NotFound, "no such bucket");
/// let err = wrap(Error::foreign(io), "loading manifest");
///
/// let found = find::<io::Error>(&err).expect("io error in chain");
/// assert_eq!(found.kind(), io::ErrorKind::NotFound);
/// ```
pub fn find<T>(err: &Error) -> Option<&T>
where
    T: StdError + 'static,
{
    Chain::new(err).find_map(|node| {
        if let Some(found) = (node as &(dyn StdError + 'static)).downcast_ref::<T>() {
            return Some(found);
        }
        match node {
            Error::Tagged(tagged) => (tagged as &(dyn StdError + 'static)).downcast_ref::<T>(),
            Error::Plain(plain) => (plain as &(dyn StdError + 'static)).downcast_ref::<T>(),
            Error::Signal(signal) => (signal as &(dyn StdError + 'static)).downcast_ref::<T>(),
            Error::Aggregate(aggregate) => (&**aggregate as &(dyn StdError + 'static))
                .downcast_ref::<T>()
                .or_else(|| aggregate.iter().find_map(find::<T>)),
            Error::Foreign(foreign) => (foreign as &(dyn StdError + 'static))
                .downcast_ref::<T>()
                .or_else(|| {
                    foreign.iter().find_map(|source| {
                        source
                            .downcast_ref::<T>()
                            .or_else(|| source.downcast_ref::<Error>().and_then(find::<T>))
                    })
                }),
        }
    })
}

/// First signal anywhere in `err`'s chain, foreign sources included.
pub fn find_signal(err: &Error) -> Option<Signal> {
    Chain::new(err).find_map(Error::signal)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{append, HttpStatus, Protocol, RpcStatus, Status};
    use std::io;

    #[test]
    fn wrap_tagged_keeps_status() {
        let err = wrap(Error::new("inner", 400, Protocol::Http), "outer");

        assert_eq!(err.to_string(), "outer: inner");
        assert_eq!(err.status_http(), HttpStatus::BAD_REQUEST);
        assert_eq!(err.status_rpc(), RpcStatus::INVALID_ARGUMENT);
    }

    #[test]
    fn wrap_twice_keeps_original_tag() {
        let err = wrap(wrap(Error::rpc("row missing", RpcStatus::NOT_FOUND), "query"), "handler");

        assert_eq!(err.to_string(), "handler: query: row missing");
        assert_eq!(err.status(), Some(Status::Rpc(RpcStatus::NOT_FOUND)));
    }

    #[test]
    fn wrap_untagged_stays_untagged() {
        let err = wrap(Error::plain("boom"), "outer");

        assert!(err.status().is_none());
        assert_eq!(err.status_http(), HttpStatus::INTERNAL_SERVER_ERROR);
        assert_eq!(err.status_rpc(), RpcStatus::UNKNOWN);
    }

    #[test]
    fn wrap_signal_loses_signal_status() {
        let err = wrap(Error::canceled(), "outer");

        assert_eq!(err.to_string(), "outer: operation canceled");
        assert_eq!(err.status_http(), HttpStatus::INTERNAL_SERVER_ERROR);
        assert_eq!(find_signal(&err), Some(Signal::Canceled));
    }

    #[test]
    fn unwrap_walks_back_one_step() {
        let inner = Error::http("inner", HttpStatus::GONE);
        let outer = wrap(inner.clone(), "outer");

        let back = unwrap(&outer).expect("wrapped error");
        assert!(is(back, &inner));
        assert!(unwrap(back).is_none());
        assert!(unwrap(&Error::deadline_exceeded()).is_none());
    }

    #[test]
    fn chain_iterates_outermost_first() {
        let err = wrap(wrap(Error::plain("c"), "b"), "a");
        let messages: Vec<String> = Chain::new(&err).map(ToString::to_string).collect();

        assert_eq!(messages, ["a: b: c", "b: c", "c"]);
        assert_eq!(Chain::new(&err).root().map(ToString::to_string), Some("c".to_string()));
    }

    #[test]
    fn is_finds_wrapped_target() {
        let target = Error::rpc("quota", RpcStatus::RESOURCE_EXHAUSTED);
        let err = wrap(wrap(target.clone(), "one"), "two");

        assert!(is(&err, &target));
        assert!(!is(&err, &Error::rpc("quota", RpcStatus::ABORTED)));
        assert!(!is(&err, &Error::plain("quota")));
    }

    #[test]
    fn is_matches_signals() {
        let err = wrap(Error::deadline_exceeded(), "outer");
        assert!(is(&err, &Error::deadline_exceeded()));
        assert!(!is(&err, &Error::canceled()));
    }

    #[test]
    fn is_descends_into_aggregates() {
        let agg = append(None, [Error::plain("a"), Error::canceled()]);
        let err = Error::from(agg);

        assert!(is(&err, &Error::canceled()));
        assert!(is(&err, &Error::plain("a")));
        assert!(!is(&err, &Error::plain("b")));
    }

    #[test]
    fn is_foreign_uses_identity() {
        let foreign = Error::foreign(io::Error::from(io::ErrorKind::TimedOut));
        let same = foreign.clone();
        let other = Error::foreign(io::Error::from(io::ErrorKind::TimedOut));

        assert!(is(&wrap(foreign, "outer"), &same));
        assert!(!is(&same, &other));
    }

    #[test]
    fn find_tagged_through_wrap_and_aggregate() {
        let agg = append(None, [Error::plain("a"), Error::http("b", HttpStatus::CONFLICT)]);
        let err = wrap(Error::from(agg), "batch");

        let tagged = find_tagged(&err).expect("tagged member");
        // The wrapper itself carries the aggregate's status, so it is found first.
        assert_eq!(tagged.status(), Status::Http(HttpStatus::CONFLICT));
        assert!(tagged.message().starts_with("batch: "));

        let inner = find_tagged(unwrap(&err).expect("aggregate")).expect("member");
        assert_eq!(inner.message(), "b");
    }

    #[test]
    fn find_tagged_none_for_untagged_chain() {
        let err = wrap(Error::plain("x"), "y");
        assert!(find_tagged(&err).is_none());
    }

    #[test]
    fn find_foreign_type() {
        let err = wrap(Error::foreign(io::Error::new(io::ErrorKind::NotFound, "missing")), "load");

        let found = find::<io::Error>(&err).expect("io error");
        assert_eq!(found.kind(), io::ErrorKind::NotFound);
        assert!(find::<std::fmt::Error>(&err).is_none());
    }

    #[test]
    fn find_signal_type() {
        let err = wrap(Error::canceled(), "outer");
        assert_eq!(find::<Signal>(&err), Some(&Signal::Canceled));
    }

    #[test]
    fn prefix_plain_error() {
        let err = prefix(Error::http("missing", HttpStatus::NOT_FOUND), "lookup:");
        assert_eq!(err.to_string(), "lookup: missing");
        assert_eq!(err.status_http(), HttpStatus::NOT_FOUND);
    }

    #[test]
    fn prefix_aggregate_prefixes_every_member() {
        let mut agg = crate::AggregateError::new();
        agg.push(Error::http("a", HttpStatus::GONE));
        agg.push(Error::rpc("b", RpcStatus::ABORTED));

        let err = prefix(Error::from(agg), "sync:");

        assert_eq!(err.to_string(), "2 errors occurred:\n\t* sync: a\n\t* sync: b\n\n");
        match &err {
            Error::Aggregate(agg) => {
                assert_eq!(agg.errors()[0].status_http(), HttpStatus::GONE);
                assert_eq!(agg.errors()[1].status_rpc(), RpcStatus::ABORTED);
            }
            other => panic!("expected aggregate, got {:?}", other),
        }
    }

    #[test]
    fn deep_chain_resolves_and_drops() {
        let mut err = Error::http("inner", HttpStatus::GONE);
        for _ in 0..1_000 {
            err = wrap(err, "x");
        }

        assert_eq!(err.status_http(), HttpStatus::GONE);
        assert_eq!(err.chain().count(), 1_001);
        assert!(err.to_string().ends_with("x: inner"));
        assert_eq!(err.chain().root().map(Error::to_string).as_deref(), Some("inner"));
        assert!(find_tagged(&err).is_some());
        drop(err);
    }
}
