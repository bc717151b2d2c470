//! Status code types for the two protocol worlds.
//!
//! An error handled by this crate answers to two audiences: HTTP clients
//! and RPC clients. Each speaks its own closed enumeration of outcomes:
//!
//! - **HTTP**: numeric response codes (`400 Bad Request`, `503 Service Unavailable`, ...)
//! - **RPC**: the canonical RPC status taxonomy (`INVALID_ARGUMENT`, `UNAVAILABLE`, ...)
//!
//! # Disjoint Value Spaces
//!
//! The two enumerations overlap numerically but never semantically. RPC code
//! 5 (`NOT_FOUND`) has nothing to do with HTTP 405 or HTTP 5xx. Each code is
//! therefore a distinct newtype:
//!
//! - [`HttpStatus`] wraps an HTTP code
//! - [`RpcStatus`] wraps an RPC code
//! - [`Status`] pairs a code with the [`Protocol`] it belongs to
//!
//! Comparing an `HttpStatus` against an `RpcStatus` does not compile.
//! Crossing worlds always goes through [`crate::translation`].
//!
//! # Out-of-range Codes
//!
//! Codes are plain `u32` values and are never validated. An unregistered
//! code is carried as-is and falls into the "unknown" bucket when it has
//! to be translated.
//!
//! The named constants (`HttpStatus::NOT_FOUND`, `RpcStatus::UNAVAILABLE`, ...)
//! live in [`crate::definitions`].
//!
//! # Example
//!
//! ```rust
//! use protocol_errors::{HttpStatus, Protocol, RpcStatus, Status};
//!
//! let status = Status::new(404, Protocol::Http);
//! assert_eq!(status.http(), HttpStatus::NOT_FOUND);
//! assert_eq!(status.rpc(), RpcStatus::NOT_FOUND);
//! assert_eq!(status.to_string(), "http 404 Not Found");
//! ```

use crate::translation::{http_to_rpc, rpc_to_http};
use std::fmt;

// ============================================================================
// Protocol Tag
// ============================================================================

/// The protocol whose enumeration a status code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// HTTP response status codes.
    Http,
    /// Canonical RPC status codes.
    Rpc,
}

impl Protocol {
    /// Short lowercase name, used in log output.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Rpc => "rpc",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// HTTP Status
// ============================================================================

/// An HTTP response status code.
///
/// Any `u32` is accepted. Registered codes have a canonical reason phrase
/// available through [`HttpStatus::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HttpStatus(u32);

impl HttpStatus {
    /// Wrap a raw HTTP code.
    #[inline]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// The raw numeric code.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// 2xx.
    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// 4xx.
    #[inline]
    pub const fn is_client_error(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// 5xx.
    #[inline]
    pub const fn is_server_error(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Translate into the RPC world. See [`http_to_rpc`].
    #[inline]
    pub const fn to_rpc(self) -> RpcStatus {
        http_to_rpc(self)
    }
}

impl From<u32> for HttpStatus {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl From<HttpStatus> for u32 {
    fn from(status: HttpStatus) -> Self {
        status.0
    }
}

impl fmt::Display for HttpStatus {
    /// `"404 Not Found"`, or just `"599"` for unregistered codes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} {}", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}

// ============================================================================
// RPC Status
// ============================================================================

/// A canonical RPC status code (0-16 are registered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RpcStatus(u32);

impl RpcStatus {
    /// Wrap a raw RPC code.
    #[inline]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// The raw numeric code.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// `true` only for `OK` (0).
    #[inline]
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Translate into the HTTP world. See [`rpc_to_http`].
    #[inline]
    pub const fn to_http(self) -> HttpStatus {
        rpc_to_http(self)
    }
}

impl From<u32> for RpcStatus {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl From<RpcStatus> for u32 {
    fn from(status: RpcStatus) -> Self {
        status.0
    }
}

impl fmt::Display for RpcStatus {
    /// `"NOT_FOUND"`, or just `"17"` for unregistered codes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

// ============================================================================
// Protocol-Tagged Status
// ============================================================================

/// A status code together with the protocol it belongs to.
///
/// The variant is the protocol tag: it is chosen once, when the status is
/// built, and a code is only ever interpreted under its own tag. Asking for
/// the other protocol's view translates; it never reinterprets the raw
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Code from the HTTP enumeration.
    Http(HttpStatus),
    /// Code from the RPC enumeration.
    Rpc(RpcStatus),
}

impl Status {
    /// Build a status from a raw code and the protocol it belongs to.
    #[inline]
    pub const fn new(code: u32, protocol: Protocol) -> Self {
        match protocol {
            Protocol::Http => Self::Http(HttpStatus::new(code)),
            Protocol::Rpc => Self::Rpc(RpcStatus::new(code)),
        }
    }

    /// The protocol tag.
    #[inline]
    pub const fn protocol(self) -> Protocol {
        match self {
            Self::Http(_) => Protocol::Http,
            Self::Rpc(_) => Protocol::Rpc,
        }
    }

    /// The raw code. Only meaningful under [`Status::protocol`].
    #[inline]
    pub const fn code(self) -> u32 {
        match self {
            Self::Http(code) => code.value(),
            Self::Rpc(code) => code.value(),
        }
    }

    /// HTTP view: the code itself if tagged HTTP, translated otherwise.
    #[inline]
    pub const fn http(self) -> HttpStatus {
        match self {
            Self::Http(code) => code,
            Self::Rpc(code) => rpc_to_http(code),
        }
    }

    /// RPC view: the code itself if tagged RPC, translated otherwise.
    #[inline]
    pub const fn rpc(self) -> RpcStatus {
        match self {
            Self::Http(code) => http_to_rpc(code),
            Self::Rpc(code) => code,
        }
    }
}

impl From<HttpStatus> for Status {
    fn from(code: HttpStatus) -> Self {
        Self::Http(code)
    }
}

impl From<RpcStatus> for Status {
    fn from(code: RpcStatus) -> Self {
        Self::Rpc(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(code) => write!(f, "http {}", code),
            Self::Rpc(code) => write!(f, "rpc {}", code),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_new_keeps_tag() {
        let http = Status::new(400, Protocol::Http);
        let rpc = Status::new(3, Protocol::Rpc);

        assert_eq!(http.protocol(), Protocol::Http);
        assert_eq!(rpc.protocol(), Protocol::Rpc);
        assert_eq!(http.code(), 400);
        assert_eq!(rpc.code(), 3);
    }

    #[test]
    fn same_number_different_worlds() {
        // RPC 5 is NOT_FOUND, HTTP 5 is meaningless.
        let rpc = Status::new(5, Protocol::Rpc);
        let http = Status::new(5, Protocol::Http);

        assert_ne!(rpc, http);
        assert_eq!(rpc.http(), HttpStatus::NOT_FOUND);
        assert_eq!(http.rpc(), RpcStatus::UNKNOWN);
    }

    #[test]
    fn views_translate_only_across_tags() {
        let http = Status::Http(HttpStatus::PAYMENT_REQUIRED);
        assert_eq!(http.http(), HttpStatus::PAYMENT_REQUIRED);
        assert_eq!(http.rpc(), RpcStatus::RESOURCE_EXHAUSTED);

        let rpc = Status::Rpc(RpcStatus::FAILED_PRECONDITION);
        assert_eq!(rpc.rpc(), RpcStatus::FAILED_PRECONDITION);
        assert_eq!(rpc.http(), HttpStatus::BAD_REQUEST);
    }

    #[test]
    fn http_classes() {
        assert!(HttpStatus::OK.is_success());
        assert!(HttpStatus::NOT_FOUND.is_client_error());
        assert!(!HttpStatus::NOT_FOUND.is_server_error());
        assert!(HttpStatus::GATEWAY_TIMEOUT.is_server_error());
        assert!(!HttpStatus::new(999).is_server_error());
    }

    #[test]
    fn display_registered_and_unregistered() {
        assert_eq!(HttpStatus::NOT_FOUND.to_string(), "404 Not Found");
        assert_eq!(HttpStatus::new(599).to_string(), "599");
        assert_eq!(RpcStatus::UNAVAILABLE.to_string(), "UNAVAILABLE");
        assert_eq!(RpcStatus::new(42).to_string(), "42");
        assert_eq!(Status::Rpc(RpcStatus::ABORTED).to_string(), "rpc ABORTED");
    }

    #[test]
    fn raw_conversions() {
        assert_eq!(HttpStatus::from(418), HttpStatus::IM_A_TEAPOT);
        assert_eq!(u32::from(RpcStatus::DATA_LOSS), 15);
        assert_eq!(Status::from(RpcStatus::OK), Status::new(0, Protocol::Rpc));
    }
}
