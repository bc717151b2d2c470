//! Macros for defining status codes and building errors.
//!
//! # Registry Macros (crate-internal)
//!
//! - `define_status_codes!`: declares named constants on a status newtype,
//!   plus the `KNOWN` list and the `name()` lookup, from one table
//! - `define_constructors!`: declares one error constructor per status
//!
//! Both are used by [`crate::definitions`] so that every code is written
//! down exactly once.
//!
//! # Error Macros
//!
//! [`http_err!`](crate::http_err) and [`rpc_err!`](crate::rpc_err) build a
//! tagged error with a formatted message:
//!
//! ```rust
//! use protocol_errors::{http_err, rpc_err, HttpStatus, RpcStatus};
//!
//! let user_id = 42;
//! let err = http_err!(HttpStatus::NOT_FOUND, "user {} does not exist", user_id);
//! assert_eq!(err.to_string(), "user 42 does not exist");
//! assert_eq!(err.status_rpc(), RpcStatus::NOT_FOUND);
//!
//! let err = rpc_err!(RpcStatus::UNAVAILABLE, "shard {} is draining", "eu-1");
//! assert_eq!(err.status_http(), HttpStatus::SERVICE_UNAVAILABLE);
//! ```
//!
//! Note: `format!` allocates. For static messages prefer the plain
//! constructors, which keep `&'static str` text borrowed.

// ============================================================================
// Registry Macros
// ============================================================================

/// Declare registered codes on a status newtype.
///
/// Each entry is `NAME = (code, "label")`. The code must be a literal so it
/// can double as a `match` pattern in `name()`.
macro_rules! define_status_codes {
    ($ty:ident => { $( $name:ident = ($code:literal, $label:literal) ),+ $(,)? }) => {
        impl $ty {
            $(
                #[doc = concat!("`", stringify!($code), "` ", $label)]
                pub const $name: Self = Self::new($code);
            )+

            /// Every registered code, in declaration order.
            pub const KNOWN: &'static [Self] = &[$(Self::$name),+];

            /// Canonical name of a registered code, `None` for anything else.
            pub const fn name(self) -> Option<&'static str> {
                match self.value() {
                    $( $code => Some($label), )+
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use define_status_codes;

/// Declare one constructor function per status constant.
///
/// `$ctor` is called as `$ctor(message, $ty::$code)`.
macro_rules! define_constructors {
    ($ctor:path, $ty:ident => { $( $fn_name:ident = $code:ident ),+ $(,)? }) => {
        $(
            #[doc = concat!("Create an error tagged `", stringify!($ty), "::", stringify!($code), "`.")]
            #[inline]
            pub fn $fn_name(message: impl Into<::std::borrow::Cow<'static, str>>) -> $crate::Error {
                $ctor(message, $ty::$code)
            }
        )+
    };
}

pub(crate) use define_constructors;

// ============================================================================
// Error Macros
// ============================================================================

/// Create an HTTP-tagged error with a formatted message.
///
/// # Arguments
/// - `$status`: an [`HttpStatus`](crate::HttpStatus)
/// - `$fmt`: format string literal
/// - `$args`: format arguments
#[macro_export]
macro_rules! http_err {
    ($status:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::Error::http(::std::format!($fmt $(, $arg)*), $status)
    };
}

/// Create an RPC-tagged error with a formatted message.
///
/// # Arguments
/// - `$status`: an [`RpcStatus`](crate::RpcStatus)
/// - `$fmt`: format string literal
/// - `$args`: format arguments
#[macro_export]
macro_rules! rpc_err {
    ($status:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::Error::rpc(::std::format!($fmt $(, $arg)*), $status)
    };
}

// ============================================================================
// Tests
// ============================================================================
