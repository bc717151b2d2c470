//! Bidirectional status translation between HTTP and RPC.
//!
//! Two total functions, one per direction. Each is a single `match` over its
//! input enumeration with an explicit fallback, so every possible `u32`
//! produces a defined answer:
//!
//! - [`http_to_rpc`]: unmapped HTTP codes become `UNKNOWN`
//! - [`rpc_to_http`]: unmapped RPC codes (including `OK`) become `500`
//!
//! # The Tables Are Not Inverses
//!
//! HTTP is far more granular in the 4xx range than RPC, and RPC `OK` has no
//! error-side HTTP counterpart. Each direction is therefore its own
//! best-effort mapping and round trips are not stable:
//!
//! ```rust
//! use protocol_errors::{HttpStatus, translation::{http_to_rpc, rpc_to_http}};
//!
//! // 402 -> RESOURCE_EXHAUSTED -> 429
//! let back = rpc_to_http(http_to_rpc(HttpStatus::PAYMENT_REQUIRED));
//! assert_eq!(back, HttpStatus::TOO_MANY_REQUESTS);
//! ```
//!
//! Callers must not assume `rpc_to_http(http_to_rpc(x)) == x`.

use crate::{HttpStatus, RpcStatus};

/// Map an HTTP status onto the RPC enumeration.
///
/// Several HTTP codes share an RPC code (406, 411, 414-417 and 422 all
/// become `INVALID_ARGUMENT`). Anything not listed becomes `UNKNOWN`.
pub const fn http_to_rpc(code: HttpStatus) -> RpcStatus {
    match code {
        HttpStatus::BAD_REQUEST => RpcStatus::INVALID_ARGUMENT,
        HttpStatus::UNAUTHORIZED => RpcStatus::UNAUTHENTICATED,
        HttpStatus::PAYMENT_REQUIRED => RpcStatus::RESOURCE_EXHAUSTED,
        HttpStatus::FORBIDDEN => RpcStatus::PERMISSION_DENIED,
        HttpStatus::NOT_FOUND => RpcStatus::NOT_FOUND,
        HttpStatus::METHOD_NOT_ALLOWED => RpcStatus::UNIMPLEMENTED,
        HttpStatus::NOT_ACCEPTABLE => RpcStatus::INVALID_ARGUMENT,
        HttpStatus::PROXY_AUTHENTICATION_REQUIRED => RpcStatus::UNAUTHENTICATED,
        HttpStatus::REQUEST_TIMEOUT => RpcStatus::DEADLINE_EXCEEDED,
        HttpStatus::CONFLICT => RpcStatus::ABORTED,
        HttpStatus::GONE => RpcStatus::NOT_FOUND,
        HttpStatus::LENGTH_REQUIRED => RpcStatus::INVALID_ARGUMENT,
        HttpStatus::PRECONDITION_FAILED => RpcStatus::FAILED_PRECONDITION,
        HttpStatus::PAYLOAD_TOO_LARGE => RpcStatus::RESOURCE_EXHAUSTED,
        HttpStatus::URI_TOO_LONG => RpcStatus::INVALID_ARGUMENT,
        HttpStatus::UNSUPPORTED_MEDIA_TYPE => RpcStatus::INVALID_ARGUMENT,
        HttpStatus::RANGE_NOT_SATISFIABLE => RpcStatus::INVALID_ARGUMENT,
        HttpStatus::EXPECTATION_FAILED => RpcStatus::INVALID_ARGUMENT,
        HttpStatus::IM_A_TEAPOT => RpcStatus::INTERNAL,
        HttpStatus::UNPROCESSABLE_ENTITY => RpcStatus::INVALID_ARGUMENT,
        HttpStatus::TOO_MANY_REQUESTS => RpcStatus::RESOURCE_EXHAUSTED,
        HttpStatus::INTERNAL_SERVER_ERROR => RpcStatus::INTERNAL,
        HttpStatus::NOT_IMPLEMENTED => RpcStatus::UNIMPLEMENTED,
        HttpStatus::BAD_GATEWAY => RpcStatus::UNAVAILABLE,
        HttpStatus::SERVICE_UNAVAILABLE => RpcStatus::UNAVAILABLE,
        HttpStatus::GATEWAY_TIMEOUT => RpcStatus::DEADLINE_EXCEEDED,
        HttpStatus::HTTP_VERSION_NOT_SUPPORTED => RpcStatus::UNIMPLEMENTED,
        _ => RpcStatus::UNKNOWN,
    }
}

/// Map an RPC status onto the HTTP enumeration.
///
/// Defined independently of [`http_to_rpc`]. `OK` and unregistered codes
/// fall back to `500 Internal Server Error`.
pub const fn rpc_to_http(code: RpcStatus) -> HttpStatus {
    match code {
        RpcStatus::CANCELED => HttpStatus::REQUEST_TIMEOUT,
        RpcStatus::UNKNOWN => HttpStatus::INTERNAL_SERVER_ERROR,
        RpcStatus::INVALID_ARGUMENT => HttpStatus::BAD_REQUEST,
        RpcStatus::DEADLINE_EXCEEDED => HttpStatus::GATEWAY_TIMEOUT,
        RpcStatus::NOT_FOUND => HttpStatus::NOT_FOUND,
        RpcStatus::ALREADY_EXISTS => HttpStatus::CONFLICT,
        RpcStatus::PERMISSION_DENIED => HttpStatus::FORBIDDEN,
        RpcStatus::RESOURCE_EXHAUSTED => HttpStatus::TOO_MANY_REQUESTS,
        RpcStatus::FAILED_PRECONDITION => HttpStatus::BAD_REQUEST,
        RpcStatus::ABORTED => HttpStatus::CONFLICT,
        RpcStatus::OUT_OF_RANGE => HttpStatus::BAD_REQUEST,
        RpcStatus::UNIMPLEMENTED => HttpStatus::NOT_IMPLEMENTED,
        RpcStatus::INTERNAL => HttpStatus::INTERNAL_SERVER_ERROR,
        RpcStatus::UNAVAILABLE => HttpStatus::SERVICE_UNAVAILABLE,
        RpcStatus::DATA_LOSS => HttpStatus::INTERNAL_SERVER_ERROR,
        RpcStatus::UNAUTHENTICATED => HttpStatus::UNAUTHORIZED,
        _ => HttpStatus::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HTTP_TABLE: &[(u32, RpcStatus)] = &[
        (400, RpcStatus::INVALID_ARGUMENT),
        (401, RpcStatus::UNAUTHENTICATED),
        (402, RpcStatus::RESOURCE_EXHAUSTED),
        (403, RpcStatus::PERMISSION_DENIED),
        (404, RpcStatus::NOT_FOUND),
        (405, RpcStatus::UNIMPLEMENTED),
        (406, RpcStatus::INVALID_ARGUMENT),
        (407, RpcStatus::UNAUTHENTICATED),
        (408, RpcStatus::DEADLINE_EXCEEDED),
        (409, RpcStatus::ABORTED),
        (410, RpcStatus::NOT_FOUND),
        (411, RpcStatus::INVALID_ARGUMENT),
        (412, RpcStatus::FAILED_PRECONDITION),
        (413, RpcStatus::RESOURCE_EXHAUSTED),
        (414, RpcStatus::INVALID_ARGUMENT),
        (415, RpcStatus::INVALID_ARGUMENT),
        (416, RpcStatus::INVALID_ARGUMENT),
        (417, RpcStatus::INVALID_ARGUMENT),
        (418, RpcStatus::INTERNAL),
        (422, RpcStatus::INVALID_ARGUMENT),
        (429, RpcStatus::RESOURCE_EXHAUSTED),
        (500, RpcStatus::INTERNAL),
        (501, RpcStatus::UNIMPLEMENTED),
        (502, RpcStatus::UNAVAILABLE),
        (503, RpcStatus::UNAVAILABLE),
        (504, RpcStatus::DEADLINE_EXCEEDED),
        (505, RpcStatus::UNIMPLEMENTED),
    ];

    const RPC_TABLE: &[(u32, HttpStatus)] = &[
        (1, HttpStatus::REQUEST_TIMEOUT),
        (2, HttpStatus::INTERNAL_SERVER_ERROR),
        (3, HttpStatus::BAD_REQUEST),
        (4, HttpStatus::GATEWAY_TIMEOUT),
        (5, HttpStatus::NOT_FOUND),
        (6, HttpStatus::CONFLICT),
        (7, HttpStatus::FORBIDDEN),
        (8, HttpStatus::TOO_MANY_REQUESTS),
        (9, HttpStatus::BAD_REQUEST),
        (10, HttpStatus::CONFLICT),
        (11, HttpStatus::BAD_REQUEST),
        (12, HttpStatus::NOT_IMPLEMENTED),
        (13, HttpStatus::INTERNAL_SERVER_ERROR),
        (14, HttpStatus::SERVICE_UNAVAILABLE),
        (15, HttpStatus::INTERNAL_SERVER_ERROR),
        (16, HttpStatus::UNAUTHORIZED),
    ];

    #[test]
    fn http_to_rpc_matches_table() {
        for &(http, rpc) in HTTP_TABLE {
            assert_eq!(http_to_rpc(HttpStatus::new(http)), rpc, "HTTP {}", http);
        }
    }

    #[test]
    fn rpc_to_http_matches_table() {
        for &(rpc, http) in RPC_TABLE {
            assert_eq!(rpc_to_http(RpcStatus::new(rpc)), http, "RPC {}", rpc);
        }
    }

    #[test]
    fn unmapped_http_is_unknown() {
        for code in [0, 200, 201, 301, 419, 421, 451, 506, 599, 999, u32::MAX] {
            assert_eq!(http_to_rpc(HttpStatus::new(code)), RpcStatus::UNKNOWN, "HTTP {}", code);
        }
    }

    #[test]
    fn unmapped_rpc_is_internal_server_error() {
        for code in [0, 17, 100, 999, u32::MAX] {
            assert_eq!(
                rpc_to_http(RpcStatus::new(code)),
                HttpStatus::INTERNAL_SERVER_ERROR,
                "RPC {}",
                code
            );
        }
    }

    #[test]
    fn rpc_ok_has_no_http_counterpart() {
        assert_eq!(rpc_to_http(RpcStatus::OK), HttpStatus::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn round_trips_are_not_stable() {
        let cases = [
            (HttpStatus::PAYMENT_REQUIRED, HttpStatus::TOO_MANY_REQUESTS),
            (HttpStatus::METHOD_NOT_ALLOWED, HttpStatus::NOT_IMPLEMENTED),
            (HttpStatus::REQUEST_TIMEOUT, HttpStatus::GATEWAY_TIMEOUT),
            (HttpStatus::GONE, HttpStatus::NOT_FOUND),
            (HttpStatus::IM_A_TEAPOT, HttpStatus::INTERNAL_SERVER_ERROR),
            (HttpStatus::BAD_GATEWAY, HttpStatus::SERVICE_UNAVAILABLE),
        ];
        for (start, expected) in cases {
            assert_eq!(rpc_to_http(http_to_rpc(start)), expected, "HTTP {}", start.value());
        }

        // CANCELED -> 408 -> DEADLINE_EXCEEDED
        assert_eq!(http_to_rpc(rpc_to_http(RpcStatus::CANCELED)), RpcStatus::DEADLINE_EXCEEDED);
    }

    #[test]
    fn every_registered_code_translates() {
        for &code in HttpStatus::KNOWN {
            let _ = code.to_rpc();
        }
        for &code in RpcStatus::KNOWN {
            let _ = code.to_http();
        }
    }
}
