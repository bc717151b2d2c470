//! Registered status codes and per-status constructors.
//!
//! # Registry
//!
//! This file is the single source of truth for both enumerations. The
//! translator, the constructors and `Display` all refer to these constants:
//!
//! - HTTP: `200 OK` plus the 4xx/5xx codes the translator knows (400-505)
//! - RPC: the canonical status set, `OK` (0) through `UNAUTHENTICATED` (16)
//!
//! Adding a code here does not give it a translation. The tables in
//! [`crate::translation`] must be extended separately, and unmapped codes
//! keep falling back to `UNKNOWN` / `500`.
//!
//! # Constructors
//!
//! [`http`] and [`rpc`] hold one constructor per registered error status:
//!
//! ```rust
//! use protocol_errors::{definitions::{http, rpc}, HttpStatus, RpcStatus};
//!
//! let err = http::conflict("order already submitted");
//! assert_eq!(err.status_rpc(), RpcStatus::ABORTED);
//!
//! let err = rpc::already_exists("order already submitted");
//! assert_eq!(err.status_http(), HttpStatus::CONFLICT);
//! ```

use crate::convenience::{define_constructors, define_status_codes};
use crate::{HttpStatus, RpcStatus};

// -----------------------------------------------------------------------------
// HTTP (200, 400-505)
// -----------------------------------------------------------------------------
define_status_codes! {
    HttpStatus => {
        OK                            = (200, "OK"),
        BAD_REQUEST                   = (400, "Bad Request"),
        UNAUTHORIZED                  = (401, "Unauthorized"),
        PAYMENT_REQUIRED              = (402, "Payment Required"),
        FORBIDDEN                     = (403, "Forbidden"),
        NOT_FOUND                     = (404, "Not Found"),
        METHOD_NOT_ALLOWED            = (405, "Method Not Allowed"),
        NOT_ACCEPTABLE                = (406, "Not Acceptable"),
        PROXY_AUTHENTICATION_REQUIRED = (407, "Proxy Authentication Required"),
        REQUEST_TIMEOUT               = (408, "Request Timeout"),
        CONFLICT                      = (409, "Conflict"),
        GONE                          = (410, "Gone"),
        LENGTH_REQUIRED               = (411, "Length Required"),
        PRECONDITION_FAILED           = (412, "Precondition Failed"),
        PAYLOAD_TOO_LARGE             = (413, "Payload Too Large"),
        URI_TOO_LONG                  = (414, "URI Too Long"),
        UNSUPPORTED_MEDIA_TYPE        = (415, "Unsupported Media Type"),
        RANGE_NOT_SATISFIABLE         = (416, "Range Not Satisfiable"),
        EXPECTATION_FAILED            = (417, "Expectation Failed"),
        IM_A_TEAPOT                   = (418, "I'm a teapot"),
        UNPROCESSABLE_ENTITY          = (422, "Unprocessable Entity"),
        TOO_MANY_REQUESTS             = (429, "Too Many Requests"),
        INTERNAL_SERVER_ERROR         = (500, "Internal Server Error"),
        NOT_IMPLEMENTED               = (501, "Not Implemented"),
        BAD_GATEWAY                   = (502, "Bad Gateway"),
        SERVICE_UNAVAILABLE           = (503, "Service Unavailable"),
        GATEWAY_TIMEOUT               = (504, "Gateway Timeout"),
        HTTP_VERSION_NOT_SUPPORTED    = (505, "HTTP Version Not Supported"),
    }
}

// -----------------------------------------------------------------------------
// RPC (0-16)
// -----------------------------------------------------------------------------
define_status_codes! {
    RpcStatus => {
        OK                  = (0, "OK"),
        CANCELED            = (1, "CANCELED"),
        UNKNOWN             = (2, "UNKNOWN"),
        INVALID_ARGUMENT    = (3, "INVALID_ARGUMENT"),
        DEADLINE_EXCEEDED   = (4, "DEADLINE_EXCEEDED"),
        NOT_FOUND           = (5, "NOT_FOUND"),
        ALREADY_EXISTS      = (6, "ALREADY_EXISTS"),
        PERMISSION_DENIED   = (7, "PERMISSION_DENIED"),
        RESOURCE_EXHAUSTED  = (8, "RESOURCE_EXHAUSTED"),
        FAILED_PRECONDITION = (9, "FAILED_PRECONDITION"),
        ABORTED             = (10, "ABORTED"),
        OUT_OF_RANGE        = (11, "OUT_OF_RANGE"),
        UNIMPLEMENTED       = (12, "UNIMPLEMENTED"),
        INTERNAL            = (13, "INTERNAL"),
        UNAVAILABLE         = (14, "UNAVAILABLE"),
        DATA_LOSS           = (15, "DATA_LOSS"),
        UNAUTHENTICATED     = (16, "UNAUTHENTICATED"),
    }
}

/// One constructor per registered HTTP error status.
pub mod http {
    use super::{define_constructors, HttpStatus};

    define_constructors! {
        crate::Error::http, HttpStatus => {
            bad_request                   = BAD_REQUEST,
            unauthorized                  = UNAUTHORIZED,
            payment_required              = PAYMENT_REQUIRED,
            forbidden                     = FORBIDDEN,
            not_found                     = NOT_FOUND,
            method_not_allowed            = METHOD_NOT_ALLOWED,
            not_acceptable                = NOT_ACCEPTABLE,
            proxy_authentication_required = PROXY_AUTHENTICATION_REQUIRED,
            request_timeout               = REQUEST_TIMEOUT,
            conflict                      = CONFLICT,
            gone                          = GONE,
            length_required               = LENGTH_REQUIRED,
            precondition_failed           = PRECONDITION_FAILED,
            payload_too_large             = PAYLOAD_TOO_LARGE,
            uri_too_long                  = URI_TOO_LONG,
            unsupported_media_type        = UNSUPPORTED_MEDIA_TYPE,
            range_not_satisfiable         = RANGE_NOT_SATISFIABLE,
            expectation_failed            = EXPECTATION_FAILED,
            im_a_teapot                   = IM_A_TEAPOT,
            unprocessable_entity          = UNPROCESSABLE_ENTITY,
            too_many_requests             = TOO_MANY_REQUESTS,
            internal_server_error         = INTERNAL_SERVER_ERROR,
            not_implemented               = NOT_IMPLEMENTED,
            bad_gateway                   = BAD_GATEWAY,
            service_unavailable           = SERVICE_UNAVAILABLE,
            gateway_timeout               = GATEWAY_TIMEOUT,
            http_version_not_supported    = HTTP_VERSION_NOT_SUPPORTED,
        }
    }
}

/// One constructor per registered RPC error status (everything but `OK`).
pub mod rpc {
    use super::{define_constructors, RpcStatus};

    define_constructors! {
        crate::Error::rpc, RpcStatus => {
            canceled            = CANCELED,
            unknown             = UNKNOWN,
            invalid_argument    = INVALID_ARGUMENT,
            deadline_exceeded   = DEADLINE_EXCEEDED,
            not_found           = NOT_FOUND,
            already_exists      = ALREADY_EXISTS,
            permission_denied   = PERMISSION_DENIED,
            resource_exhausted  = RESOURCE_EXHAUSTED,
            failed_precondition = FAILED_PRECONDITION,
            aborted             = ABORTED,
            out_of_range        = OUT_OF_RANGE,
            unimplemented       = UNIMPLEMENTED,
            internal            = INTERNAL,
            unavailable         = UNAVAILABLE,
            data_loss           = DATA_LOSS,
            unauthenticated     = UNAUTHENTICATED,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
//
// Registry governance: values must stay inside their documented ranges and
// never repeat, otherwise `name()` and the translation tables disagree.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Protocol;
    use std::collections::HashSet;

    #[test]
    fn http_codes_are_unique_and_in_range() {
        let mut seen = HashSet::new();
        for &code in HttpStatus::KNOWN {
            assert!(seen.insert(code), "duplicate HTTP code {}", code.value());
            assert!(code == HttpStatus::OK || (400..=505).contains(&code.value()));
        }
        assert_eq!(HttpStatus::KNOWN.len(), 28);
    }

    #[test]
    fn rpc_codes_are_dense_zero_to_sixteen() {
        let values: Vec<u32> = RpcStatus::KNOWN.iter().map(|c| c.value()).collect();
        assert_eq!(values, (0..=16).collect::<Vec<_>>());
    }

    #[test]
    fn every_registered_code_has_a_name() {
        assert!(HttpStatus::KNOWN.iter().all(|c| c.name().is_some()));
        assert!(RpcStatus::KNOWN.iter().all(|c| c.name().is_some()));
    }

    #[test]
    fn http_constructors_tag_http() {
        let cases = [
            (http::bad_request("m"), HttpStatus::BAD_REQUEST),
            (http::payment_required("m"), HttpStatus::PAYMENT_REQUIRED),
            (http::proxy_authentication_required("m"), HttpStatus::PROXY_AUTHENTICATION_REQUIRED),
            (http::im_a_teapot("m"), HttpStatus::IM_A_TEAPOT),
            (http::http_version_not_supported("m"), HttpStatus::HTTP_VERSION_NOT_SUPPORTED),
        ];
        for (err, expected) in cases {
            let status = err.status().expect("constructor must tag");
            assert_eq!(status.protocol(), Protocol::Http);
            assert_eq!(err.status_http(), expected);
            assert_eq!(err.to_string(), "m");
        }
    }

    #[test]
    fn rpc_constructors_tag_rpc() {
        let cases = [
            (rpc::canceled("m"), RpcStatus::CANCELED),
            (rpc::out_of_range("m"), RpcStatus::OUT_OF_RANGE),
            (rpc::unauthenticated("m"), RpcStatus::UNAUTHENTICATED),
        ];
        for (err, expected) in cases {
            let status = err.status().expect("constructor must tag");
            assert_eq!(status.protocol(), Protocol::Rpc);
            assert_eq!(err.status_rpc(), expected);
        }
    }

    #[test]
    fn constructors_translate_across() {
        assert_eq!(http::gone("m").status_rpc(), RpcStatus::NOT_FOUND);
        assert_eq!(rpc::out_of_range("m").status_http(), HttpStatus::BAD_REQUEST);
        assert_eq!(rpc::already_exists("m").status_http(), HttpStatus::CONFLICT);
    }
}
