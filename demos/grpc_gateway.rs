//! A toy HTTP gateway in front of an RPC backend.
//!
//! Run with `cargo run --example grpc_gateway --features http,tonic`.

use ::http::StatusCode;
use protocol_errors::{http, Error, Result};

/// Stand-in for a generated RPC client call.
fn backend_get_order(id: u64) -> std::result::Result<String, tonic::Status> {
    match id {
        1 => Ok("order 1: 3 items".to_string()),
        2 => Err(tonic::Status::not_found("order does not exist")),
        3 => Err(tonic::Status::resource_exhausted("tenant quota spent")),
        _ => Err(tonic::Status::unavailable("orders shard draining")),
    }
}

fn get_order(path_id: &str) -> Result<String> {
    let id: u64 = path_id
        .parse()
        .map_err(|_| http::bad_request(format!("{:?} is not an order id", path_id)))?;

    backend_get_order(id).map_err(|status| Error::from(status).wrap("fetching order"))
}

/// HTTP side: status line plus body.
fn handle_http(path_id: &str) -> (StatusCode, String) {
    match get_order(path_id) {
        Ok(body) => (StatusCode::OK, body),
        Err(err) => (StatusCode::from(&err), err.to_string()),
    }
}

/// RPC side of the same handler, for internal callers.
fn handle_rpc(path_id: &str) -> std::result::Result<String, tonic::Status> {
    get_order(path_id).map_err(tonic::Status::from)
}

fn main() {
    println!("--- gRPC Gateway Example ---\n");

    for path_id in ["1", "2", "3", "4", "abc"] {
        let (status, body) = handle_http(path_id);
        println!("GET /orders/{:<4} -> {} {}", path_id, status, body);

        if let Err(status) = handle_rpc(path_id) {
            println!("{:>20} rpc: {:?} {}", "", status.code(), status.message());
        }
    }

    let (status, _) = handle_http("3");
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}
