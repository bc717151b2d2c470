#![no_main]

use libfuzzer_sys::fuzz_target;
use protocol_errors::{http_to_rpc, rpc_to_http, Error, HttpStatus, Protocol, RpcStatus};

fuzz_target!(|data: &[u8]| {
    let mut bytes = [0u8; 4];
    let len = data.len().min(4);
    bytes[..len].copy_from_slice(&data[..len]);
    let code = u32::from_le_bytes(bytes);

    let rpc = http_to_rpc(HttpStatus::new(code));
    let http = rpc_to_http(RpcStatus::new(code));
    assert!(RpcStatus::KNOWN.contains(&rpc));
    assert!(HttpStatus::KNOWN.contains(&http));

    let err = Error::new("fuzz", code, Protocol::Http);
    assert_eq!(err.status_http().value(), code);
    assert_eq!(err.status_rpc(), rpc);

    let _ = HttpStatus::new(code).to_string();
    let _ = RpcStatus::new(code).to_string();
});
