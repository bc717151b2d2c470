use protocol_errors::{
    http, http_err, rpc, status_http, status_rpc, Error, HttpStatus, Result, RpcStatus,
};

fn load_user(id: u64) -> Result<&'static str> {
    match id {
        0 => Err(http::bad_request("user id must be positive")),
        1 => Ok("ada"),
        2 => Ok("grace hopper"),
        13 => Err(Error::deadline_exceeded()),
        _ => Err(rpc::not_found("no such user")),
    }
}

fn load_profile(id: u64) -> Result<&'static str> {
    // Wrapping adds context and keeps the inner status
    let name = load_user(id).map_err(|e| e.wrap(format!("loading profile {}", id)))?;
    if !name.contains(' ') {
        return Err(http_err!(
            HttpStatus::PRECONDITION_FAILED,
            "profile for {} has no family name",
            name
        ));
    }
    Ok(name)
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    for id in [2, 1, 0, 7, 13] {
        let result = load_profile(id);
        let err = result.as_ref().err();

        println!("id={}", id);
        match &result {
            Ok(name) => println!("   ok:    {}", name),
            Err(err) => println!("   error: {}", err),
        }
        // A boundary asks for whichever view its protocol needs
        println!("   HTTP:  {}", status_http(err));
        println!("   RPC:   {}", status_rpc(err));
        println!();
    }

    let err = rpc::failed_precondition("account is frozen");
    assert_eq!(err.status_rpc(), RpcStatus::FAILED_PRECONDITION);
    assert_eq!(err.status_http(), HttpStatus::BAD_REQUEST);
    err.with_status_log(|log| println!("log line: {}", log));
}
