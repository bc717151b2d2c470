#![no_main]

use libfuzzer_sys::fuzz_target;
use protocol_errors::{append, flatten, prefix, wrap, AggregateError, Error, Protocol};

// Each byte is one instruction applied to a stack of errors.
fuzz_target!(|data: &[u8]| {
    let mut stack: Vec<Error> = Vec::new();

    for (i, &op) in data.iter().enumerate().take(256) {
        let code = u32::from(op) * 3;
        let next = match op % 8 {
            0 => Error::new(format!("e{}", i), code, Protocol::Http),
            1 => Error::new(format!("e{}", i), u32::from(op % 17), Protocol::Rpc),
            2 => Error::plain(format!("p{}", i)),
            3 => Error::canceled(),
            4 => match stack.pop() {
                Some(err) => wrap(err, "w"),
                None => Error::deadline_exceeded(),
            },
            5 => match stack.pop() {
                Some(err) => prefix(err, "p:"),
                None => continue,
            },
            6 => {
                let head = stack.pop();
                let rest: Vec<Error> = stack.drain(stack.len().saturating_sub(2)..).collect();
                Error::from(append(head, rest))
            }
            _ => match stack.pop() {
                Some(err) => flatten(err),
                None => Error::from(AggregateError::new()),
            },
        };
        stack.push(next);
    }

    for err in &stack {
        let before = (err.status_http(), err.status_rpc());
        let _ = err.to_string();
        let _ = err.status_log().to_string();

        let flat = flatten(err.clone());
        if let Error::Aggregate(agg) = &flat {
            assert!(agg.iter().all(|member| !matches!(member, Error::Aggregate(_))));
        }
        assert_eq!((flat.status_http(), flat.status_rpc()), before);
    }
});
