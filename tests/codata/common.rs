//! Shared helpers for the codata integration tests

use corec::{codata, CodataType, Declaration, Implementation, Signature, TypeToken, Value};
use std::sync::Once;

static INIT: Once = Once::new();

/// Install a debug-level subscriber once, so failing tests show engine logs
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// `{ head: T, tail: Self(T) }`, the stream shape most scenarios use
pub fn stream_type() -> CodataType {
    codata(|c| {
        Declaration::new()
            .observe("head", c.param("T"))
            .observe("tail", c.self_of(c.param("T")))
    })
    .expect("stream declaration is valid")
}

/// `stream_type()` with the counting variant `From` registered
pub fn naturals() -> CodataType {
    stream_type()
        .unfold(
            "From",
            |_| Signature::new().input(TypeToken::Number),
            Implementation::new()
                .transition("head", |n| Ok(n.clone()))
                .transition("tail", |n| Ok(Value::Int(n.expect_int()? + 1))),
        )
        .expect("From implementation covers the contract")
}
