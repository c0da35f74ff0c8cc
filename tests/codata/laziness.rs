//! The laziness protocol: continuations resolve on first read, exactly once
//! per instance, and failures are never cached.

use crate::common;
use corec::{codata, Declaration, Error, Implementation, Signature, TypeToken, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn construction_never_forces_a_continuation() {
    let forced = Arc::new(AtomicUsize::new(0));
    let probe = forced.clone();
    let ty = common::stream_type();
    ty.unfold(
        "From",
        |_| Signature::new(),
        Implementation::new()
            .transition("head", |n| Ok(n.clone()))
            .transition("tail", move |n| {
                probe.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Int(n.expect_int()? + 1))
            }),
    )
    .unwrap();
    let _instance = ty.build("From", 0).unwrap();
    // an infinite stream was just built in finite time
    assert_eq!(forced.load(Ordering::SeqCst), 0);
}

#[test]
fn repeated_reads_return_the_same_child_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let probe = calls.clone();
    let ty = common::stream_type();
    ty.unfold(
        "From",
        |_| Signature::new(),
        Implementation::new()
            .transition("head", |n| Ok(n.clone()))
            .transition("tail", move |n| {
                probe.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Int(n.expect_int()? + 1))
            }),
    )
    .unwrap();
    let instance = ty.build("From", 0).unwrap();
    let first = instance.advance("tail").unwrap();
    let again = instance.advance("tail").unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    // behaviorally identical, trivially: it is the same child
    assert_eq!(first.get("head").unwrap(), again.get("head").unwrap());
}

#[test]
fn sibling_instances_have_private_caches() {
    let calls = Arc::new(AtomicUsize::new(0));
    let probe = calls.clone();
    let ty = common::stream_type();
    ty.unfold(
        "From",
        |_| Signature::new(),
        Implementation::new()
            .transition("head", |n| Ok(n.clone()))
            .transition("tail", move |n| {
                probe.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Int(n.expect_int()? + 1))
            }),
    )
    .unwrap();
    let a = ty.build("From", 0).unwrap();
    let b = ty.build("From", 0).unwrap();
    a.advance("tail").unwrap();
    b.advance("tail").unwrap();
    // one resolution per instance, never shared
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn failed_resolution_is_not_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let probe = calls.clone();
    let ty = codata(|c| {
        Declaration::new()
            .observe("head", TypeToken::Number)
            .observe("tail", c.self_ref())
    })
    .unwrap();
    ty.unfold(
        "Failing",
        |_| Signature::new(),
        Implementation::new()
            .transition("head", |n| Ok(n.clone()))
            .transition("tail", move |_| {
                probe.fetch_add(1, Ordering::SeqCst);
                Err(Error::Transition("unreachable successor".to_string()))
            }),
    )
    .unwrap();
    let instance = ty.build("Failing", 0).unwrap();
    assert_eq!(
        instance.advance("tail").unwrap_err(),
        Error::Transition("unreachable successor".to_string())
    );
    assert!(instance.advance("tail").is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn transition_errors_propagate_unchanged() {
    let ty = common::naturals();
    // a seed the transitions cannot destructure
    let err = ty.build("From", Value::from("zero")).unwrap_err();
    match err {
        Error::Seed(msg) => assert!(msg.contains("Int")),
        other => panic!("expected the transition's own Seed error, got {other:?}"),
    }
}

#[test]
fn deep_traversal_realizes_only_the_visited_prefix() {
    let calls = Arc::new(AtomicUsize::new(0));
    let probe = calls.clone();
    let ty = common::stream_type();
    ty.unfold(
        "From",
        |_| Signature::new(),
        Implementation::new()
            .transition("head", |n| Ok(n.clone()))
            .transition("tail", move |n| {
                probe.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Int(n.expect_int()? + 1))
            }),
    )
    .unwrap();
    let mut node = ty.build("From", 0).unwrap().advance("tail").unwrap();
    for _ in 0..9 {
        let next = node.advance("tail").unwrap();
        node = next;
    }
    assert_eq!(node.get("head").unwrap(), Value::Int(10));
    assert_eq!(calls.load(Ordering::SeqCst), 10);
}
