//! Variant registration: eager validation, additive chaining, independence.

use crate::common;
use corec::{Error, Implementation, Operation, Signature, TypeToken, Value};

#[test]
fn chained_unfolds_keep_every_factory() {
    let ty = common::naturals();
    ty.unfold(
        "Constant",
        |_| Signature::new(),
        Implementation::new()
            .transition("head", |n| Ok(n.clone()))
            .transition("tail", |n| Ok(n.clone())),
    )
    .unwrap();
    assert!(ty.has_variant("From"));
    assert!(ty.has_variant("Constant"));
    assert!(ty.build("From", 0).is_ok());
    assert!(ty.build("Constant", 1).is_ok());
}

#[test]
fn variants_never_share_transitions() {
    let ty = common::naturals();
    ty.unfold(
        "Constant",
        |_| Signature::new(),
        Implementation::new()
            .transition("head", |n| Ok(n.clone()))
            .transition("tail", |n| Ok(n.clone())),
    )
    .unwrap();

    let from = ty.build("From", 5).unwrap();
    let constant = ty.build("Constant", 5).unwrap();

    // same type, same seed; each continuation stays inside its own variant
    assert_eq!(
        from.advance("tail").unwrap().get("head").unwrap(),
        Value::Int(6)
    );
    assert_eq!(
        constant.advance("tail").unwrap().get("head").unwrap(),
        Value::Int(5)
    );
}

#[test]
fn missing_transition_fails_at_unfold_time() {
    let ty = common::stream_type();
    let err = ty
        .unfold(
            "Broken",
            |_| Signature::new(),
            Implementation::new().transition("head", |n| Ok(n.clone())),
        )
        .unwrap_err();
    assert_eq!(
        err,
        Error::IncompleteVariant {
            variant: "Broken".to_string(),
            observer: "tail".to_string(),
        }
    );
    // eager validation: nothing was registered
    assert!(!ty.has_variant("Broken"));
    assert!(matches!(
        ty.build("Broken", 0).unwrap_err(),
        Error::UnknownVariant(_)
    ));
}

#[test]
fn transition_for_undeclared_observer_fails_at_unfold_time() {
    let ty = common::stream_type();
    let err = ty
        .unfold(
            "Extra",
            |_| Signature::new(),
            Implementation::new()
                .transition("head", |n| Ok(n.clone()))
                .transition("tail", |n| Ok(n.clone()))
                .transition("shadow", |n| Ok(n.clone())),
        )
        .unwrap_err();
    assert_eq!(
        err,
        Error::UnknownTransition {
            variant: "Extra".to_string(),
            observer: "shadow".to_string(),
        }
    );
}

#[test]
fn wrong_transition_shape_fails_at_unfold_time() {
    let ty = corec::codata(|c| {
        corec::Declaration::new()
            .observe("nth", TypeToken::operation(Some(TypeToken::Number), None))
            .observe("rest", c.self_ref())
    })
    .unwrap();
    let err = ty
        .unfold(
            "Wrong",
            |_| Signature::new(),
            Implementation::new()
                .transition("nth", |n| Ok(n.clone()))
                .transition("rest", |n| Ok(n.clone())),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::TransitionShape { ref observer, .. } if observer == "nth"
    ));
}

#[test]
fn reregistering_a_name_overwrites_it() {
    let ty = common::naturals();
    ty.unfold(
        "From",
        |_| Signature::new(),
        Implementation::new()
            .transition("head", |n| Ok(Value::Int(n.expect_int()? * 10)))
            .transition("tail", |n| Ok(Value::Int(n.expect_int()? + 1))),
    )
    .unwrap();
    let instance = ty.build("From", 3).unwrap();
    assert_eq!(instance.get("head").unwrap(), Value::Int(30));
}

#[test]
fn signature_is_recorded_but_never_enforced() {
    let ty = common::stream_type();
    ty.unfold(
        "From",
        |this| {
            Signature::new()
                .input(TypeToken::Number)
                .output(this.token())
        },
        Implementation::new()
            .transition("head", |n| Ok(n.clone()))
            .transition("tail", |n| Ok(n.clone())),
    )
    .unwrap();
    // a seed of a completely different shape than the signature declares
    let instance = ty.build("From", "not a number").unwrap();
    assert_eq!(instance.get("head").unwrap(), Value::from("not a number"));
}

#[test]
fn factory_handle_survives_overwrite() {
    let ty = common::naturals();
    let factory = ty.factory("From").unwrap();
    assert_eq!(factory.variant_name(), "From");
    ty.unfold(
        "From",
        |_| Signature::new(),
        Implementation::new()
            .transition("head", |_| Ok(Value::Null))
            .transition("tail", |n| Ok(n.clone())),
    )
    .unwrap();
    // resolved factories keep the implementation they resolved to
    assert_eq!(
        factory.invoke(2).unwrap().get("head").unwrap(),
        Value::Int(2)
    );
}

#[test]
fn operations_can_close_over_the_seed() {
    let ty = corec::codata(|c| {
        corec::Declaration::new()
            .observe("scaled", TypeToken::operation(Some(TypeToken::Number), Some(TypeToken::Number)))
            .observe("rest", c.self_ref())
    })
    .unwrap();
    ty.unfold(
        "Scaler",
        |_| Signature::new(),
        Implementation::new()
            .operation("scaled", |seed| {
                let base = seed.expect_int()?;
                Ok(Operation::new(move |args| {
                    let factor = match args.first() {
                        Some(v) => v.expect_int()?,
                        None => 1,
                    };
                    Ok(Value::Int(base * factor))
                }))
            })
            .transition("rest", |seed| Ok(seed.clone())),
    )
    .unwrap();
    let instance = ty.build("Scaler", 6).unwrap();
    assert_eq!(
        instance.call("scaled", &[Value::Int(7)]).unwrap(),
        Value::Int(42)
    );
    assert_eq!(instance.call("scaled", &[]).unwrap(), Value::Int(6));
}
