//! corec: coinductive types for Rust
//!
//! A coinductive type ("codata") is defined by what can be *observed* from
//! its values (fields, callable operations, and self-referential
//! continuations such as stream tails) rather than by how values are
//! built. This crate provides the declaration surface, the `unfold`
//! operator that turns an observer contract into a named instance factory,
//! and the lazy instantiation protocol that makes infinite structures (an
//! unbounded stream of naturals, say) representable without non-terminating
//! construction.
//!
//! # Quick Start
//!
//! ```
//! use corec::{codata, Declaration, Implementation, Signature, Value};
//!
//! // A stream is whatever you can observe a head and a tail of.
//! let stream = codata(|c| {
//!     Declaration::new()
//!         .observe("head", c.param("T"))
//!         .observe("tail", c.self_of(c.param("T")))
//! })?;
//!
//! // `unfold` supplies one seed-transition function per observer.
//! stream.unfold(
//!     "From",
//!     |_| Signature::new(),
//!     Implementation::new()
//!         .transition("head", |n| Ok(n.clone()))
//!         .transition("tail", |n| Ok(Value::Int(n.expect_int()? + 1))),
//! )?;
//!
//! // The naturals, built two observations deep and no further.
//! let naturals = stream.build("From", 0)?;
//! assert_eq!(naturals.get("head")?, Value::Int(0));
//! assert_eq!(naturals.advance("tail")?.get("head")?, Value::Int(1));
//! # Ok::<(), corec::Error>(())
//! ```
//!
//! # Architecture
//!
//! Declaration classifies each observer once as simple (eager value),
//! parametric (bound callable), or continuation (lazy next instance), and
//! fixes the type's observer registry. Each `unfold` compiles an
//! implementation against that registry, eagerly, into a variant whose
//! factory threads an opaque seed through the transition functions.
//! Continuation reads resolve through a one-shot cell per instance, so a
//! traversal like `.tail.tail.head` realizes exactly the prefix it visits.

// Re-export the public API
pub use corec_core::{
    classify, validate_observer_name, Arity, Error, ObserverDescriptor, ObserverKind,
    ObserverRegistry, Result, TypeId, TypeToken, Value,
};
pub use corec_engine::introspect;
pub use corec_engine::{
    codata, CodataType, Declaration, Factory, Implementation, Instance, Operation, Scope,
    Signature, Variant,
};
