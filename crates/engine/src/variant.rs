//! Variants: named, concrete implementations of an observer contract
//!
//! This module defines:
//! - Signature: the declarative `{input, output}` shape attached to a variant
//! - Operation: a bound callable produced for a parametric observer
//! - Implementation: the fluent observer name → transition map
//! - Variant: the compiled, immutable result of `unfold`
//!
//! ## Transition contract
//!
//! Transition closures are pure functions of the seed they are handed:
//! - result depends only on the `&Value` argument
//! - a new seed is produced, never the old one mutated
//! - failures are returned as errors, which the engine propagates unchanged
//!   to whoever triggered the observation

use corec_core::{Error, ObserverRegistry, Result, TypeToken, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Declarative shape of a variant's constructor
///
/// Documentation only: the engine records it for introspection and never
/// checks a seed or an observation against it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    input: Option<TypeToken>,
    output: Option<TypeToken>,
}

impl Signature {
    /// Empty signature
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the seed type this variant's factory accepts
    pub fn input(mut self, token: TypeToken) -> Self {
        self.input = Some(token);
        self
    }

    /// Declare the type this variant's factory produces
    pub fn output(mut self, token: TypeToken) -> Self {
        self.output = Some(token);
        self
    }

    /// Declared seed type, if any
    pub fn declared_input(&self) -> Option<&TypeToken> {
        self.input.as_ref()
    }

    /// Declared result type, if any
    pub fn declared_output(&self) -> Option<&TypeToken> {
        self.output.as_ref()
    }
}

/// A bound callable obtained from a parametric observer's transition
///
/// The transition runs eagerly at build time, capturing whatever it needs
/// from the seed; the consumer invokes the resulting `Operation` later with
/// zero or more arguments, exactly as declared.
#[derive(Clone)]
pub struct Operation {
    run: Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>,
}

impl Operation {
    /// Wrap a closure as a bound callable
    pub fn new(f: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static) -> Self {
        Self { run: Arc::new(f) }
    }

    /// Invoke the callable with observation-time arguments
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.run)(args)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Operation")
    }
}

/// One transition function supplied by an implementation
///
/// `Produce` serves simple observers (seed → observed value) and
/// continuation observers (seed → next seed); `Bind` serves parametric
/// observers (seed → bound callable).
pub(crate) enum Transition {
    Produce(Box<dyn Fn(&Value) -> Result<Value> + Send + Sync>),
    Bind(Box<dyn Fn(&Value) -> Result<Operation> + Send + Sync>),
}

impl Transition {
    pub(crate) fn produce(&self, seed: &Value) -> Result<Value> {
        match self {
            Transition::Produce(f) => f(seed),
            Transition::Bind(_) => Err(Error::Transition(
                "operation transition invoked for a value-producing observer".to_string(),
            )),
        }
    }

    pub(crate) fn bind(&self, seed: &Value) -> Result<Operation> {
        match self {
            Transition::Bind(f) => f(seed),
            Transition::Produce(_) => Err(Error::Transition(
                "value transition invoked for a parametric observer".to_string(),
            )),
        }
    }
}

/// Fluent observer name → transition map handed to `unfold`
///
/// Entries are kept in insertion order; supplying the same name twice keeps
/// the later entry.
#[derive(Default)]
pub struct Implementation {
    entries: Vec<(String, Transition)>,
}

impl Implementation {
    /// Empty implementation
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the transition for a simple or continuation observer
    ///
    /// For a simple observer the closure maps the seed to the observed
    /// value; for a continuation observer it maps the seed to the next seed.
    pub fn transition(
        mut self,
        name: &str,
        f: impl Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.entries
            .push((name.to_string(), Transition::Produce(Box::new(f))));
        self
    }

    /// Supply the transition for a parametric observer
    ///
    /// The closure runs once per instance, at build time, and returns the
    /// callable the consumer will invoke.
    pub fn operation(
        mut self,
        name: &str,
        f: impl Fn(&Value) -> Result<Operation> + Send + Sync + 'static,
    ) -> Self {
        self.entries
            .push((name.to_string(), Transition::Bind(Box::new(f))));
        self
    }

    fn into_entries(self) -> Vec<(String, Transition)> {
        self.entries
    }
}

/// A compiled variant: one named implementation of the observer contract
///
/// Immutable once registered. Instances hold it via `Arc`, so overwriting a
/// variant name later never changes the behavior of already-built instances.
pub struct Variant {
    name: String,
    signature: Signature,
    transitions: HashMap<String, Transition>,
}

impl Variant {
    /// Validate an implementation against the observer registry and compile
    ///
    /// Validation is eager: a variant is either fully usable or never
    /// registered. Checks run in a deterministic order: unknown entries in
    /// supply order first, then coverage and shape in declaration order.
    ///
    /// # Errors
    /// `UnknownTransition` for an entry naming an undeclared observer,
    /// `IncompleteVariant` for a declared observer with no entry,
    /// `TransitionShape` for an entry whose shape contradicts the observer's
    /// kind.
    pub(crate) fn compile(
        name: &str,
        signature: Signature,
        implementation: Implementation,
        observers: &ObserverRegistry,
    ) -> Result<Self> {
        let mut transitions = HashMap::new();
        for (key, transition) in implementation.into_entries() {
            if observers.get(&key).is_none() {
                return Err(Error::UnknownTransition {
                    variant: name.to_string(),
                    observer: key,
                });
            }
            transitions.insert(key, transition);
        }

        for descriptor in observers.iter() {
            let transition =
                transitions
                    .get(&descriptor.name)
                    .ok_or_else(|| Error::IncompleteVariant {
                        variant: name.to_string(),
                        observer: descriptor.name.clone(),
                    })?;
            match (descriptor.is_parametric(), transition) {
                (true, Transition::Produce(_)) => {
                    return Err(Error::TransitionShape {
                        variant: name.to_string(),
                        observer: descriptor.name.clone(),
                        expected: "an operation transition",
                    })
                }
                (false, Transition::Bind(_)) => {
                    return Err(Error::TransitionShape {
                        variant: name.to_string(),
                        observer: descriptor.name.clone(),
                        expected: "a value transition",
                    })
                }
                _ => {}
            }
        }

        Ok(Self {
            name: name.to_string(),
            signature,
            transitions,
        })
    }

    /// Variant name, the factory key on the codata type
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declarative signature recorded at `unfold` time
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn transition(&self, observer: &str) -> Result<&Transition> {
        self.transitions
            .get(observer)
            .ok_or_else(|| Error::NoSuchObserver(observer.to_string()))
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
