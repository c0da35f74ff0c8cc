//! Observer classification and the per-type observer registry
//!
//! This module defines:
//! - the camelCase naming rule for observer keys
//! - ObserverKind: Simple / Parametric / Continuation
//! - ObserverDescriptor: one classified observation point
//! - ObserverRegistry: the ordered name → descriptor map owned by a type
//!
//! Classification is a pure function of the declared token. It runs once,
//! when the registry is built, and the result is carried on the descriptor;
//! instances never re-derive it.

use crate::error::{Error, Result};
use crate::token::TypeToken;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Validate an observer key against the camelCase rule
///
/// A key must be non-empty, start with an ASCII lowercase letter, and
/// contain only ASCII letters and digits. In particular, no leading
/// underscore and no leading uppercase.
///
/// # Errors
/// Returns `InvalidObserverName` naming the offending key.
pub fn validate_observer_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let leading_ok = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    if !leading_ok || !chars.all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidObserverName(name.to_string()));
    }
    Ok(())
}

/// Kind of an observer, decided by its declared token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObserverKind {
    /// A plain value, computed eagerly at build time
    Simple,
    /// A bound callable, invoked by the consumer at observation time
    Parametric,
    /// Another instance of the same type, built lazily on first read
    Continuation,
}

impl ObserverKind {
    /// Kind name as used in messages and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ObserverKind::Simple => "simple",
            ObserverKind::Parametric => "parametric",
            ObserverKind::Continuation => "continuation",
        }
    }
}

impl fmt::Display for ObserverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a declared token into an observer kind
///
/// - the Self marker ⇒ Continuation
/// - an `Operation { in, out }` descriptor ⇒ Parametric
/// - anything else (primitive marker, generic parameter, declared type,
///   undefined) ⇒ Simple
pub fn classify(token: &TypeToken) -> ObserverKind {
    match token {
        TypeToken::SelfRef => ObserverKind::Continuation,
        TypeToken::Operation { .. } => ObserverKind::Parametric,
        _ => ObserverKind::Simple,
    }
}

/// Number of arguments an observer takes at observation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Read with no arguments
    None,
    /// A parametric observer with a declared input
    One,
}

/// One classified observation point on a codata type
///
/// Immutable once the type is declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverDescriptor {
    /// Observer key, validated camelCase
    pub name: String,
    /// Kind decided at declaration
    pub kind: ObserverKind,
    /// The declared token, kept as documentation
    pub token: TypeToken,
    /// Observation-time arity
    pub arity: Arity,
}

impl ObserverDescriptor {
    /// Classify a validated key/token pair into a descriptor
    pub fn classify(name: String, token: TypeToken) -> Self {
        let kind = classify(&token);
        let arity = match &token {
            TypeToken::Operation { input: Some(_), .. } => Arity::One,
            _ => Arity::None,
        };
        Self {
            name,
            kind,
            token,
            arity,
        }
    }

    /// True when this observer is a plain eagerly-computed value
    pub fn is_simple(&self) -> bool {
        self.kind == ObserverKind::Simple
    }

    /// True when this observer is a bound callable
    pub fn is_parametric(&self) -> bool {
        self.kind == ObserverKind::Parametric
    }

    /// True when this observer continues into another instance
    pub fn is_continuation(&self) -> bool {
        self.kind == ObserverKind::Continuation
    }
}

/// Ordered observer registry owned by one codata type
///
/// Entries keep declaration order; lookups by name go through a side index.
/// The registry is fixed at declaration time and shared by every variant and
/// instance of the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverRegistry {
    entries: Vec<ObserverDescriptor>,
    index: HashMap<String, usize>,
}

impl ObserverRegistry {
    /// Build a registry from declared fields, in declaration order
    ///
    /// Each key is validated against the camelCase rule before its value is
    /// classified, so the first offending key in declaration order is the
    /// one reported.
    ///
    /// # Errors
    /// `InvalidObserverName` for a key failing the camelCase rule,
    /// `DuplicateObserver` for a key declared twice.
    pub fn from_fields(fields: Vec<(String, TypeToken)>) -> Result<Self> {
        let mut entries = Vec::with_capacity(fields.len());
        let mut index = HashMap::with_capacity(fields.len());
        for (name, token) in fields {
            validate_observer_name(&name)?;
            if index.contains_key(&name) {
                return Err(Error::DuplicateObserver(name));
            }
            index.insert(name.clone(), entries.len());
            entries.push(ObserverDescriptor::classify(name, token));
        }
        Ok(Self { entries, index })
    }

    /// Number of observers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the registry has no observers
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a descriptor by observer name
    pub fn get(&self, name: &str) -> Option<&ObserverDescriptor> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Descriptors in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ObserverDescriptor> {
        self.entries.iter()
    }

    /// Observer names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.name.as_str())
    }
}
