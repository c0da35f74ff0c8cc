//! Type tokens and declared-type identities
//!
//! This module defines:
//! - TypeId: unique identifier for a declared type
//! - TypeToken: the symbolic vocabulary observers are declared with
//!
//! Tokens are documentation only. The engine classifies an observer from its
//! token exactly once, at declaration time, and never checks an observed
//! value against a token afterward. Generic parameters are erased: a
//! `Param` marker is a placeholder name, never substituted or dispatched on.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a declared type
///
/// A TypeId is a wrapper around a UUID v4. Every call to `codata()` mints a
/// fresh one, and all clones of the resulting handle share it; two handles
/// denote the same coinductive type exactly when their TypeIds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(Uuid);

impl TypeId {
    /// Create a new random TypeId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a TypeId from a string representation
    ///
    /// Accepts standard UUID format. Returns None if the string is not a
    /// valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for TypeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Symbolic type vocabulary for observer declarations
///
/// A declaration assigns one token to each observer. The token determines
/// the observer's kind (see `observer::classify`) and otherwise serves as
/// machine-readable documentation of intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeToken {
    /// Numeric primitive marker
    Number,
    /// String primitive marker
    Text,
    /// Boolean primitive marker
    Boolean,
    /// Symbolic generic-parameter marker, e.g. `T`
    Param(String),
    /// The continuation marker: "another instance of this same type"
    ///
    /// Both the bare `Self` form and the applied `Self(T)` form produce
    /// exactly this token; any applied argument is discarded.
    SelfRef,
    /// Declarative shape of a parametric observer
    ///
    /// Either side may be absent: `input`-only declares an operation with no
    /// stated result, `output`-only declares a zero-argument operation that
    /// is still invoked at observation time.
    Operation {
        /// Request payload type, if declared
        input: Option<Box<TypeToken>>,
        /// Response type, if declared
        output: Option<Box<TypeToken>>,
    },
    /// Reference to another declared data or codata type
    Declared(TypeId),
    /// No token given
    Undefined,
}

impl TypeToken {
    /// Build an `Operation` token from optional input/output tokens
    pub fn operation(input: Option<TypeToken>, output: Option<TypeToken>) -> Self {
        TypeToken::Operation {
            input: input.map(Box::new),
            output: output.map(Box::new),
        }
    }

    /// Build a generic-parameter marker
    pub fn param(name: &str) -> Self {
        TypeToken::Param(name.to_string())
    }
}
