//! Error types for the codata engine
//!
//! This module defines all error conditions raised by the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Propagation policy
//!
//! Declaration and registration failures (shape, naming, variant coverage)
//! surface at `codata()` / `unfold()` time and never later. Transition
//! failures surface at the observation that triggers them, and the engine
//! propagates them unchanged, with no wrapping, so the original failure keeps its
//! identity.

use crate::observer::ObserverKind;
use thiserror::Error;

/// Result type alias for codata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error conditions raised by declaration, registration, and observation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A codata declaration produced no observers
    #[error("codata declaration produced no observers")]
    EmptyDeclaration,

    /// The same observer key appeared twice in one declaration
    #[error("observer {0:?} is declared more than once")]
    DuplicateObserver(String),

    /// An observer key failed the camelCase rule
    #[error("invalid observer name {0:?}: names must start with a lowercase letter and contain only ASCII letters and digits")]
    InvalidObserverName(String),

    /// An `unfold` implementation omitted a declared observer
    #[error("variant {variant:?} has no transition for observer {observer:?}")]
    IncompleteVariant {
        /// Variant being registered
        variant: String,
        /// Declared observer with no transition
        observer: String,
    },

    /// An `unfold` implementation named an observer the type never declared
    #[error("variant {variant:?} defines a transition for undeclared observer {observer:?}")]
    UnknownTransition {
        /// Variant being registered
        variant: String,
        /// Name with no matching observer
        observer: String,
    },

    /// A transition entry has the wrong shape for its observer's kind
    #[error("variant {variant:?}: observer {observer:?} requires {expected}")]
    TransitionShape {
        /// Variant being registered
        variant: String,
        /// Observer whose transition has the wrong shape
        observer: String,
        /// The entry kind the observer's classification calls for
        expected: &'static str,
    },

    /// A factory lookup named a variant that was never unfolded
    #[error("no variant named {0:?}")]
    UnknownVariant(String),

    /// An observation named an observer the type never declared
    #[error("no observer named {0:?}")]
    NoSuchObserver(String),

    /// An observer was read through the accessor of a different kind
    #[error("observer {observer:?} is a {actual} observer, not {expected}")]
    ObserverKindMismatch {
        /// Observer that was read
        observer: String,
        /// Kind implied by the accessor used
        expected: ObserverKind,
        /// Kind the observer was declared with
        actual: ObserverKind,
    },

    /// A transition rejected the shape of the seed it was handed
    #[error("seed mismatch: {0}")]
    Seed(String),

    /// A transition failed for a reason of its own
    #[error("transition failed: {0}")]
    Transition(String),
}
