//! Core types for the codata engine
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: unified value enum for seeds and simple observations
//! - TypeId / TypeToken: declared-type identities and the symbolic token
//!   vocabulary observers are declared with
//! - ObserverKind / ObserverDescriptor / ObserverRegistry: classification of
//!   declared fields and the ordered per-type registry
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod observer;
pub mod token;
pub mod value;

// Re-export commonly used types
pub use error::{Error, Result};
pub use observer::{
    classify, validate_observer_name, Arity, ObserverDescriptor, ObserverKind, ObserverRegistry,
};
pub use token::{TypeId, TypeToken};
pub use value::Value;
