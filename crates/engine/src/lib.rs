//! The codata engine
//!
//! This crate implements the corecursion core on top of `corec-core`:
//! - declare: `codata()`, the declaration scope and its markers
//! - codata_type: the type handle, variant registry, and `unfold`
//! - variant: signatures, implementations, and compiled variants
//! - instance: the instance builder and the lazy continuation protocol
//! - introspect: the process-wide type → observer association
//!
//! Execution is single-threaded and fully synchronous. Laziness means
//! deferred evaluation, not scheduling: a continuation read blocks until the
//! child instance is built, which is itself one transition call plus one
//! recursive build. The registries and continuation cells use lock/one-shot
//! primitives only so the single-initialization guarantee stays valid if a
//! host process happens to share handles across threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codata_type;
pub mod declare;
pub mod instance;
pub mod introspect;
pub mod variant;

pub use codata_type::{CodataType, Factory};
pub use declare::{codata, Declaration, Scope};
pub use instance::Instance;
pub use variant::{Implementation, Operation, Signature, Variant};
