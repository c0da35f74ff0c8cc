//! Process-wide introspection of declared types
//!
//! Tests and tooling can ask, for any declared type, what its observers are
//! and how each was classified, without holding the type handle's own
//! methods. The table is written once per declaration and only ever read
//! after that; the engine itself never consults it.

use corec_core::{ObserverDescriptor, ObserverRegistry, TypeId};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;

static TYPES: Lazy<RwLock<HashMap<TypeId, ObserverRegistry>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub(crate) fn record(id: TypeId, observers: ObserverRegistry) {
    TYPES.write().insert(id, observers);
}

/// Observer descriptors of a declared type, in declaration order
///
/// Returns None for an id no declaration ever produced.
pub fn observers(id: TypeId) -> Option<Vec<ObserverDescriptor>> {
    TYPES
        .read()
        .get(&id)
        .map(|registry| registry.iter().cloned().collect())
}

/// True when a type with this id has been declared in this process
pub fn is_declared(id: TypeId) -> bool {
    TYPES.read().contains_key(&id)
}
