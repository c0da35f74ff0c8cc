//! The codata type handle: observer contract plus variant registry
//!
//! A `CodataType` is an identity, not a value. Clones share one inner
//! allocation, so every variant and every instance derived from the type
//! sees the same observer registry and the same (growing) variant registry.
//!
//! The variant registry is the only mutable state. It is written exclusively
//! by `unfold` and read by factory lookups; a single `RwLock` keeps the
//! registration swap atomic.

use crate::instance::Instance;
use crate::variant::{Implementation, Signature, Variant};
use corec_core::{Error, ObserverRegistry, Result, TypeId, TypeToken, Value};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A declared coinductive type
///
/// Created by [`codata`](crate::declare::codata). The observer registry is
/// fixed at creation; the variant registry grows monotonically through
/// [`unfold`](CodataType::unfold). Cheap to clone; clones compare equal and
/// denote the same type.
#[derive(Clone)]
pub struct CodataType {
    inner: Arc<TypeInner>,
}

struct TypeInner {
    id: TypeId,
    observers: ObserverRegistry,
    variants: RwLock<HashMap<String, Arc<Variant>>>,
}

impl CodataType {
    pub(crate) fn new(observers: ObserverRegistry) -> Self {
        Self {
            inner: Arc::new(TypeInner {
                id: TypeId::new(),
                observers,
                variants: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Identity of this type
    pub fn id(&self) -> TypeId {
        self.inner.id
    }

    /// The observer contract declared for this type
    pub fn observers(&self) -> &ObserverRegistry {
        &self.inner.observers
    }

    /// A token referring to this type, usable in other declarations
    pub fn token(&self) -> TypeToken {
        TypeToken::Declared(self.id())
    }

    /// Register a named variant: one concrete implementation per observer
    ///
    /// `signature` is declarative only: it may mention the type itself and
    /// is recorded for introspection, never enforced. `implementation` must
    /// cover every declared observer with a transition of the matching
    /// shape; validation is eager, so a variant is either fully usable or
    /// never registered.
    ///
    /// Returns the same type handle, so declaration and extension chain
    /// fluently. Registering a name again overwrites the variant; instances
    /// already built keep the implementation they were built with.
    ///
    /// # Errors
    /// `IncompleteVariant`, `UnknownTransition`, or `TransitionShape` when
    /// the implementation does not match the observer contract.
    pub fn unfold(
        &self,
        name: &str,
        signature: impl FnOnce(&CodataType) -> Signature,
        implementation: Implementation,
    ) -> Result<CodataType> {
        let signature = signature(self);
        let variant = Variant::compile(name, signature, implementation, self.observers())?;
        let replaced = self
            .inner
            .variants
            .write()
            .insert(name.to_string(), Arc::new(variant));
        debug!(
            type_id = %self.id(),
            variant = name,
            overwrote = replaced.is_some(),
            "registered unfold variant"
        );
        Ok(self.clone())
    }

    /// True when a variant of this name has been registered
    pub fn has_variant(&self, name: &str) -> bool {
        self.inner.variants.read().contains_key(name)
    }

    /// Names of all registered variants, sorted
    pub fn variant_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.variants.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Look up the factory registered under `name`
    ///
    /// # Errors
    /// `UnknownVariant` when no variant of that name exists.
    pub fn factory(&self, name: &str) -> Result<Factory> {
        let variant = self
            .inner
            .variants
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownVariant(name.to_string()))?;
        Ok(Factory {
            ty: self.clone(),
            variant,
        })
    }

    /// Build an instance from a variant name and a seed in one call
    ///
    /// Equivalent to `self.factory(name)?.invoke(seed)`.
    pub fn build(&self, name: &str, seed: impl Into<Value>) -> Result<Instance> {
        self.factory(name)?.invoke(seed)
    }
}

impl PartialEq for CodataType {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for CodataType {}

impl fmt::Debug for CodataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodataType")
            .field("id", &self.inner.id)
            .field("observers", &self.inner.observers.len())
            .field("variants", &self.variant_names())
            .finish()
    }
}

/// A seed → instance builder for one registered variant
///
/// Obtained from [`CodataType::factory`]. Holds the variant it was resolved
/// to, so it keeps working unchanged even if the name is later overwritten
/// on the type.
#[derive(Clone)]
pub struct Factory {
    ty: CodataType,
    variant: Arc<Variant>,
}

impl Factory {
    /// Build one instance from a seed
    ///
    /// Simple and parametric observers are materialized now; continuation
    /// observers stay unresolved until first read.
    ///
    /// # Errors
    /// Whatever a simple or parametric transition fails with, unchanged.
    pub fn invoke(&self, seed: impl Into<Value>) -> Result<Instance> {
        Instance::build(self.ty.clone(), self.variant.clone(), seed.into())
    }

    /// Name of the variant this factory builds
    pub fn variant_name(&self) -> &str {
        self.variant.name()
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("type", &self.ty.id())
            .field("variant", &self.variant.name())
            .finish()
    }
}
