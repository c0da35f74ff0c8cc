//! Instances: observation-capable values built from a seed
//!
//! `build` walks the observer registry in declaration order and applies the
//! per-kind evaluation rule:
//!
//! | Kind         | At build time              | At read time                   |
//! |--------------|----------------------------|--------------------------------|
//! | Simple       | transition runs, value kept| `get` clones the value         |
//! | Parametric   | transition runs, callable  | `call` invokes it with args    |
//! |              | kept                       |                                |
//! | Continuation | a one-shot cell allocated  | `advance` runs the transition, |
//! |              |                            | builds the child, caches it    |
//!
//! Simple and parametric observations are assumed cheap and total.
//! Continuations are the mechanism for unbounded self-referential
//! structures, so they must not be forced at construction time; building
//! the first instance of an infinite stream would otherwise never
//! terminate.
//!
//! Each instance owns its continuation cells. A cell resolves at most once;
//! the cached child is shared on every later read. A failing transition
//! caches nothing; the error propagates unchanged and a later read retries.

use crate::codata_type::CodataType;
use crate::variant::{Operation, Variant};
use corec_core::{Error, ObserverDescriptor, ObserverKind, Result, Value};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// One observation-capable value of a codata type
///
/// Exposes one observation point per declared observer, read through the
/// accessor matching its kind: [`get`](Instance::get) for simple,
/// [`call`](Instance::call) for parametric, [`advance`](Instance::advance)
/// for continuation observers.
pub struct Instance {
    ty: CodataType,
    variant: Arc<Variant>,
    seed: Value,
    values: HashMap<String, Value>,
    operations: HashMap<String, Operation>,
    continuations: HashMap<String, OnceCell<Arc<Instance>>>,
}

impl Instance {
    pub(crate) fn build(ty: CodataType, variant: Arc<Variant>, seed: Value) -> Result<Self> {
        let mut values = HashMap::new();
        let mut operations = HashMap::new();
        let mut continuations = HashMap::new();
        for descriptor in ty.observers().iter() {
            let transition = variant.transition(&descriptor.name)?;
            match descriptor.kind {
                ObserverKind::Simple => {
                    values.insert(descriptor.name.clone(), transition.produce(&seed)?);
                }
                ObserverKind::Parametric => {
                    operations.insert(descriptor.name.clone(), transition.bind(&seed)?);
                }
                ObserverKind::Continuation => {
                    continuations.insert(descriptor.name.clone(), OnceCell::new());
                }
            }
        }
        Ok(Self {
            ty,
            variant,
            seed,
            values,
            operations,
            continuations,
        })
    }

    fn descriptor(&self, name: &str) -> Result<&ObserverDescriptor> {
        self.ty
            .observers()
            .get(name)
            .ok_or_else(|| Error::NoSuchObserver(name.to_string()))
    }

    fn expect_kind(&self, name: &str, expected: ObserverKind) -> Result<()> {
        let descriptor = self.descriptor(name)?;
        if descriptor.kind != expected {
            return Err(Error::ObserverKindMismatch {
                observer: name.to_string(),
                expected,
                actual: descriptor.kind,
            });
        }
        Ok(())
    }

    /// Read a simple observer
    ///
    /// The value was computed when this instance was built; reading it is a
    /// clone, never a recomputation.
    ///
    /// # Errors
    /// `NoSuchObserver` for an undeclared name, `ObserverKindMismatch` when
    /// the observer is not simple.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.expect_kind(name, ObserverKind::Simple)?;
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NoSuchObserver(name.to_string()))
    }

    /// Invoke a parametric observer with observation-time arguments
    ///
    /// The callable was bound to this instance's seed at build time; pass
    /// arguments exactly as declared (`input` present ⇒ one argument,
    /// `output`-only ⇒ none).
    ///
    /// # Errors
    /// `NoSuchObserver` / `ObserverKindMismatch` as for [`get`](Self::get);
    /// otherwise whatever the callable fails with, unchanged.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.expect_kind(name, ObserverKind::Parametric)?;
        let operation = self
            .operations
            .get(name)
            .ok_or_else(|| Error::NoSuchObserver(name.to_string()))?;
        operation.call(args)
    }

    /// Follow a continuation observer to the next instance
    ///
    /// On first read the transition maps this instance's seed to the next
    /// seed and the child is built with the same variant; the result is
    /// cached, so later reads return the same child without re-invoking the
    /// transition. A failing transition caches nothing and its error
    /// propagates unchanged; a later read starts over.
    ///
    /// # Errors
    /// `NoSuchObserver` / `ObserverKindMismatch` as for [`get`](Self::get);
    /// otherwise whatever the transition or the child build fails with.
    pub fn advance(&self, name: &str) -> Result<Arc<Instance>> {
        self.expect_kind(name, ObserverKind::Continuation)?;
        let cell = self
            .continuations
            .get(name)
            .ok_or_else(|| Error::NoSuchObserver(name.to_string()))?;
        cell.get_or_try_init(|| {
            let next_seed = self.variant.transition(name)?.produce(&self.seed)?;
            trace!(
                type_id = %self.ty.id(),
                observer = name,
                "resolved continuation"
            );
            Ok(Arc::new(Instance::build(
                self.ty.clone(),
                self.variant.clone(),
                next_seed,
            )?))
        })
        .map(Arc::clone)
    }

    /// The seed this instance was built from
    pub fn seed(&self) -> &Value {
        &self.seed
    }

    /// The codata type this instance observes
    pub fn codata_type(&self) -> &CodataType {
        &self.ty
    }

    /// Name of the variant this instance was built by
    pub fn variant_name(&self) -> &str {
        self.variant.name()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved = self
            .continuations
            .values()
            .filter(|cell| cell.get().is_some())
            .count();
        f.debug_struct("Instance")
            .field("variant", &self.variant.name())
            .field("seed", &self.seed)
            .field("resolved_continuations", &resolved)
            .finish()
    }
}
