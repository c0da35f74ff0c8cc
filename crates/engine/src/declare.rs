//! Declaring codata types
//!
//! A coinductive type is declared by listing what can be observed from it,
//! not how it is constructed. The declaration callback receives a [`Scope`]
//! whose markers stand in for "this same type" (`self_ref`) and for erased
//! generic parameters (`param`); it returns the ordered field list that
//! becomes the type's observer registry.
//!
//! ```
//! use corec_engine::declare::{codata, Declaration};
//!
//! let stream = codata(|c| {
//!     Declaration::new()
//!         .observe("head", c.param("T"))
//!         .observe("tail", c.self_of(c.param("T")))
//! })
//! .unwrap();
//! assert_eq!(stream.observers().len(), 2);
//! ```

use crate::codata_type::CodataType;
use crate::introspect;
use corec_core::{Error, ObserverRegistry, Result, TypeToken};
use tracing::debug;

/// Marker factory handed to a declaration callback
///
/// Mints the symbolic tokens a declaration is written with. Markers carry
/// no runtime meaning beyond classification: the Self marker makes an
/// observer a continuation, parameter markers are erased placeholders.
pub struct Scope(());

impl Scope {
    fn new() -> Self {
        Self(())
    }

    /// The Self marker: this observer continues into the same type
    pub fn self_ref(&self) -> TypeToken {
        TypeToken::SelfRef
    }

    /// The applied form `Self(T)`
    ///
    /// The argument is symbolic documentation and is discarded; the result
    /// is exactly the same marker as [`self_ref`](Self::self_ref).
    pub fn self_of(&self, _argument: TypeToken) -> TypeToken {
        TypeToken::SelfRef
    }

    /// Mint a generic-parameter marker
    ///
    /// Markers with the same name are the same marker; distinct names are
    /// distinct markers. Never substituted; generics are erased.
    pub fn param(&self, name: &str) -> TypeToken {
        TypeToken::param(name)
    }
}

/// Ordered field list returned by a declaration callback
///
/// Field order is declaration order and is preserved all the way into the
/// observer registry.
#[derive(Debug, Default)]
pub struct Declaration {
    fields: Vec<(String, TypeToken)>,
}

impl Declaration {
    /// Empty declaration
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare one observer
    ///
    /// The key is validated against the camelCase rule by [`codata`], not
    /// here, so an offending key is reported in declaration order.
    pub fn observe(mut self, name: &str, token: TypeToken) -> Self {
        self.fields.push((name.to_string(), token));
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn into_fields(self) -> Vec<(String, TypeToken)> {
        self.fields
    }
}

/// Declare a new coinductive type
///
/// Invokes the callback with a fresh [`Scope`], validates every declared
/// key (camelCase, no duplicates, at least one observer), classifies every
/// field, and returns the new type with its observer registry fixed. The
/// returned handle exposes [`unfold`](CodataType::unfold), so declaration
/// and extension compose fluently.
///
/// # Errors
/// `EmptyDeclaration` when the callback declares nothing,
/// `InvalidObserverName` naming the first offending key,
/// `DuplicateObserver` for a key declared twice.
pub fn codata(declare: impl FnOnce(&Scope) -> Declaration) -> Result<CodataType> {
    let scope = Scope::new();
    let declaration = declare(&scope);
    if declaration.is_empty() {
        return Err(Error::EmptyDeclaration);
    }
    let observers = ObserverRegistry::from_fields(declaration.into_fields())?;
    let ty = CodataType::new(observers);
    introspect::record(ty.id(), ty.observers().clone());
    debug!(
        type_id = %ty.id(),
        observers = ty.observers().len(),
        "declared codata type"
    );
    Ok(ty)
}
