//! Getter/setter pairs and their composition along a path.
//!
//! An [`Accessor`] is the function pair behind every lens handle:
//!
//! - `getter(root) -> Option<Value>` reads the focus.
//! - `setter(root, value) -> Value` returns a new root with the focus
//!   replaced.
//!
//! Narrowing by one key wraps the parent pair so the child reads and writes
//! one level deeper, overlaying the parent's current value onto the key's
//! default container (see [`update::write_key`]).

use crate::value::{PathKey, ReferenceCounter, Value};

use super::update;

// =============================================================================
// Thread Safety
// =============================================================================

/// Bound on every closure stored inside a lens.
///
/// With the `arc` feature enabled this requires `Send + Sync`, so handles and
/// the data they produce can cross threads. Without it every type qualifies.
#[cfg(feature = "arc")]
pub trait Shareable: Send + Sync {}

#[cfg(feature = "arc")]
impl<T: Send + Sync + ?Sized> Shareable for T {}

/// Bound on every closure stored inside a lens.
///
/// With the `arc` feature enabled this requires `Send + Sync`, so handles and
/// the data they produce can cross threads. Without it every type qualifies.
#[cfg(not(feature = "arc"))]
pub trait Shareable {}

#[cfg(not(feature = "arc"))]
impl<T: ?Sized> Shareable for T {}

#[cfg(feature = "arc")]
pub(crate) type Getter = ReferenceCounter<dyn Fn(&Value) -> Option<Value> + Send + Sync>;
#[cfg(not(feature = "arc"))]
pub(crate) type Getter = ReferenceCounter<dyn Fn(&Value) -> Option<Value>>;

#[cfg(feature = "arc")]
pub(crate) type Setter = ReferenceCounter<dyn Fn(&Value, Value) -> Value + Send + Sync>;
#[cfg(not(feature = "arc"))]
pub(crate) type Setter = ReferenceCounter<dyn Fn(&Value, Value) -> Value>;

/// A whole-root rewrite, used by root-level couplings such as `peg`.
#[cfg(feature = "arc")]
pub(crate) type Transform = ReferenceCounter<dyn Fn(&Value) -> Value + Send + Sync>;
#[cfg(not(feature = "arc"))]
pub(crate) type Transform = ReferenceCounter<dyn Fn(&Value) -> Value>;

#[cfg(feature = "arc")]
pub(crate) type Predicate = ReferenceCounter<dyn Fn(&Value) -> bool + Send + Sync>;
#[cfg(not(feature = "arc"))]
pub(crate) type Predicate = ReferenceCounter<dyn Fn(&Value) -> bool>;

pub(crate) fn getter<F>(function: F) -> Getter
where
    F: Fn(&Value) -> Option<Value> + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

pub(crate) fn setter<F>(function: F) -> Setter
where
    F: Fn(&Value, Value) -> Value + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

pub(crate) fn transform<F>(function: F) -> Transform
where
    F: Fn(&Value) -> Value + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

pub(crate) fn predicate<F>(function: F) -> Predicate
where
    F: Fn(&Value) -> bool + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

// =============================================================================
// Accessor
// =============================================================================

#[derive(Clone)]
pub(crate) struct Accessor {
    pub(crate) getter: Getter,
    pub(crate) setter: Setter,
}

impl Accessor {
    pub(crate) fn new(getter: Getter, setter: Setter) -> Self {
        Self { getter, setter }
    }

    /// The path of length zero: the root is the focus.
    pub(crate) fn identity() -> Self {
        Self::new(
            getter(|root: &Value| root.clone().present()),
            setter(|_root: &Value, value: Value| value),
        )
    }

    pub(crate) fn get(&self, root: &Value) -> Option<Value> {
        (self.getter)(root)
    }

    pub(crate) fn set(&self, root: &Value, value: Value) -> Value {
        (self.setter)(root, value)
    }

    /// Extends the path by `key`.
    pub(crate) fn narrow(&self, key: PathKey) -> Self {
        let parent_getter = self.getter.clone();
        let read_key = key.clone();
        let child_getter = getter(move |root: &Value| {
            update::read_key(parent_getter(root).as_ref(), &read_key)
        });

        let parent_getter = self.getter.clone();
        let parent_setter = self.setter.clone();
        let child_setter = setter(move |root: &Value, value: Value| {
            let parent = parent_getter(root);
            parent_setter(root, update::write_key(parent.as_ref(), &key, value))
        });

        Self::new(child_getter, child_setter)
    }

    /// A root-level pair that reads the root through `rewrite` and applies
    /// `rewrite` again to every root written through it.
    pub(crate) fn coupled(rewrite: Transform) -> Self {
        let read_rewrite = rewrite.clone();
        Self::new(
            getter(move |root: &Value| read_rewrite(root).present()),
            setter(move |_root: &Value, value: Value| rewrite(&value)),
        )
    }
}

impl std::fmt::Debug for Accessor {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("Accessor").finish_non_exhaustive()
    }
}
