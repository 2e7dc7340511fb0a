//! Path lenses over dynamically-shaped data trees.
//!
//! A [`PathLens`] is an immutable handle on "the value at path p". It is
//! built from the identity path by narrowing one key at a time, and every
//! handle exposes the same terminal operations:
//!
//! | operation | effect |
//! |---|---|
//! | `get` | read the focus (`None` when any step is missing) |
//! | `set` | return a new root with the focus replaced |
//! | `put` | `set`, then continue navigating from the new root |
//! | `modify` | view the focus through a one-way transform |
//! | `iso` / `through` | view the focus through a two-way conversion |
//! | `peg` | keep the focus equal to another path of the same root |
//! | `over` | rewrite the focus and keep rewriting it on every write |
//! | `map` | view a sequence focus with a function applied to each element |
//!
//! Sequence splices (`del`, `ins`, `cat`) and traversals (`tap`) live in
//! their own modules.
//!
//! # Bound and Unbound Lenses
//!
//! [`lens_of`] binds a root: `get()`/`set(v)` act on it directly.
//! [`lens`] builds an unbound (abstract) path that can be applied to many
//! roots with the `*_in` operations. Root-less operations only exist on
//! bound lenses, so forgetting the root is a compile error.
//!
//! ```
//! use pathlens::optics::{lens, lens_of};
//! use pathlens::record;
//! use pathlens::value::Value;
//!
//! // Missing intermediates are synthesized on write.
//! let created = lens_of(record! {}).at_path("a.b.c").set(true);
//! assert_eq!(created, record! { "a" => record! { "b" => record! { "c" => true } } });
//!
//! // The same abstract path reused across roots.
//! let company_name = lens().at_path("company.name");
//! let employed = record! { "company" => record! { "name" => "Google" } };
//! let unemployed = record! { "name" => "Mary Sanchez" };
//! assert_eq!(company_name.get_in(&employed), Some(Value::from("Google")));
//! assert_eq!(company_name.get_in(&unemployed), None);
//! ```
//!
//! # Laws
//!
//! For every path lens `l`, root `r` and present value `v`:
//!
//! 1. **`PutGet`**: `l.get_in(&l.set_in(&r, v)) == Some(v)`
//! 2. **`GetPut`**: if `l.get_in(&r) == Some(v)` then `l.set_in(&r, v) == r`
//! 3. **`PutPut`**: `l.set_in(&l.set_in(&r, v1), v2) == l.set_in(&r, v2)`
//!
//! `r` itself is never modified; the result shares every subtree that is not
//! on the written path.

use crate::value::{PathKey, ReferenceCounter, Value};

use super::accessor::{self, Accessor, Shareable, Transform};
use super::iso::{FunctionIso, Iso};
use super::update;

// =============================================================================
// Root Bindings
// =============================================================================

/// Marker for a lens that is not bound to a root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unbound;

/// The root a bound lens operates on.
#[derive(Clone, Debug, PartialEq)]
pub struct Bound {
    root: Value,
}

// =============================================================================
// PathLens
// =============================================================================

/// An immutable handle on the value at a path.
///
/// # Type Parameters
///
/// - `R`: The root binding, [`Bound`] or [`Unbound`]
///
/// # Examples
///
/// ```
/// use pathlens::optics::lens_of;
/// use pathlens::{record, sequence};
///
/// let mary = record! { "name" => "Mary Sanchez" };
///
/// let fisher = lens_of(mary.clone()).at_path("hobbies.0.name").set("Fishing");
/// assert_eq!(
///     fisher,
///     record! {
///         "name" => "Mary Sanchez",
///         "hobbies" => sequence![record! { "name" => "Fishing" }],
///     }
/// );
///
/// // The original is untouched.
/// assert_eq!(mary, record! { "name" => "Mary Sanchez" });
/// ```
#[derive(Clone)]
pub struct PathLens<R = Unbound> {
    accessor: Accessor,
    binding: R,
}

/// Creates an unbound lens over the identity path.
#[must_use]
pub fn lens() -> PathLens<Unbound> {
    PathLens::new()
}

/// Creates a lens over the identity path of `root`.
#[must_use]
pub fn lens_of(root: impl Into<Value>) -> PathLens<Bound> {
    PathLens::bound(root)
}

impl PathLens<Unbound> {
    /// Creates an unbound lens over the identity path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accessor: Accessor::identity(),
            binding: Unbound,
        }
    }

    /// Binds this path to `root`.
    #[must_use]
    pub fn bind(self, root: impl Into<Value>) -> PathLens<Bound> {
        PathLens {
            accessor: self.accessor,
            binding: Bound { root: root.into() },
        }
    }
}

impl Default for PathLens<Unbound> {
    fn default() -> Self {
        Self::new()
    }
}

impl PathLens<Bound> {
    /// Creates a lens over the identity path of `root`.
    #[must_use]
    pub fn bound(root: impl Into<Value>) -> Self {
        PathLens::new().bind(root)
    }

    /// The bound root.
    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.binding.root
    }

    /// Forgets the bound root, keeping the path.
    #[must_use]
    pub fn unbind(self) -> PathLens<Unbound> {
        PathLens {
            accessor: self.accessor,
            binding: Unbound,
        }
    }

    /// Reads the focus of the bound root.
    #[must_use]
    pub fn get(&self) -> Option<Value> {
        self.get_in(&self.binding.root)
    }

    /// Returns a copy of the bound root with the focus replaced by `value`.
    #[must_use]
    pub fn set(&self, value: impl Into<Value>) -> Value {
        self.set_in(&self.binding.root, value)
    }

    /// Sets the focus and returns a lens bound to the updated root, so
    /// several fields can be written in one chain.
    ///
    /// # Example
    ///
    /// ```
    /// use pathlens::optics::lens_of;
    /// use pathlens::record;
    ///
    /// let john = record! {
    ///     "name" => "John Wallace",
    ///     "company" => record! { "name" => "Microsoft" },
    /// };
    ///
    /// let moved = lens_of(john)
    ///     .at_path("company.name")
    ///     .put("Apple")
    ///     .at_path("company.address.city")
    ///     .set("Cupertino");
    ///
    /// assert_eq!(
    ///     moved,
    ///     record! {
    ///         "name" => "John Wallace",
    ///         "company" => record! {
    ///             "name" => "Apple",
    ///             "address" => record! { "city" => "Cupertino" },
    ///         },
    ///     }
    /// );
    /// ```
    #[must_use]
    pub fn put(&self, value: impl Into<Value>) -> Self {
        self.put_in(&self.binding.root, value)
    }
}

impl<R: Clone> PathLens<R> {
    fn with_accessor(&self, accessor: Accessor) -> Self {
        Self {
            accessor,
            binding: self.binding.clone(),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Narrows the focus by one key.
    ///
    /// String keys that spell a non-negative integer (`"0"`, `"+3"`) are
    /// indices; every other string is a field name.
    #[must_use]
    pub fn at(&self, key: impl Into<PathKey>) -> Self {
        self.with_accessor(self.accessor.narrow(key.into()))
    }

    /// Narrows the focus to a record field, even if `name` looks numeric.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        self.at(PathKey::Field(name.to_string()))
    }

    /// Narrows the focus to a sequence position.
    #[must_use]
    pub fn index(&self, position: usize) -> Self {
        self.at(PathKey::Index(position))
    }

    /// Narrows the focus along a dotted path such as `"hobbies.0.name"`.
    #[must_use]
    pub fn at_path(&self, path: &str) -> Self {
        self.at_keys(PathKey::parse_path(path))
    }

    /// Narrows the focus along a sequence of keys.
    #[must_use]
    pub fn at_keys<I>(&self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathKey>,
    {
        let accessor = keys
            .into_iter()
            .fold(self.accessor.clone(), |accessor, key| accessor.narrow(key.into()));
        self.with_accessor(accessor)
    }

    // =========================================================================
    // Explicit-root Operations
    // =========================================================================

    /// Reads the focus of `root`.
    #[must_use]
    pub fn get_in(&self, root: &Value) -> Option<Value> {
        self.accessor.get(root)
    }

    /// Returns a copy of `root` with the focus replaced by `value`.
    #[must_use]
    pub fn set_in(&self, root: &Value, value: impl Into<Value>) -> Value {
        self.accessor.set(root, value.into())
    }

    /// Sets the focus of `root` and returns a lens bound to the result.
    #[must_use]
    pub fn put_in(&self, root: &Value, value: impl Into<Value>) -> PathLens<Bound> {
        PathLens::bound(self.set_in(root, value))
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Views the focus through a one-way transform.
    ///
    /// Reads return `function(focus)`. Writes apply `function` to the written
    /// value before storing it; there is no inverse, so writing back a value
    /// that was read stores it transformed once more.
    ///
    /// # Example
    ///
    /// ```
    /// use pathlens::optics::lens;
    /// use pathlens::record;
    /// use pathlens::value::Value;
    ///
    /// let shouted = lens().field("name").modify(|name| {
    ///     Value::from(name.as_ref().and_then(Value::as_str).unwrap_or_default().to_uppercase())
    /// });
    ///
    /// let john = record! { "name" => "John Wallace" };
    /// assert_eq!(shouted.get_in(&john), Some(Value::from("JOHN WALLACE")));
    /// assert_eq!(john, record! { "name" => "John Wallace" });
    /// ```
    #[must_use]
    pub fn modify<F>(&self, function: F) -> Self
    where
        F: Fn(Option<Value>) -> Value + Shareable + 'static,
    {
        let function = ReferenceCounter::new(function);

        let read = self.accessor.clone();
        let read_function = function.clone();
        let getter = accessor::getter(move |root: &Value| read_function(read.get(root)).present());

        let write = self.accessor.clone();
        let setter = accessor::setter(move |root: &Value, value: Value| {
            write.set(root, function(value.present()))
        });

        self.with_accessor(Accessor::new(getter, setter))
    }

    /// Views the focus through a two-way conversion.
    ///
    /// `forward` converts the stored focus for reading (it receives `None`
    /// when the focus is absent); `backward` converts a written value into
    /// the stored form.
    ///
    /// # Example
    ///
    /// ```
    /// use pathlens::optics::lens;
    /// use pathlens::record;
    /// use pathlens::value::Value;
    ///
    /// let flag_text = lens().at_path("a.b.c").iso(
    ///     |flag| Value::from(flag.and_then(|flag| flag.as_bool()).unwrap_or(false).to_string()),
    ///     |text| Value::from(text.as_str() == Some("true")),
    /// );
    ///
    /// assert_eq!(flag_text.get_in(&record! {}), Some(Value::from("false")));
    /// assert_eq!(
    ///     flag_text.set_in(&record! {}, "true"),
    ///     record! { "a" => record! { "b" => record! { "c" => true } } }
    /// );
    /// ```
    #[must_use]
    pub fn iso<F, B>(&self, forward: F, backward: B) -> Self
    where
        F: Fn(Option<Value>) -> Value + Shareable + 'static,
        B: Fn(Value) -> Value + Shareable + 'static,
    {
        self.through(FunctionIso::new(
            move |value: Value| forward(value.present()),
            backward,
        ))
    }

    /// Views the focus through an [`Iso`]. An absent focus is converted as
    /// [`Value::Null`].
    #[must_use]
    pub fn through<I>(&self, iso: I) -> Self
    where
        I: Iso<Value, Value> + Shareable + 'static,
    {
        let iso = ReferenceCounter::new(iso);

        let read = self.accessor.clone();
        let read_iso = iso.clone();
        let getter = accessor::getter(move |root: &Value| {
            read_iso.get(read.get(root).unwrap_or_default()).present()
        });

        let write = self.accessor.clone();
        let setter = accessor::setter(move |root: &Value, value: Value| {
            write.set(root, iso.reverse_get(value))
        });

        self.with_accessor(Accessor::new(getter, setter))
    }

    /// Couples the focus to another path of the same root.
    ///
    /// The result is a lens on the whole root in which the focus reads as
    /// the current value at `source`. Every root written through the result
    /// is coupled again, so writing `source` also writes the focus.
    ///
    /// # Example
    ///
    /// ```
    /// use pathlens::optics::{lens, lens_of};
    /// use pathlens::record;
    ///
    /// let root = record! { "a" => record! { "c" => false }, "b" => false };
    ///
    /// let mirrored = lens_of(root).at_path("a.c").peg(&lens().field("b"));
    /// assert_eq!(
    ///     mirrored.field("b").set(true),
    ///     record! { "a" => record! { "c" => true }, "b" => true }
    /// );
    /// ```
    #[must_use]
    pub fn peg<O>(&self, source: &PathLens<O>) -> Self {
        let focus = self.accessor.clone();
        let source = source.accessor.clone();
        self.coupled(accessor::transform(move |root: &Value| {
            focus.set(root, Value::from(source.get(root)))
        }))
    }

    /// Rewrites the focus with `function` and keeps rewriting it.
    ///
    /// Like [`peg`](Self::peg) the result is a lens on the whole root; every
    /// root written through it gets the rewrite applied again.
    ///
    /// # Example
    ///
    /// ```
    /// use pathlens::optics::lens_of;
    /// use pathlens::record;
    /// use pathlens::value::Value;
    ///
    /// let root = record! { "a" => record! { "b" => record! { "c" => true } } };
    /// let negate = |flag: Option<Value>| {
    ///     Value::from(!flag.and_then(|flag| flag.as_bool()).unwrap_or(false))
    /// };
    ///
    /// let negated = lens_of(root).at_path("a.b.c").over(negate);
    /// assert_eq!(negated.at_path("a.b.c").get(), Some(Value::from(false)));
    ///
    /// // Writing `false` is negated again on the way in.
    /// assert_eq!(
    ///     negated.at_path("a.b.c").set(false),
    ///     record! { "a" => record! { "b" => record! { "c" => true } } }
    /// );
    /// ```
    #[must_use]
    pub fn over<F>(&self, function: F) -> Self
    where
        F: Fn(Option<Value>) -> Value + Shareable + 'static,
    {
        let focus = self.accessor.clone();
        self.coupled(accessor::transform(move |root: &Value| {
            focus.set(root, function(focus.get(root)))
        }))
    }

    fn coupled(&self, rewrite: Transform) -> Self {
        self.with_accessor(Accessor::coupled(rewrite))
    }

    /// Views a sequence focus with `function` applied to every element.
    ///
    /// A focus that is not a sequence reads as absent. Writing a sequence
    /// stores its items position by position over the current elements;
    /// current elements past the end of the written sequence are kept.
    ///
    /// # Example
    ///
    /// ```
    /// use pathlens::optics::lens_of;
    /// use pathlens::sequence;
    /// use pathlens::value::Value;
    ///
    /// let doubled = lens_of(sequence![1, 2, 3])
    ///     .map(|item| Value::from(item.as_i64().unwrap_or_default() * 2));
    ///
    /// assert_eq!(doubled.get(), Some(sequence![2, 4, 6]));
    /// assert_eq!(doubled.set(sequence![10]), sequence![10, 2, 3]);
    /// ```
    #[must_use]
    pub fn map<F>(&self, function: F) -> Self
    where
        F: Fn(Value) -> Value + Shareable + 'static,
    {
        let read = self.accessor.clone();
        let getter = accessor::getter(move |root: &Value| match read.get(root)? {
            Value::Sequence(items) => Some(items.iter().cloned().map(&function).collect()),
            _ => None,
        });

        let write = self.accessor.clone();
        let setter = accessor::setter(move |root: &Value, incoming: Value| {
            let current = write.get(root);
            write.set(root, update::overwrite_prefix(current.as_ref(), update::spread(incoming)))
        });

        self.with_accessor(Accessor::new(getter, setter))
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for PathLens<R> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PathLens")
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}
