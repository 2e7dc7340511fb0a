//! Isomorphisms: lossless two-way conversions.
//!
//! An [`Iso`] converts a value forward with [`Iso::get`] and back with
//! [`Iso::reverse_get`]. A path lens can be viewed through an iso
//! ([`PathLens::through`](crate::optics::PathLens::through)): reads convert
//! the focus forward, writes convert the written value back before storing it.
//!
//! # Laws
//!
//! 1. **`GetReverseGet` Law**: `iso.reverse_get(iso.get(source)) == source`
//! 2. **`ReverseGetGet` Law**: `iso.get(iso.reverse_get(value)) == value`
//!
//! # Examples
//!
//! ```
//! use pathlens::optics::{FunctionIso, Iso};
//! use pathlens::value::Value;
//! use pathlens::record;
//!
//! // "John Wallace" <-> { first: "John", last: "Wallace" }
//! let name_parts = FunctionIso::new(
//!     |name: Value| {
//!         let text = name.as_str().unwrap_or_default().to_string();
//!         let (first, last) = text.split_once(' ').unwrap_or((text.as_str(), ""));
//!         record! { "first" => first, "last" => last }
//!     },
//!     |parts: Value| {
//!         let entries = parts.as_record().cloned().unwrap_or_default();
//!         let part = |key: &str| {
//!             entries.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
//!         };
//!         Value::from(format!("{} {}", part("first"), part("last")))
//!     },
//! );
//!
//! let parts = name_parts.get(Value::from("John Wallace"));
//! assert_eq!(parts, record! { "first" => "John", "last" => "Wallace" });
//! assert_eq!(name_parts.reverse_get(parts), Value::from("John Wallace"));
//! ```

use std::marker::PhantomData;

/// An Iso represents an isomorphism between two types.
///
/// # Type Parameters
///
/// - `S`: The source type
/// - `A`: The target type
pub trait Iso<S, A> {
    /// Converts from the source type to the target type.
    fn get(&self, source: S) -> A;

    /// Converts from the target type back to the source type.
    fn reverse_get(&self, value: A) -> S;

    /// Returns the reversed Iso (swaps the direction).
    ///
    /// # Example
    ///
    /// ```
    /// use pathlens::optics::{FunctionIso, Iso};
    /// use pathlens::value::Value;
    ///
    /// let meters_to_centimeters = FunctionIso::new(
    ///     |meters: Value| Value::from(meters.as_i64().unwrap_or_default() * 100),
    ///     |centimeters: Value| Value::from(centimeters.as_i64().unwrap_or_default() / 100),
    /// );
    ///
    /// let centimeters_to_meters = meters_to_centimeters.reverse();
    /// assert_eq!(centimeters_to_meters.get(Value::from(300)), Value::from(3));
    /// ```
    fn reverse(self) -> ReversedIso<Self>
    where
        Self: Sized,
    {
        ReversedIso::new(self)
    }
}

// =============================================================================
// FunctionIso
// =============================================================================

/// An Iso implemented using get and `reverse_get` functions.
///
/// # Type Parameters
///
/// - `S`: The source type
/// - `A`: The target type
/// - `G`: The get function type
/// - `Rg`: The `reverse_get` function type
pub struct FunctionIso<S, A, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> S,
{
    get_function: G,
    reverse_get_function: Rg,
    _marker: PhantomData<fn(S) -> A>,
}

impl<S, A, G, Rg> FunctionIso<S, A, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> S,
{
    /// Creates a new `FunctionIso` from get and `reverse_get` functions.
    #[must_use]
    pub const fn new(get_function: G, reverse_get_function: Rg) -> Self {
        Self {
            get_function,
            reverse_get_function,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, Rg> Iso<S, A> for FunctionIso<S, A, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> S,
{
    fn get(&self, source: S) -> A {
        (self.get_function)(source)
    }

    fn reverse_get(&self, value: A) -> S {
        (self.reverse_get_function)(value)
    }
}

impl<S, A, G, Rg> Clone for FunctionIso<S, A, G, Rg>
where
    G: Fn(S) -> A + Clone,
    Rg: Fn(A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self {
            get_function: self.get_function.clone(),
            reverse_get_function: self.reverse_get_function.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, Rg> std::fmt::Debug for FunctionIso<S, A, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> S,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionIso")
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ReversedIso
// =============================================================================

/// A reversed Iso that swaps the direction of conversion.
#[derive(Clone, Debug)]
pub struct ReversedIso<I> {
    inner: I,
}

impl<I> ReversedIso<I> {
    /// Creates a new `ReversedIso` from an Iso.
    #[must_use]
    pub const fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<S, A, I> Iso<A, S> for ReversedIso<I>
where
    I: Iso<S, A>,
{
    fn get(&self, source: A) -> S {
        self.inner.reverse_get(source)
    }

    fn reverse_get(&self, value: S) -> A {
        self.inner.get(value)
    }
}
