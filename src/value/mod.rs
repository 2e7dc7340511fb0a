//! Dynamically-shaped data trees.
//!
//! [`Value`] is the tree every path lens reads from and writes into. It has
//! the shape of a JSON document: scalars, ordered sequences and string-keyed
//! records. Strings and containers live behind a reference counter, so
//! cloning a `Value` never copies its contents and two trees can share a
//! subtree by pointer.
//!
//! # Structural Sharing
//!
//! Writes through a lens rebuild only the containers on the written path.
//! Every other subtree of the result is the very same allocation as in the
//! original tree, which [`Value::ptr_eq`] can observe:
//!
//! ```
//! use pathlens::optics::lens_of;
//! use pathlens::value::Value;
//! use pathlens::record;
//!
//! let root = record! {
//!     "left" => record! { "n" => 1 },
//!     "right" => record! { "n" => 2 },
//! };
//!
//! let updated = lens_of(root.clone()).at_path("left.n").set(10);
//!
//! let original_right = lens_of(root).field("right").get().unwrap();
//! let updated_right = lens_of(updated).field("right").get().unwrap();
//! assert!(Value::ptr_eq(&original_right, &updated_right));
//! ```
//!
//! # Absence
//!
//! `Null` is kept so trees round-trip through JSON, but lenses treat it
//! exactly like a missing key: reading a `Null` leaf yields `None`, and a
//! `Null` intermediate is replaced by a fresh container on write.

use std::collections::BTreeMap;
use std::fmt;

mod key;

pub use key::PathKey;

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

/// The entries of a record, ordered by key.
pub type Entries = BTreeMap<String, Value>;

// =============================================================================
// Value
// =============================================================================

/// A node of a data tree.
///
/// # Examples
///
/// ```
/// use pathlens::value::{Value, ValueKind};
/// use pathlens::{record, sequence};
///
/// let person = record! {
///     "name" => "Mary Sanchez",
///     "hobbies" => sequence![record! { "name" => "Fishing" }],
/// };
///
/// assert_eq!(person.kind(), ValueKind::Record);
/// assert_eq!(person.to_string(), r#"{"hobbies":[{"name":"Fishing"}],"name":"Mary Sanchez"}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// An explicit null. Reads as absent through every lens.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// An immutable string.
    String(ReferenceCounter<str>),
    /// An ordered sequence of values.
    Sequence(ReferenceCounter<Vec<Self>>),
    /// A record of named values.
    Record(ReferenceCounter<Entries>),
}

/// The shape of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Integer`]
    Integer,
    /// [`Value::Float`]
    Float,
    /// [`Value::String`]
    String,
    /// [`Value::Sequence`]
    Sequence,
    /// [`Value::Record`]
    Record,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Record => "record",
        };
        formatter.write_str(name)
    }
}

impl Value {
    /// Creates an empty sequence.
    #[must_use]
    pub fn empty_sequence() -> Self {
        Self::Sequence(ReferenceCounter::new(Vec::new()))
    }

    /// Creates an empty record.
    #[must_use]
    pub fn empty_record() -> Self {
        Self::Record(ReferenceCounter::new(Entries::new()))
    }

    /// Creates a sequence that owns the given items.
    #[must_use]
    pub fn sequence(items: Vec<Self>) -> Self {
        Self::Sequence(ReferenceCounter::new(items))
    }

    /// Creates a record that owns the given entries.
    #[must_use]
    pub fn record(entries: Entries) -> Self {
        Self::Record(ReferenceCounter::new(entries))
    }

    /// Returns the shape of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Record(_) => ValueKind::Record,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts `Null` into `None`, the single absence marker lenses return.
    #[must_use]
    pub fn present(self) -> Option<Self> {
        if self.is_null() { None } else { Some(self) }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the number as a float. Integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(number) => Some(*number as f64),
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(&**text),
            _ => None,
        }
    }

    /// Returns the items of a sequence, if this is one.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the entries of a record, if this is one.
    #[must_use]
    pub fn as_record(&self) -> Option<&Entries> {
        match self {
            Self::Record(entries) => Some(&**entries),
            _ => None,
        }
    }

    /// Returns `true` when both values are the same shared allocation.
    ///
    /// Scalars carry no allocation and compare by value instead.
    #[must_use]
    pub fn ptr_eq(left: &Self, right: &Self) -> bool {
        match (left, right) {
            (Self::String(left), Self::String(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Sequence(left), Self::Sequence(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Record(left), Self::Record(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Integer(left), Self::Integer(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left.to_bits() == right.to_bits(),
            _ => false,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

macro_rules! impl_from_integer {
    ($($integer:ty),*) => {
        $(
            impl From<$integer> for Value {
                fn from(number: $integer) -> Self {
                    Self::Integer(i64::from(number))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(number: f32) -> Self {
        Self::Float(f64::from(number))
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(ReferenceCounter::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(ReferenceCounter::from(text))
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::sequence(items)
    }
}

impl From<Entries> for Value {
    fn from(entries: Entries) -> Self {
        Self::record(entries)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterator: I) -> Self {
        Self::sequence(iterator.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iterator: I) -> Self {
        Self::record(
            iterator
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}

// =============================================================================
// Display
// =============================================================================

impl fmt::Display for Value {
    /// Renders the value as compact JSON.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Integer(number) => write!(formatter, "{number}"),
            Self::Float(number) => write!(formatter, "{number}"),
            Self::String(text) => write!(formatter, "{:?}", &**text),
            Self::Sequence(items) => {
                formatter.write_str("[")?;
                for (position, item) in items.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(",")?;
                    }
                    write!(formatter, "{item}")?;
                }
                formatter.write_str("]")
            }
            Self::Record(entries) => {
                formatter.write_str("{")?;
                for (position, (key, value)) in entries.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(",")?;
                    }
                    write!(formatter, "{key:?}:{value}")?;
                }
                formatter.write_str("}")
            }
        }
    }
}

// =============================================================================
// Literal Macros
// =============================================================================

/// Builds a [`Value::Record`] from `key => value` pairs.
///
/// Values go through `Value::from`, so literals, strings, nested
/// `record!`/`sequence!` calls and existing values all work.
///
/// # Example
///
/// ```
/// use pathlens::record;
/// use pathlens::value::Value;
///
/// let company = record! { "name" => "Microsoft", "zip" => 98052 };
/// assert_eq!(company.as_record().map(|entries| entries.len()), Some(2));
/// assert_eq!(record! {}, Value::empty_record());
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::value::Value::empty_record()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut entries = $crate::value::Entries::new();
        $(
            entries.insert(
                ::std::string::String::from($key),
                $crate::value::Value::from($value),
            );
        )+
        $crate::value::Value::record(entries)
    }};
}

/// Builds a [`Value::Sequence`] from a list of items.
///
/// # Example
///
/// ```
/// use pathlens::sequence;
/// use pathlens::value::Value;
///
/// let numbers = sequence![1, 2, 3];
/// assert_eq!(numbers.as_sequence().map(<[Value]>::len), Some(3));
/// ```
#[macro_export]
macro_rules! sequence {
    () => {
        $crate::value::Value::empty_sequence()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::value::Value::sequence(::std::vec![$($crate::value::Value::from($item)),+])
    };
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Integer(number) => serializer.serialize_i64(*number),
            Self::Float(number) => serializer.serialize_f64(*number),
            Self::String(text) => serializer.serialize_str(text),
            Self::Sequence(items) => {
                let mut sequence = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    sequence.serialize_element(item)?;
                }
                sequence.end()
            }
            Self::Record(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON-shaped value")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E>(self, flag: bool) -> Result<Self::Value, E> {
        Ok(Value::Bool(flag))
    }

    fn visit_i64<E>(self, number: i64) -> Result<Self::Value, E> {
        Ok(Value::Integer(number))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E>(self, number: u64) -> Result<Self::Value, E> {
        // Integers beyond i64 keep their magnitude as floats.
        Ok(i64::try_from(number).map_or(Value::Float(number as f64), Value::Integer))
    }

    fn visit_f64<E>(self, number: f64) -> Result<Self::Value, E> {
        Ok(Value::Float(number))
    }

    fn visit_str<E>(self, text: &str) -> Result<Self::Value, E> {
        Ok(Value::from(text))
    }

    fn visit_string<E>(self, text: String) -> Result<Self::Value, E> {
        Ok(Value::from(text))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(item) = access.next_element()? {
            items.push(item);
        }
        Ok(Value::sequence(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut entries = Entries::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            entries.insert(key, value);
        }
        Ok(Value::record(entries))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Value: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
