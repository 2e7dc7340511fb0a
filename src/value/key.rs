//! Path segments.
//!
//! A [`PathKey`] is one step of a lens path: a record field or a sequence
//! index. Keys written as strings are classified by the rule
//! `^\+?(0|[1-9]\d*)$`; a match is an index, anything else a field name.
//! The classification decides which empty container a write synthesizes
//! when the path passes through missing data.

use std::fmt;

use super::Value;

/// One step of a lens path.
///
/// # Examples
///
/// ```
/// use pathlens::value::PathKey;
///
/// assert_eq!(PathKey::from("name"), PathKey::Field("name".to_string()));
/// assert_eq!(PathKey::from("0"), PathKey::Index(0));
/// assert_eq!(PathKey::from("+12"), PathKey::Index(12));
/// assert_eq!(PathKey::from("007"), PathKey::Field("007".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathKey {
    /// A named record field.
    Field(String),
    /// A zero-based sequence position.
    Index(usize),
}

impl PathKey {
    /// Classifies a textual key.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        parse_index(text).map_or_else(|| Self::Field(text.to_string()), Self::Index)
    }

    /// Splits a dotted path such as `"company.address.0.city"` into keys.
    ///
    /// Empty segments are skipped, so `""` is the identity path.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathlens::value::PathKey;
    ///
    /// let keys = PathKey::parse_path("hobbies.0.name");
    /// assert_eq!(
    ///     keys,
    ///     vec![
    ///         PathKey::Field("hobbies".to_string()),
    ///         PathKey::Index(0),
    ///         PathKey::Field("name".to_string()),
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn parse_path(path: &str) -> Vec<Self> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .map(Self::parse)
            .collect()
    }

    /// The empty container a write through this key synthesizes when the
    /// parent is missing.
    #[must_use]
    pub fn default_container(&self) -> Value {
        match self {
            Self::Index(_) => Value::empty_sequence(),
            Self::Field(_) => Value::empty_record(),
        }
    }

    /// The record key this step reads and writes when its parent is a record.
    #[must_use]
    pub fn record_key(&self) -> String {
        match self {
            Self::Field(name) => name.clone(),
            Self::Index(position) => position.to_string(),
        }
    }
}

/// Accepts `0`, `+0`, `1`, `+42`; rejects leading zeros, signs other than a
/// single `+`, and anything that overflows `usize`.
fn parse_index(text: &str) -> Option<usize> {
    let digits = text.strip_prefix('+').unwrap_or(text);
    let canonical = match digits.as_bytes() {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    };
    if canonical { digits.parse().ok() } else { None }
}

impl From<&str> for PathKey {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for PathKey {
    fn from(text: String) -> Self {
        match parse_index(&text) {
            Some(position) => Self::Index(position),
            None => Self::Field(text),
        }
    }
}

impl From<usize> for PathKey {
    fn from(position: usize) -> Self {
        Self::Index(position)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => formatter.write_str(name),
            Self::Index(position) => write!(formatter, "{position}"),
        }
    }
}

/// Builds a `Vec<PathKey>` from mixed field names and indices.
///
/// # Example
///
/// ```
/// use pathlens::path;
/// use pathlens::value::PathKey;
///
/// let keys = path!["hobbies", 0_usize, "name"];
/// assert_eq!(keys, PathKey::parse_path("hobbies.0.name"));
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::value::PathKey>::new()
    };
    ($($segment:expr),+ $(,)?) => {
        ::std::vec![$($crate::value::PathKey::from($segment)),+]
    };
}
