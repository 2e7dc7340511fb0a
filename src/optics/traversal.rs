//! Traversals over the elements of a sequence focus.
//!
//! [`PathLens::tap`] turns a lens on a sequence into a [`PathTraversal`]:
//! a handle on every element that satisfies a predicate. The traversal can
//! be narrowed further (`field`, `at`, `at_path`) to focus a path inside
//! each matching element.
//!
//! Reads return one value per matching element, in order, as a
//! [`Value::Sequence`] (absent values read as `Null`). Writes consume one
//! value per matching element and put them back at the positions the
//! elements came from; elements that do not match are untouched.
//!
//! # Laws
//!
//! 1. **Modify Identity Law**: `t.modify_in(&r, |v| v.unwrap_or_default()) == Ok(r)`
//!    when every focus is present.
//! 2. **Set Get Law**: `t.get_in(&t.set_in(&r, vs)?) == Ok(vs)` for present values.
//!
//! # Examples
//!
//! ```
//! use pathlens::optics::{OpticsError, lens_of};
//! use pathlens::{record, sequence};
//! use pathlens::value::Value;
//!
//! let team = record! {
//!     "members" => sequence![
//!         record! { "name" => "John", "active" => true },
//!         record! { "name" => "Mary", "active" => false },
//!         record! { "name" => "Alan", "active" => true },
//!     ],
//! };
//!
//! let active_names = lens_of(team)
//!     .field("members")
//!     .tap(|member| {
//!         lens_of(member.clone()).field("active").get() == Some(Value::from(true))
//!     })
//!     .field("name");
//!
//! assert_eq!(active_names.get()?, sequence!["John", "Alan"]);
//!
//! let renamed = active_names.set(sequence!["Johnny", "Al"])?;
//! assert_eq!(
//!     renamed,
//!     record! {
//!         "members" => sequence![
//!             record! { "name" => "Johnny", "active" => true },
//!             record! { "name" => "Mary", "active" => false },
//!             record! { "name" => "Al", "active" => true },
//!         ],
//!     }
//! );
//! # Ok::<(), OpticsError>(())
//! ```

use crate::value::{PathKey, Value};

use super::accessor::{self, Accessor, Predicate, Shareable};
use super::error::OpticsError;
use super::path_lens::{Bound, PathLens, Unbound};
use super::update;

// =============================================================================
// PathTraversal
// =============================================================================

/// A handle on a path inside every matching element of a sequence focus.
///
/// # Type Parameters
///
/// - `R`: The root binding, [`Bound`] or [`Unbound`]
#[derive(Clone)]
pub struct PathTraversal<R = Unbound> {
    sequence: PathLens<R>,
    predicate: Predicate,
    element: Accessor,
}

/// The matching elements of one root.
struct Matches {
    items: Vec<Value>,
    positions: Vec<usize>,
}

impl<R: Clone> PathLens<R> {
    /// Traverses the elements of the focused sequence that satisfy
    /// `predicate`.
    #[must_use]
    pub fn tap<P>(&self, predicate: P) -> PathTraversal<R>
    where
        P: Fn(&Value) -> bool + Shareable + 'static,
    {
        PathTraversal {
            sequence: self.clone(),
            predicate: accessor::predicate(predicate),
            element: Accessor::identity(),
        }
    }

    /// Traverses every element of the focused sequence.
    #[must_use]
    pub fn tap_all(&self) -> PathTraversal<R> {
        self.tap(|_: &Value| true)
    }
}

impl<R: Clone> PathTraversal<R> {
    fn with_element(&self, element: Accessor) -> Self {
        Self {
            sequence: self.sequence.clone(),
            predicate: self.predicate.clone(),
            element,
        }
    }

    /// Narrows the per-element focus by one key.
    #[must_use]
    pub fn at(&self, key: impl Into<PathKey>) -> Self {
        self.with_element(self.element.narrow(key.into()))
    }

    /// Narrows the per-element focus to a record field.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        self.at(PathKey::Field(name.to_string()))
    }

    /// Narrows the per-element focus to a sequence position.
    #[must_use]
    pub fn index(&self, position: usize) -> Self {
        self.at(PathKey::Index(position))
    }

    /// Narrows the per-element focus along a dotted path.
    #[must_use]
    pub fn at_path(&self, path: &str) -> Self {
        let element = PathKey::parse_path(path)
            .into_iter()
            .fold(self.element.clone(), |element, key| element.narrow(key));
        self.with_element(element)
    }

    /// Finds the matching elements of `root`; `None` when the sequence is
    /// absent.
    fn matches(&self, root: &Value, operation: &'static str) -> Result<Option<Matches>, OpticsError> {
        match self.sequence.get_in(root) {
            None => Ok(None),
            Some(Value::Sequence(items)) => {
                let positions = items
                    .iter()
                    .enumerate()
                    .filter_map(|(position, item)| (self.predicate)(item).then_some(position))
                    .collect();
                Ok(Some(Matches {
                    items: Vec::clone(&items),
                    positions,
                }))
            }
            Some(other) => Err(OpticsError::NotASequence {
                operation,
                found: other.kind(),
            }),
        }
    }

    /// Reads the focus of every matching element of `root`.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::NotASequence`] if the traversed focus is
    /// present but is not a sequence.
    pub fn get_in(&self, root: &Value) -> Result<Value, OpticsError> {
        let Some(Matches { items, positions }) = self.matches(root, "get")? else {
            return Ok(Value::empty_sequence());
        };
        Ok(positions
            .into_iter()
            .map(|position| self.element.get(&items[position]).unwrap_or_default())
            .collect())
    }

    /// Counts the matching elements of `root`.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::NotASequence`] if the traversed focus is
    /// present but is not a sequence.
    pub fn count_in(&self, root: &Value) -> Result<usize, OpticsError> {
        Ok(self
            .matches(root, "count")?
            .map_or(0, |matches| matches.positions.len()))
    }

    /// Writes one value per matching element of `root`, in order.
    ///
    /// `values` is a sequence; any other value counts as a sequence of one.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::NotASequence`] if the traversed focus is
    /// present but is not a sequence, and [`OpticsError::LengthMismatch`]
    /// if the number of values differs from the number of matches.
    pub fn set_in(&self, root: &Value, values: impl Into<Value>) -> Result<Value, OpticsError> {
        let values = update::spread(values.into());
        let matches = self.matches(root, "set")?;
        let expected = matches.as_ref().map_or(0, |matches| matches.positions.len());
        if values.len() != expected {
            tracing::warn!(expected, received = values.len(), "traversal length mismatch");
            return Err(OpticsError::LengthMismatch {
                expected,
                received: values.len(),
            });
        }
        let Some(Matches { mut items, positions }) = matches else {
            return Ok(root.clone());
        };
        for (position, value) in positions.into_iter().zip(values) {
            items[position] = self.element.set(&items[position], value);
        }
        Ok(self.sequence.set_in(root, Value::sequence(items)))
    }

    /// Rewrites the focus of every matching element of `root` with
    /// `function`.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::NotASequence`] if the traversed focus is
    /// present but is not a sequence.
    pub fn modify_in<F>(&self, root: &Value, function: F) -> Result<Value, OpticsError>
    where
        F: Fn(Option<Value>) -> Value,
    {
        let Some(Matches { mut items, positions }) = self.matches(root, "modify")? else {
            return Ok(root.clone());
        };
        for position in positions {
            let focus = self.element.get(&items[position]);
            items[position] = self.element.set(&items[position], function(focus));
        }
        Ok(self.sequence.set_in(root, Value::sequence(items)))
    }

    /// Writes `values` into `root` and returns a lens bound to the result.
    ///
    /// # Errors
    ///
    /// As [`set_in`](Self::set_in).
    pub fn put_in(
        &self,
        root: &Value,
        values: impl Into<Value>,
    ) -> Result<PathLens<Bound>, OpticsError> {
        self.set_in(root, values).map(PathLens::bound)
    }
}

impl PathTraversal<Bound> {
    /// The bound root.
    #[must_use]
    pub const fn root(&self) -> &Value {
        self.sequence.root()
    }

    /// Reads the focus of every matching element.
    ///
    /// # Errors
    ///
    /// As [`get_in`](Self::get_in).
    pub fn get(&self) -> Result<Value, OpticsError> {
        self.get_in(self.root())
    }

    /// Counts the matching elements.
    ///
    /// # Errors
    ///
    /// As [`count_in`](Self::count_in).
    pub fn count(&self) -> Result<usize, OpticsError> {
        self.count_in(self.root())
    }

    /// Writes one value per matching element and returns the new root.
    ///
    /// # Errors
    ///
    /// As [`set_in`](Self::set_in).
    pub fn set(&self, values: impl Into<Value>) -> Result<Value, OpticsError> {
        self.set_in(self.root(), values)
    }

    /// Writes one value per matching element and continues from the new
    /// root.
    ///
    /// # Errors
    ///
    /// As [`set_in`](Self::set_in).
    pub fn put(&self, values: impl Into<Value>) -> Result<PathLens<Bound>, OpticsError> {
        self.put_in(self.root(), values)
    }

    /// Rewrites every focus with `function` and continues from the new root.
    ///
    /// # Errors
    ///
    /// As [`modify_in`](Self::modify_in).
    pub fn map<F>(&self, function: F) -> Result<PathLens<Bound>, OpticsError>
    where
        F: Fn(Option<Value>) -> Value,
    {
        self.modify_in(self.root(), function).map(PathLens::bound)
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for PathTraversal<R> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PathTraversal")
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::optics::{OpticsError, lens, lens_of};
    use crate::value::{Value, ValueKind};
    use crate::{record, sequence};
    use rstest::rstest;

    fn is_even(value: &Value) -> bool {
        value.as_i64().is_some_and(|number| number % 2 == 0)
    }

    #[rstest]
    fn test_get_filters_elements() {
        let evens = lens_of(sequence![1, 2, 3, 4]).tap(is_even);
        assert_eq!(evens.get().unwrap(), sequence![2, 4]);
        assert_eq!(evens.count().unwrap(), 2);
    }

    #[rstest]
    fn test_set_rezips_by_original_position() {
        let evens = lens_of(sequence![1, 2, 3, 4]).tap(is_even);
        assert_eq!(evens.set(sequence![20, 40]).unwrap(), sequence![1, 20, 3, 40]);
    }

    #[rstest]
    fn test_set_length_mismatch() {
        let evens = lens_of(sequence![1, 2, 3, 4]).tap(is_even);
        assert_eq!(
            evens.set(sequence![20]).unwrap_err(),
            OpticsError::LengthMismatch {
                expected: 2,
                received: 1
            }
        );
    }

    #[rstest]
    fn test_absent_sequence_reads_empty_and_writes_nothing() {
        let root = record! {};
        let all = lens().field("items").tap_all();
        assert_eq!(all.get_in(&root).unwrap(), sequence![]);
        assert_eq!(all.set_in(&root, sequence![]).unwrap(), root);
        assert_eq!(all.modify_in(&root, |_| Value::from(1)).unwrap(), root);
    }

    #[rstest]
    fn test_non_sequence_focus_is_rejected() {
        let root = record! { "items" => "text" };
        assert_eq!(
            lens().field("items").tap_all().count_in(&root).unwrap_err(),
            OpticsError::NotASequence {
                operation: "count",
                found: ValueKind::String
            }
        );
    }

    #[rstest]
    fn test_missing_element_focus_reads_null() {
        let root = sequence![record! { "a" => 1 }, record! {}];
        assert_eq!(
            lens().tap_all().field("a").get_in(&root).unwrap(),
            sequence![1, Value::Null]
        );
    }

    #[rstest]
    fn test_map_binds_updated_root() {
        let doubled = lens_of(sequence![1, 2, 3])
            .tap_all()
            .map(|value| Value::from(value.and_then(|value| value.as_i64()).unwrap_or_default() * 2))
            .unwrap();
        assert_eq!(doubled.root(), &sequence![2, 4, 6]);
    }
}
