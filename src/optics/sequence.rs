//! Splices on a sequence focus: `del`, `ins` and `cat`.
//!
//! Each splice shallow-copies the focused sequence, edits the copy, and
//! writes it back through the lens, so every container on the path is
//! copied and everything else is shared. An absent focus is treated as an
//! empty sequence. A present focus that is not a sequence is an error.
//!
//! The result is a lens bound to the updated root over the identity path,
//! so a chain can continue from the whole new root.
//!
//! # Examples
//!
//! ```
//! use pathlens::optics::{OpticsError, lens_of};
//! use pathlens::{record, sequence};
//!
//! let mary = record! { "hobbies" => sequence!["Fishing", "Cooking"] };
//!
//! let hobbies = lens_of(mary).field("hobbies");
//! let updated = hobbies.ins(0, "Dancing")?.root().clone();
//! assert_eq!(updated, record! { "hobbies" => sequence!["Dancing", "Fishing", "Cooking"] });
//!
//! let trimmed = hobbies.del(-1)?.root().clone();
//! assert_eq!(trimmed, record! { "hobbies" => sequence!["Fishing"] });
//! # Ok::<(), OpticsError>(())
//! ```

use crate::value::Value;

use super::error::OpticsError;
use super::path_lens::{Bound, PathLens};
use super::update;

impl<R: Clone> PathLens<R> {
    /// Removes the element at `index` from the focused sequence of `root`.
    ///
    /// Negative indices count back from the end (`-1` is the last element).
    /// An out-of-range index leaves the sequence unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::NotASequence`] if the focus is present but is
    /// not a sequence.
    pub fn del_in(&self, root: &Value, index: isize) -> Result<PathLens<Bound>, OpticsError> {
        self.splice_in(root, "del", |items| update::remove_at(items, index))
    }

    /// Inserts `items` into the focused sequence of `root` at `index`.
    ///
    /// A sequence argument is spliced in item by item; any other value is
    /// inserted as a single element. `-1` inserts after the last element,
    /// `-2` before it, and so on. Indices past either end are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::NotASequence`] if the focus is present but is
    /// not a sequence.
    pub fn ins_in(
        &self,
        root: &Value,
        index: isize,
        items: impl Into<Value>,
    ) -> Result<PathLens<Bound>, OpticsError> {
        let inserted = update::spread(items.into());
        self.splice_in(root, "ins", |current| update::insert_at(current, index, inserted))
    }

    /// Appends `items` to the focused sequence of `root`.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::NotASequence`] if the focus is present but is
    /// not a sequence.
    pub fn cat_in(
        &self,
        root: &Value,
        items: impl Into<Value>,
    ) -> Result<PathLens<Bound>, OpticsError> {
        let appended = update::spread(items.into());
        self.splice_in(root, "cat", |current| update::append(current, appended))
    }

    fn splice_in<F>(
        &self,
        root: &Value,
        operation: &'static str,
        splice: F,
    ) -> Result<PathLens<Bound>, OpticsError>
    where
        F: FnOnce(&[Value]) -> Vec<Value>,
    {
        let spliced = match self.get_in(root) {
            None => splice(&[]),
            Some(Value::Sequence(items)) => splice(items.as_slice()),
            Some(other) => {
                tracing::debug!(operation, kind = %other.kind(), "splice on non-sequence focus");
                return Err(OpticsError::NotASequence {
                    operation,
                    found: other.kind(),
                });
            }
        };
        Ok(self.put_in(root, Value::sequence(spliced)))
    }
}

impl PathLens<Bound> {
    /// Removes the element at `index` from the focused sequence.
    ///
    /// See [`del_in`](PathLens::del_in).
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::NotASequence`] if the focus is present but is
    /// not a sequence.
    pub fn del(&self, index: isize) -> Result<Self, OpticsError> {
        self.del_in(self.root(), index)
    }

    /// Inserts `items` into the focused sequence at `index`.
    ///
    /// See [`ins_in`](PathLens::ins_in).
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::NotASequence`] if the focus is present but is
    /// not a sequence.
    pub fn ins(&self, index: isize, items: impl Into<Value>) -> Result<Self, OpticsError> {
        self.ins_in(self.root(), index, items)
    }

    /// Appends `items` to the focused sequence.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::NotASequence`] if the focus is present but is
    /// not a sequence.
    pub fn cat(&self, items: impl Into<Value>) -> Result<Self, OpticsError> {
        self.cat_in(self.root(), items)
    }
}

#[cfg(test)]
mod tests {
    use crate::optics::{OpticsError, lens, lens_of};
    use crate::value::{Value, ValueKind};
    use crate::{record, sequence};
    use rstest::rstest;

    #[rstest]
    fn test_del_on_absent_focus_creates_empty_sequence() {
        let updated = lens_of(record! {}).field("items").del(0).unwrap();
        assert_eq!(updated.root(), &record! { "items" => sequence![] });
    }

    #[rstest]
    fn test_cat_on_absent_focus() {
        let updated = lens_of(record! {}).field("items").cat(sequence![1, 2]).unwrap();
        assert_eq!(updated.root(), &record! { "items" => sequence![1, 2] });
    }

    #[rstest]
    fn test_result_is_identity_lens_on_new_root() {
        let original = record! { "items" => sequence![1, 2] };
        let updated = lens_of(original.clone()).field("items").del(0).unwrap();
        assert_eq!(updated.get(), Some(record! { "items" => sequence![2] }));
        assert_eq!(updated.set(original.clone()), original);
    }

    #[rstest]
    #[case(Value::from(3), ValueKind::Integer)]
    #[case(record! { "a" => 1 }, ValueKind::Record)]
    fn test_non_sequence_focus_is_rejected(#[case] focus: Value, #[case] found: ValueKind) {
        let root = record! { "items" => focus };
        assert_eq!(
            lens().field("items").ins_in(&root, 0, 1).unwrap_err(),
            OpticsError::NotASequence {
                operation: "ins",
                found,
            }
        );
    }

    #[rstest]
    fn test_ins_spreads_sequence_argument() {
        let updated = lens_of(sequence![1, 4]).ins(1, sequence![2, 3]).unwrap();
        assert_eq!(updated.root(), &sequence![1, 2, 3, 4]);
    }
}
