//! Errors raised by path lens operations.
//!
//! Missing data is never an error: reads through absent intermediates yield
//! `None` and writes synthesize the containers they need. Errors only report
//! operations applied to data of the wrong shape.

use thiserror::Error;

use crate::value::ValueKind;

/// The ways a path lens operation can be misapplied.
///
/// # Examples
///
/// ```
/// use pathlens::optics::{OpticsError, lens_of};
/// use pathlens::record;
/// use pathlens::value::ValueKind;
///
/// let root = record! { "name" => "John Wallace" };
/// let error = lens_of(root).field("name").del(0).unwrap_err();
///
/// assert_eq!(
///     error,
///     OpticsError::NotASequence { operation: "del", found: ValueKind::String }
/// );
/// assert_eq!(error.to_string(), "`del` requires a sequence focus, found string");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OpticsError {
    /// A sequence-only operation met a present value that is not a sequence.
    #[error("`{operation}` requires a sequence focus, found {found}")]
    NotASequence {
        /// The operation that was attempted.
        operation: &'static str,
        /// The shape actually found at the focus.
        found: ValueKind,
    },

    /// A traversal write supplied a different number of values than it has
    /// focused elements.
    #[error("traversal focuses {expected} elements but {received} values were supplied")]
    LengthMismatch {
        /// The number of focused elements.
        expected: usize,
        /// The number of values supplied.
        received: usize,
    },
}
