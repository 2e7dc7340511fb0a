//! # pathlens
//!
//! Path lenses for immutable updates of deeply nested, dynamically-shaped
//! data.
//!
//! ## Overview
//!
//! A path lens is a handle on "the value at path p" inside a JSON-like
//! [`Value`](value::Value) tree. Reading through it never fails (missing
//! data reads as `None`), and writing through it returns a new tree that
//! shares every untouched subtree with the original. It includes:
//!
//! - **Value Trees**: [`Value`](value::Value), `record!`, `sequence!` and `path!`
//! - **Path Lenses**: get, set, put, modify, iso, peg and over
//! - **Sequence Splices**: del, ins and cat with negative indices
//! - **Traversals**: map and tap over sequence elements
//!
//! ## Feature Flags
//!
//! - `arc`: Use `Arc` instead of `Rc` so trees and lenses are `Send + Sync`
//! - `serde`: `Serialize`/`Deserialize` for [`Value`](value::Value)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use pathlens::prelude::*;
//!
//! let mary = record! { "name" => "Mary Sanchez" };
//!
//! let updated = lens_of(mary.clone())
//!     .at_path("company.name")
//!     .put("Google")
//!     .at_path("hobbies.0")
//!     .set("Fishing");
//!
//! assert_eq!(
//!     updated,
//!     record! {
//!         "name" => "Mary Sanchez",
//!         "company" => record! { "name" => "Google" },
//!         "hobbies" => sequence!["Fishing"],
//!     }
//! );
//! assert_eq!(mary, record! { "name" => "Mary Sanchez" });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the entry points, handle types and literal macros.
///
/// # Usage
///
/// ```rust
/// use pathlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::optics::{
        Bound, FunctionIso, Iso, OpticsError, PathLens, PathTraversal, Unbound, lens, lens_of,
    };
    pub use crate::value::{PathKey, Value, ValueKind};
    pub use crate::{path, record, sequence};
}

pub mod optics;
pub mod value;
