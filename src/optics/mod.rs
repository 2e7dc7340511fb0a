//! Path lenses for immutable updates of dynamically-shaped data.
//!
//! This module provides path lenses: accessors that focus on the value at a
//! path inside a [`Value`](crate::value::Value) tree, read it, and produce
//! updated copies of the tree without touching the original.
//!
//! # Available Optics
//!
//! - [`PathLens`]: Focus on the value at a path (get/set access)
//! - [`PathTraversal`]: Focus on a path inside many sequence elements
//! - [`Iso`]: Two-way conversion a lens can be viewed through
//!
//! # Example with PathLens
//!
//! ```
//! use pathlens::optics::lens_of;
//! use pathlens::{record, sequence};
//! use pathlens::value::Value;
//!
//! let john = record! {
//!     "name" => "John Wallace",
//!     "company" => record! { "name" => "Microsoft" },
//! };
//!
//! // Read a nested field
//! let company = lens_of(john.clone()).at_path("company.name");
//! assert_eq!(company.get(), Some(Value::from("Microsoft")));
//!
//! // Set a nested field (returns a new tree)
//! let updated = company.set("Apple");
//! assert_eq!(lens_of(updated).at_path("company.name").get(), Some(Value::from("Apple")));
//!
//! // Missing paths read as absent and are created on write
//! let hobbies = lens_of(john).at_path("hobbies.0");
//! assert_eq!(hobbies.get(), None);
//! assert_eq!(
//!     lens_of(hobbies.set("Chess")).field("hobbies").get(),
//!     Some(sequence!["Chess"])
//! );
//! ```
//!
//! # Example with an Abstract Lens
//!
//! ```
//! use pathlens::optics::lens;
//! use pathlens::record;
//! use pathlens::value::Value;
//!
//! let city = lens().at_path("address.city");
//!
//! let tokyo = record! { "address" => record! { "city" => "Tokyo" } };
//! let nowhere = record! {};
//!
//! assert_eq!(city.get_in(&tokyo), Some(Value::from("Tokyo")));
//! assert_eq!(city.get_in(&nowhere), None);
//! assert_eq!(city.set_in(&nowhere, "Osaka"), record! { "address" => record! { "city" => "Osaka" } });
//! ```

mod accessor;
mod error;
mod iso;
mod path_lens;
mod sequence;
mod traversal;
mod update;

// Re-export all path-lens-related types and functions
pub use path_lens::Bound;
pub use path_lens::PathLens;
pub use path_lens::Unbound;
pub use path_lens::lens;
pub use path_lens::lens_of;

// Re-export all traversal-related types
pub use traversal::PathTraversal;

// Re-export all iso-related types and traits
pub use iso::FunctionIso;
pub use iso::Iso;
pub use iso::ReversedIso;

pub use accessor::Shareable;
pub use error::OpticsError;
