//! Built-in predicates
//!
//! Every predicate is an inherent method on [`Allow`](crate::engine::Allow)
//! returning [`Chain`](crate::engine::Chain):
//!
//! - **Scalar**: `a_boolean`, `a_function`, `a_number`, `an_integer`,
//!   `a_string`, `an_object`, `an_opaque_object`
//! - **Collection**: `an_array` and the `an_array_of_*` family
//! - **Structural**: `an_instance_of` against a [`Model`]
//! - **Enumeration**: `one_of`

mod collection;
mod one_of;
mod scalar;
pub mod structure;

pub use structure::{Model, Schema};
