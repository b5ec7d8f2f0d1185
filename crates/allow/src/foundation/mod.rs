//! Core types shared by every predicate
//!
//! - **Values**: [`Value`], [`Map`], [`Function`]
//! - **Violations**: [`Violation`], [`ViolationKind`], [`ViolationCategory`], [`Expected`]
//! - **Bounds**: [`LengthBounds`], [`MAX_SAFE_INTEGER`], [`MIN_SAFE_INTEGER`]
//!
//! # Examples
//!
//! ```
//! use allow::foundation::{Value, ViolationKind};
//! use serde_json::json;
//!
//! let target = Value::from(json!({ "id": 7 }));
//! assert!(target.is_object());
//! assert_eq!(ViolationKind::MissingKey.code(), "missing_key");
//! ```

pub mod bounds;
pub mod value;
pub mod violation;

pub use bounds::{LengthBounds, MAX_SAFE_INTEGER, MIN_SAFE_INTEGER};
pub use value::{Function, Map, Value};
pub use violation::{Expected, Violation, ViolationCategory, ViolationKind};
