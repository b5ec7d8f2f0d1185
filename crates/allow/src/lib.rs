//! # allow
//!
//! Runtime assertions for dynamic values, checked at function and API
//! boundaries.
//!
//! ## Quick Start
//!
//! ```
//! use allow::prelude::*;
//! use serde_json::json;
//!
//! fn register(allow: &Allow, user: &Value) -> Result<(), Violation> {
//!     let model = Model::new().scalar("name").scalar("role").array("tags");
//!     let roles = Value::from(json!(["admin", "member"]));
//!     let role = user.as_object().and_then(|u| u.get("role")).cloned().unwrap_or_default();
//!     allow.an_instance_of(user, &model)?.one_of(&role, &roles)?;
//!     Ok(())
//! }
//!
//! let allow = Allow::new();
//! let ok = Value::from(json!({ "name": "ada", "role": "admin", "tags": [] }));
//! assert!(register(&allow, &ok).is_ok());
//!
//! let bad = Value::from(json!({ "name": "bob", "role": "root", "tags": [] }));
//! assert_eq!(
//!     register(&allow, &bad).unwrap_err().kind(),
//!     ViolationKind::NotAnAllowedValue,
//! );
//! ```
//!
//! ## Failure behavior
//!
//! A violation always reaches the `on_failure` hook. What happens next depends
//! on [`FailureBehavior`](config::FailureBehavior): `Ignore` continues, `Warn`
//! emits two `tracing` warnings on target `allow` and continues, `Throw` emits
//! the same lines at error level and returns the [`Violation`](foundation::Violation).
//!
//! With the null-bypass enabled a null target passes every predicate.
//!
//! ## Built-in predicates
//!
//! - **Scalar**: `a_boolean`, `a_function`, `a_number`, `an_integer`,
//!   `a_string`, `an_object`, `an_opaque_object`
//! - **Collection**: `an_array`, `an_array_of_arrays`, `an_array_of_integers`,
//!   `an_array_of_numbers`, `an_array_of_strings`, `an_array_of_objects`,
//!   `an_array_of_instances`, `an_array_of_opaque_objects`
//! - **Structural**: `an_instance_of` with a [`Model`](validators::Model), `model_of`
//! - **Enumeration**: `one_of`
//!
//! ## Persistence
//!
//! The null-bypass flag and the failure behavior can be backed by a
//! [`SettingsStore`](config::SettingsStore); see [`config`].

// Violation carries the offending Value and is the Err arm of every predicate.
#![allow(clippy::result_large_err)]

pub mod config;
pub mod engine;
pub mod foundation;
pub mod prelude;
pub mod validators;

pub use engine::{Allow, AllowBuilder, Chain};
pub use foundation::{Value, Violation, ViolationKind};
