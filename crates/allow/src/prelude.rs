//! Prelude module for convenient imports.
//!
//! ```
//! use allow::prelude::*;
//!
//! let allow = Allow::new();
//! assert!(allow.a_boolean(&Value::from(true)).is_ok());
//! ```

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::engine::{Allow, AllowBuilder, Chain, OnFailure, OpaquePredicate};

// ============================================================================
// CONFIG
// ============================================================================

pub use crate::config::{
    FailureBehavior, FileStore, MemoryStore, Settings, SettingsStore, StoreError,
};

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{
    Expected, Function, MAX_SAFE_INTEGER, MIN_SAFE_INTEGER, Map, Value, Violation,
    ViolationCategory, ViolationKind,
};

// ============================================================================
// STRUCTURE
// ============================================================================

pub use crate::validators::{Model, Schema};
