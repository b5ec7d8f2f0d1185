//! Violation types reported through the failure dispatcher.
//!
//! A [`Violation`] pairs a [`ViolationKind`] with the offending [`Value`].
//! Its `Display` form is the diagnostic line `[<value>] <message>`.

use crate::foundation::Value;
use std::fmt;

// ============================================================================
// EXPECTED TYPE
// ============================================================================

/// The type a predicate expected when it reported a type mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    /// `true` or `false`.
    Boolean,
    /// A callable.
    Function,
    /// Any number.
    Number,
    /// A whole number.
    Integer,
    /// A string.
    String,
    /// An array.
    Array,
    /// A plain (non-opaque) object.
    Object,
    /// A value recognized by the host's opaque-object predicate.
    OpaqueObject,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Expected::Boolean => "a Boolean",
            Expected::Function => "a function",
            Expected::Number => "a number",
            Expected::Integer => "an integer",
            Expected::String => "a string",
            Expected::Array => "an array",
            Expected::Object => "an object",
            Expected::OpaqueObject => "an opaque external object",
        })
    }
}

// ============================================================================
// VIOLATION KIND
// ============================================================================

/// What went wrong. The `Display` form is the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ViolationKind {
    /// Wrong primitive, array or object kind.
    #[error("is not {0}")]
    TypeMismatch(Expected),

    /// An opaque external object where a plain object was required.
    #[error("is an opaque external object")]
    IsOpaqueObject,

    /// An array of objects holding an opaque external object.
    #[error("contains an opaque external object")]
    ContainsOpaqueObject,

    /// Below the inclusive minimum.
    #[error("is too small")]
    TooSmall,

    /// Above the inclusive maximum.
    #[error("is too large")]
    TooLarge,

    /// Fewer characters, elements or keys than allowed.
    #[error("is too short")]
    TooShort,

    /// More characters, elements or keys than allowed.
    #[error("is too long")]
    TooLong,

    /// At least one key of the model is absent. Which one is not reported.
    #[error("is missing a required key")]
    MissingKey,

    /// A key's value disagrees with the model on object-ness or array-ness.
    #[error("does not match the model object")]
    ShapeMismatch,

    /// Not a member of the allowed values.
    #[error("is not an allowed value")]
    NotAnAllowedValue,

    /// Objects, arrays, functions and opaque objects cannot be enumerated.
    #[error("cannot be an object, array, function, or an opaque external object")]
    InvalidOneOfTarget,

    /// The allowed values were neither an array nor an object.
    #[error("allowed values must be supplied in an object or an array")]
    InvalidAllowedValuesArgument,

    /// Unrecognized failure behavior name.
    #[error("is not a recognized failure behavior (expected ignore, warn or throw)")]
    InvalidConfiguration,

    /// A range or length bound that cannot be used.
    #[error("is not a valid bound")]
    InvalidBound,
}

/// Coarse grouping of [`ViolationKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationCategory {
    /// Type checks, including opaque-object rejection.
    TypeMismatch,
    /// `TooSmall` / `TooLarge`.
    RangeViolation,
    /// `TooShort` / `TooLong`.
    LengthViolation,
    /// A model key is absent.
    MissingKey,
    /// A model key has the wrong shape.
    ShapeMismatch,
    /// Enumerated-value miss.
    NotAnAllowedValue,
    /// Enumerated-value check on a composite.
    InvalidOneOfTarget,
    /// Enumerated-value check with unusable allowed values.
    InvalidAllowedValuesArgument,
    /// Bad settings value.
    InvalidConfiguration,
    /// Bad range or length bound.
    InvalidBound,
}

impl ViolationKind {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ViolationKind::TypeMismatch(Expected::Integer) => "not_an_integer",
            ViolationKind::TypeMismatch(_) => "type_mismatch",
            ViolationKind::IsOpaqueObject => "is_opaque_object",
            ViolationKind::ContainsOpaqueObject => "contains_opaque_object",
            ViolationKind::TooSmall => "too_small",
            ViolationKind::TooLarge => "too_large",
            ViolationKind::TooShort => "too_short",
            ViolationKind::TooLong => "too_long",
            ViolationKind::MissingKey => "missing_key",
            ViolationKind::ShapeMismatch => "shape_mismatch",
            ViolationKind::NotAnAllowedValue => "not_an_allowed_value",
            ViolationKind::InvalidOneOfTarget => "invalid_one_of_target",
            ViolationKind::InvalidAllowedValuesArgument => "invalid_allowed_values_argument",
            ViolationKind::InvalidConfiguration => "invalid_configuration",
            ViolationKind::InvalidBound => "invalid_bound",
        }
    }

    /// The group this kind belongs to.
    #[must_use]
    pub fn category(self) -> ViolationCategory {
        match self {
            ViolationKind::TypeMismatch(_)
            | ViolationKind::IsOpaqueObject
            | ViolationKind::ContainsOpaqueObject => ViolationCategory::TypeMismatch,
            ViolationKind::TooSmall | ViolationKind::TooLarge => ViolationCategory::RangeViolation,
            ViolationKind::TooShort | ViolationKind::TooLong => ViolationCategory::LengthViolation,
            ViolationKind::MissingKey => ViolationCategory::MissingKey,
            ViolationKind::ShapeMismatch => ViolationCategory::ShapeMismatch,
            ViolationKind::NotAnAllowedValue => ViolationCategory::NotAnAllowedValue,
            ViolationKind::InvalidOneOfTarget => ViolationCategory::InvalidOneOfTarget,
            ViolationKind::InvalidAllowedValuesArgument => {
                ViolationCategory::InvalidAllowedValuesArgument
            }
            ViolationKind::InvalidConfiguration => ViolationCategory::InvalidConfiguration,
            ViolationKind::InvalidBound => ViolationCategory::InvalidBound,
        }
    }
}

// ============================================================================
// VIOLATION
// ============================================================================

/// A reported validation failure.
///
/// Returned as the `Err` arm of a predicate when the failure behavior is
/// [`Throw`](crate::config::FailureBehavior::Throw), and handed to the
/// `on_failure` hook in every mode.
///
/// # Examples
///
/// ```
/// use allow::foundation::{Expected, Value, Violation, ViolationKind};
///
/// let violation = Violation::new(ViolationKind::TypeMismatch(Expected::String), Value::from(42));
/// assert_eq!(violation.to_string(), "[42] is not a string");
/// assert_eq!(violation.code(), "type_mismatch");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[{value}] {kind}")]
pub struct Violation {
    kind: ViolationKind,
    value: Value,
}

impl Violation {
    /// Creates a violation for `value`.
    pub fn new(kind: ViolationKind, value: Value) -> Self {
        Self { kind, value }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// The offending value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Shorthand for `self.kind().code()`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Shorthand for `self.kind().category()`.
    #[must_use]
    pub fn category(&self) -> ViolationCategory {
        self.kind.category()
    }
}
