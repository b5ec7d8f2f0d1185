//! Scalar and plain-object predicates

use crate::engine::{Allow, Chain};
use crate::foundation::bounds::{LengthBounds, Span};
use crate::foundation::{Expected, Value, Violation, ViolationKind};
use std::ops::RangeBounds;

impl Allow {
    /// Requires `true` or `false`.
    pub fn a_boolean(&self, value: &Value) -> Chain<'_> {
        if value.is_bool() {
            Ok(self)
        } else {
            self.fail(value, ViolationKind::TypeMismatch(Expected::Boolean))
        }
    }

    /// Requires a [`Function`](crate::foundation::Function).
    pub fn a_function(&self, value: &Value) -> Chain<'_> {
        if value.is_function() {
            Ok(self)
        } else {
            self.fail(value, ViolationKind::TypeMismatch(Expected::Function))
        }
    }

    /// Requires a number inside `range`.
    ///
    /// An open side of the range stops at the safe-integer span. A NaN bound
    /// is reported as [`ViolationKind::InvalidBound`].
    ///
    /// # Examples
    ///
    /// ```
    /// use allow::prelude::*;
    ///
    /// let allow = Allow::new();
    /// assert!(allow.a_number(&Value::from(0.5), 0.0..=1.0).is_ok());
    /// assert_eq!(
    ///     allow.a_number(&Value::from(1.5), 0.0..=1.0).unwrap_err().kind(),
    ///     ViolationKind::TooLarge,
    /// );
    /// ```
    pub fn a_number(&self, value: &Value, range: impl RangeBounds<f64>) -> Chain<'_> {
        let span = Span::from_floats(&range);
        if let Some(bound) = span.nan_bound() {
            self.fail(&Value::from(bound), ViolationKind::InvalidBound)?;
        }
        match value {
            Value::Number(n) => self.fail_if(value, span.check(*n)),
            _ => self.fail(value, ViolationKind::TypeMismatch(Expected::Number)),
        }
    }

    /// Requires a whole number inside `range` (inclusive unless written with
    /// `..`).
    ///
    /// # Examples
    ///
    /// ```
    /// use allow::prelude::*;
    ///
    /// let allow = Allow::new();
    /// assert!(allow.an_integer(&Value::from(7), 1..=10).is_ok());
    /// assert!(allow.an_integer(&Value::from(7.5), ..).is_err());
    /// assert!(allow.an_integer(&Value::from(10), 1..10).is_err());
    /// ```
    pub fn an_integer(&self, value: &Value, range: impl RangeBounds<i64>) -> Chain<'_> {
        match value {
            Value::Number(n) if value.is_integer() => {
                self.fail_if(value, Span::from_integers(&range).check(*n))
            }
            _ => self.fail(value, ViolationKind::TypeMismatch(Expected::Integer)),
        }
    }

    /// Requires a string whose character count lies inside `length`.
    ///
    /// # Examples
    ///
    /// ```
    /// use allow::prelude::*;
    ///
    /// let allow = Allow::new();
    /// assert!(allow.a_string(&Value::from("héllo"), 5..=5).is_ok());
    /// assert_eq!(
    ///     allow.a_string(&Value::from(""), 1..).unwrap_err().kind(),
    ///     ViolationKind::TooShort,
    /// );
    /// ```
    pub fn a_string(&self, value: &Value, length: impl RangeBounds<usize>) -> Chain<'_> {
        let bounds = self.length_bounds(&length)?;
        match value {
            Value::String(text) => self.check_length(value, text.chars().count(), bounds),
            _ => self.fail(value, ViolationKind::TypeMismatch(Expected::String)),
        }
    }

    /// Requires a plain object whose key count lies inside `keys`.
    ///
    /// An opaque external object is rejected with
    /// [`ViolationKind::IsOpaqueObject`] before the type check.
    pub fn an_object(&self, value: &Value, keys: impl RangeBounds<usize>) -> Chain<'_> {
        let bounds = self.length_bounds(&keys)?;
        if self.is_opaque(value) {
            return self.fail(value, ViolationKind::IsOpaqueObject);
        }
        match value {
            Value::Object(map) => self.check_length(value, map.len(), bounds),
            _ => self.fail(value, ViolationKind::TypeMismatch(Expected::Object)),
        }
    }

    /// Requires a value the host recognizes as an opaque external object.
    pub fn an_opaque_object(&self, value: &Value) -> Chain<'_> {
        if self.is_opaque(value) {
            Ok(self)
        } else {
            self.fail(value, ViolationKind::TypeMismatch(Expected::OpaqueObject))
        }
    }

    // ------------------------------------------------------------------------
    // shared helpers
    // ------------------------------------------------------------------------

    /// Validates and resolves a length range. Each side must be a safe
    /// non-negative integer; an offending side is reported as
    /// [`ViolationKind::InvalidBound`] and clamped if the behavior continues.
    pub(crate) fn length_bounds(
        &self,
        range: &impl RangeBounds<usize>,
    ) -> Result<LengthBounds, Violation> {
        for bound in LengthBounds::invalid_sides(range) {
            self.fail(&bound, ViolationKind::InvalidBound)?;
        }
        let (min, max) = LengthBounds::requested(range);
        Ok(LengthBounds::clamped(min, max))
    }

    pub(crate) fn check_length(
        &self,
        value: &Value,
        len: usize,
        bounds: LengthBounds,
    ) -> Chain<'_> {
        self.fail_if(value, bounds.check(len))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::FailureBehavior;
    use crate::engine::Allow;
    use crate::foundation::{Expected, Function, MAX_SAFE_INTEGER, Value, ViolationKind};
    use rstest::rstest;
    use serde_json::json;

    fn kind_of(result: crate::engine::Chain<'_>) -> Option<ViolationKind> {
        result.err().map(|v| v.kind())
    }

    fn opaque_aware() -> Allow {
        Allow::builder()
            .opaque_predicate(|v| v.as_object().is_some_and(|m| m.contains_key("$$typeof")))
            .build()
    }

    #[rstest]
    #[case(json!(true), None)]
    #[case(json!(false), None)]
    #[case(json!(0), Some(ViolationKind::TypeMismatch(Expected::Boolean)))]
    #[case(json!("true"), Some(ViolationKind::TypeMismatch(Expected::Boolean)))]
    fn booleans(#[case] value: serde_json::Value, #[case] expected: Option<ViolationKind>) {
        let allow = Allow::new();
        assert_eq!(kind_of(allow.a_boolean(&value.into())), expected);
    }

    #[test]
    fn functions() {
        let allow = Allow::new();
        let f = Value::from(Function::new("f", |_| Value::Null));
        assert!(allow.a_function(&f).is_ok());
        assert_eq!(
            kind_of(allow.a_function(&Value::from("f"))),
            Some(ViolationKind::TypeMismatch(Expected::Function))
        );
    }

    #[rstest]
    #[case(json!(5), None)]
    #[case(json!(0), None)]
    #[case(json!(10), None)]
    #[case(json!(-1), Some(ViolationKind::TooSmall))]
    #[case(json!(11), Some(ViolationKind::TooLarge))]
    #[case(json!(5.5), Some(ViolationKind::TypeMismatch(Expected::Integer)))]
    #[case(json!("5"), Some(ViolationKind::TypeMismatch(Expected::Integer)))]
    #[case(json!(null), Some(ViolationKind::TypeMismatch(Expected::Integer)))]
    fn integers(#[case] value: serde_json::Value, #[case] expected: Option<ViolationKind>) {
        let allow = Allow::new();
        assert_eq!(kind_of(allow.an_integer(&value.into(), 0..=10)), expected);
    }

    #[test]
    fn integer_default_range_is_the_safe_span() {
        let allow = Allow::new();
        assert!(allow.an_integer(&Value::from(MAX_SAFE_INTEGER), ..).is_ok());
        assert_eq!(
            kind_of(allow.an_integer(&Value::from(2f64.powi(60)), ..)),
            Some(ViolationKind::TooLarge)
        );
    }

    #[test]
    fn numbers() {
        let allow = Allow::new();
        assert!(allow.a_number(&Value::from(-2.5), ..).is_ok());
        assert!(allow.a_number(&Value::from(0.0), 0.0..).is_ok());
        assert_eq!(
            kind_of(allow.a_number(&Value::from("1"), ..)),
            Some(ViolationKind::TypeMismatch(Expected::Number))
        );
        assert_eq!(kind_of(allow.a_number(&Value::from(1.0), 1.0..)), None);
        assert_eq!(
            kind_of(allow.a_number(&Value::from(1.0), ..1.0)),
            Some(ViolationKind::TooLarge)
        );
    }

    #[test]
    fn nan_number_bound_is_invalid() {
        let allow = Allow::new();
        assert_eq!(
            kind_of(allow.a_number(&Value::from(1.0), ..=f64::NAN)),
            Some(ViolationKind::InvalidBound)
        );
    }

    #[rstest]
    #[case("", 0..=3, None)]
    #[case("abc", 0..=3, None)]
    #[case("abcd", 0..=3, Some(ViolationKind::TooLong))]
    #[case("ab", 3..=5, Some(ViolationKind::TooShort))]
    #[case("日本語", 3..=3, None)]
    fn string_lengths(
        #[case] text: &str,
        #[case] length: std::ops::RangeInclusive<usize>,
        #[case] expected: Option<ViolationKind>,
    ) {
        let allow = Allow::new();
        assert_eq!(kind_of(allow.a_string(&Value::from(text), length)), expected);
    }

    #[test]
    fn non_string_is_a_type_mismatch() {
        let allow = Allow::new();
        assert_eq!(
            kind_of(allow.a_string(&Value::from(42), ..)),
            Some(ViolationKind::TypeMismatch(Expected::String))
        );
    }

    #[test]
    fn negative_length_bound_is_reported_before_the_type_check() {
        let allow = Allow::new();
        let err = allow.a_string(&Value::from(42), ..0).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::InvalidBound);
        assert_eq!(err.value(), &Value::from(-1));
    }

    #[test]
    fn oversized_length_bound_is_reported_as_written() {
        let allow = Allow::new();
        let err = allow.a_string(&Value::from("x"), ..=usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::InvalidBound);
        assert_eq!(err.to_string(), format!("[{}] is not a valid bound", usize::MAX));
    }

    #[test]
    fn invalid_bound_is_clamped_when_ignoring() {
        let allow = Allow::builder()
            .failure_behavior(FailureBehavior::Ignore)
            .build();
        assert!(allow.a_string(&Value::from("x"), ..0).is_ok());
    }

    #[test]
    fn objects() {
        let allow = opaque_aware();
        assert!(allow.an_object(&Value::from(json!({})), ..).is_ok());
        assert!(allow.an_object(&Value::from(json!({"a": 1})), 1..=1).is_ok());
        assert_eq!(
            kind_of(allow.an_object(&Value::from(json!({"a": 1, "b": 2})), ..=1)),
            Some(ViolationKind::TooLong)
        );
        assert_eq!(
            kind_of(allow.an_object(&Value::from(json!([])), ..)),
            Some(ViolationKind::TypeMismatch(Expected::Object))
        );
        assert_eq!(
            kind_of(allow.an_object(&Value::Null, ..)),
            Some(ViolationKind::TypeMismatch(Expected::Object))
        );
    }

    #[test]
    fn opaque_objects_are_not_plain_objects() {
        let allow = opaque_aware();
        let element = Value::from(json!({"$$typeof": "element", "props": {}}));
        assert_eq!(
            kind_of(allow.an_object(&element, ..)),
            Some(ViolationKind::IsOpaqueObject)
        );
        assert!(allow.an_opaque_object(&element).is_ok());
        assert_eq!(
            kind_of(allow.an_opaque_object(&Value::from(json!({})))),
            Some(ViolationKind::TypeMismatch(Expected::OpaqueObject))
        );
    }

    #[test]
    fn chaining_stops_at_the_first_throw() {
        let allow = Allow::new();
        let result = allow
            .a_string(&Value::from("ok"), ..)
            .and_then(|a| a.an_integer(&Value::from("nope"), ..))
            .and_then(|a| a.a_boolean(&Value::from(1)));
        assert_eq!(
            kind_of(result),
            Some(ViolationKind::TypeMismatch(Expected::Integer))
        );
    }
}
