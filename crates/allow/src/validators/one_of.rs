//! Enumerated-value membership

use crate::engine::{Allow, Chain};
use crate::foundation::{Value, ViolationKind};

impl Allow {
    /// Requires `value` to strictly equal one of `allowed`.
    ///
    /// `allowed` is either an array (its elements are the candidates) or a
    /// plain object (its values are the candidates, keys are ignored). The
    /// checked value itself must be a scalar; composite targets are reported
    /// as [`ViolationKind::InvalidOneOfTarget`].
    ///
    /// # Examples
    ///
    /// ```
    /// use allow::prelude::*;
    /// use serde_json::json;
    ///
    /// let allow = Allow::new();
    /// let colors = Value::from(json!(["red", "green", "blue"]));
    /// assert!(allow.one_of(&"red".into(), &colors).is_ok());
    ///
    /// let err = allow.one_of(&"mauve".into(), &colors).unwrap_err();
    /// assert_eq!(err.to_string(), "[mauve] is not an allowed value");
    ///
    /// let codes = Value::from(json!({ "ok": 200, "missing": 404 }));
    /// assert!(allow.one_of(&404.into(), &codes).is_ok());
    /// ```
    pub fn one_of(&self, value: &Value, allowed: &Value) -> Chain<'_> {
        if self.bypasses(value) {
            return Ok(self);
        }
        if matches!(value, Value::Array(_) | Value::Object(_) | Value::Function(_))
            || self.is_opaque(value)
        {
            return self.fail(value, ViolationKind::InvalidOneOfTarget);
        }

        let found = match allowed {
            _ if self.is_opaque(allowed) => None,
            Value::Array(candidates) => Some(candidates.iter().any(|c| value.strict_eq(c))),
            Value::Object(candidates) => Some(candidates.values().any(|c| value.strict_eq(c))),
            _ => None,
        };

        match found {
            Some(true) => Ok(self),
            Some(false) => self.fail(value, ViolationKind::NotAnAllowedValue),
            None => self.fail(allowed, ViolationKind::InvalidAllowedValuesArgument),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::FailureBehavior;
    use crate::engine::Allow;
    use crate::foundation::{Function, Value, ViolationKind};
    use rstest::rstest;
    use serde_json::json;

    fn kind_of(result: crate::engine::Chain<'_>) -> Option<ViolationKind> {
        result.err().map(|v| v.kind())
    }

    fn colors() -> Value {
        Value::from(json!(["red", "green", "blue"]))
    }

    #[rstest]
    #[case(json!("red"), None)]
    #[case(json!("blue"), None)]
    #[case(json!("Red"), Some(ViolationKind::NotAnAllowedValue))]
    #[case(json!(1), Some(ViolationKind::NotAnAllowedValue))]
    #[case(json!(null), Some(ViolationKind::NotAnAllowedValue))]
    #[case(json!({}), Some(ViolationKind::InvalidOneOfTarget))]
    #[case(json!(["red"]), Some(ViolationKind::InvalidOneOfTarget))]
    fn array_candidates(#[case] value: serde_json::Value, #[case] expected: Option<ViolationKind>) {
        let allow = Allow::new();
        assert_eq!(kind_of(allow.one_of(&value.into(), &colors())), expected);
    }

    #[test]
    fn object_candidates_use_values_not_keys() {
        let allow = Allow::new();
        let allowed = Value::from(json!({"R": "red", "G": "green"}));
        assert!(allow.one_of(&"red".into(), &allowed).is_ok());
        assert_eq!(
            kind_of(allow.one_of(&"R".into(), &allowed)),
            Some(ViolationKind::NotAnAllowedValue)
        );
    }

    #[test]
    fn equality_is_strict() {
        let allow = Allow::new();
        let allowed = Value::from(json!([1, true, "2"]));
        assert!(allow.one_of(&1.into(), &allowed).is_ok());
        assert!(allow.one_of(&1.0.into(), &allowed).is_ok());
        assert!(allow.one_of(&"1".into(), &allowed).is_err());
        assert!(allow.one_of(&2.into(), &allowed).is_err());
        assert!(allow.one_of(&f64::NAN.into(), &Value::from(vec![f64::NAN])).is_err());
    }

    #[test]
    fn null_is_a_candidate_unless_bypassed() {
        let allow = Allow::new();
        assert!(allow.one_of(&Value::Null, &Value::from(json!([null]))).is_ok());

        let mut lenient = Allow::new();
        lenient.set_allow_null(true);
        assert!(lenient.one_of(&Value::Null, &colors()).is_ok());
    }

    #[rstest]
    #[case(json!("red"))]
    #[case(json!(3))]
    #[case(json!(null))]
    fn allowed_must_be_a_collection(#[case] allowed: serde_json::Value) {
        let allow = Allow::new();
        let err = allow.one_of(&"red".into(), &allowed.clone().into()).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::InvalidAllowedValuesArgument);
        assert_eq!(err.value(), &Value::from(allowed));
    }

    #[test]
    fn functions_and_opaque_objects_are_invalid_targets() {
        let allow = Allow::builder()
            .opaque_predicate(|v| v.as_object().is_some_and(|m| m.contains_key("$$typeof")))
            .build();
        let f = Value::from(Function::new("noop", |_| Value::Null));
        assert_eq!(
            kind_of(allow.one_of(&f, &colors())),
            Some(ViolationKind::InvalidOneOfTarget)
        );
        assert_eq!(
            kind_of(allow.one_of(&"red".into(), &Value::from(json!({"$$typeof": "red"})))),
            Some(ViolationKind::InvalidAllowedValuesArgument)
        );
    }

    #[test]
    fn ignore_continues_after_an_invalid_target() {
        let allow = Allow::builder()
            .failure_behavior(FailureBehavior::Ignore)
            .build();
        assert!(allow.one_of(&Value::from(json!([])), &colors()).is_ok());
    }
}
