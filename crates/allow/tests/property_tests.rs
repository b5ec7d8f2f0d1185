//! Property-based tests for the predicate engine.

use allow::prelude::*;
use proptest::prelude::*;

fn any_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        ".{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-c]", inner), 0..4)
                .prop_map(|pairs| pairs.into_iter().collect::<Value>()),
        ]
    })
}

// ============================================================================
// RANGES
// ============================================================================

proptest! {
    #[test]
    fn integer_range_is_inclusive(n in -1_000i64..1_000, lo in -500i64..0, hi in 0i64..500) {
        let allow = Allow::new();
        let result = allow.an_integer(&Value::from(n), lo..=hi);
        prop_assert_eq!(result.is_ok(), lo <= n && n <= hi);
        if let Err(violation) = result {
            let expected = if n < lo { ViolationKind::TooSmall } else { ViolationKind::TooLarge };
            prop_assert_eq!(violation.kind(), expected);
        }
    }

    #[test]
    fn fractional_numbers_are_not_integers(whole in -1_000i32..1_000, frac in 0.01f64..0.99) {
        let allow = Allow::new();
        let value = Value::from(f64::from(whole) + frac);
        prop_assert_eq!(
            allow.an_integer(&value, ..).map_err(|v| v.kind()).err(),
            Some(ViolationKind::TypeMismatch(Expected::Integer))
        );
    }

    #[test]
    fn string_length_counts_characters(s in "\\PC{0,20}", max in 0usize..20) {
        let allow = Allow::new();
        let ok = allow.a_string(&Value::from(s.as_str()), ..=max).is_ok();
        prop_assert_eq!(ok, s.chars().count() <= max);
    }
}

// ============================================================================
// FAILURE BEHAVIOR
// ============================================================================

proptest! {
    #[test]
    fn only_throw_returns_err(value in any_value()) {
        for behavior in FailureBehavior::ALL {
            let allow = Allow::builder().failure_behavior(behavior).build();
            let result = allow.an_array_of_numbers(&value, ..);
            if behavior != FailureBehavior::Throw {
                prop_assert!(result.is_ok());
            }
        }
    }

    #[test]
    fn null_bypass_accepts_null_everywhere(min in 1usize..10) {
        let allow = Allow::builder().allow_null(true).build();
        let null = Value::Null;
        prop_assert!(allow.a_string(&null, min..).is_ok());
        prop_assert!(allow.an_array_of_strings(&null, min..).is_ok());
        prop_assert!(allow.an_object(&null, min..).is_ok());
        prop_assert!(allow.an_instance_of(&null, &Model::new().scalar("k")).is_ok());
    }

    #[test]
    fn every_object_matches_the_empty_model(value in any_value()) {
        let allow = Allow::new();
        let result = allow.an_instance_of(&value, &Model::new());
        prop_assert_eq!(result.is_ok(), value.is_object());
    }

    #[test]
    fn an_object_matches_its_own_derived_model(value in any_value()) {
        if let Some(model) = Model::from_value(&value) {
            let allow = Allow::new();
            prop_assert!(allow.an_instance_of(&value, &model).is_ok());
        }
    }
}
