//! The failure funnel every predicate reports through.

use super::{Allow, Chain};
use crate::config::FailureBehavior;
use crate::foundation::{Value, Violation, ViolationKind};

/// `tracing` target for violation diagnostics.
pub(crate) const DIAGNOSTIC_TARGET: &str = "allow";

impl Allow {
    /// Reports `kind` against `value`.
    ///
    /// 1. A null `value` under an enabled null-bypass passes.
    /// 2. Otherwise the `on_failure` hook sees the violation.
    /// 3. `Ignore` passes, `Warn` logs two warning lines and passes, `Throw`
    ///    logs two error lines and returns the violation. The first line is
    ///    the raw value tagged with its kind, the second the violation.
    pub(crate) fn fail(&self, value: &Value, kind: ViolationKind) -> Chain<'_> {
        if self.bypasses(value) {
            return Ok(self);
        }

        let violation = Violation::new(kind, value.clone());
        (self.on_failure)(&violation);

        match self.settings.failure_behavior {
            FailureBehavior::Ignore => Ok(self),
            FailureBehavior::Warn => {
                tracing::warn!(target: DIAGNOSTIC_TARGET, kind = value.kind_name(), "{value}");
                tracing::warn!(target: DIAGNOSTIC_TARGET, code = kind.code(), "{violation}");
                Ok(self)
            }
            FailureBehavior::Throw => {
                tracing::error!(target: DIAGNOSTIC_TARGET, kind = value.kind_name(), "{value}");
                tracing::error!(target: DIAGNOSTIC_TARGET, code = kind.code(), "{violation}");
                Err(violation)
            }
        }
    }

    /// Reports `kind` when present, otherwise passes.
    pub(crate) fn fail_if(&self, value: &Value, kind: Option<ViolationKind>) -> Chain<'_> {
        match kind {
            Some(kind) => self.fail(value, kind),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Expected;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recording(behavior: FailureBehavior) -> (Allow, Arc<Mutex<Vec<Violation>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let allow = Allow::builder()
            .failure_behavior(behavior)
            .on_failure(move |v| sink.lock().push(v.clone()))
            .build();
        (allow, seen)
    }

    #[test]
    fn throw_returns_the_violation() {
        let (allow, seen) = recording(FailureBehavior::Throw);
        let err = allow
            .fail(&Value::from(1), ViolationKind::TooSmall)
            .unwrap_err();
        assert_eq!(err.kind(), ViolationKind::TooSmall);
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn warn_and_ignore_pass_after_reporting() {
        for behavior in [FailureBehavior::Warn, FailureBehavior::Ignore] {
            let (allow, seen) = recording(behavior);
            assert!(allow
                .fail(&Value::from("x"), ViolationKind::TypeMismatch(Expected::Number))
                .is_ok());
            assert_eq!(seen.lock().len(), 1);
        }
    }

    #[test]
    fn null_bypass_skips_the_hook() {
        let (mut allow, seen) = recording(FailureBehavior::Throw);
        allow.set_allow_null(true);
        assert!(allow.fail(&Value::Null, ViolationKind::MissingKey).is_ok());
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn null_is_reported_without_bypass() {
        let (allow, seen) = recording(FailureBehavior::Ignore);
        assert!(allow.fail(&Value::Null, ViolationKind::MissingKey).is_ok());
        assert_eq!(seen.lock()[0].value(), &Value::Null);
    }

    #[test]
    fn fail_if_none_passes_silently() {
        let (allow, seen) = recording(FailureBehavior::Throw);
        assert!(allow.fail_if(&Value::from(1), None).is_ok());
        assert!(seen.lock().is_empty());
    }
}
