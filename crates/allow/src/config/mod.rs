//! Failure behavior and persisted settings.
//!
//! Two settings survive process restarts through a [`SettingsStore`]:
//! `allow.allowNull` (`"true"` enables the null-bypass, anything else
//! disables it) and `allow.failureBehavior` (`ignore`, `warn` or `throw`).

pub mod store;

pub use store::{FileStore, MemoryStore, SettingsStore, StoreError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// FAILURE BEHAVIOR
// ============================================================================

/// What a reported violation does to the caller.
///
/// The `on_failure` hook runs first in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureBehavior {
    /// Continue as if the value were valid.
    Ignore,
    /// Emit warning-level diagnostics and continue.
    Warn,
    /// Emit error-level diagnostics and return the violation as `Err`.
    #[default]
    Throw,
}

impl FailureBehavior {
    /// Every behavior, in declaration order.
    pub const ALL: [FailureBehavior; 3] = [
        FailureBehavior::Ignore,
        FailureBehavior::Warn,
        FailureBehavior::Throw,
    ];

    /// The persisted name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FailureBehavior::Ignore => "ignore",
            FailureBehavior::Warn => "warn",
            FailureBehavior::Throw => "throw",
        }
    }
}

impl fmt::Display for FailureBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure behavior name that is not `ignore`, `warn` or `throw`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown failure behavior `{0}` (expected ignore, warn or throw)")]
pub struct UnknownFailureBehavior(pub String);

impl FromStr for FailureBehavior {
    type Err = UnknownFailureBehavior;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FailureBehavior::ALL
            .into_iter()
            .find(|behavior| behavior.as_str() == s)
            .ok_or_else(|| UnknownFailureBehavior(s.to_owned()))
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// The persisted part of a validator's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// When `true`, a null target passes every predicate.
    pub allow_null: bool,
    /// What a violation does to the caller.
    pub failure_behavior: FailureBehavior,
}

impl Settings {
    /// Store key for [`Settings::allow_null`].
    pub const ALLOW_NULL_KEY: &'static str = "allow.allowNull";

    /// Store key for [`Settings::failure_behavior`].
    pub const FAILURE_BEHAVIOR_KEY: &'static str = "allow.failureBehavior";

    /// Reads both settings, falling back to the defaults for anything
    /// missing, unreadable or unrecognized.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let allow_null = read(store, Self::ALLOW_NULL_KEY).is_some_and(|raw| raw == "true");

        let failure_behavior = match read(store, Self::FAILURE_BEHAVIOR_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|e: UnknownFailureBehavior| {
                tracing::warn!(
                    key = Self::FAILURE_BEHAVIOR_KEY,
                    error = %e,
                    "ignoring persisted failure behavior"
                );
                FailureBehavior::default()
            }),
            None => FailureBehavior::default(),
        };

        let settings = Self {
            allow_null,
            failure_behavior,
        };
        tracing::debug!(?settings, "loaded persisted settings");
        settings
    }

    /// Writes both settings.
    pub fn save(&self, store: &dyn SettingsStore) -> Result<(), StoreError> {
        store.set(Self::ALLOW_NULL_KEY, if self.allow_null { "true" } else { "false" })?;
        store.set(Self::FAILURE_BEHAVIOR_KEY, self.failure_behavior.as_str())
    }
}

fn read(store: &dyn SettingsStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "settings store unavailable, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("ignore", FailureBehavior::Ignore)]
    #[case("warn", FailureBehavior::Warn)]
    #[case("throw", FailureBehavior::Throw)]
    fn parses_behavior_names(#[case] name: &str, #[case] expected: FailureBehavior) {
        assert_eq!(name.parse::<FailureBehavior>(), Ok(expected));
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    #[case("THROW")]
    #[case("")]
    #[case("log")]
    fn rejects_unknown_names(#[case] name: &str) {
        assert_eq!(
            name.parse::<FailureBehavior>(),
            Err(UnknownFailureBehavior(name.to_owned()))
        );
    }

    #[test]
    fn defaults_match_an_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
        assert_eq!(
            Settings::default(),
            Settings {
                allow_null: false,
                failure_behavior: FailureBehavior::Throw,
            }
        );
    }

    #[test]
    fn only_the_literal_true_enables_null_bypass() {
        let store = MemoryStore::new();
        store.set(Settings::ALLOW_NULL_KEY, "TRUE").ok();
        assert!(!Settings::load(&store).allow_null);
        store.set(Settings::ALLOW_NULL_KEY, "true").ok();
        assert!(Settings::load(&store).allow_null);
    }

    #[test]
    fn unrecognized_persisted_behavior_falls_back_to_throw() {
        let store = MemoryStore::new();
        store.set(Settings::FAILURE_BEHAVIOR_KEY, "shout").ok();
        assert_eq!(
            Settings::load(&store).failure_behavior,
            FailureBehavior::Throw
        );
    }

    #[test]
    fn save_then_load() {
        let store = MemoryStore::new();
        let settings = Settings {
            allow_null: true,
            failure_behavior: FailureBehavior::Warn,
        };
        assert!(settings.save(&store).is_ok());
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn serde_uses_camel_case_and_lowercase_names() {
        let settings = Settings {
            allow_null: true,
            failure_behavior: FailureBehavior::Ignore,
        };
        let json = serde_json::to_value(settings).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({"allowNull": true, "failureBehavior": "ignore"}))
        );
    }
}
