//! The validator value and its configuration.
//!
//! [`Allow`] owns everything a predicate consults: the null-bypass flag, the
//! failure behavior, the `on_failure` hook, the host's opaque-object
//! predicate, and optionally a [`SettingsStore`] that setters write through
//! to. Each call site builds (or clones) its own validator, so independent
//! validators never observe each other's settings.
//!
//! # Examples
//!
//! ```
//! use allow::prelude::*;
//! use serde_json::json;
//!
//! let allow = Allow::new();
//! let name = Value::from("Ada");
//! let age = Value::from(36);
//! assert!(allow.a_string(&name, 1..=64).and_then(|a| a.an_integer(&age, 0..=150)).is_ok());
//!
//! let err = allow.an_integer(&Value::from(json!("36")), ..).unwrap_err();
//! assert_eq!(err.to_string(), "[36] is not an integer");
//! ```

mod dispatch;

use crate::config::{FailureBehavior, Settings, SettingsStore};
use crate::foundation::{Value, Violation, ViolationKind};
use std::fmt;
use std::sync::Arc;

/// Hook invoked with every reported violation, in every failure mode.
pub type OnFailure = Arc<dyn Fn(&Violation) + Send + Sync>;

/// Host capability recognizing opaque external objects.
pub type OpaquePredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// What every predicate returns: the validator again on success (the chain
/// handle), or the violation when the failure behavior is `Throw`.
pub type Chain<'a> = Result<&'a Allow, Violation>;

// ============================================================================
// ALLOW
// ============================================================================

/// A configured validator.
///
/// Predicates live in [`crate::validators`]; they take `&self` and return
/// [`Chain`], so checks compose with `?` or [`Result::and_then`].
#[derive(Clone)]
pub struct Allow {
    settings: Settings,
    on_failure: OnFailure,
    is_opaque: OpaquePredicate,
    store: Option<Arc<dyn SettingsStore>>,
}

impl Allow {
    /// A validator with the default settings (`allow_null = false`,
    /// `Throw`), a no-op hook and no opaque objects.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            on_failure: Arc::new(|_| {}),
            is_opaque: Arc::new(|_| false),
            store: None,
        }
    }

    /// A validator whose settings are loaded from, and written back to,
    /// `store`.
    pub fn with_store(store: Arc<dyn SettingsStore>) -> Self {
        Self::builder().store(store).build()
    }

    /// Starts a builder.
    #[must_use]
    pub fn builder() -> AllowBuilder {
        AllowBuilder::default()
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Whether a null target passes every predicate.
    #[must_use]
    pub fn allow_null(&self) -> bool {
        self.settings.allow_null
    }

    /// Enables or disables the null-bypass and persists it when a store is
    /// attached.
    pub fn set_allow_null(&mut self, allow_null: bool) -> &mut Self {
        self.settings.allow_null = allow_null;
        self.persist(
            Settings::ALLOW_NULL_KEY,
            if allow_null { "true" } else { "false" },
        );
        self
    }

    /// Current failure behavior.
    #[must_use]
    pub fn failure_behavior(&self) -> FailureBehavior {
        self.settings.failure_behavior
    }

    /// Changes the failure behavior and persists it when a store is attached.
    pub fn set_failure_behavior(&mut self, behavior: FailureBehavior) -> &mut Self {
        self.settings.failure_behavior = behavior;
        self.persist(Settings::FAILURE_BEHAVIOR_KEY, behavior.as_str());
        self
    }

    /// Parses and applies a failure behavior name (`ignore`, `warn`, `throw`).
    ///
    /// An unknown name is reported as
    /// [`ViolationKind::InvalidConfiguration`] under the current behavior and
    /// leaves the setting unchanged.
    pub fn set_failure_behavior_str(&mut self, behavior: &str) -> Result<&mut Self, Violation> {
        match behavior.parse() {
            Ok(parsed) => Ok(self.set_failure_behavior(parsed)),
            Err(_) => {
                self.fail(&Value::from(behavior), ViolationKind::InvalidConfiguration)?;
                Ok(self)
            }
        }
    }

    /// The current `on_failure` hook.
    #[must_use]
    pub fn on_failure(&self) -> &OnFailure {
        &self.on_failure
    }

    /// Replaces the `on_failure` hook.
    pub fn set_on_failure<F>(&mut self, on_failure: F) -> &mut Self
    where
        F: Fn(&Violation) + Send + Sync + 'static,
    {
        self.on_failure = Arc::new(on_failure);
        self
    }

    /// Whether the host recognizes `value` as an opaque external object.
    #[must_use]
    pub fn is_opaque(&self, value: &Value) -> bool {
        (self.is_opaque)(value)
    }

    /// An object that is not opaque.
    pub(crate) fn is_plain_object(&self, value: &Value) -> bool {
        value.is_object() && !self.is_opaque(value)
    }

    /// Null target under an enabled null-bypass.
    pub(crate) fn bypasses(&self, value: &Value) -> bool {
        self.settings.allow_null && value.is_null()
    }

    fn persist(&self, key: &str, value: &str) {
        if let Some(store) = &self.store {
            if let Err(e) = store.set(key, value) {
                tracing::warn!(key, error = %e, "failed to persist setting");
            }
        }
    }
}

impl Default for Allow {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Allow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Allow")
            .field("settings", &self.settings)
            .field("persistent", &self.store.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Allow`].
///
/// When a store is supplied its persisted settings are loaded first; explicit
/// `allow_null` / `failure_behavior` values then override them without being
/// written back.
///
/// # Examples
///
/// ```
/// use allow::prelude::*;
/// use std::sync::Arc;
///
/// let allow = Allow::builder()
///     .allow_null(true)
///     .failure_behavior(FailureBehavior::Warn)
///     .opaque_predicate(|v: &Value| v.as_object().is_some_and(|m| m.contains_key("$$typeof")))
///     .build();
/// assert!(allow.allow_null());
/// assert_eq!(allow.failure_behavior(), FailureBehavior::Warn);
/// ```
#[derive(Default)]
pub struct AllowBuilder {
    allow_null: Option<bool>,
    failure_behavior: Option<FailureBehavior>,
    on_failure: Option<OnFailure>,
    is_opaque: Option<OpaquePredicate>,
    store: Option<Arc<dyn SettingsStore>>,
}

impl AllowBuilder {
    /// Sets the null-bypass.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_null(mut self, allow_null: bool) -> Self {
        self.allow_null = Some(allow_null);
        self
    }

    /// Sets the failure behavior.
    #[must_use = "builder methods must be chained or built"]
    pub fn failure_behavior(mut self, behavior: FailureBehavior) -> Self {
        self.failure_behavior = Some(behavior);
        self
    }

    /// Sets the `on_failure` hook.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_failure<F>(mut self, on_failure: F) -> Self
    where
        F: Fn(&Violation) + Send + Sync + 'static,
    {
        self.on_failure = Some(Arc::new(on_failure));
        self
    }

    /// Sets the host's opaque-object predicate.
    #[must_use = "builder methods must be chained or built"]
    pub fn opaque_predicate<F>(mut self, is_opaque: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.is_opaque = Some(Arc::new(is_opaque));
        self
    }

    /// Attaches a settings store.
    #[must_use = "builder methods must be chained or built"]
    pub fn store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the validator.
    #[must_use]
    pub fn build(self) -> Allow {
        let mut allow = Allow::new();
        if let Some(store) = self.store {
            allow.settings = Settings::load(store.as_ref());
            allow.store = Some(store);
        }
        if let Some(allow_null) = self.allow_null {
            allow.settings.allow_null = allow_null;
        }
        if let Some(behavior) = self.failure_behavior {
            allow.settings.failure_behavior = behavior;
        }
        if let Some(on_failure) = self.on_failure {
            allow.on_failure = on_failure;
        }
        if let Some(is_opaque) = self.is_opaque {
            allow.is_opaque = is_opaque;
        }
        allow
    }
}

impl fmt::Debug for AllowBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllowBuilder")
            .field("allow_null", &self.allow_null)
            .field("failure_behavior", &self.failure_behavior)
            .field("persistent", &self.store.is_some())
            .finish_non_exhaustive()
    }
}
