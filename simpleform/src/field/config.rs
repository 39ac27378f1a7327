//! Field configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ConfigError;
use crate::form::Evaluation;

use super::adapter::FieldAdapter;
use super::surface::InputSurface;
use super::value::{InputKind, InputValue};

pub const DEFAULT_MIN_LENGTH: usize = 8;
pub const DEFAULT_MAX_LENGTH: usize = 24;
pub const DEFAULT_EMPTY_MESSAGE: &str = "This field is required";

pub(crate) type SanitizeHook = dyn Fn(&InputValue) -> InputValue + Send + Sync;
pub(crate) type DidSanitizeHook = dyn Fn(&InputValue, &InputValue) + Send + Sync;
pub(crate) type NormalizeHook = dyn Fn(InputValue) -> InputValue + Send + Sync;
pub(crate) type ValidateHook = dyn Fn(&InputValue) -> Option<String> + Send + Sync;
pub(crate) type CheckHook = dyn Fn(&InputValue) -> bool + Send + Sync;
pub(crate) type EvaluateHook = dyn Fn(&str, InputValue, &InputSurface) -> Evaluation + Send + Sync;
pub(crate) type ChangeHook = dyn Fn(&InputValue, &FieldAdapter) + Send + Sync;
pub(crate) type MountHook = dyn Fn(&FieldAdapter) + Send + Sync;

/// Length limits and the messages shown when they fail.
///
/// A limit of `0` disables that bound. Deserializes with defaults for missing
/// keys, so limits can come from a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    pub min_length: usize,
    pub max_length: usize,
    pub min_length_message: Option<String>,
    pub max_length_message: Option<String>,
    pub empty_message: Option<String>,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            min_length_message: None,
            max_length_message: None,
            empty_message: None,
        }
    }
}

impl FieldLimits {
    /// Limits with both bounds disabled
    pub fn unbounded() -> Self {
        Self {
            min_length: 0,
            max_length: 0,
            ..Default::default()
        }
    }

    /// Check that a value of some length can satisfy both bounds.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.min_length > 0 && self.max_length > 0 && self.min_length > self.max_length {
            return Err(ConfigError::InvalidLengthBounds {
                min: self.min_length,
                max: self.max_length,
            });
        }
        Ok(())
    }

    pub fn meets_min(&self, len: usize) -> bool {
        self.min_length == 0 || len >= self.min_length
    }

    pub fn meets_max(&self, len: usize) -> bool {
        self.max_length == 0 || len <= self.max_length
    }

    pub fn min_message(&self) -> String {
        self.min_length_message
            .clone()
            .unwrap_or_else(|| format!("Must be {} characters or more", self.min_length))
    }

    pub fn max_message(&self) -> String {
        self.max_length_message
            .clone()
            .unwrap_or_else(|| format!("Must be {} characters or less", self.max_length))
    }

    pub fn empty_message(&self) -> &str {
        self.empty_message.as_deref().unwrap_or(DEFAULT_EMPTY_MESSAGE)
    }
}

/// Per-field configuration.
///
/// # Example
///
/// ```ignore
/// let config = FieldConfig::new("email")
///     .kind(InputKind::Email)
///     .limits(FieldLimits::unbounded())
///     .on_sanitize(|v| v.as_text().map(|s| s.trim().into()).unwrap_or_else(|| v.clone()))
///     .on_validate(rules::email("Please enter a valid email"));
/// ```
pub struct FieldConfig {
    pub(crate) name: String,
    pub(crate) kind: InputKind,
    pub(crate) placeholder: String,
    pub(crate) limits: FieldLimits,
    pub(crate) reset_value: Option<InputValue>,
    pub(crate) on_sanitize: Option<Box<SanitizeHook>>,
    pub(crate) on_did_sanitize: Option<Box<DidSanitizeHook>>,
    pub(crate) on_normalize: Option<Box<NormalizeHook>>,
    pub(crate) on_validate: Option<Box<ValidateHook>>,
    pub(crate) on_check: Option<Box<CheckHook>>,
    pub(crate) on_evaluate: Option<Box<EvaluateHook>>,
    pub(crate) on_change: Option<Box<ChangeHook>>,
    pub(crate) on_did_mount: Option<Box<MountHook>>,
    pub(crate) optional: bool,
    pub(crate) reset_skipped: bool,
    pub(crate) auto_submitted: bool,
    pub(crate) disabled: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            name: format!("field_{}", Uuid::new_v4().simple()),
            kind: InputKind::default(),
            placeholder: String::new(),
            limits: FieldLimits::default(),
            reset_value: None,
            on_sanitize: None,
            on_did_sanitize: None,
            on_normalize: None,
            on_validate: None,
            on_check: None,
            on_evaluate: None,
            on_change: None,
            on_did_mount: None,
            optional: false,
            reset_skipped: false,
            auto_submitted: false,
            disabled: false,
        }
    }
}

impl FieldConfig {
    /// Create a config for a named field
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn limits(mut self, limits: FieldLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Minimum length in characters (`0` disables)
    pub fn min_length(mut self, min: usize) -> Self {
        self.limits.min_length = min;
        self
    }

    /// Maximum length in characters (`0` disables)
    pub fn max_length(mut self, max: usize) -> Self {
        self.limits.max_length = max;
        self
    }

    pub fn min_length_message(mut self, msg: impl Into<String>) -> Self {
        self.limits.min_length_message = Some(msg.into());
        self
    }

    pub fn max_length_message(mut self, msg: impl Into<String>) -> Self {
        self.limits.max_length_message = Some(msg.into());
        self
    }

    /// Message shown when the field is empty on submit
    pub fn empty_message(mut self, msg: impl Into<String>) -> Self {
        self.limits.empty_message = Some(msg.into());
        self
    }

    /// Value restored by reset (defaults to the empty value of the kind)
    pub fn reset_value(mut self, value: impl Into<InputValue>) -> Self {
        self.reset_value = Some(value.into());
        self
    }

    /// Turn a raw value into a safe one.
    pub fn on_sanitize(
        mut self,
        f: impl Fn(&InputValue) -> InputValue + Send + Sync + 'static,
    ) -> Self {
        self.on_sanitize = Some(Box::new(f));
        self
    }

    /// Told about every value that sanitizing changed: `(raw, sanitized)`.
    pub fn on_did_sanitize(
        mut self,
        f: impl Fn(&InputValue, &InputValue) + Send + Sync + 'static,
    ) -> Self {
        self.on_did_sanitize = Some(Box::new(f));
        self
    }

    /// Turn a sanitized value into its submitted form.
    pub fn on_normalize(
        mut self,
        f: impl Fn(InputValue) -> InputValue + Send + Sync + 'static,
    ) -> Self {
        self.on_normalize = Some(Box::new(f));
        self
    }

    /// Extra validation after the length checks; `Some(message)` fails.
    pub fn on_validate(
        mut self,
        f: impl Fn(&InputValue) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.on_validate = Some(Box::new(f));
        self
    }

    /// Replace the emptiness check; return `true` for empty.
    pub fn on_check(mut self, f: impl Fn(&InputValue) -> bool + Send + Sync + 'static) -> Self {
        self.on_check = Some(Box::new(f));
        self
    }

    /// Replace the evaluation: `(name, normalized value, surface)`.
    pub fn on_evaluate(
        mut self,
        f: impl Fn(&str, InputValue, &InputSurface) -> Evaluation + Send + Sync + 'static,
    ) -> Self {
        self.on_evaluate = Some(Box::new(f));
        self
    }

    /// Called after every edit with the sanitized value.
    pub fn on_change(
        mut self,
        f: impl Fn(&InputValue, &FieldAdapter) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Called once the field is registered with its form.
    pub fn on_did_mount(mut self, f: impl Fn(&FieldAdapter) + Send + Sync + 'static) -> Self {
        self.on_did_mount = Some(Box::new(f));
        self
    }

    /// An optional field may stay empty.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Keep the value when the form resets after a submit.
    pub fn reset_skipped(mut self, skipped: bool) -> Self {
        self.reset_skipped = skipped;
        self
    }

    /// Submit the form as soon as this field commits a value.
    pub fn auto_submitted(mut self, auto: bool) -> Self {
        self.auto_submitted = auto;
        self
    }

    /// A disabled field ignores key events.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The value reset restores
    pub(crate) fn resolved_reset_value(&self) -> InputValue {
        self.reset_value
            .clone()
            .unwrap_or_else(|| InputValue::empty_for(self.kind))
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("limits", &self.limits)
            .field("reset_value", &self.reset_value)
            .field("optional", &self.optional)
            .field("reset_skipped", &self.reset_skipped)
            .field("auto_submitted", &self.auto_submitted)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}
