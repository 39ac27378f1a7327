//! Where a field reports its committed state.

use std::sync::{Arc, RwLock};

use super::value::InputValue;

/// Storage for a field's reported state.
///
/// The field writes through this trait whenever a commit, check or validation
/// changes something; applications with their own store implement it to
/// receive those updates. [`FieldState`] is the in-memory default.
pub trait FieldStore: Send + Sync {
    /// The committed (sanitized) value.
    fn value(&self) -> InputValue;

    fn set_value(&self, value: InputValue);

    /// Whether the field was last found empty.
    fn is_empty(&self) -> bool;

    fn set_empty(&self, empty: bool);

    /// Whether the field was last found valid.
    fn is_valid(&self) -> bool;

    fn set_valid(&self, valid: bool);

    /// The last validation error message, if any.
    fn error_message(&self) -> Option<String>;

    fn set_error_message(&self, message: Option<String>);
}

#[derive(Debug)]
struct FieldStateInner {
    value: InputValue,
    empty: bool,
    valid: bool,
    error_message: Option<String>,
}

/// In-memory field state.
///
/// Starts empty and valid, like an untouched field. Clones share state.
#[derive(Debug, Clone)]
pub struct FieldState {
    inner: Arc<RwLock<FieldStateInner>>,
}

impl FieldState {
    /// Create state holding an initial value
    pub fn new(value: InputValue) -> Self {
        Self {
            inner: Arc::new(RwLock::new(FieldStateInner {
                value,
                empty: true,
                valid: true,
                error_message: None,
            })),
        }
    }
}

impl Default for FieldState {
    fn default() -> Self {
        Self::new(InputValue::default())
    }
}

impl FieldStore for FieldState {
    fn value(&self) -> InputValue {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, value: InputValue) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = value;
        }
    }

    fn is_empty(&self) -> bool {
        self.inner.read().map(|guard| guard.empty).unwrap_or(true)
    }

    fn set_empty(&self, empty: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.empty = empty;
        }
    }

    fn is_valid(&self) -> bool {
        self.inner.read().map(|guard| guard.valid).unwrap_or(false)
    }

    fn set_valid(&self, valid: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.valid = valid;
        }
    }

    fn error_message(&self) -> Option<String> {
        self.inner
            .read()
            .map(|guard| guard.error_message.clone())
            .unwrap_or(None)
    }

    fn set_error_message(&self, message: Option<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error_message = message;
        }
    }
}
