//! The field side of the form protocol.

use std::sync::Arc;

use log::{debug, warn};

use crate::form::{Evaluation, FormContext};
use crate::hooks::{Attachment, FieldHooks};

use super::config::FieldConfig;
use super::store::{FieldState, FieldStore};
use super::surface::InputSurface;
use super::value::{InputKind, InputValue};

/// Everything the registered callbacks need, shared with the adapter.
pub(crate) struct FieldInner {
    pub(crate) config: FieldConfig,
    pub(crate) context: FormContext,
    pub(crate) surface: InputSurface,
    store: Arc<dyn FieldStore>,
}

impl FieldInner {
    fn uses_boolean_value(&self) -> bool {
        self.config.kind.uses_boolean_value()
    }

    // -------------------------------------------------------------------------
    // Value pipeline
    // -------------------------------------------------------------------------

    pub(crate) fn sanitized_value(&self) -> InputValue {
        let original = self.surface.raw_value();
        if self.uses_boolean_value() {
            return InputValue::Bool(original.is_truthy());
        }

        let Some(sanitize) = &self.config.on_sanitize else {
            return original;
        };
        let sanitized = sanitize(&original);
        if sanitized != original {
            if let Some(did_sanitize) = &self.config.on_did_sanitize {
                did_sanitize(&original, &sanitized);
            }
        }
        sanitized
    }

    fn normalized_value(&self) -> InputValue {
        let sanitized = self.sanitized_value();
        if self.uses_boolean_value() {
            return sanitized;
        }
        match &self.config.on_normalize {
            Some(normalize) => normalize(sanitized),
            None => sanitized,
        }
    }

    fn has_value(&self) -> bool {
        self.uses_boolean_value() || self.sanitized_value().has_value()
    }

    fn meets_min_length(&self) -> bool {
        !self.config.kind.has_length_limits()
            || self.config.limits.meets_min(self.sanitized_value().len())
    }

    fn meets_max_length(&self) -> bool {
        !self.config.kind.has_length_limits()
            || self.config.limits.meets_max(self.sanitized_value().len())
    }

    // -------------------------------------------------------------------------
    // Registered callbacks
    // -------------------------------------------------------------------------

    /// Length checks, then the consumer validator. Records the first failure.
    fn validate_value(&self) -> bool {
        let value = self.sanitized_value();
        let limits = &self.config.limits;

        if self.config.optional && !value.has_value() {
            self.set_value_valid(true);
            return true;
        }

        if self.config.kind.has_length_limits() {
            if !limits.meets_min(value.len()) {
                return self.fail(limits.min_message());
            }
            if !limits.meets_max(value.len()) {
                return self.fail(limits.max_message());
            }
        }

        if let Some(validate) = &self.config.on_validate {
            if let Some(message) = validate(&value).filter(|m| !m.is_empty()) {
                return self.fail(message);
            }
        }

        self.set_value_valid(true);
        true
    }

    fn fail(&self, message: String) -> bool {
        self.set_error_message(message);
        self.set_value_valid(false);
        false
    }

    /// `true` when the field is empty.
    fn check_emptiness(&self) -> bool {
        if self.uses_boolean_value() {
            self.set_input_empty(false);
            return false;
        }

        let value = self.sanitized_value();
        if self.config.optional && !value.has_value() {
            self.set_input_empty(false);
            return false;
        }
        if let Some(check) = &self.config.on_check {
            return check(&value);
        }

        let empty = !value.has_value();
        self.set_input_empty(empty);
        empty
    }

    fn evaluate_value(&self) -> Evaluation {
        let normalized = self.normalized_value();
        match &self.config.on_evaluate {
            Some(evaluate) => evaluate(&self.config.name, normalized, &self.surface),
            None => Evaluation::new(&self.config.name, normalized),
        }
    }

    fn reset_input_value(&self) {
        if self.config.reset_skipped {
            return;
        }
        self.set_input_value(self.config.resolved_reset_value());
    }

    // -------------------------------------------------------------------------
    // Store updates
    // -------------------------------------------------------------------------

    /// Report a new value. A real change also clears the form's submitted
    /// flag so stale errors disappear.
    fn set_input_value(&self, value: InputValue) {
        let changed = self.store.value() != value;
        if changed || self.uses_boolean_value() {
            self.surface.set_raw(&value);
            self.store.set_value(value);
        }
        if changed {
            self.context.set_form_submitted(false);
        }
    }

    fn set_input_empty(&self, empty: bool) {
        if self.store.is_empty() != empty {
            self.store.set_empty(empty);
        }
    }

    fn set_value_valid(&self, valid: bool) {
        if self.store.is_valid() != valid {
            self.store.set_valid(valid);
        }
    }

    fn set_error_message(&self, message: String) {
        if self.store.error_message().as_deref() != Some(message.as_str()) {
            self.store.set_error_message(Some(message));
        }
    }

    /// Flags for a field without a value; optional fields stay clean.
    fn mark_missing(&self) {
        let optional = self.config.optional;
        self.set_input_empty(!optional);
        self.set_value_valid(optional);
    }

    // -------------------------------------------------------------------------
    // Commit
    // -------------------------------------------------------------------------

    /// Store the sanitized value and its validity, then auto-submit if asked.
    ///
    /// Returns true if the form was submitted.
    fn commit(&self) -> bool {
        if !self.has_value() {
            self.mark_missing();
            self.set_input_value(self.config.resolved_reset_value());
            return false;
        }

        self.set_input_value(self.sanitized_value());
        if self.uses_boolean_value() {
            self.set_value_valid(true);
        } else {
            let valid = self.validate_value();
            self.set_value_valid(valid);
        }
        self.set_input_empty(false);

        if !self.config.auto_submitted {
            return false;
        }
        match self.context.submit() {
            Ok(_) => true,
            Err(err) => {
                warn!("field '{}': auto-submit failed: {}", self.config.name, err);
                false
            }
        }
    }

    /// Re-derive emptiness and validity from the surface.
    fn refresh(&self) {
        if self.has_value() {
            let valid = self.validate_value();
            self.set_value_valid(valid);
            self.set_input_empty(false);
        } else {
            self.mark_missing();
        }
    }
}

impl FieldHooks for FieldInner {
    fn check(&self) -> bool {
        self.check_emptiness()
    }

    fn validate(&self) -> bool {
        self.validate_value()
    }

    fn reset(&self) {
        self.reset_input_value()
    }

    fn evaluate(&self) -> Evaluation {
        self.evaluate_value()
    }
}

/// One input field mounted in a form.
///
/// Mounting registers the field's checker, validator, resetter and evaluator
/// with the form behind its [`FormContext`]; dropping the adapter (or calling
/// [`FieldAdapter::unmount`]) removes them again.
///
/// # Example
///
/// ```ignore
/// let form = FormCoordinator::new(FormConfig::new(submitted, |payload| save(payload)));
/// let name = FieldAdapter::mount(form.context(0), FieldConfig::new("name").min_length(2));
///
/// name.surface().set_text("Alex");
/// name.handle_blur();
/// form.submit();
/// ```
pub struct FieldAdapter {
    inner: Arc<FieldInner>,
    attachment: Option<Attachment>,
}

impl FieldAdapter {
    /// Mount a field with in-memory state.
    pub fn mount(context: FormContext, config: FieldConfig) -> Self {
        let initial = config.resolved_reset_value();
        Self::mount_with_store(context, config, Arc::new(FieldState::new(initial)))
    }

    /// Mount a field that reports into an application-provided store.
    pub fn mount_with_store(
        context: FormContext,
        config: FieldConfig,
        store: Arc<dyn FieldStore>,
    ) -> Self {
        if let Err(err) = config.limits.check() {
            warn!("field '{}': {}, it can never validate", config.name, err);
        }

        let surface = InputSurface::new(config.kind);
        surface.set_placeholder(config.placeholder.clone());
        surface.set_raw(&store.value());
        surface.clear_dirty();

        let inner = Arc::new(FieldInner {
            config,
            context,
            surface,
            store,
        });
        let attachment = inner.context.attach(Arc::clone(&inner));
        let adapter = Self {
            inner,
            attachment: Some(attachment),
        };

        if let Some(did_mount) = &adapter.inner.config.on_did_mount {
            did_mount(&adapter);
        }
        adapter.sync_focus();

        debug!(
            "field '{}': mounted at position {} of form '{}'",
            adapter.name(),
            adapter.position(),
            adapter.inner.context.form_id()
        );
        adapter
    }

    /// Deregister from the form and drop the field.
    pub fn unmount(self) {
        drop(self);
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn kind(&self) -> InputKind {
        self.inner.config.kind
    }

    pub fn position(&self) -> usize {
        self.inner.context.position()
    }

    pub fn context(&self) -> &FormContext {
        &self.inner.context
    }

    pub fn surface(&self) -> &InputSurface {
        &self.inner.surface
    }

    pub fn store(&self) -> &dyn FieldStore {
        &*self.inner.store
    }

    pub fn config(&self) -> &FieldConfig {
        &self.inner.config
    }

    // -------------------------------------------------------------------------
    // Value pipeline
    // -------------------------------------------------------------------------

    pub fn sanitized_value(&self) -> InputValue {
        self.inner.sanitized_value()
    }

    pub fn normalized_value(&self) -> InputValue {
        self.inner.normalized_value()
    }

    pub fn has_value(&self) -> bool {
        self.inner.has_value()
    }

    pub fn meets_min_length(&self) -> bool {
        self.inner.meets_min_length()
    }

    pub fn meets_max_length(&self) -> bool {
        self.inner.meets_max_length()
    }

    // -------------------------------------------------------------------------
    // Registered callbacks
    // -------------------------------------------------------------------------

    /// The validator: `false` records an error message and marks invalid.
    pub fn validate(&self) -> bool {
        self.inner.validate_value()
    }

    /// The checker: `true` means the field is empty.
    pub fn check(&self) -> bool {
        self.inner.check_emptiness()
    }

    /// The evaluator.
    pub fn evaluate(&self) -> Evaluation {
        self.inner.evaluate_value()
    }

    /// The resetter.
    pub fn reset(&self) {
        self.inner.reset_input_value()
    }

    /// Commit the surface's value into the store.
    ///
    /// Returns true if the commit auto-submitted the form.
    pub fn commit(&self) -> bool {
        self.inner.commit()
    }

    // -------------------------------------------------------------------------
    // Setters (also handed to `on_change`)
    // -------------------------------------------------------------------------

    pub fn set_input_value(&self, value: impl Into<InputValue>) {
        self.inner.set_input_value(value.into())
    }

    pub fn set_input_empty(&self, empty: bool) {
        self.inner.set_input_empty(empty)
    }

    pub fn set_value_valid(&self, valid: bool) {
        self.inner.set_value_valid(valid)
    }

    pub fn set_error_message(&self, message: impl Into<String>) {
        self.inner.set_error_message(message.into())
    }

    pub fn set_form_submitted(&self, submitted: bool) {
        self.inner.context.set_form_submitted(submitted)
    }

    // -------------------------------------------------------------------------
    // Focus and errors
    // -------------------------------------------------------------------------

    /// Check if the form's cursor is on this field
    pub fn is_focused(&self) -> bool {
        self.inner.context.is_current_focused()
    }

    /// Request terminal focus on the surface if the cursor is on this field.
    ///
    /// Returns true if a request was raised.
    pub fn sync_focus(&self) -> bool {
        if self.is_focused() {
            self.inner.surface.request_focus();
            true
        } else {
            false
        }
    }

    /// The error to display, if any.
    ///
    /// Errors only show once the form has been submitted; an empty field shows
    /// the empty message instead of its last validation error.
    pub fn visible_error(&self) -> Option<String> {
        if !self.inner.context.is_form_submitted() {
            return None;
        }
        let store = &self.inner.store;
        if store.is_empty() {
            return Some(self.inner.config.limits.empty_message().to_string());
        }
        if !store.is_valid() {
            return Some(store.error_message().unwrap_or_default());
        }
        None
    }

    /// Hide errors by clearing the form's submitted flag.
    pub fn dismiss_error(&self) {
        self.inner.context.set_form_submitted(false);
    }

    // -------------------------------------------------------------------------
    // Surface events
    // -------------------------------------------------------------------------

    /// The field gained focus.
    pub fn handle_focus(&self) {
        self.inner.context.set_form_focused();
        self.inner.context.set_current_focused();
        self.inner.refresh();
    }

    /// The field lost focus.
    pub fn handle_blur(&self) {
        self.inner.commit();
    }

    /// The surface's value changed.
    pub fn handle_change(&self) {
        self.inner.context.set_form_submitted(false);

        // Toggles are cheap; commit right away instead of waiting for blur.
        if self.inner.uses_boolean_value() {
            self.inner.commit();
        }

        if let Some(on_change) = &self.inner.config.on_change {
            on_change(&self.inner.sanitized_value(), self);
        }
    }
}

impl Drop for FieldAdapter {
    fn drop(&mut self) {
        if let Some(attachment) = self.attachment.take() {
            attachment.detach();
            debug!("field '{}': unmounted", self.inner.config.name);
        }
    }
}

impl std::fmt::Debug for FieldAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAdapter")
            .field("config", &self.inner.config)
            .field("context", &self.inner.context)
            .field("value", &self.inner.store.value())
            .finish_non_exhaustive()
    }
}
