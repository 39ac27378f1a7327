//! The capability object handed to each field.

use std::sync::{Arc, Weak};

use crate::error::ContextError;
use crate::focus::{FocusPosition, FormId};
use crate::hooks::{Attachment, FieldHooks};
use crate::registry::FieldCallback;

use super::coordinator::{FormShared, SubmitOutcome};

/// What a field can do to the form it lives in.
///
/// A context knows the field's position in the form and holds only a weak
/// reference to the form. Once the form is dropped every call becomes a no-op,
/// except [`FormContext::submit`] which reports [`ContextError::FormDropped`].
#[derive(Clone)]
pub struct FormContext {
    form: Weak<FormShared>,
    form_id: FormId,
    position: usize,
}

impl FormContext {
    pub(crate) fn new(form: &Arc<FormShared>, position: usize) -> Self {
        Self {
            form: Arc::downgrade(form),
            form_id: form.id().clone(),
            position,
        }
    }

    fn with_form<R>(&self, op: &str, f: impl FnOnce(&FormShared) -> R) -> Option<R> {
        match self.form.upgrade() {
            Some(form) => Some(f(&form)),
            None => {
                log::trace!("form '{}' is gone, ignoring {}", self.form_id, op);
                None
            }
        }
    }

    /// Name of the form this context belongs to
    pub fn form_id(&self) -> &FormId {
        &self.form_id
    }

    /// Position of the field within the form
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if the form still exists
    pub fn is_attached(&self) -> bool {
        self.form.strong_count() > 0
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    pub fn register(&self, callback: FieldCallback) -> bool {
        self.with_form("register", |form| form.register(callback))
            .unwrap_or(false)
    }

    pub fn deregister(&self, callback: &FieldCallback) -> bool {
        self.with_form("deregister", |form| form.deregister(callback))
            .unwrap_or(false)
    }

    /// Register all four callbacks of `hooks`.
    ///
    /// The returned attachment deregisters them when detached or dropped.
    pub fn attach<H: FieldHooks + 'static>(&self, hooks: Arc<H>) -> Attachment {
        Attachment::new(self.clone(), hooks)
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    pub fn is_form_submitted(&self) -> bool {
        self.with_form("is_form_submitted", FormShared::is_submitted)
            .unwrap_or(false)
    }

    pub fn set_form_submitted(&self, submitted: bool) {
        self.with_form("set_form_submitted", |form| {
            form.set_form_submitted(submitted)
        });
    }

    /// Run the form's submit protocol.
    pub fn submit(&self) -> Result<SubmitOutcome, ContextError> {
        self.with_form("submit", |form| form.submit(None))
            .ok_or_else(|| ContextError::FormDropped(self.form_id.clone()))
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// Make this field's form the active form.
    pub fn set_form_focused(&self) {
        self.with_form("set_form_focused", FormShared::activate);
    }

    pub fn is_form_focused(&self) -> bool {
        self.with_form("is_form_focused", FormShared::is_active)
            .unwrap_or(false)
    }

    /// Check if the form is active and its cursor is on this field.
    pub fn is_current_focused(&self) -> bool {
        self.with_form("is_current_focused", |form| {
            form.is_active() && form.focused() == FocusPosition::Field(self.position)
        })
        .unwrap_or(false)
    }

    /// Move the cursor onto this field.
    pub fn set_current_focused(&self) {
        self.move_cursor("set_current_focused", FocusPosition::Field(self.position));
    }

    /// Leave no field focused.
    pub fn set_current_blurred(&self) {
        self.move_cursor("set_current_blurred", FocusPosition::Blank);
    }

    /// Move the cursor to the field after this one.
    pub fn set_next_focused(&self) {
        self.move_cursor("set_next_focused", FocusPosition::Field(self.position + 1));
    }

    /// Move the cursor to the field before this one, stopping at the first.
    pub fn set_last_focused(&self) {
        self.move_cursor(
            "set_last_focused",
            FocusPosition::Field(self.position.saturating_sub(1)),
        );
    }

    fn move_cursor(&self, op: &str, position: FocusPosition) {
        self.with_form(op, |form| form.set_focused(position));
    }
}

impl std::fmt::Debug for FormContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormContext")
            .field("form_id", &self.form_id)
            .field("position", &self.position)
            .field("attached", &self.is_attached())
            .finish()
    }
}
