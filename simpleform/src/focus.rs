//! Focus cursors for forms.
//!
//! Every form has a cursor pointing at the position of its focused field. One
//! form at a time is the *active* form; only fields of the active form report
//! themselves as focused. The registry is process-scoped by default (see
//! [`FocusRegistry::global`]) so a form that is torn down and rebuilt under the
//! same name picks up where it left off.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard};

use uuid::Uuid;

/// Identity of a form within a focus registry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormId(String);

impl FormId {
    /// Create a form ID from a name
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a unique `form_<uuid>` ID
    pub fn generate() -> Self {
        Self(format!("form_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FormId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FormId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a form's focus cursor points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPosition {
    /// The field at this position in the form
    Field(usize),
    /// No field is focused
    Blank,
}

impl FocusPosition {
    /// The field index, if any
    pub fn field(self) -> Option<usize> {
        match self {
            Self::Field(idx) => Some(idx),
            Self::Blank => None,
        }
    }

    pub fn is_blank(self) -> bool {
        matches!(self, Self::Blank)
    }
}

impl Default for FocusPosition {
    fn default() -> Self {
        Self::Field(0)
    }
}

#[derive(Debug, Default)]
struct FocusInner {
    /// Cursor per form
    cursors: HashMap<FormId, FocusPosition>,
    /// Form that most recently claimed focus
    active: Option<FormId>,
    /// Form that was active before the current one
    previous: Option<FormId>,
}

/// Shared table of focus cursors, keyed by form.
///
/// Cheap to clone; clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct FocusRegistry {
    inner: Arc<RwLock<FocusInner>>,
}

impl FocusRegistry {
    /// Create a new, private registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use
    pub fn global() -> Self {
        static GLOBAL: OnceLock<FocusRegistry> = OnceLock::new();
        GLOBAL.get_or_init(FocusRegistry::new).clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, FocusInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the cursor of a form.
    ///
    /// A form that has never been seen starts at the first field; the entry is
    /// created by this call.
    pub fn position(&self, form: &FormId) -> FocusPosition {
        if let Some(position) = self.read().cursors.get(form) {
            return *position;
        }

        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard.cursors.entry(form.clone()).or_default()
    }

    /// Move the cursor of a form
    pub fn set_position(&self, form: &FormId, position: FocusPosition) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let previous = guard.cursors.insert(form.clone(), position);
        if previous != Some(position) {
            log::trace!("focus: form '{}' cursor {:?} -> {:?}", form, previous, position);
        }
    }

    /// Make a form the active one.
    ///
    /// Returns true if the active form changed.
    pub fn activate(&self, form: &FormId) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if guard.active.as_ref() == Some(form) {
            return false;
        }
        guard.previous = guard.active.replace(form.clone());
        log::debug!("focus: form '{}' is now active", form);
        true
    }

    /// The form that currently owns focus
    pub fn active_form(&self) -> Option<FormId> {
        self.read().active.clone()
    }

    /// The form that owned focus before the current one
    pub fn previous_form(&self) -> Option<FormId> {
        self.read().previous.clone()
    }

    /// Check if a form is the active one
    pub fn is_active(&self, form: &FormId) -> bool {
        self.read().active.as_ref() == Some(form)
    }

    /// Check if the field at `position` of `form` is focused.
    ///
    /// Requires the form to be active and its cursor to be on that field.
    pub fn is_focused(&self, form: &FormId, position: usize) -> bool {
        self.is_active(form) && self.position(form) == FocusPosition::Field(position)
    }
}
