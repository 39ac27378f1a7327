//! The form container and its submit protocol.

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, warn};

use crate::focus::{FocusPosition, FormId};
use crate::registry::{
    Checker, Evaluator, FieldCallback, Registries, RegistryKind, Resetter, Validator,
};

use super::config::FormConfig;
use super::context::FormContext;
use super::payload::{self, Payload};

/// Result of one submit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field reported itself empty (or no field can report at all).
    Incomplete,
    /// Every field has a value, but at least one failed validation.
    Invalid,
    /// The payload was delivered to the completion callback.
    Completed,
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// The event that triggered a submit, if any.
///
/// The form stops its propagation and suppresses its default action before
/// doing anything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// State shared between a form and the contexts handed to its fields.
pub(crate) struct FormShared {
    pub(crate) config: FormConfig,
    registries: RwLock<Registries>,
}

impl FormShared {
    pub(crate) fn id(&self) -> &FormId {
        &self.config.name
    }

    // -------------------------------------------------------------------------
    // Registries
    // -------------------------------------------------------------------------

    pub(crate) fn register(&self, callback: FieldCallback) -> bool {
        let kind = callback.kind();
        let id = callback.id();
        let added = self
            .registries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(callback);
        if added {
            debug!("form '{}': registered {} {}", self.id(), kind, id);
        }
        added
    }

    pub(crate) fn deregister(&self, callback: &FieldCallback) -> bool {
        let removed = self
            .registries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .deregister(callback);
        if removed {
            debug!(
                "form '{}': deregistered {} {}",
                self.id(),
                callback.kind(),
                callback.id()
            );
        }
        removed
    }

    fn registry_len(&self, kind: RegistryKind) -> usize {
        self.registries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len(kind)
    }

    /// Copy one registry out so callbacks run without the lock held.
    fn snapshot<T: Clone>(&self, pick: impl FnOnce(&Registries) -> &[T]) -> Vec<T> {
        let guard = self.registries.read().unwrap_or_else(PoisonError::into_inner);
        pick(&*guard).to_vec()
    }

    fn checkers(&self) -> Vec<Checker> {
        self.snapshot(Registries::checkers)
    }

    fn validators(&self) -> Vec<Validator> {
        self.snapshot(Registries::validators)
    }

    fn resetters(&self) -> Vec<Resetter> {
        self.snapshot(Registries::resetters)
    }

    fn evaluators(&self) -> Vec<Evaluator> {
        self.snapshot(Registries::evaluators)
    }

    // -------------------------------------------------------------------------
    // Submission state and focus
    // -------------------------------------------------------------------------

    pub(crate) fn is_submitted(&self) -> bool {
        self.config.submission.is_submitted()
    }

    /// Write the submitted flag, only when it actually changes.
    pub(crate) fn set_form_submitted(&self, submitted: bool) {
        if self.config.submission.is_submitted() != submitted {
            self.config.submission.set_submitted(submitted);
        }
    }

    pub(crate) fn focused(&self) -> FocusPosition {
        self.config.focus.position(self.id())
    }

    pub(crate) fn set_focused(&self, position: FocusPosition) {
        self.config.focus.set_position(self.id(), position);
    }

    pub(crate) fn activate(&self) -> bool {
        self.config.focus.activate(self.id())
    }

    pub(crate) fn is_active(&self) -> bool {
        self.config.focus.is_active(self.id())
    }

    // -------------------------------------------------------------------------
    // Submit protocol
    // -------------------------------------------------------------------------

    pub(crate) fn are_fields_completed(&self) -> bool {
        if let Some(completed) = &self.config.on_fields_completed {
            return completed();
        }

        let checkers = self.checkers();
        if checkers.is_empty() {
            warn!(
                "form '{}': submissions will always fail because no field provided a checker",
                self.id()
            );
            return false;
        }

        // Every checker runs so each field refreshes its emptiness flag.
        let empties: Vec<bool> = checkers.iter().map(|c| c.call()).collect();
        empties.iter().all(|empty| !empty)
    }

    pub(crate) fn are_fields_validated(&self) -> bool {
        let validators = self.validators();
        if let Some(validated) = &self.config.on_fields_validated {
            return validated(&validators);
        }

        let results: Vec<bool> = validators.iter().map(|v| v.call()).collect();
        results.iter().all(|valid| *valid)
    }

    pub(crate) fn evaluate_fields(&self) -> Payload {
        payload::collect(self.evaluators().iter().map(|e| e.call()))
    }

    pub(crate) fn reset_fields(&self) {
        for resetter in self.resetters() {
            resetter.call();
        }
    }

    pub(crate) fn submit(&self, event: Option<&mut SubmitEvent>) -> SubmitOutcome {
        if let Some(event) = event {
            event.stop_propagation();
            event.prevent_default();
        }

        debug!("form '{}': submit started", self.id());
        self.set_form_submitted(true);

        if let Some(submitted) = &self.config.on_submitted {
            submitted();
        }

        let outcome = if !(self.config.checking_skipped || self.are_fields_completed()) {
            SubmitOutcome::Incomplete
        } else if !(self.config.validation_skipped || self.are_fields_validated()) {
            SubmitOutcome::Invalid
        } else {
            self.finish();
            SubmitOutcome::Completed
        };

        // The field list may change shape after a reset, so start over.
        self.set_focused(FocusPosition::Field(0));

        debug!("form '{}': submit finished: {:?}", self.id(), outcome);
        outcome
    }

    fn finish(&self) {
        // Cleared before resetting so errors do not flash while fields reset.
        self.set_form_submitted(false);

        let payload = self.prepare_payload();
        (self.config.on_completed)(payload);

        if self.config.reset_when_finished {
            self.reset_fields();
        }

        if let Some(finished) = &self.config.on_finished {
            finished();
        }
    }

    fn prepare_payload(&self) -> Payload {
        let mut prepared = self.evaluate_fields();
        if let Some(included) = &self.config.included_data {
            prepared =
                payload::merge_included(prepared, included, self.config.included_data_precedence);
        }
        if let Some(prepare) = &self.config.on_prepare {
            prepared = prepare(prepared);
        }
        prepared
    }
}

/// A form: owns the field registries and runs the submit protocol.
///
/// Fields reach the form through a [`FormContext`] obtained from
/// [`FormCoordinator::context`]. Creating a form makes it the active form in
/// its focus registry and clears the submitted flag; dropping it clears the
/// flag again.
pub struct FormCoordinator {
    shared: Arc<FormShared>,
}

impl FormCoordinator {
    /// Create a form from its configuration
    pub fn new(config: FormConfig) -> Self {
        let shared = Arc::new(FormShared {
            config,
            registries: RwLock::new(Registries::new()),
        });
        shared.activate();
        shared.set_form_submitted(false);
        debug!("form '{}': created", shared.id());
        Self { shared }
    }

    pub fn id(&self) -> &FormId {
        self.shared.id()
    }

    /// Context for the field at `position` in this form's field sequence.
    pub fn context(&self, position: usize) -> FormContext {
        FormContext::new(&self.shared, position)
    }

    // -------------------------------------------------------------------------
    // Registries
    // -------------------------------------------------------------------------

    /// Add a callback to its registry. No-op if already present.
    pub fn register(&self, callback: FieldCallback) -> bool {
        self.shared.register(callback)
    }

    /// Remove a callback from its registry. No-op if absent.
    pub fn deregister(&self, callback: &FieldCallback) -> bool {
        self.shared.deregister(callback)
    }

    /// Number of callbacks in one registry
    pub fn registry_len(&self, kind: RegistryKind) -> usize {
        self.shared.registry_len(kind)
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Run the submit protocol without a triggering event.
    pub fn submit(&self) -> SubmitOutcome {
        self.shared.submit(None)
    }

    /// Run the submit protocol for an event, suppressing its default action.
    pub fn submit_event(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        self.shared.submit(Some(event))
    }

    /// Check if the submitted flag is set
    pub fn is_submitted(&self) -> bool {
        self.shared.is_submitted()
    }

    /// Change the submitted flag (only written when it differs)
    pub fn set_submitted(&self, submitted: bool) {
        self.shared.set_form_submitted(submitted);
    }

    pub fn are_fields_completed(&self) -> bool {
        self.shared.are_fields_completed()
    }

    pub fn are_fields_validated(&self) -> bool {
        self.shared.are_fields_validated()
    }

    /// Build a payload from the evaluators alone.
    pub fn evaluate_fields(&self) -> Payload {
        self.shared.evaluate_fields()
    }

    /// Run every resetter in registration order.
    pub fn reset_fields(&self) {
        self.shared.reset_fields();
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// Current focus cursor of this form
    pub fn focused_position(&self) -> FocusPosition {
        self.shared.focused()
    }

    pub fn set_focused_position(&self, position: FocusPosition) {
        self.shared.set_focused(position);
    }

    /// Claim the active-form slot. Returns true if it changed hands.
    pub fn activate(&self) -> bool {
        self.shared.activate()
    }

    pub fn is_active(&self) -> bool {
        self.shared.is_active()
    }
}

impl Drop for FormCoordinator {
    fn drop(&mut self) {
        self.shared.set_form_submitted(false);
        debug!("form '{}': dropped", self.shared.id());
    }
}

impl std::fmt::Debug for FormCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormCoordinator")
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}
