//! Form configuration.

use std::fmt;
use std::sync::Arc;

use crate::focus::{FocusRegistry, FormId};
use crate::registry::Validator;
use crate::submission::SubmissionStore;

use super::payload::{IncludedDataPrecedence, Payload};

pub(crate) type CompletedFn = dyn Fn(Payload) + Send + Sync;
pub(crate) type NotifyFn = dyn Fn() + Send + Sync;
pub(crate) type PrepareFn = dyn Fn(Payload) -> Payload + Send + Sync;
pub(crate) type FieldsCompletedFn = dyn Fn() -> bool + Send + Sync;
pub(crate) type FieldsValidatedFn = dyn Fn(&[Validator]) -> bool + Send + Sync;

/// Per-form configuration.
///
/// The submission store and the completion callback are required; everything
/// else has a default.
///
/// # Example
///
/// ```ignore
/// let submitted = SubmissionFlag::new();
/// let config = FormConfig::new(submitted.clone(), |payload| save(payload))
///     .name("signup")
///     .included_data(extra)
///     .reset_when_finished(false);
/// let form = FormCoordinator::new(config);
/// ```
pub struct FormConfig {
    pub(crate) name: FormId,
    pub(crate) submission: Arc<dyn SubmissionStore>,
    pub(crate) on_completed: Box<CompletedFn>,
    pub(crate) on_submitted: Option<Box<NotifyFn>>,
    pub(crate) on_finished: Option<Box<NotifyFn>>,
    pub(crate) on_prepare: Option<Box<PrepareFn>>,
    pub(crate) included_data: Option<Payload>,
    pub(crate) included_data_precedence: IncludedDataPrecedence,
    pub(crate) reset_when_finished: bool,
    pub(crate) on_fields_completed: Option<Box<FieldsCompletedFn>>,
    pub(crate) on_fields_validated: Option<Box<FieldsValidatedFn>>,
    pub(crate) checking_skipped: bool,
    pub(crate) validation_skipped: bool,
    pub(crate) focus: FocusRegistry,
}

impl FormConfig {
    /// Create a config with the required parts.
    pub fn new(
        submission: impl SubmissionStore + 'static,
        on_completed: impl Fn(Payload) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: FormId::generate(),
            submission: Arc::new(submission),
            on_completed: Box::new(on_completed),
            on_submitted: None,
            on_finished: None,
            on_prepare: None,
            included_data: None,
            included_data_precedence: IncludedDataPrecedence::default(),
            reset_when_finished: true,
            on_fields_completed: None,
            on_fields_validated: None,
            checking_skipped: false,
            validation_skipped: false,
            focus: FocusRegistry::global(),
        }
    }

    /// Set the form name (its key in the focus registry).
    pub fn name(mut self, name: impl Into<FormId>) -> Self {
        self.name = name.into();
        self
    }

    /// Called every time a submit starts.
    pub fn on_submitted(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_submitted = Some(Box::new(f));
        self
    }

    /// Called after a successful submit, once resetting is done.
    pub fn on_finished(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_finished = Some(Box::new(f));
        self
    }

    /// Transform the payload before it reaches the completion callback.
    pub fn on_prepare(mut self, f: impl Fn(Payload) -> Payload + Send + Sync + 'static) -> Self {
        self.on_prepare = Some(Box::new(f));
        self
    }

    /// Extra data merged into every payload.
    pub fn included_data(mut self, data: Payload) -> Self {
        self.included_data = Some(data);
        self
    }

    /// Decide which side wins on a name collision with included data.
    pub fn included_data_precedence(mut self, precedence: IncludedDataPrecedence) -> Self {
        self.included_data_precedence = precedence;
        self
    }

    /// Run every resetter after a successful submit (default true).
    pub fn reset_when_finished(mut self, reset: bool) -> Self {
        self.reset_when_finished = reset;
        self
    }

    /// Replace the checker aggregation with a custom completeness predicate.
    pub fn on_fields_completed(mut self, f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.on_fields_completed = Some(Box::new(f));
        self
    }

    /// Replace the validator aggregation. Receives the registered validators.
    pub fn on_fields_validated(
        mut self,
        f: impl Fn(&[Validator]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.on_fields_validated = Some(Box::new(f));
        self
    }

    /// Treat the form as complete without consulting checkers.
    pub fn checking_skipped(mut self, skipped: bool) -> Self {
        self.checking_skipped = skipped;
        self
    }

    /// Treat the form as valid without consulting validators.
    pub fn validation_skipped(mut self, skipped: bool) -> Self {
        self.validation_skipped = skipped;
        self
    }

    /// Use a specific focus registry instead of the global one.
    pub fn focus_registry(mut self, registry: FocusRegistry) -> Self {
        self.focus = registry;
        self
    }
}

impl fmt::Debug for FormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormConfig")
            .field("name", &self.name)
            .field("included_data", &self.included_data)
            .field("included_data_precedence", &self.included_data_precedence)
            .field("reset_when_finished", &self.reset_when_finished)
            .field("checking_skipped", &self.checking_skipped)
            .field("validation_skipped", &self.validation_skipped)
            .finish_non_exhaustive()
    }
}
