//! Headless form coordination.
//!
//! A [`FormCoordinator`](form::FormCoordinator) owns four ordered callback
//! registries (checkers, validators, resetters, evaluators). Each
//! [`FieldAdapter`](field::FieldAdapter) registers its callbacks when it mounts
//! and removes them when it is dropped. Submitting the form runs every checker,
//! then every validator, then every evaluator in registration order and hands
//! the merged payload to the completion callback.

pub mod error;
pub mod field;
pub mod focus;
pub mod form;
pub mod hooks;
pub mod registry;
pub mod rules;
pub mod submission;

pub mod prelude {
    pub use crate::error::{ConfigError, ContextError, RuleError};
    pub use crate::field::{
        EventResult, FieldAdapter, FieldConfig, FieldLimits, FieldState, FieldStore, InputKind,
        InputSurface, InputValue,
    };
    pub use crate::focus::{FocusPosition, FocusRegistry, FormId};
    pub use crate::form::{
        Evaluation, FormConfig, FormContext, FormCoordinator, IncludedDataPrecedence, Payload,
        SubmitEvent, SubmitOutcome,
    };
    pub use crate::hooks::{Attachment, FieldHooks};
    pub use crate::registry::{
        Callback, CallbackId, Checker, Evaluator, FieldCallback, RegistryKind, Resetter,
        Validator,
    };
    pub use crate::rules;
    pub use crate::submission::{SubmissionFlag, SubmissionStore};
}
