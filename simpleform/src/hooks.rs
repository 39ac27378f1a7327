//! The capability interface a field implements to take part in a form.

use std::sync::Arc;

use crate::form::{Evaluation, FormContext};
use crate::registry::{Checker, Evaluator, FieldCallback, Resetter, Validator};

/// Trait for anything that can sit in a form as a field.
///
/// The form never learns the concrete type; it only sees the four callbacks
/// built from these methods.
pub trait FieldHooks: Send + Sync {
    /// Report whether the field is empty. `true` blocks submission.
    fn check(&self) -> bool;

    /// Report whether the field's value is acceptable.
    fn validate(&self) -> bool;

    /// Restore the field's reset value.
    fn reset(&self);

    /// The name and value this field contributes to the payload.
    fn evaluate(&self) -> Evaluation;
}

/// The registrations of one field in one form.
///
/// Deregisters everything on [`Attachment::detach`] or when dropped, so a
/// form never keeps calling into a field that is gone.
pub struct Attachment {
    context: FormContext,
    callbacks: Vec<FieldCallback>,
    detached: bool,
}

impl Attachment {
    pub(crate) fn new<H: FieldHooks + 'static>(context: FormContext, hooks: Arc<H>) -> Self {
        let validator = {
            let hooks = Arc::clone(&hooks);
            Validator::new(move || hooks.validate())
        };
        let resetter = {
            let hooks = Arc::clone(&hooks);
            Resetter::new(move || hooks.reset())
        };
        let evaluator = {
            let hooks = Arc::clone(&hooks);
            Evaluator::new(move || hooks.evaluate())
        };
        let checker = Checker::new(move || hooks.check());

        let callbacks = vec![
            FieldCallback::Validator(validator),
            FieldCallback::Resetter(resetter),
            FieldCallback::Evaluator(evaluator),
            FieldCallback::Checker(checker),
        ];
        for callback in &callbacks {
            context.register(callback.clone());
        }

        Self {
            context,
            callbacks,
            detached: false,
        }
    }

    /// The registered callbacks
    pub fn callbacks(&self) -> &[FieldCallback] {
        &self.callbacks
    }

    pub fn context(&self) -> &FormContext {
        &self.context
    }

    /// Remove every registration now.
    pub fn detach(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.detached {
            return;
        }
        for callback in &self.callbacks {
            self.context.deregister(callback);
        }
        self.detached = true;
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("context", &self.context)
            .field("callbacks", &self.callbacks)
            .field("detached", &self.detached)
            .finish()
    }
}
