//! Submission state shared between a form and the application embedding it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Storage for the "form was submitted" flag.
///
/// The flag is owned by the embedding application; the form drives its
/// transitions and fields read it to decide whether errors are visible.
pub trait SubmissionStore: Send + Sync {
    /// Check if the form is currently in the submitted state.
    fn is_submitted(&self) -> bool;

    /// Change the submitted state.
    fn set_submitted(&self, submitted: bool);
}

impl<T: SubmissionStore + ?Sized> SubmissionStore for Arc<T> {
    fn is_submitted(&self) -> bool {
        (**self).is_submitted()
    }

    fn set_submitted(&self, submitted: bool) {
        (**self).set_submitted(submitted)
    }
}

/// A shared submitted flag.
///
/// Clones share the same flag, so the application can keep one and hand
/// another to the form.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFlag {
    submitted: Arc<AtomicBool>,
    /// Number of writes, for observing transitions
    writes: Arc<AtomicUsize>,
}

impl SubmissionFlag {
    /// Create a flag in the not-submitted state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current value
    pub fn get(&self) -> bool {
        self.submitted.load(Ordering::SeqCst)
    }

    /// Number of times the flag has been written
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SubmissionStore for SubmissionFlag {
    fn is_submitted(&self) -> bool {
        self.get()
    }

    fn set_submitted(&self, submitted: bool) {
        self.submitted.store(submitted, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}
