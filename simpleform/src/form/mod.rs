//! The form container: registries, submit protocol and field contexts.

mod config;
mod context;
mod coordinator;
mod payload;

pub use config::FormConfig;
pub use context::FormContext;
pub use coordinator::{FormCoordinator, SubmitEvent, SubmitOutcome};
pub use payload::{Evaluation, IncludedDataPrecedence, Payload};
