//! Error types.
//!
//! The submit protocol itself never fails; these cover misuse at the edges.

use thiserror::Error;

use crate::focus::FormId;

/// Errors from a field talking to its form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The form behind this context no longer exists.
    #[error("form '{0}' was dropped")]
    FormDropped(FormId),
}

/// Errors building a validation rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The regular expression did not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Configuration mistakes that leave a field unable to validate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The minimum length is larger than the maximum length.
    #[error("min length {min} exceeds max length {max}")]
    InvalidLengthBounds {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },
}
