//! Field kinds and values.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of input surface a field renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Tel,
    Search,
    Url,
    Textarea,
    Checkbox,
    File,
}

impl InputKind {
    /// Checkbox-like fields carry a boolean instead of text.
    pub fn uses_boolean_value(self) -> bool {
        matches!(self, Self::Checkbox)
    }

    pub fn uses_files(self) -> bool {
        matches!(self, Self::File)
    }

    /// Whether min/max length limits apply.
    pub fn has_length_limits(self) -> bool {
        !(self.uses_boolean_value() || self.uses_files())
    }

    /// Whether the Enter key inserts a newline instead of submitting.
    pub fn is_multiline(self) -> bool {
        matches!(self, Self::Textarea)
    }
}

/// A field value at any stage: raw, sanitized, normalized or stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Text(String),
    Bool(bool),
    Files(Vec<PathBuf>),
}

impl InputValue {
    /// The empty value for a kind of input
    pub fn empty_for(kind: InputKind) -> Self {
        match kind {
            InputKind::Checkbox => Self::Bool(false),
            InputKind::File => Self::Files(Vec::new()),
            _ => Self::Text(String::new()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_files(&self) -> Option<&[PathBuf]> {
        match self {
            Self::Files(files) => Some(files),
            _ => None,
        }
    }

    /// Truthiness used when coercing any value to a checkbox state.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::Files(files) => !files.is_empty(),
        }
    }

    /// Whether the value counts as present. Booleans always do.
    pub fn has_value(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Bool(_) => true,
            Self::Files(files) => !files.is_empty(),
        }
    }

    /// Length used by min/max checks: characters for text, entries for files.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(s) => s.chars().count(),
            Self::Bool(_) => 0,
            Self::Files(files) => files.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.has_value()
    }

    /// Convert to the JSON value placed in a payload.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Files(files) => Value::Array(
                files
                    .iter()
                    .map(|p| Value::String(p.to_string_lossy().into_owned()))
                    .collect(),
            ),
        }
    }
}

impl Default for InputValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<PathBuf>> for InputValue {
    fn from(files: Vec<PathBuf>) -> Self {
        Self::Files(files)
    }
}

impl From<InputValue> for Value {
    fn from(value: InputValue) -> Self {
        value.to_json()
    }
}
