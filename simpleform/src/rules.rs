//! Ready-made validation rules for [`FieldConfig::on_validate`].
//!
//! Each rule returns `None` when the value passes and the configured message
//! when it fails.
//!
//! # Example
//!
//! ```ignore
//! use simpleform::rules;
//!
//! let config = FieldConfig::new("email")
//!     .limits(FieldLimits::unbounded())
//!     .on_validate(rules::all(vec![
//!         rules::required("Email is required"),
//!         rules::email("Please enter a valid email"),
//!     ]));
//! ```
//!
//! [`FieldConfig::on_validate`]: crate::field::FieldConfig::on_validate

use regex::Regex;

use crate::error::RuleError;
use crate::field::InputValue;

/// A boxed validation rule.
pub type Rule = Box<dyn Fn(&InputValue) -> Option<String> + Send + Sync>;

/// Build a rule from a predicate and a failure message.
pub fn rule(
    f: impl Fn(&InputValue) -> bool + Send + Sync + 'static,
    msg: impl Into<String>,
) -> Rule {
    let msg = msg.into();
    Box::new(move |v| if f(v) { None } else { Some(msg.clone()) })
}

/// Run rules in order; the first failure wins.
pub fn all(rules: Vec<Rule>) -> Rule {
    Box::new(move |v| rules.iter().find_map(|rule| rule(v)))
}

/// Require a value. Whitespace-only text does not count; checkboxes must be checked.
pub fn required(msg: impl Into<String>) -> Rule {
    rule(
        |v| match v {
            InputValue::Text(s) => !s.trim().is_empty(),
            InputValue::Bool(b) => *b,
            InputValue::Files(files) => !files.is_empty(),
        },
        msg,
    )
}

/// Require at least `min` characters. Non-text values pass.
pub fn min_length(min: usize, msg: impl Into<String>) -> Rule {
    rule(
        move |v| v.as_text().is_none_or(|s| s.chars().count() >= min),
        msg,
    )
}

/// Require at most `max` characters. Non-text values pass.
pub fn max_length(max: usize, msg: impl Into<String>) -> Rule {
    rule(
        move |v| v.as_text().is_none_or(|s| s.chars().count() <= max),
        msg,
    )
}

/// Require text matching a regex pattern.
pub fn pattern(pattern: &str, msg: impl Into<String>) -> Result<Rule, RuleError> {
    let re = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(rule(move |v| v.as_text().is_none_or(|s| re.is_match(s)), msg))
}

/// Require a valid email address. Empty text passes; combine with [`required`].
pub fn email(msg: impl Into<String>) -> Rule {
    rule(
        |v| {
            v.as_text()
                .is_none_or(|s| s.is_empty() || email_address::EmailAddress::is_valid(s))
        },
        msg,
    )
}

/// Require the value to equal another value.
pub fn equals(other: impl Into<InputValue>, msg: impl Into<String>) -> Rule {
    let other = other.into();
    rule(move |v| *v == other, msg)
}

/// Require text containing a substring.
pub fn contains(substr: impl Into<String>, msg: impl Into<String>) -> Rule {
    let substr = substr.into();
    rule(move |v| v.as_text().is_none_or(|s| s.contains(&substr)), msg)
}

/// Require a checkbox to be checked.
pub fn checked(msg: impl Into<String>) -> Rule {
    rule(|v| v.as_bool().unwrap_or(false), msg)
}
