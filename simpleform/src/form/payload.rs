//! Submission payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name to value, handed to the completion callback.
pub type Payload = Map<String, Value>;

/// What one field contributes to a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub name: String,
    pub value: Value,
}

impl Evaluation {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Which side wins when included data and a field share a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludedDataPrecedence {
    /// Included data overwrites evaluated fields.
    #[default]
    IncludedWins,
    /// Evaluated fields overwrite included data.
    FieldsWin,
}

/// Build a payload from evaluations; later names overwrite earlier ones.
pub(crate) fn collect(evaluations: impl IntoIterator<Item = Evaluation>) -> Payload {
    let mut payload = Payload::new();
    for Evaluation { name, value } in evaluations {
        payload.insert(name, value);
    }
    payload
}

/// Merge included data into evaluated fields.
pub(crate) fn merge_included(
    fields: Payload,
    included: &Payload,
    precedence: IncludedDataPrecedence,
) -> Payload {
    match precedence {
        IncludedDataPrecedence::IncludedWins => {
            let mut merged = fields;
            for (name, value) in included {
                merged.insert(name.clone(), value.clone());
            }
            merged
        }
        IncludedDataPrecedence::FieldsWin => {
            let mut merged = included.clone();
            merged.extend(fields);
            merged
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => Payload::new(),
        }
    }

    #[test]
    fn test_collect_last_write_wins() {
        let payload = collect([
            Evaluation::new("name", "first"),
            Evaluation::new("email", "a@b.c"),
            Evaluation::new("name", "second"),
        ]);
        assert_eq!(Value::Object(payload), json!({"name": "second", "email": "a@b.c"}));
    }

    #[test]
    fn test_included_data_wins_by_default() {
        let fields = object(json!({"name": "Alex", "extra": 0}));
        let included = object(json!({"extra": 1}));
        let merged = merge_included(fields, &included, IncludedDataPrecedence::default());
        assert_eq!(Value::Object(merged), json!({"name": "Alex", "extra": 1}));
    }

    #[test]
    fn test_fields_can_win_over_included_data() {
        let fields = object(json!({"name": "Alex", "extra": 0}));
        let included = object(json!({"extra": 1, "source": "web"}));
        let merged = merge_included(fields, &included, IncludedDataPrecedence::FieldsWin);
        assert_eq!(
            Value::Object(merged),
            json!({"name": "Alex", "extra": 0, "source": "web"})
        );
    }
}
