// Payload validation
// Evaluates a static field -> constraint table against a JSON object and
// collects every violation before reporting

pub mod rules;

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

pub use rules::{Constraint, FieldRule};

/// Every rule violation found in a payload, in rule-table order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", .0.join("; "))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new(messages: Vec<String>) -> Self {
        Self(messages)
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

/// Field values that passed validation
///
/// Only fields named by the schema are kept. Numbers and booleans are stored
/// in their string form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: BTreeMap<&'static str, String>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Removes and returns a field value
    pub fn take(&mut self, field: &str) -> Option<String> {
        self.values.remove(field)
    }
}

/// Validates a request body, which must be a JSON object
pub fn validate_body(body: &Value, schema: &[FieldRule]) -> Result<Record, ValidationErrors> {
    match body {
        Value::Object(map) => validate(map, schema),
        _ => Err(ValidationErrors::single("Request body must be a JSON object")),
    }
}

/// Validates `input` against `schema`
///
/// Does not stop at the first failure: the error lists one message for each
/// violated rule across all fields. An empty required field reports only that
/// it is required.
pub fn validate(input: &Map<String, Value>, schema: &[FieldRule]) -> Result<Record, ValidationErrors> {
    let mut record = Record::default();
    let mut errors = Vec::new();

    for rule in schema {
        let raw = match input.get(rule.field) {
            None | Some(Value::Null) => {
                if rule.required {
                    errors.push(rule.required_message());
                }
                continue;
            }
            Some(value) => value,
        };

        let Some(value) = as_text(raw) else {
            errors.push(rule.type_message());
            continue;
        };

        if rule.required && value.is_empty() {
            errors.push(rule.required_message());
            continue;
        }

        let before = errors.len();
        errors.extend(
            rule.constraints
                .iter()
                .filter(|c| !c.is_satisfied_by(&value))
                .map(|c| c.message(rule.label)),
        );

        if errors.len() == before {
            record.values.insert(rule.field, value);
        }
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        Err(ValidationErrors(errors))
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
