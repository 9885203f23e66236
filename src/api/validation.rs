//! Request payload checks.
//!
//! Bodies are decoded to a generic JSON value first and then mapped field by
//! field onto [`NoteInput`], so one bad request reports every offending field
//! instead of stopping at the first.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::NoteInput;

/// One rejected location in a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Where the problem is, e.g. `["body", "title"]` or `["path", "id"]`.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(&["body", field], "field required", "value_error.missing")
    }

    fn not_a_string(field: &str) -> Self {
        Self::new(&["body", field], "str type expected", "type_error.str")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid request: {}", describe(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Names of the offending fields, in the order they were checked.
    pub fn fields(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|e| e.loc.last().map(String::as_str))
            .collect()
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.loc.join("."), e.msg))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decode and check a create/update body.
pub fn parse_note_input(body: &[u8]) -> Result<NoteInput, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| ValidationError {
        errors: vec![FieldError::new(
            &["body"],
            format!("invalid JSON: {}", e),
            "value_error.jsondecode",
        )],
    })?;

    let Value::Object(map) = value else {
        return Err(ValidationError {
            errors: vec![FieldError::new(
                &["body"],
                "value is not a valid dict",
                "type_error.dict",
            )],
        });
    };

    let mut errors = Vec::new();
    let title = required_str(&map, "title", &mut errors);
    let content = required_str(&map, "content", &mut errors);
    let category = optional_str(&map, "category", &mut errors);
    let icon = optional_str(&map, "icon", &mut errors);
    let duedate = optional_str(&map, "duedate", &mut errors);

    match (title, content) {
        (Some(title), Some(content)) if errors.is_empty() => Ok(NoteInput {
            title,
            content,
            category,
            icon,
            duedate,
        }),
        _ => Err(ValidationError { errors }),
    }
}

fn required_str(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match map.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) => {
            errors.push(FieldError::missing(field));
            None
        }
        Some(_) => {
            errors.push(FieldError::not_a_string(field));
            None
        }
    }
}

fn optional_str(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match map.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) => None,
        Some(_) => {
            errors.push(FieldError::not_a_string(field));
            None
        }
    }
}

/// Error for an `{id}` path segment that is not an integer.
pub fn invalid_note_id() -> FieldError {
    FieldError::new(
        &["path", "id"],
        "value is not a valid integer",
        "type_error.integer",
    )
}

/// Parse the `{id}` path segment.
pub fn parse_note_id(raw: &str) -> Result<i64, FieldError> {
    raw.parse().map_err(|_| invalid_note_id())
}
