use serde_json::Value;

use crate::error::PollError;
use crate::models::{HomeworkEntry, RawResponse, ReviewStatus, ValidResponse};

pub fn validate(raw: RawResponse) -> Result<ValidResponse, PollError> {
    tracing::debug!("Validating API response");

    let mut body = match raw {
        Value::Object(body) => body,
        other => {
            return Err(PollError::shape(format!(
                "response is {}, expected an object",
                kind(&other)
            )))
        }
    };

    let homeworks = match body.remove("homeworks") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(PollError::shape(format!(
                "\"homeworks\" is {}, expected an array",
                kind(&other)
            )))
        }
        None => return Err(PollError::shape("response has no \"homeworks\" key")),
    };

    let current_date = match body.remove("current_date") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_i64().ok_or_else(|| {
            PollError::shape(format!("\"current_date\" is {}, expected an integer", value))
        })?),
    };

    tracing::debug!(count = homeworks.len(), "Response passed validation");
    Ok(ValidResponse {
        homeworks,
        current_date,
    })
}

/// Builds the chat message for one homework. The status is checked before
/// the name; a field that is absent or not a string counts as missing.
pub fn extract(entry: &HomeworkEntry) -> Result<String, PollError> {
    let code = string_field(entry, "status")?;
    let status =
        ReviewStatus::from_code(code).ok_or_else(|| PollError::UnknownStatus(code.to_string()))?;
    let name = string_field(entry, "homework_name")?;

    Ok(format!(
        "Status changed for submission \"{}\": {}",
        name,
        status.verdict()
    ))
}

fn string_field<'a>(entry: &'a HomeworkEntry, field: &'static str) -> Result<&'a str, PollError> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .ok_or(PollError::MissingField(field))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
