//! Error statuses to the uniform error.

use halbridge_api::{HalResource, Navigator};
use halbridge_types::HttpError;
use serde_json::Value;

use crate::ProviderError;

/// Message used when an error response carries no usable error context.
pub const GENERIC_ERROR_MESSAGE: &str = "Error has happened while processing the request";

const ERROR_CONTEXT: &str = "errorContext";
const PROBLEM: &str = "problem";

/// Pass a navigation through unchanged unless its status is 400 or above,
/// in which case it becomes a [`ProviderError::Http`].
pub fn ensure_success(navigation: Navigator) -> Result<Navigator, ProviderError> {
    let status = navigation.status();
    if status < 400 {
        return Ok(navigation);
    }
    Err(HttpError::new(error_message(navigation.resource(), status), status).into())
}

/// Best available description of an error document.
///
/// Preference order: `errorContext.problem`, then the whole `errorContext`,
/// then a generic message naming the status.
pub fn error_message(resource: &HalResource, status: u16) -> String {
    let Some(context) = resource.property(ERROR_CONTEXT).filter(|value| is_truthy(value)) else {
        return format!("{GENERIC_ERROR_MESSAGE} (status {status})");
    };
    match context.get(PROBLEM).filter(|value| is_truthy(value)) {
        Some(problem) => render(problem),
        None => render(context),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
