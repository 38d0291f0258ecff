// Response validation
//
// Every validated endpoint answers `{ "code": ..., ... }`. Success is
// `code == 0`, except the product map which also answers `"0000"`. On
// failure the reply carries `error` and `errno`, which end up verbatim in
// the `Error::Api` message.

use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::error::Error;

/// Which `code` values count as success for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessCode {
    /// Numeric `0` only.
    Zero,
    /// Numeric `0` or the string `"0000"`.
    ZeroOrZeroString,
}

impl SuccessCode {
    pub fn matches(self, response: &Value) -> bool {
        let Some(code) = response.get("code") else {
            return false;
        };
        match self {
            Self::Zero => is_numeric_zero(code),
            Self::ZeroOrZeroString => is_numeric_zero(code) || code.as_str() == Some("0000"),
        }
    }
}

/// `0`, `-0` and `0.0` all count.
fn is_numeric_zero(code: &Value) -> bool {
    code.as_f64().is_some_and(|c| c.abs() < f64::EPSILON)
}

/// Check `response` against `success`, reporting and converting failures.
///
/// Returns the full response on success. A failure reply without `error`
/// or `errno` is reported as [`Error::MalformedResponse`].
pub fn validate(
    response: Value,
    success: SuccessCode,
    operation: &str,
    diagnostics: &dyn Diagnostics,
) -> Result<Value, Error> {
    if success.matches(&response) {
        return Ok(response);
    }

    diagnostics.request_failed(operation, &response);
    Err(failure(&response, operation))
}

/// Take the payload subtree stored under `key` out of a validated reply.
pub fn take_payload(mut response: Value, key: &str, operation: &str) -> Result<Value, Error> {
    response
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| Error::MalformedResponse {
            message: format!("missing `{key}` in reply on {operation}"),
        })
}

fn failure(response: &Value, operation: &str) -> Error {
    match (response.get("error"), response.get("errno")) {
        (Some(error), Some(errno)) => Error::Api {
            message: format!(
                "failure {} ({}) on {operation}",
                display_field(error),
                display_field(errno)
            ),
        },
        _ => Error::MalformedResponse {
            message: format!("failure reply without `error`/`errno` on {operation}: {response}"),
        },
    }
}

/// Strings render bare, everything else as JSON.
fn display_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
