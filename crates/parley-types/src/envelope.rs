use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Application-level code the backend uses for a successful call.
pub const SUCCESS_CODE: i64 = 200;

/// Wrapper every backend response carries around its payload.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: None,
            data: Some(data),
        }
    }

    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data: None,
        }
    }

    /// A zero code is treated like a missing one and never marks a failure.
    pub fn is_success(&self) -> bool {
        !is_failure_code(self.code)
    }
}

pub fn is_failure_code(code: i64) -> bool {
    code != 0 && code != SUCCESS_CODE
}

/// Code reported by [`CodeOutcome::Failure`] when the body's `code` is not an
/// integer.
pub const UNKNOWN_FAILURE_CODE: i64 = -1;

/// What the `code` field of a raw response body says about the call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CodeOutcome {
    /// Missing or empty (`null`, `false`, `0`, `""`): the body is not an envelope.
    Absent,
    Success,
    Failure(i64),
}

/// Classifies a raw `code` value. Only a number equal to [`SUCCESS_CODE`]
/// counts as success; any other non-empty value is a failure.
pub fn classify_code(code: Option<&Value>) -> CodeOutcome {
    let Some(code) = code else {
        return CodeOutcome::Absent;
    };
    match code {
        Value::Null | Value::Bool(false) => CodeOutcome::Absent,
        Value::String(text) if text.is_empty() => CodeOutcome::Absent,
        Value::Number(number) => match number.as_f64() {
            Some(value) if value == 0.0 => CodeOutcome::Absent,
            Some(value) if value == SUCCESS_CODE as f64 => CodeOutcome::Success,
            Some(value) => CodeOutcome::Failure(number.as_i64().unwrap_or_else(|| {
                if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
                    value as i64
                } else {
                    UNKNOWN_FAILURE_CODE
                }
            })),
            None => CodeOutcome::Failure(UNKNOWN_FAILURE_CODE),
        },
        _ => CodeOutcome::Failure(UNKNOWN_FAILURE_CODE),
    }
}
