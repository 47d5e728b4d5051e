//! Wire contract of the remote calculation endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ErrorPayload;

pub const CALCULATE_PATH: &str = "/calculate";

/// Body of any non-2xx response from the calculation endpoint.
///
/// `dy_dx` is only sent alongside a 500 when the derivative was computed but
/// the tangent-line stage failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<ErrorPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dy_dx: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: ErrorPayload) -> Self {
        Self {
            error: Some(error),
            dy_dx: None,
        }
    }

    pub fn partial(dy_dx: impl Into<String>, error: ErrorPayload) -> Self {
        Self {
            error: Some(error),
            dy_dx: Some(dy_dx.into()),
        }
    }

    /// Reads a failure body field by field. Any JSON object is accepted;
    /// `dy_dx` is kept only when it is a string. `None` when the body is not
    /// an object.
    pub fn from_value(body: Value) -> Option<Self> {
        let Value::Object(mut fields) = body else {
            return None;
        };
        let error = match fields.remove("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(message)) => Some(ErrorPayload::Message(message)),
            Some(other) => Some(ErrorPayload::Structured(other)),
        };
        let dy_dx = match fields.remove("dy_dx") {
            Some(Value::String(dy_dx)) => Some(dy_dx),
            _ => None,
        };
        Some(Self { error, dy_dx })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{CalculationResult, SubmissionRequest};

    #[test]
    fn request_serializes_with_wire_field_names() {
        let body = serde_json::to_value(SubmissionRequest::new("x^2 - y", "1", "", "exact"))
            .expect("serialize");
        assert_eq!(
            body,
            json!({"fcn": "x^2 - y", "x": "1", "y": "", "output": "exact"})
        );
    }

    #[test]
    fn result_ignores_extra_line_fields() {
        let result: CalculationResult = serde_json::from_value(json!({
            "dy_dx": "2*x",
            "lines": [{"slope": "2", "x_value": "1", "y_value": "2", "equation": "y - 2*x"}]
        }))
        .expect("decode");
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].equation, "y - 2*x");
    }

    #[test]
    fn error_payload_distinguishes_strings_from_objects() {
        let text: ErrorResponse =
            serde_json::from_value(json!({"error": "bad input"})).expect("decode");
        assert_eq!(text.error, Some(ErrorPayload::message("bad input")));

        let structured: ErrorResponse =
            serde_json::from_value(json!({"error": {"code": "bad_input", "field": "x"}}))
                .expect("decode");
        let payload = structured.error.expect("payload");
        assert!(matches!(payload, ErrorPayload::Structured(_)));
        assert_eq!(payload.describe(), r#"{"code":"bad_input","field":"x"}"#);
    }

    #[test]
    fn partial_failure_keeps_derivative() {
        let body: ErrorResponse = serde_json::from_value(json!({
            "dy_dx": "2*x",
            "error": "tangent computation failed"
        }))
        .expect("decode");
        assert_eq!(
            body,
            ErrorResponse::partial("2*x", ErrorPayload::message("tangent computation failed"))
        );
    }

    #[test]
    fn loose_body_keeps_error_when_other_fields_are_mistyped() {
        let body = ErrorResponse::from_value(json!({
            "error": "Invalid request data",
            "dy_dx": 0
        }))
        .expect("object body");
        assert_eq!(body, ErrorResponse::new(ErrorPayload::message("Invalid request data")));

        let structured = ErrorResponse::from_value(json!({"error": ["x", 1], "dy_dx": "2*x"}))
            .expect("object body");
        assert_eq!(
            structured,
            ErrorResponse::partial("2*x", ErrorPayload::Structured(json!(["x", 1])))
        );

        assert_eq!(ErrorResponse::from_value(json!("oops")), None);
        assert_eq!(ErrorResponse::from_value(json!([1, 2])), None);
    }

    #[test]
    fn missing_error_field_decodes_as_none() {
        let body: ErrorResponse = serde_json::from_value(json!({})).expect("decode");
        assert_eq!(body.error, None);
        assert_eq!(body.dy_dx, None);
    }
}
