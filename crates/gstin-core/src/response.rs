//! Classification of lookup API responses.
//!
//! The HTTP transport lives in the CLI; this module turns an already-received
//! `(status, body)` pair into either the record payload or a [`LookupError`]
//! carrying the message to show the user. Keeping it pure means every branch
//! of the fallback chain is testable without a network.
//!
//! Error text for a non-success status is chosen in this order:
//!
//! 1. the body's `message` field, if the body is JSON and it is a non-empty
//!    string;
//! 2. the body's `error` field, under the same conditions;
//! 3. the raw body text, if the body is not JSON and is non-empty;
//! 4. `API call failed with status: {code}`.
use serde_json::{Map, Value};

/// The JSON object returned by a successful lookup, before normalization.
pub type RawResponse = Map<String, Value>;

/// Message used when a successful response carries no usable record.
pub const NO_DETAILS_MESSAGE: &str = "no details found";

/// Errors surfaced by a lookup.
///
/// Every variant displays as the single message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The API answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the body, or the generic fallback.
        message: String,
    },
    /// The payload was falsy, or not a JSON object.
    #[error("no details found")]
    NoDetails,
    /// A success response whose body is not valid JSON.
    #[error("invalid response from lookup API: {detail}")]
    InvalidBody {
        /// Parser error text.
        detail: String,
    },
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("{detail}")]
    Transport {
        /// Underlying transport error text.
        detail: String,
    },
}

impl LookupError {
    /// Returns the HTTP status for [`LookupError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::NoDetails | Self::InvalidBody { .. } | Self::Transport { .. } => None,
        }
    }
}

/// Returns `true` for a 2xx status.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Classifies a received response.
///
/// # Errors
///
/// - [`LookupError::Status`] for any non-2xx status.
/// - [`LookupError::InvalidBody`] when a 2xx body is not JSON.
/// - [`LookupError::NoDetails`] when the payload is falsy or not an object.
pub fn classify_response(status: u16, body: &str) -> Result<RawResponse, LookupError> {
    if !is_success(status) {
        return Err(LookupError::Status {
            status,
            message: error_message(status, body),
        });
    }
    let payload: Value = serde_json::from_str(body).map_err(|e| LookupError::InvalidBody {
        detail: e.to_string(),
    })?;
    select_payload(payload)
}

/// Picks the record out of a decoded success payload.
///
/// Falsy payloads (`null`, `false`, `0`, `""`) yield
/// [`LookupError::NoDetails`]. Otherwise a truthy `data` member is returned;
/// when `data` is absent or falsy the whole payload is returned unchanged,
/// `data` key included.
///
/// # Errors
///
/// [`LookupError::NoDetails`] when nothing usable is present.
pub fn select_payload(payload: Value) -> Result<RawResponse, LookupError> {
    if is_falsy(&payload) {
        return Err(LookupError::NoDetails);
    }
    let selected = match payload {
        Value::Object(mut obj) => match obj.get_mut("data") {
            Some(data) if !is_falsy(data) => data.take(),
            Some(_) | None => Value::Object(obj),
        },
        other => other,
    };
    match selected {
        Value::Object(record) => Ok(record),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
            Err(LookupError::NoDetails)
        }
    }
}

/// Builds the user-facing message for a non-success response.
pub fn error_message(status: u16, body: &str) -> String {
    let extracted = match serde_json::from_str::<Value>(body) {
        Ok(json) => ["message", "error"]
            .iter()
            .find_map(|key| non_empty_str(json.get(*key)))
            .map(str::to_owned),
        Err(_) => Some(body.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_owned),
    };
    extracted.unwrap_or_else(|| format!("API call failed with status: {status}"))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// JavaScript-style truthiness of a decoded payload.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn not_found_uses_message_field() {
        let err = classify_response(404, r#"{"message":"not found"}"#).expect_err("404");
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn server_error_uses_raw_text_body() {
        let err = classify_response(500, "Internal error").expect_err("500");
        assert_eq!(err.to_string(), "Internal error");
    }

    #[test]
    fn error_field_used_when_message_absent() {
        let err = classify_response(401, r#"{"error":"invalid key"}"#).expect_err("401");
        assert_eq!(err.to_string(), "invalid key");
    }

    #[test]
    fn message_takes_precedence_over_error() {
        let msg = error_message(400, r#"{"message":"bad gstin","error":"Bad Request"}"#);
        assert_eq!(msg, "bad gstin");
    }

    #[test]
    fn empty_message_falls_through_to_error() {
        let msg = error_message(400, r#"{"message":"","error":"Bad Request"}"#);
        assert_eq!(msg, "Bad Request");
    }

    #[test]
    fn json_without_known_fields_uses_generic_message() {
        let msg = error_message(429, r#"{"detail":"slow down"}"#);
        assert_eq!(msg, "API call failed with status: 429");
    }

    #[test]
    fn empty_body_uses_generic_message() {
        assert_eq!(error_message(503, ""), "API call failed with status: 503");
        assert_eq!(error_message(503, "   "), "API call failed with status: 503");
    }

    #[test]
    fn success_returns_data_member() {
        let record = classify_response(
            200,
            r#"{"data":{"gstin":"27ABCDE1234F1Z5","legal_name":"Acme"},"success":true}"#,
        )
        .expect("success");
        assert_eq!(record.get("legal_name"), Some(&json!("Acme")));
        assert!(record.get("success").is_none());
    }

    #[test]
    fn success_without_data_returns_whole_payload() {
        let record = classify_response(200, r#"{"gstin":"27ABCDE1234F1Z5"}"#).expect("success");
        assert_eq!(record.get("gstin"), Some(&json!("27ABCDE1234F1Z5")));
    }

    #[test]
    fn falsy_data_returns_whole_payload() {
        for data in ["null", "false", "0", "\"\""] {
            let body = format!(r#"{{"data":{data},"gstin":"x"}}"#);
            let record = classify_response(200, &body).expect("success");
            assert_eq!(record.len(), 2, "body {body}");
            assert_eq!(record.get("gstin"), Some(&json!("x")), "body {body}");
            assert_eq!(
                record.get("data"),
                Some(&serde_json::from_str::<Value>(data).expect("literal")),
                "body {body}"
            );
        }
    }

    #[test]
    fn falsy_payloads_are_no_details() {
        for body in ["null", "false", "0", "\"\""] {
            let err = classify_response(200, body).expect_err(body);
            assert_eq!(err, LookupError::NoDetails, "body {body}");
            assert_eq!(err.to_string(), NO_DETAILS_MESSAGE);
        }
    }

    #[test]
    fn non_object_data_is_no_details() {
        assert_eq!(
            classify_response(200, r#"{"data":"pending"}"#),
            Err(LookupError::NoDetails)
        );
        assert_eq!(classify_response(200, "[1,2]"), Err(LookupError::NoDetails));
    }

    #[test]
    fn empty_object_is_a_valid_empty_record() {
        let record = classify_response(200, "{}").expect("success");
        assert!(record.is_empty());
    }

    #[test]
    fn invalid_json_on_success_is_invalid_body() {
        let err = classify_response(200, "<html>").expect_err("not json");
        assert!(matches!(err, LookupError::InvalidBody { .. }), "{err:?}");
    }

    #[test]
    fn redirect_status_is_not_success() {
        assert!(!is_success(304));
        assert!(is_success(204));
    }
}
