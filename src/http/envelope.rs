//! # Response Envelope
//!
//! The backend answers in three shapes: bare JSON (object or array), Spring pages
//! (`content` + `totalPages`/`totalElements`), and bodies that already carry a `success`
//! flag. [`ApiResponse::from_exchange`] folds all of them, plus transport failures and
//! non-2xx statuses, into one [`ApiResponse`].

use super::transport::{HttpResponse, TransportError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// User-facing messages for one operation.
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    pub success: &'a str,
    pub failure: &'a str,
}

impl<'a> Messages<'a> {
    pub const fn new(success: &'a str, failure: &'a str) -> Self {
        Self { success, failure }
    }
}

/// Uniform result of every backend call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            error: None,
            total_pages: None,
            total_elements: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error,
            total_pages: None,
            total_elements: None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            error: self.error,
            total_pages: self.total_pages,
            total_elements: self.total_elements,
        }
    }

    /// The payload of a successful response.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Fold a finished (or failed) exchange into an envelope.
    pub fn from_exchange(
        exchange: Result<HttpResponse, TransportError>,
        messages: Messages<'_>,
    ) -> Self {
        match exchange {
            Ok(response) if response.is_success() => match response.parse::<Value>() {
                Ok(body) => Self::from_body(body, messages),
                Err(e) => Self::failure(messages.failure, Some(e.to_string())),
            },
            Ok(response) => {
                let backend_message = response
                    .parse::<Value>()
                    .ok()
                    .and_then(|body| message_field(&body));
                warn!(status = response.status, message = ?backend_message, "Backend rejected request");
                Self::failure(
                    backend_message.unwrap_or_else(|| messages.failure.to_string()),
                    Some(format!("HTTP {}", response.status)),
                )
            }
            Err(e) => {
                warn!(error = %e, "Backend unreachable");
                Self::failure(messages.failure, Some(e.to_string()))
            }
        }
    }

    /// Normalize a decoded 2xx body.
    pub fn from_body(body: Value, messages: Messages<'_>) -> Self {
        let normalized = match &body {
            Value::Object(map) if map.get("success").is_some_and(Value::is_boolean) => {
                Self::from_envelope(&body, messages)
            }
            Value::Object(map)
                if map.get("content").is_some_and(Value::is_array)
                    && (map.contains_key("totalPages") || map.contains_key("totalElements")) =>
            {
                Self::from_page(&body, messages)
            }
            _ => decode_data(body.clone()).map(|data| Self::ok(data, messages.success)),
        };

        normalized.unwrap_or_else(|e| {
            warn!(error = %e, "Unexpected response shape");
            Self::failure(messages.failure, Some(e.to_string()))
        })
    }

    fn from_envelope(body: &Value, messages: Messages<'_>) -> Result<Self, serde_json::Error> {
        let success = body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let default_message = if success {
            messages.success
        } else {
            messages.failure
        };
        Ok(Self {
            success,
            message: message_field(body).unwrap_or_else(|| default_message.to_string()),
            data: match body.get("data") {
                Some(data) => decode_data(data.clone())?,
                None => None,
            },
            error: body.get("error").and_then(Value::as_str).map(str::to_string),
            total_pages: number_field(body, "totalPages").and_then(|n| u32::try_from(n).ok()),
            total_elements: number_field(body, "totalElements"),
        })
    }

    fn from_page(body: &Value, messages: Messages<'_>) -> Result<Self, serde_json::Error> {
        let content = body.get("content").cloned().unwrap_or(Value::Null);
        let mut response = Self::ok(decode_data(content)?, messages.success);
        response.total_pages = number_field(body, "totalPages").and_then(|n| u32::try_from(n).ok());
        response.total_elements = number_field(body, "totalElements");
        Ok(response)
    }
}

fn decode_data<T: DeserializeOwned>(value: Value) -> Result<Option<T>, serde_json::Error> {
    if value.is_null() {
        Ok(None)
    } else {
        serde_json::from_value(value).map(Some)
    }
}

fn message_field(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

fn number_field(body: &Value, key: &str) -> Option<u64> {
    body.get(key).and_then(Value::as_u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MESSAGES: Messages<'static> = Messages::new("Loaded", "Could not load");

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_bare_object_becomes_data() {
        let response = ApiResponse::<Item>::from_body(json!({"id": "a"}), MESSAGES);
        assert!(response.success);
        assert_eq!(response.message, "Loaded");
        assert_eq!(response.data, Some(Item { id: "a".into() }));
    }

    #[test]
    fn test_spring_page_is_unwrapped_with_counters() {
        let body = json!({
            "content": [{"id": "a"}, {"id": "b"}],
            "totalPages": 3,
            "totalElements": 25,
            "number": 0,
            "size": 10
        });
        let response = ApiResponse::<Vec<Item>>::from_body(body, MESSAGES);
        assert!(response.success);
        assert_eq!(response.data.as_ref().map(Vec::len), Some(2));
        assert_eq!(response.total_pages, Some(3));
        assert_eq!(response.total_elements, Some(25));
    }

    #[test]
    fn test_existing_envelope_passes_through() {
        let body = json!({"success": false, "message": "Order not found"});
        let response = ApiResponse::<Item>::from_body(body, MESSAGES);
        assert!(!response.success);
        assert_eq!(response.message, "Order not found");
        assert!(response.data.is_none());
    }

    #[test]
    fn test_envelope_without_message_uses_default() {
        let body = json!({"success": true, "data": {"id": "z"}});
        let response = ApiResponse::<Item>::from_body(body, MESSAGES);
        assert_eq!(response.message, "Loaded");
        assert_eq!(response.into_data(), Some(Item { id: "z".into() }));
    }

    #[test]
    fn test_shape_mismatch_is_failure_not_panic() {
        let response = ApiResponse::<Item>::from_body(json!([1, 2]), MESSAGES);
        assert!(!response.success);
        assert_eq!(response.message, "Could not load");
        assert!(response.error.is_some());
    }

    #[test]
    fn test_error_status_prefers_backend_message() {
        let exchange = Ok(HttpResponse::new(409, r#"{"message":"Invalid status transition"}"#));
        let response = ApiResponse::<Item>::from_exchange(exchange, MESSAGES);
        assert!(!response.success);
        assert_eq!(response.message, "Invalid status transition");
        assert_eq!(response.error.as_deref(), Some("HTTP 409"));
    }

    #[test]
    fn test_error_status_without_body_uses_default() {
        let exchange = Ok(HttpResponse::new(500, ""));
        let response = ApiResponse::<Item>::from_exchange(exchange, MESSAGES);
        assert_eq!(response.message, "Could not load");
    }

    #[test]
    fn test_transport_error_becomes_failure_envelope() {
        let exchange = Err(TransportError::Timeout("120s".into()));
        let response = ApiResponse::<Item>::from_exchange(exchange, MESSAGES);
        assert!(!response.success);
        assert!(response.error.unwrap().contains("timed out"));
    }

    #[test]
    fn test_empty_success_body_has_no_data() {
        let exchange = Ok(HttpResponse::new(204, ""));
        let response = ApiResponse::<Item>::from_exchange(exchange, MESSAGES);
        assert!(response.success);
        assert!(response.data.is_none());
    }
}
