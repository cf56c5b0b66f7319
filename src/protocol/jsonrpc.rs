//! JSON-RPC 2.0 envelope layer for MCP
//!
//! Module defines the four envelope shapes (request, notification, response,
//! error response), the request ID model with its process-wide counter, and
//! the shape-based dispatch that classifies a raw JSON object into one of the
//! envelopes. MCP carries no explicit envelope tag: classification is driven
//! purely by field presence, in a fixed order (`error`, then `result`, then
//! `method`+`id`, then `method`).

use std::sync::atomic::{AtomicI64, Ordering};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::error::{McpError, McpResult};
use crate::protocol::methods::Method;

/// JSON-RPC version string carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC error codes used by the protocol
pub mod error_codes {
    /// Parse error (invalid JSON)
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid request (malformed envelope)
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid parameters
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Connection closed before a response arrived
    pub const CONNECTION_CLOSED: i32 = -32000;
    /// Request timed out
    pub const REQUEST_TIMEOUT: i32 = -32001;
}

// Shared by every outbound request in the process; responses correlate by id
// match within one transport, so cross-session uniqueness just simplifies logs.
static NEXT_REQUEST_ID: AtomicI64 = AtomicI64::new(1);

/// JSON-RPC request ID: a string or a signed 64-bit integer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// User-supplied string ID (must not be empty)
    String(String),
    /// Integer ID, normally allocated by [`RequestId::next`]
    Number(i64),
}

impl RequestId {
    /// Allocate the next integer ID from the process-wide counter.
    ///
    /// IDs are strictly increasing within a process, starting at 1.
    pub fn next() -> Self {
        RequestId::Number(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Create a string-based request ID
    pub fn string(s: impl Into<String>) -> Self {
        RequestId::String(s.into())
    }

    /// Create a number-based request ID
    pub fn number(n: i64) -> Self {
        RequestId::Number(n)
    }

    /// Validate the request ID (string IDs must not be empty)
    pub fn validate(&self) -> McpResult<()> {
        match self {
            RequestId::String(s) if s.is_empty() => Err(McpError::Validation(
                "request ID string cannot be empty".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::String(s) => write!(f, "{s}"),
            RequestId::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId::String(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

/// Marker for the fixed `jsonrpc: "2.0"` field.
///
/// Serializes as the literal string and refuses anything else on decode, so
/// the version can never be misconfigured on an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonRpcVersion;

impl Serialize for JsonRpcVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(JSONRPC_VERSION)
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let version = String::deserialize(deserializer)?;
        if version == JSONRPC_VERSION {
            Ok(JsonRpcVersion)
        } else {
            Err(D::Error::custom(format!(
                "expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{version}\""
            )))
        }
    }
}

/// JSON-RPC request envelope (has both `id` and `method`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: JsonRpcVersion,
    /// Request ID for correlation
    pub id: RequestId,
    /// Method name being called
    pub method: Method,
    /// Method parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: Method, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            id,
            method,
            params,
        }
    }
}

/// JSON-RPC notification envelope (has `method`, no `id`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcNotification {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: JsonRpcVersion,
    /// Method name being called
    pub method: Method,
    /// Method parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    pub fn new(method: Method, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            method,
            params,
        }
    }
}

/// JSON-RPC success response envelope (has `id` and `result`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: JsonRpcVersion,
    /// ID of the request being answered
    pub id: RequestId,
    /// Result payload
    pub result: Value,
}

impl JsonRpcResponse {
    pub fn new(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            id,
            result,
        }
    }
}

/// JSON-RPC error response envelope (has `id` and `error`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcErrorResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: JsonRpcVersion,
    /// ID of the request being answered; null when the request was undecodable
    #[serde(default)]
    pub id: Option<RequestId>,
    /// Error information
    pub error: ErrorObject,
}

impl JsonRpcErrorResponse {
    pub fn new(id: Option<RequestId>, error: ErrorObject) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            id,
            error,
        }
    }
}

/// Error object carried by an error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorObject {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Additional error data (arbitrary JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorObject {
    pub fn new(code: i32, message: String) -> Self {
        Self {
            code,
            message,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn parse_error(message: Option<String>) -> Self {
        let msg = message.unwrap_or_else(|| "Parse error".to_string());
        Self::new(error_codes::PARSE_ERROR, msg)
    }

    pub fn invalid_request(message: Option<String>) -> Self {
        let msg = message.unwrap_or_else(|| "Invalid request".to_string());
        Self::new(error_codes::INVALID_REQUEST, msg)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {method}"),
        )
    }

    pub fn invalid_params(message: Option<String>) -> Self {
        let msg = message.unwrap_or_else(|| "Invalid parameters".to_string());
        Self::new(error_codes::INVALID_PARAMS, msg)
    }

    pub fn internal_error(message: Option<String>) -> Self {
        let msg = message.unwrap_or_else(|| "Internal error".to_string());
        Self::new(error_codes::INTERNAL_ERROR, msg)
    }

    pub fn connection_closed() -> Self {
        Self::new(
            error_codes::CONNECTION_CLOSED,
            "Connection closed".to_string(),
        )
    }

    pub fn request_timeout() -> Self {
        Self::new(error_codes::REQUEST_TIMEOUT, "Request timeout".to_string())
    }
}

impl std::fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// A complete JSON-RPC message, classified by shape
#[derive(Debug, Clone, PartialEq)]
pub enum JsonRpcMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
    Response(JsonRpcResponse),
    Error(JsonRpcErrorResponse),
}

impl JsonRpcMessage {
    /// The correlation ID carried by this message, if any
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            JsonRpcMessage::Request(request) => Some(&request.id),
            JsonRpcMessage::Notification(_) => None,
            JsonRpcMessage::Response(response) => Some(&response.id),
            JsonRpcMessage::Error(error) => error.id.as_ref(),
        }
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, JsonRpcMessage::Notification(_))
    }

    /// Decode one complete JSON text frame into a classified envelope
    pub fn from_json(text: &str) -> McpResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Classify a raw JSON value by field presence
    pub fn from_value(value: Value) -> McpResult<Self> {
        serde_json::from_value(value).map_err(|e| McpError::Protocol(e.to_string()))
    }

    /// Encode this envelope as a single JSON text frame
    pub fn to_json(&self) -> McpResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<JsonRpcRequest> for JsonRpcMessage {
    fn from(request: JsonRpcRequest) -> Self {
        JsonRpcMessage::Request(request)
    }
}

impl From<JsonRpcNotification> for JsonRpcMessage {
    fn from(notification: JsonRpcNotification) -> Self {
        JsonRpcMessage::Notification(notification)
    }
}

impl From<JsonRpcResponse> for JsonRpcMessage {
    fn from(response: JsonRpcResponse) -> Self {
        JsonRpcMessage::Response(response)
    }
}

impl From<JsonRpcErrorResponse> for JsonRpcMessage {
    fn from(error: JsonRpcErrorResponse) -> Self {
        JsonRpcMessage::Error(error)
    }
}

impl Serialize for JsonRpcMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonRpcMessage::Request(request) => request.serialize(serializer),
            JsonRpcMessage::Notification(notification) => notification.serialize(serializer),
            JsonRpcMessage::Response(response) => response.serialize(serializer),
            JsonRpcMessage::Error(error) => error.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for JsonRpcMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let (has_error, has_result, has_method, has_id) = match value.as_object() {
            Some(object) => (
                object.contains_key("error"),
                object.contains_key("result"),
                object.contains_key("method"),
                object.contains_key("id"),
            ),
            None => return Err(D::Error::custom("JSON-RPC message must be an object")),
        };

        // Classification order matters: `error` and `result` win over `method`
        // so that malformed hybrids are rejected by the stricter envelope type.
        if has_error {
            let error = JsonRpcErrorResponse::deserialize(value).map_err(D::Error::custom)?;
            return Ok(JsonRpcMessage::Error(error));
        }
        if has_result {
            let response = JsonRpcResponse::deserialize(value).map_err(D::Error::custom)?;
            return Ok(JsonRpcMessage::Response(response));
        }
        if has_method {
            if has_id {
                let request = JsonRpcRequest::deserialize(value).map_err(D::Error::custom)?;
                return Ok(JsonRpcMessage::Request(request));
            }
            let notification = JsonRpcNotification::deserialize(value).map_err(D::Error::custom)?;
            return Ok(JsonRpcMessage::Notification(notification));
        }

        Err(D::Error::custom(
            "invalid JSON-RPC envelope: expected error, result, or method field",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_id_counter_is_strictly_increasing() {
        let first = RequestId::next();
        let second = RequestId::next();
        let third = RequestId::next();
        match (first, second, third) {
            (RequestId::Number(a), RequestId::Number(b), RequestId::Number(c)) => {
                assert!(a >= 1);
                assert!(a < b && b < c);
            }
            other => panic!("expected number IDs, got {other:?}"),
        }
    }

    #[test]
    fn test_request_id_serde() {
        let string_id: RequestId = serde_json::from_value(json!("abc")).unwrap();
        assert_eq!(string_id, RequestId::string("abc"));

        let number_id: RequestId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(number_id, RequestId::number(42));

        assert!(serde_json::from_value::<RequestId>(json!(null)).is_err());
        assert!(serde_json::from_value::<RequestId>(json!(1.5)).is_err());
    }

    #[test]
    fn test_request_id_validation() {
        assert!(RequestId::string("req-1").validate().is_ok());
        assert!(RequestId::number(0).validate().is_ok());
        assert!(RequestId::string("").validate().is_err());
    }

    #[test]
    fn test_envelope_shape_dispatch() {
        let request = JsonRpcMessage::from_json(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
        )
        .unwrap();
        assert!(matches!(request, JsonRpcMessage::Request(_)));

        let notification = JsonRpcMessage::from_json(
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        )
        .unwrap();
        assert!(matches!(notification, JsonRpcMessage::Notification(_)));

        let response =
            JsonRpcMessage::from_json(r#"{"jsonrpc":"2.0","id":1,"result":{}}"#).unwrap();
        assert!(matches!(response, JsonRpcMessage::Response(_)));

        let error = JsonRpcMessage::from_json(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"nope"}}"#,
        )
        .unwrap();
        assert!(matches!(error, JsonRpcMessage::Error(_)));
    }

    #[test]
    fn test_envelope_dispatch_rejects_shapeless_objects() {
        assert!(JsonRpcMessage::from_json(r#"{"jsonrpc":"2.0","id":1}"#).is_err());
        assert!(JsonRpcMessage::from_json(r#"{"jsonrpc":"2.0"}"#).is_err());
        assert!(JsonRpcMessage::from_json("[1,2,3]").is_err());
    }

    #[test]
    fn test_jsonrpc_version_is_fixed() {
        let request = JsonRpcRequest::new(RequestId::number(1), Method::Ping, None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");

        let wrong_version = r#"{"jsonrpc":"1.0","id":1,"method":"ping"}"#;
        assert!(JsonRpcMessage::from_json(wrong_version).is_err());
    }

    #[test]
    fn test_error_response_with_null_id() {
        let error = JsonRpcMessage::from_json(
            r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32700,"message":"Parse error"}}"#,
        )
        .unwrap();
        match error {
            JsonRpcMessage::Error(response) => {
                assert_eq!(response.id, None);
                assert_eq!(response.error.code, error_codes::PARSE_ERROR);
            }
            other => panic!("expected error response, got {other:?}"),
        }
    }

    #[test]
    fn test_notification_has_no_id_on_wire() {
        let notification = JsonRpcNotification::new(
            Method::Cancelled,
            Some(json!({"requestId": 9, "reason": "user"})),
        );
        let json = serde_json::to_value(&notification).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["method"], "notifications/cancelled");
    }

    #[test]
    fn test_round_trip_request() {
        let request = JsonRpcRequest::new(
            RequestId::string("req-7"),
            Method::CallTool,
            Some(json!({"name": "echo"})),
        );
        let text = serde_json::to_string(&JsonRpcMessage::Request(request.clone())).unwrap();
        let decoded = JsonRpcMessage::from_json(&text).unwrap();
        assert_eq!(decoded, JsonRpcMessage::Request(request));
    }
}
