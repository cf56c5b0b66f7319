//! Error types for the MCP message core
//!
//! Module defines all error types that can occur while building, encoding,
//! or decoding MCP messages, providing structured error handling with
//! detailed context.

use thiserror::Error;

use crate::protocol::jsonrpc::ErrorObject;

/// The main error type for the MCP message core
#[derive(Error, Debug, Clone)]
pub enum McpError {
    /// Transport-related errors (connection, I/O, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Protocol-level errors (malformed envelopes, unexpected shapes, etc.)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid URI format or content
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Method not found (JSON-RPC error)
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Invalid parameters (JSON-RPC error)
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Connection-related errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Builder and invariant validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors from the standard library
    #[error("I/O error: {0}")]
    Io(String),

    /// The peer answered with a JSON-RPC error response
    #[error("Peer error {}: {}", .0.code, .0.message)]
    Peer(ErrorObject),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Cancellation errors
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Internal errors that shouldn't normally occur
    #[error("Internal error: {0}")]
    Internal(String),
}

// Manual From implementations for types that don't implement Clone
impl From<serde_json::Error> for McpError {
    fn from(err: serde_json::Error) -> Self {
        McpError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for McpError {
    fn from(err: std::io::Error) -> Self {
        McpError::Io(err.to_string())
    }
}

impl From<url::ParseError> for McpError {
    fn from(err: url::ParseError) -> Self {
        McpError::InvalidUri(err.to_string())
    }
}

impl From<ErrorObject> for McpError {
    fn from(error: ErrorObject) -> Self {
        McpError::Peer(error)
    }
}

/// Result type alias for MCP operations
pub type McpResult<T> = Result<T, McpError>;

impl McpError {
    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    /// Create a new protocol error
    pub fn protocol<S: Into<String>>(message: S) -> Self {
        Self::Protocol(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new connection error
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// The JSON-RPC error code this error maps to when reported to a peer
    pub fn jsonrpc_code(&self) -> i32 {
        use crate::protocol::jsonrpc::error_codes;
        match self {
            McpError::Serialization(_) => error_codes::PARSE_ERROR,
            McpError::Protocol(_) | McpError::Validation(_) => error_codes::INVALID_REQUEST,
            McpError::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            McpError::InvalidParams(_) | McpError::InvalidUri(_) => error_codes::INVALID_PARAMS,
            McpError::Connection(_) | McpError::Transport(_) => error_codes::CONNECTION_CLOSED,
            McpError::Timeout(_) => error_codes::REQUEST_TIMEOUT,
            McpError::Peer(error) => error.code,
            _ => error_codes::INTERNAL_ERROR,
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            McpError::Transport(_) => false,
            McpError::Protocol(_) => false,
            McpError::Connection(_) => true,
            McpError::Timeout(_) => true,
            McpError::Validation(_) => false,
            McpError::MethodNotFound(_) => false,
            McpError::InvalidParams(_) => false,
            McpError::Serialization(_) => false,
            McpError::InvalidUri(_) => false,
            McpError::Io(_) => true,
            McpError::Peer(_) => false,
            McpError::Cancelled(_) => false,
            McpError::Internal(_) => false,
        }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            McpError::Transport(_) => "transport",
            McpError::Protocol(_) => "protocol",
            McpError::Connection(_) => "connection",
            McpError::Timeout(_) => "timeout",
            McpError::Validation(_) => "validation",
            McpError::MethodNotFound(_) => "not_found",
            McpError::InvalidParams(_) => "validation",
            McpError::Serialization(_) => "serialization",
            McpError::InvalidUri(_) => "validation",
            McpError::Io(_) => "io",
            McpError::Peer(_) => "peer",
            McpError::Cancelled(_) => "cancelled",
            McpError::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = McpError::transport("Connection failed");
        assert_eq!(error.to_string(), "Transport error: Connection failed");
        assert_eq!(error.category(), "transport");
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_error_recovery() {
        assert!(McpError::connection("timeout").is_recoverable());
        assert!(!McpError::validation("invalid input").is_recoverable());
        assert!(McpError::timeout("request timeout").is_recoverable());
    }

    #[test]
    fn test_peer_error_mapping() {
        let error = McpError::from(ErrorObject::new(-32601, "Method not found".to_string()));
        assert_eq!(error.category(), "peer");
        assert_eq!(error.jsonrpc_code(), -32601);
        assert_eq!(error.to_string(), "Peer error -32601: Method not found");
    }

    #[test]
    fn test_jsonrpc_code_mapping() {
        use crate::protocol::jsonrpc::error_codes;
        assert_eq!(
            McpError::protocol("bad envelope").jsonrpc_code(),
            error_codes::INVALID_REQUEST
        );
        assert_eq!(
            McpError::timeout("no response").jsonrpc_code(),
            error_codes::REQUEST_TIMEOUT
        );
        assert_eq!(
            McpError::connection("closed").jsonrpc_code(),
            error_codes::CONNECTION_CLOSED
        );
    }
}
