// Copyright (c) 2025 MCP Rust Contributors
// SPDX-License-Identifier: MIT

//! # mcp-wire
//!
//! Message core for the [Model Context Protocol (MCP)](https://modelcontextprotocol.io/):
//! the typed data model, the JSON-RPC 2.0 envelope with direction-aware
//! polymorphic dispatch, checked builders, and the transport contract every
//! MCP client and server shares.
//!
//! The crate deliberately stops at the message boundary. Session
//! orchestration (handshakes, request correlation, timeouts) and concrete
//! transports build on top of it; encoding and decoding here are pure,
//! synchronous, and thread-safe.
//!
//! ## Decoding
//!
//! A raw frame classifies by envelope shape, then by method (requests and
//! notifications) or by result shape (responses carry no method):
//!
//! ```rust
//! use mcp_wire::prelude::*;
//!
//! # fn main() -> McpResult<()> {
//! let frame = r#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#;
//! match JsonRpcMessage::from_json(frame)? {
//!     JsonRpcMessage::Request(request) => {
//!         // A client consumes server requests; ping resolves per direction
//!         let decoded = ServerRequest::from_request(&request)?;
//!         assert!(matches!(decoded, ServerRequest::Ping(_)));
//!     }
//!     _ => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Building and encoding
//!
//! ```rust
//! use mcp_wire::prelude::*;
//!
//! # fn main() -> McpResult<()> {
//! let result = CallToolResult::builder().text("ok").build()?;
//! let response = ServerResult::CallTool(result).into_response(RequestId::number(7))?;
//! let frame = serde_json::to_string(&response)?;
//! assert!(frame.contains("\"id\":7"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module organization
//!
//! - [`core`]: the error model
//! - [`protocol`]: entity types, envelopes, dispatch, builders, validation
//! - [`transport`]: the contract the core consumes from transports

pub mod core;
pub mod protocol;
pub mod transport;

// Re-export commonly used types for convenience
pub use core::error::{McpError, McpResult};
pub use protocol::jsonrpc::{JsonRpcMessage, RequestId};
pub use protocol::methods::Method;

/// Prelude module for convenient imports
///
/// Module re-exports the most commonly used types and traits for easy
/// access. Use `use mcp_wire::prelude::*;` to import everything you need.
pub mod prelude {
    pub use crate::core::error::{McpError, McpResult};

    // Envelopes and dispatch
    pub use crate::protocol::dispatch::{
        AnyNotification, AnyRequest, AnyResult, ClientNotification, ClientRequest, ClientResult,
        ServerNotification, ServerRequest, ServerResult,
    };
    pub use crate::protocol::jsonrpc::{
        ErrorObject, JsonRpcErrorResponse, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest,
        JsonRpcResponse, RequestId, error_codes,
    };
    pub use crate::protocol::methods::Method;

    // Data model and messages
    pub use crate::protocol::messages::*;
    pub use crate::protocol::types::*;
    pub use crate::protocol::version::{
        LATEST_PROTOCOL_VERSION, SUPPORTED_PROTOCOL_VERSIONS, negotiate_version,
    };

    // Transport contract
    pub use crate::transport::{Transport, TransportHandlers, TransportSendOptions};

    // Essential external types
    pub use async_trait::async_trait;
    pub use serde_json::{Value, json};
    pub use std::collections::HashMap;
}
