//! MCP protocol implementation
//!
//! This module contains the protocol data model, the JSON-RPC envelope layer,
//! the direction-aware polymorphic dispatch, checked builders, and the
//! invariant checks they share.

pub mod builders;
pub mod dispatch;
pub mod jsonrpc;
pub mod messages;
pub mod methods;
pub mod types;
pub mod validation;
pub mod version;

pub use builders::*;
pub use dispatch::{
    AnyNotification, AnyRequest, AnyResult, ClientNotification, ClientRequest, ClientResult,
    ServerNotification, ServerRequest, ServerResult,
};
pub use jsonrpc::{
    ErrorObject, JSONRPC_VERSION, JsonRpcErrorResponse, JsonRpcMessage, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, JsonRpcVersion, RequestId, error_codes,
};
pub use messages::*;
pub use methods::Method;
pub use types::*;
pub use version::{LATEST_PROTOCOL_VERSION, SUPPORTED_PROTOCOL_VERSIONS, negotiate_version};
