//! Direction-aware message dispatch
//!
//! Module maps raw JSON-RPC envelopes onto typed protocol messages and back.
//! Requests and notifications dispatch on the method string through a pair of
//! lazily built tables (one per direction); results carry no method and
//! dispatch on the set of top-level keys, in an order that matters because
//! some result shapes are supersets of others.
//!
//! A concrete message type may inhabit both directions (`ping`, the task
//! operations); the direction is a property of the decoder the caller picks,
//! not of the type.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::error::{McpError, McpResult};
use crate::protocol::jsonrpc::{
    JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, RequestId,
};
use crate::protocol::messages::*;
use crate::protocol::methods::{self, Method};

// ============================================================================
// Params plumbing
// ============================================================================

fn required_params<T: DeserializeOwned>(params: Option<&Value>, method: &str) -> McpResult<T> {
    let value = params
        .ok_or_else(|| McpError::InvalidParams(format!("{method} requires params")))?;
    serde_json::from_value(value.clone())
        .map_err(|e| McpError::InvalidParams(format!("{method}: {e}")))
}

fn optional_params<T: DeserializeOwned + Default>(
    params: Option<&Value>,
    method: &str,
) -> McpResult<T> {
    match params {
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| McpError::InvalidParams(format!("{method}: {e}"))),
        None => Ok(T::default()),
    }
}

fn params_to_value<T: Serialize>(params: &T) -> McpResult<Option<Value>> {
    let value = serde_json::to_value(params)?;
    match value {
        Value::Object(ref map) if map.is_empty() => Ok(None),
        other => Ok(Some(other)),
    }
}

fn result_from_value<T: DeserializeOwned>(value: &Value, shape: &str) -> McpResult<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| McpError::Protocol(format!("malformed {shape} result: {e}")))
}

fn is_empty_or_meta_only(object: &Map<String, Value>) -> bool {
    object.keys().all(|key| key == "_meta")
}

// ============================================================================
// Requests
// ============================================================================

/// A request issued by the client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRequest {
    Initialize(InitializeParams),
    Ping(PingParams),
    ListTools(ListToolsParams),
    CallTool(CallToolParams),
    ListResources(ListResourcesParams),
    ReadResource(ReadResourceParams),
    Subscribe(SubscribeParams),
    Unsubscribe(UnsubscribeParams),
    ListResourceTemplates(ListResourceTemplatesParams),
    ListPrompts(ListPromptsParams),
    GetPrompt(GetPromptParams),
    Complete(CompleteParams),
    SetLevel(SetLevelParams),
    GetTask(GetTaskParams),
    GetTaskPayload(GetTaskPayloadParams),
    ListTasks(ListTasksParams),
    CancelTask(CancelTaskParams),
    Custom(CustomRequest),
}

/// A request issued by the server
#[derive(Debug, Clone, PartialEq)]
pub enum ServerRequest {
    Ping(PingParams),
    CreateMessage(CreateMessageParams),
    Elicit(ElicitParams),
    ListRoots(ListRootsParams),
    GetTask(GetTaskParams),
    GetTaskPayload(GetTaskPayloadParams),
    ListTasks(ListTasksParams),
    CancelTask(CancelTaskParams),
    Custom(CustomRequest),
}

/// A request whose direction was not known to the decoder
#[derive(Debug, Clone, PartialEq)]
pub enum AnyRequest {
    Client(ClientRequest),
    Server(ServerRequest),
    Custom(CustomRequest),
}

type ClientRequestDecoder = fn(Option<&Value>) -> McpResult<ClientRequest>;
type ServerRequestDecoder = fn(Option<&Value>) -> McpResult<ServerRequest>;

static CLIENT_REQUEST_DECODERS: Lazy<HashMap<&'static str, ClientRequestDecoder>> =
    Lazy::new(|| {
        let mut table: HashMap<&'static str, ClientRequestDecoder> = HashMap::new();
        table.insert(methods::INITIALIZE, |p| {
            Ok(ClientRequest::Initialize(required_params(
                p,
                methods::INITIALIZE,
            )?))
        });
        table.insert(methods::PING, |p| {
            Ok(ClientRequest::Ping(optional_params(p, methods::PING)?))
        });
        table.insert(methods::TOOLS_LIST, |p| {
            Ok(ClientRequest::ListTools(optional_params(
                p,
                methods::TOOLS_LIST,
            )?))
        });
        table.insert(methods::TOOLS_CALL, |p| {
            Ok(ClientRequest::CallTool(required_params(
                p,
                methods::TOOLS_CALL,
            )?))
        });
        table.insert(methods::RESOURCES_LIST, |p| {
            Ok(ClientRequest::ListResources(optional_params(
                p,
                methods::RESOURCES_LIST,
            )?))
        });
        table.insert(methods::RESOURCES_READ, |p| {
            Ok(ClientRequest::ReadResource(required_params(
                p,
                methods::RESOURCES_READ,
            )?))
        });
        table.insert(methods::RESOURCES_SUBSCRIBE, |p| {
            Ok(ClientRequest::Subscribe(required_params(
                p,
                methods::RESOURCES_SUBSCRIBE,
            )?))
        });
        table.insert(methods::RESOURCES_UNSUBSCRIBE, |p| {
            Ok(ClientRequest::Unsubscribe(required_params(
                p,
                methods::RESOURCES_UNSUBSCRIBE,
            )?))
        });
        table.insert(methods::RESOURCES_TEMPLATES_LIST, |p| {
            Ok(ClientRequest::ListResourceTemplates(optional_params(
                p,
                methods::RESOURCES_TEMPLATES_LIST,
            )?))
        });
        table.insert(methods::PROMPTS_LIST, |p| {
            Ok(ClientRequest::ListPrompts(optional_params(
                p,
                methods::PROMPTS_LIST,
            )?))
        });
        table.insert(methods::PROMPTS_GET, |p| {
            Ok(ClientRequest::GetPrompt(required_params(
                p,
                methods::PROMPTS_GET,
            )?))
        });
        table.insert(methods::COMPLETION_COMPLETE, |p| {
            Ok(ClientRequest::Complete(required_params(
                p,
                methods::COMPLETION_COMPLETE,
            )?))
        });
        table.insert(methods::LOGGING_SET_LEVEL, |p| {
            Ok(ClientRequest::SetLevel(required_params(
                p,
                methods::LOGGING_SET_LEVEL,
            )?))
        });
        table.insert(methods::TASKS_GET, |p| {
            Ok(ClientRequest::GetTask(required_params(
                p,
                methods::TASKS_GET,
            )?))
        });
        table.insert(methods::TASKS_RESULT, |p| {
            Ok(ClientRequest::GetTaskPayload(required_params(
                p,
                methods::TASKS_RESULT,
            )?))
        });
        table.insert(methods::TASKS_LIST, |p| {
            Ok(ClientRequest::ListTasks(optional_params(
                p,
                methods::TASKS_LIST,
            )?))
        });
        table.insert(methods::TASKS_CANCEL, |p| {
            Ok(ClientRequest::CancelTask(required_params(
                p,
                methods::TASKS_CANCEL,
            )?))
        });
        table
    });

static SERVER_REQUEST_DECODERS: Lazy<HashMap<&'static str, ServerRequestDecoder>> =
    Lazy::new(|| {
        let mut table: HashMap<&'static str, ServerRequestDecoder> = HashMap::new();
        table.insert(methods::PING, |p| {
            Ok(ServerRequest::Ping(optional_params(p, methods::PING)?))
        });
        table.insert(methods::SAMPLING_CREATE_MESSAGE, |p| {
            Ok(ServerRequest::CreateMessage(required_params(
                p,
                methods::SAMPLING_CREATE_MESSAGE,
            )?))
        });
        table.insert(methods::ELICITATION_CREATE, |p| {
            Ok(ServerRequest::Elicit(required_params(
                p,
                methods::ELICITATION_CREATE,
            )?))
        });
        table.insert(methods::ROOTS_LIST, |p| {
            Ok(ServerRequest::ListRoots(optional_params(
                p,
                methods::ROOTS_LIST,
            )?))
        });
        table.insert(methods::TASKS_GET, |p| {
            Ok(ServerRequest::GetTask(required_params(
                p,
                methods::TASKS_GET,
            )?))
        });
        table.insert(methods::TASKS_RESULT, |p| {
            Ok(ServerRequest::GetTaskPayload(required_params(
                p,
                methods::TASKS_RESULT,
            )?))
        });
        table.insert(methods::TASKS_LIST, |p| {
            Ok(ServerRequest::ListTasks(optional_params(
                p,
                methods::TASKS_LIST,
            )?))
        });
        table.insert(methods::TASKS_CANCEL, |p| {
            Ok(ServerRequest::CancelTask(required_params(
                p,
                methods::TASKS_CANCEL,
            )?))
        });
        table
    });

impl ClientRequest {
    /// The method constant bound to this request variant
    pub fn method(&self) -> Method {
        match self {
            ClientRequest::Initialize(_) => Method::Initialize,
            ClientRequest::Ping(_) => Method::Ping,
            ClientRequest::ListTools(_) => Method::ListTools,
            ClientRequest::CallTool(_) => Method::CallTool,
            ClientRequest::ListResources(_) => Method::ListResources,
            ClientRequest::ReadResource(_) => Method::ReadResource,
            ClientRequest::Subscribe(_) => Method::Subscribe,
            ClientRequest::Unsubscribe(_) => Method::Unsubscribe,
            ClientRequest::ListResourceTemplates(_) => Method::ListResourceTemplates,
            ClientRequest::ListPrompts(_) => Method::ListPrompts,
            ClientRequest::GetPrompt(_) => Method::GetPrompt,
            ClientRequest::Complete(_) => Method::Complete,
            ClientRequest::SetLevel(_) => Method::SetLevel,
            ClientRequest::GetTask(_) => Method::GetTask,
            ClientRequest::GetTaskPayload(_) => Method::GetTaskPayload,
            ClientRequest::ListTasks(_) => Method::ListTasks,
            ClientRequest::CancelTask(_) => Method::CancelTask,
            ClientRequest::Custom(request) => request.method.clone(),
        }
    }

    /// Decode a request envelope received by a server.
    ///
    /// Unknown methods survive as [`ClientRequest::Custom`].
    pub fn from_request(request: &JsonRpcRequest) -> McpResult<Self> {
        match CLIENT_REQUEST_DECODERS.get(request.method.as_str()) {
            Some(decoder) => decoder(request.params.as_ref()),
            None => {
                debug!(method = %request.method, "unknown client request method, decoding as custom");
                Ok(ClientRequest::Custom(CustomRequest {
                    method: request.method.clone(),
                    params: request.params.clone(),
                }))
            }
        }
    }

    /// Encode into a request envelope, injecting the bound method name
    pub fn into_request(self, id: RequestId) -> McpResult<JsonRpcRequest> {
        let method = self.method();
        let params = self.params_value()?;
        Ok(JsonRpcRequest::new(id, method, params))
    }

    fn params_value(&self) -> McpResult<Option<Value>> {
        match self {
            ClientRequest::Initialize(params) => params_to_value(params),
            ClientRequest::Ping(params) => params_to_value(params),
            ClientRequest::ListTools(params) => params_to_value(params),
            ClientRequest::CallTool(params) => params_to_value(params),
            ClientRequest::ListResources(params) => params_to_value(params),
            ClientRequest::ReadResource(params) => params_to_value(params),
            ClientRequest::Subscribe(params) => params_to_value(params),
            ClientRequest::Unsubscribe(params) => params_to_value(params),
            ClientRequest::ListResourceTemplates(params) => params_to_value(params),
            ClientRequest::ListPrompts(params) => params_to_value(params),
            ClientRequest::GetPrompt(params) => params_to_value(params),
            ClientRequest::Complete(params) => params_to_value(params),
            ClientRequest::SetLevel(params) => params_to_value(params),
            ClientRequest::GetTask(params) => params_to_value(params),
            ClientRequest::GetTaskPayload(params) => params_to_value(params),
            ClientRequest::ListTasks(params) => params_to_value(params),
            ClientRequest::CancelTask(params) => params_to_value(params),
            ClientRequest::Custom(request) => Ok(request.params.clone()),
        }
    }
}

impl ServerRequest {
    /// The method constant bound to this request variant
    pub fn method(&self) -> Method {
        match self {
            ServerRequest::Ping(_) => Method::Ping,
            ServerRequest::CreateMessage(_) => Method::CreateMessage,
            ServerRequest::Elicit(_) => Method::Elicit,
            ServerRequest::ListRoots(_) => Method::ListRoots,
            ServerRequest::GetTask(_) => Method::GetTask,
            ServerRequest::GetTaskPayload(_) => Method::GetTaskPayload,
            ServerRequest::ListTasks(_) => Method::ListTasks,
            ServerRequest::CancelTask(_) => Method::CancelTask,
            ServerRequest::Custom(request) => request.method.clone(),
        }
    }

    /// Decode a request envelope received by a client.
    ///
    /// Unknown methods survive as [`ServerRequest::Custom`].
    pub fn from_request(request: &JsonRpcRequest) -> McpResult<Self> {
        match SERVER_REQUEST_DECODERS.get(request.method.as_str()) {
            Some(decoder) => decoder(request.params.as_ref()),
            None => {
                debug!(method = %request.method, "unknown server request method, decoding as custom");
                Ok(ServerRequest::Custom(CustomRequest {
                    method: request.method.clone(),
                    params: request.params.clone(),
                }))
            }
        }
    }

    /// Encode into a request envelope, injecting the bound method name
    pub fn into_request(self, id: RequestId) -> McpResult<JsonRpcRequest> {
        let method = self.method();
        let params = self.params_value()?;
        Ok(JsonRpcRequest::new(id, method, params))
    }

    fn params_value(&self) -> McpResult<Option<Value>> {
        match self {
            ServerRequest::Ping(params) => params_to_value(params),
            ServerRequest::CreateMessage(params) => params_to_value(params),
            ServerRequest::Elicit(params) => params_to_value(params),
            ServerRequest::ListRoots(params) => params_to_value(params),
            ServerRequest::GetTask(params) => params_to_value(params),
            ServerRequest::GetTaskPayload(params) => params_to_value(params),
            ServerRequest::ListTasks(params) => params_to_value(params),
            ServerRequest::CancelTask(params) => params_to_value(params),
            ServerRequest::Custom(request) => Ok(request.params.clone()),
        }
    }
}

impl AnyRequest {
    /// Decode a request envelope of unknown direction.
    ///
    /// Tries the client table first, then the server table; ambiguous methods
    /// (`ping`, task operations) resolve to the client family here, which is
    /// why direction-aware callers should use the family decoders instead.
    pub fn from_request(request: &JsonRpcRequest) -> McpResult<Self> {
        let name = request.method.as_str();
        if let Some(decoder) = CLIENT_REQUEST_DECODERS.get(name) {
            return decoder(request.params.as_ref()).map(AnyRequest::Client);
        }
        if let Some(decoder) = SERVER_REQUEST_DECODERS.get(name) {
            return decoder(request.params.as_ref()).map(AnyRequest::Server);
        }
        Ok(AnyRequest::Custom(CustomRequest {
            method: request.method.clone(),
            params: request.params.clone(),
        }))
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// A notification issued by the client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientNotification {
    Cancelled(CancelledParams),
    Progress(ProgressParams),
    Initialized(InitializedParams),
    RootsListChanged(RootsListChangedParams),
    TaskStatus(TaskStatusParams),
    Custom(CustomNotification),
}

/// A notification issued by the server
#[derive(Debug, Clone, PartialEq)]
pub enum ServerNotification {
    Cancelled(CancelledParams),
    Progress(ProgressParams),
    LoggingMessage(LoggingMessageParams),
    ResourceUpdated(ResourceUpdatedParams),
    ResourceListChanged(ResourceListChangedParams),
    ToolListChanged(ToolListChangedParams),
    PromptListChanged(PromptListChangedParams),
    TaskStatus(TaskStatusParams),
    Custom(CustomNotification),
}

/// A notification whose direction was not known to the decoder
#[derive(Debug, Clone, PartialEq)]
pub enum AnyNotification {
    Client(ClientNotification),
    Server(ServerNotification),
    Custom(CustomNotification),
}

type ClientNotificationDecoder = fn(Option<&Value>) -> McpResult<ClientNotification>;
type ServerNotificationDecoder = fn(Option<&Value>) -> McpResult<ServerNotification>;

static CLIENT_NOTIFICATION_DECODERS: Lazy<HashMap<&'static str, ClientNotificationDecoder>> =
    Lazy::new(|| {
        let mut table: HashMap<&'static str, ClientNotificationDecoder> = HashMap::new();
        table.insert(methods::CANCELLED, |p| {
            Ok(ClientNotification::Cancelled(required_params(
                p,
                methods::CANCELLED,
            )?))
        });
        table.insert(methods::PROGRESS, |p| {
            Ok(ClientNotification::Progress(required_params(
                p,
                methods::PROGRESS,
            )?))
        });
        table.insert(methods::INITIALIZED, |p| {
            Ok(ClientNotification::Initialized(optional_params(
                p,
                methods::INITIALIZED,
            )?))
        });
        table.insert(methods::ROOTS_LIST_CHANGED, |p| {
            Ok(ClientNotification::RootsListChanged(optional_params(
                p,
                methods::ROOTS_LIST_CHANGED,
            )?))
        });
        table.insert(methods::TASKS_STATUS, |p| {
            Ok(ClientNotification::TaskStatus(required_params(
                p,
                methods::TASKS_STATUS,
            )?))
        });
        table
    });

static SERVER_NOTIFICATION_DECODERS: Lazy<HashMap<&'static str, ServerNotificationDecoder>> =
    Lazy::new(|| {
        let mut table: HashMap<&'static str, ServerNotificationDecoder> = HashMap::new();
        table.insert(methods::CANCELLED, |p| {
            Ok(ServerNotification::Cancelled(required_params(
                p,
                methods::CANCELLED,
            )?))
        });
        table.insert(methods::PROGRESS, |p| {
            Ok(ServerNotification::Progress(required_params(
                p,
                methods::PROGRESS,
            )?))
        });
        table.insert(methods::LOGGING_MESSAGE, |p| {
            Ok(ServerNotification::LoggingMessage(required_params(
                p,
                methods::LOGGING_MESSAGE,
            )?))
        });
        table.insert(methods::RESOURCES_UPDATED, |p| {
            Ok(ServerNotification::ResourceUpdated(required_params(
                p,
                methods::RESOURCES_UPDATED,
            )?))
        });
        table.insert(methods::RESOURCES_LIST_CHANGED, |p| {
            Ok(ServerNotification::ResourceListChanged(optional_params(
                p,
                methods::RESOURCES_LIST_CHANGED,
            )?))
        });
        table.insert(methods::TOOLS_LIST_CHANGED, |p| {
            Ok(ServerNotification::ToolListChanged(optional_params(
                p,
                methods::TOOLS_LIST_CHANGED,
            )?))
        });
        table.insert(methods::PROMPTS_LIST_CHANGED, |p| {
            Ok(ServerNotification::PromptListChanged(optional_params(
                p,
                methods::PROMPTS_LIST_CHANGED,
            )?))
        });
        table.insert(methods::TASKS_STATUS, |p| {
            Ok(ServerNotification::TaskStatus(required_params(
                p,
                methods::TASKS_STATUS,
            )?))
        });
        table
    });

impl ClientNotification {
    /// The method constant bound to this notification variant
    pub fn method(&self) -> Method {
        match self {
            ClientNotification::Cancelled(_) => Method::Cancelled,
            ClientNotification::Progress(_) => Method::Progress,
            ClientNotification::Initialized(_) => Method::Initialized,
            ClientNotification::RootsListChanged(_) => Method::RootsListChanged,
            ClientNotification::TaskStatus(_) => Method::TaskStatus,
            ClientNotification::Custom(notification) => notification.method.clone(),
        }
    }

    /// Decode a notification envelope received by a server
    pub fn from_notification(notification: &JsonRpcNotification) -> McpResult<Self> {
        match CLIENT_NOTIFICATION_DECODERS.get(notification.method.as_str()) {
            Some(decoder) => decoder(notification.params.as_ref()),
            None => {
                debug!(method = %notification.method, "unknown client notification method, decoding as custom");
                Ok(ClientNotification::Custom(CustomNotification {
                    method: notification.method.clone(),
                    params: notification.params.clone(),
                }))
            }
        }
    }

    /// Encode into a notification envelope, injecting the bound method name
    pub fn into_notification(self) -> McpResult<JsonRpcNotification> {
        let method = self.method();
        let params = self.params_value()?;
        Ok(JsonRpcNotification::new(method, params))
    }

    fn params_value(&self) -> McpResult<Option<Value>> {
        match self {
            ClientNotification::Cancelled(params) => params_to_value(params),
            ClientNotification::Progress(params) => params_to_value(params),
            ClientNotification::Initialized(params) => params_to_value(params),
            ClientNotification::RootsListChanged(params) => params_to_value(params),
            ClientNotification::TaskStatus(params) => params_to_value(params),
            ClientNotification::Custom(notification) => Ok(notification.params.clone()),
        }
    }
}

impl ServerNotification {
    /// The method constant bound to this notification variant
    pub fn method(&self) -> Method {
        match self {
            ServerNotification::Cancelled(_) => Method::Cancelled,
            ServerNotification::Progress(_) => Method::Progress,
            ServerNotification::LoggingMessage(_) => Method::LoggingMessage,
            ServerNotification::ResourceUpdated(_) => Method::ResourceUpdated,
            ServerNotification::ResourceListChanged(_) => Method::ResourceListChanged,
            ServerNotification::ToolListChanged(_) => Method::ToolListChanged,
            ServerNotification::PromptListChanged(_) => Method::PromptListChanged,
            ServerNotification::TaskStatus(_) => Method::TaskStatus,
            ServerNotification::Custom(notification) => notification.method.clone(),
        }
    }

    /// Decode a notification envelope received by a client
    pub fn from_notification(notification: &JsonRpcNotification) -> McpResult<Self> {
        match SERVER_NOTIFICATION_DECODERS.get(notification.method.as_str()) {
            Some(decoder) => decoder(notification.params.as_ref()),
            None => {
                debug!(method = %notification.method, "unknown server notification method, decoding as custom");
                Ok(ServerNotification::Custom(CustomNotification {
                    method: notification.method.clone(),
                    params: notification.params.clone(),
                }))
            }
        }
    }

    /// Encode into a notification envelope, injecting the bound method name
    pub fn into_notification(self) -> McpResult<JsonRpcNotification> {
        let method = self.method();
        let params = self.params_value()?;
        Ok(JsonRpcNotification::new(method, params))
    }

    fn params_value(&self) -> McpResult<Option<Value>> {
        match self {
            ServerNotification::Cancelled(params) => params_to_value(params),
            ServerNotification::Progress(params) => params_to_value(params),
            ServerNotification::LoggingMessage(params) => params_to_value(params),
            ServerNotification::ResourceUpdated(params) => params_to_value(params),
            ServerNotification::ResourceListChanged(params) => params_to_value(params),
            ServerNotification::ToolListChanged(params) => params_to_value(params),
            ServerNotification::PromptListChanged(params) => params_to_value(params),
            ServerNotification::TaskStatus(params) => params_to_value(params),
            ServerNotification::Custom(notification) => Ok(notification.params.clone()),
        }
    }
}

impl AnyNotification {
    /// Decode a notification envelope of unknown direction (client table
    /// first, then server table, then custom)
    pub fn from_notification(notification: &JsonRpcNotification) -> McpResult<Self> {
        let name = notification.method.as_str();
        if let Some(decoder) = CLIENT_NOTIFICATION_DECODERS.get(name) {
            return decoder(notification.params.as_ref()).map(AnyNotification::Client);
        }
        if let Some(decoder) = SERVER_NOTIFICATION_DECODERS.get(name) {
            return decoder(notification.params.as_ref()).map(AnyNotification::Server);
        }
        Ok(AnyNotification::Custom(CustomNotification {
            method: notification.method.clone(),
            params: notification.params.clone(),
        }))
    }
}

// ============================================================================
// Results
// ============================================================================

/// A result produced by the server
#[derive(Debug, Clone, PartialEq)]
pub enum ServerResult {
    Initialize(InitializeResult),
    Complete(CompleteResult),
    ListTools(ListToolsResult),
    ListResources(ListResourcesResult),
    ListResourceTemplates(ListResourceTemplatesResult),
    ListPrompts(ListPromptsResult),
    GetPrompt(GetPromptResult),
    ReadResource(ReadResourceResult),
    CallTool(CallToolResult),
    CreateTask(CreateTaskResult),
    ListTasks(ListTasksResult),
    GetTask(GetTaskResult),
    Empty(EmptyResult),
}

/// A result produced by the client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientResult {
    CreateMessage(CreateMessageResult),
    ListRoots(ListRootsResult),
    Elicit(ElicitResult),
    CreateTask(CreateTaskResult),
    ListTasks(ListTasksResult),
    GetTask(GetTaskResult),
    Empty(EmptyResult),
}

/// A result whose direction was not known to the decoder
#[derive(Debug, Clone, PartialEq)]
pub enum AnyResult {
    Server(ServerResult),
    Client(ClientResult),
    Empty(EmptyResult),
}

// Probe order matters: `protocolVersion`+`capabilities` must run before the
// single-key probes because InitializeResult carries none of those keys, and
// the task snapshot probe must stay behind the single-key ones.
fn probe_server_result(
    object: &Map<String, Value>,
    value: &Value,
) -> Option<McpResult<ServerResult>> {
    let has = |key: &str| object.contains_key(key);
    if has("protocolVersion") && has("capabilities") {
        return Some(result_from_value(value, "initialize").map(ServerResult::Initialize));
    }
    if has("completion") {
        return Some(result_from_value(value, "complete").map(ServerResult::Complete));
    }
    if has("tools") {
        return Some(result_from_value(value, "tools/list").map(ServerResult::ListTools));
    }
    if has("resources") {
        return Some(result_from_value(value, "resources/list").map(ServerResult::ListResources));
    }
    if has("resourceTemplates") {
        return Some(
            result_from_value(value, "resources/templates/list")
                .map(ServerResult::ListResourceTemplates),
        );
    }
    if has("prompts") {
        return Some(result_from_value(value, "prompts/list").map(ServerResult::ListPrompts));
    }
    if has("messages") {
        return Some(result_from_value(value, "prompts/get").map(ServerResult::GetPrompt));
    }
    if has("contents") {
        return Some(result_from_value(value, "resources/read").map(ServerResult::ReadResource));
    }
    if has("content") {
        return Some(result_from_value(value, "tools/call").map(ServerResult::CallTool));
    }
    if has("task") {
        return Some(result_from_value(value, "task creation").map(ServerResult::CreateTask));
    }
    if has("tasks") {
        return Some(result_from_value(value, "tasks/list").map(ServerResult::ListTasks));
    }
    if has("taskId") && has("status") {
        return Some(result_from_value(value, "tasks/get").map(ServerResult::GetTask));
    }
    None
}

fn probe_client_result(
    object: &Map<String, Value>,
    value: &Value,
) -> Option<McpResult<ClientResult>> {
    let has = |key: &str| object.contains_key(key);
    if has("model") && has("role") {
        return Some(
            result_from_value(value, "sampling/createMessage").map(ClientResult::CreateMessage),
        );
    }
    if has("roots") {
        return Some(result_from_value(value, "roots/list").map(ClientResult::ListRoots));
    }
    if has("action") {
        return Some(result_from_value(value, "elicitation/create").map(ClientResult::Elicit));
    }
    if has("task") {
        return Some(result_from_value(value, "task creation").map(ClientResult::CreateTask));
    }
    if has("tasks") {
        return Some(result_from_value(value, "tasks/list").map(ClientResult::ListTasks));
    }
    if has("taskId") && has("status") {
        return Some(result_from_value(value, "tasks/get").map(ClientResult::GetTask));
    }
    None
}

fn result_object(value: &Value) -> McpResult<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| McpError::Protocol("result payload must be a JSON object".to_string()))
}

impl ServerResult {
    /// Decode a result payload received by a client
    pub fn from_value(value: &Value) -> McpResult<Self> {
        let object = result_object(value)?;
        if let Some(result) = probe_server_result(object, value) {
            return result;
        }
        if is_empty_or_meta_only(object) {
            return result_from_value(value, "empty").map(ServerResult::Empty);
        }
        Err(McpError::Protocol(format!(
            "unrecognized server result shape with keys [{}]",
            object.keys().cloned().collect::<Vec<_>>().join(", ")
        )))
    }

    /// Encode into a raw result payload
    pub fn to_value(&self) -> McpResult<Value> {
        let value = match self {
            ServerResult::Initialize(result) => serde_json::to_value(result)?,
            ServerResult::Complete(result) => serde_json::to_value(result)?,
            ServerResult::ListTools(result) => serde_json::to_value(result)?,
            ServerResult::ListResources(result) => serde_json::to_value(result)?,
            ServerResult::ListResourceTemplates(result) => serde_json::to_value(result)?,
            ServerResult::ListPrompts(result) => serde_json::to_value(result)?,
            ServerResult::GetPrompt(result) => serde_json::to_value(result)?,
            ServerResult::ReadResource(result) => serde_json::to_value(result)?,
            ServerResult::CallTool(result) => serde_json::to_value(result)?,
            ServerResult::CreateTask(result) => serde_json::to_value(result)?,
            ServerResult::ListTasks(result) => serde_json::to_value(result)?,
            ServerResult::GetTask(result) => serde_json::to_value(result)?,
            ServerResult::Empty(result) => serde_json::to_value(result)?,
        };
        Ok(value)
    }

    /// Encode into a response envelope answering the given request ID
    pub fn into_response(self, id: RequestId) -> McpResult<JsonRpcResponse> {
        Ok(JsonRpcResponse::new(id, self.to_value()?))
    }
}

impl ClientResult {
    /// Decode a result payload received by a server
    pub fn from_value(value: &Value) -> McpResult<Self> {
        let object = result_object(value)?;
        if let Some(result) = probe_client_result(object, value) {
            return result;
        }
        if is_empty_or_meta_only(object) {
            return result_from_value(value, "empty").map(ClientResult::Empty);
        }
        Err(McpError::Protocol(format!(
            "unrecognized client result shape with keys [{}]",
            object.keys().cloned().collect::<Vec<_>>().join(", ")
        )))
    }

    /// Encode into a raw result payload
    pub fn to_value(&self) -> McpResult<Value> {
        let value = match self {
            ClientResult::CreateMessage(result) => serde_json::to_value(result)?,
            ClientResult::ListRoots(result) => serde_json::to_value(result)?,
            ClientResult::Elicit(result) => serde_json::to_value(result)?,
            ClientResult::CreateTask(result) => serde_json::to_value(result)?,
            ClientResult::ListTasks(result) => serde_json::to_value(result)?,
            ClientResult::GetTask(result) => serde_json::to_value(result)?,
            ClientResult::Empty(result) => serde_json::to_value(result)?,
        };
        Ok(value)
    }

    /// Encode into a response envelope answering the given request ID
    pub fn into_response(self, id: RequestId) -> McpResult<JsonRpcResponse> {
        Ok(JsonRpcResponse::new(id, self.to_value()?))
    }
}

impl AnyResult {
    /// Decode a result payload of unknown direction.
    ///
    /// Server shapes are probed first, then client shapes, then the empty
    /// result; anything else fails.
    pub fn from_value(value: &Value) -> McpResult<Self> {
        let object = result_object(value)?;
        if let Some(result) = probe_server_result(object, value) {
            return result.map(AnyResult::Server);
        }
        if let Some(result) = probe_client_result(object, value) {
            return result.map(AnyResult::Client);
        }
        if is_empty_or_meta_only(object) {
            return result_from_value(value, "empty").map(AnyResult::Empty);
        }
        Err(McpError::Protocol(format!(
            "unrecognized result shape with keys [{}]",
            object.keys().cloned().collect::<Vec<_>>().join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::types::{
        ClientCapabilities, ContentBlock, Implementation, Task, TaskStatus,
    };
    use serde_json::json;

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest::new(RequestId::number(1), Method::from_wire(method), params)
    }

    #[test]
    fn test_every_defined_request_method_dispatches() {
        let cases = [
            ("initialize", Some(json!({"protocolVersion": "2025-06-18", "capabilities": {}, "clientInfo": {"name": "c", "version": "1.0"}}))),
            ("ping", None),
            ("tools/list", None),
            ("tools/call", Some(json!({"name": "echo"}))),
            ("resources/list", None),
            ("resources/read", Some(json!({"uri": "file:///a"}))),
            ("resources/subscribe", Some(json!({"uri": "file:///a"}))),
            ("resources/unsubscribe", Some(json!({"uri": "file:///a"}))),
            ("resources/templates/list", None),
            ("prompts/list", None),
            ("prompts/get", Some(json!({"name": "greet"}))),
            ("completion/complete", Some(json!({"ref": {"type": "ref/prompt", "name": "greet"}, "argument": {"name": "a", "value": "b"}}))),
            ("logging/setLevel", Some(json!({"level": "warning"}))),
            ("tasks/get", Some(json!({"taskId": "t"}))),
            ("tasks/result", Some(json!({"taskId": "t"}))),
            ("tasks/list", None),
            ("tasks/cancel", Some(json!({"taskId": "t"}))),
        ];
        for (method, params) in cases {
            let decoded = ClientRequest::from_request(&request(method, params)).unwrap();
            assert_eq!(
                decoded.method().as_str(),
                method,
                "wrong binding for {method}"
            );
            assert!(
                !matches!(decoded, ClientRequest::Custom(_)),
                "{method} fell through to custom"
            );
        }
    }

    #[test]
    fn test_ping_direction_resolution() {
        let envelope = request("ping", None);

        let as_server_request = ServerRequest::from_request(&envelope).unwrap();
        assert!(matches!(as_server_request, ServerRequest::Ping(_)));

        let as_client_request = ClientRequest::from_request(&envelope).unwrap();
        assert!(matches!(as_client_request, ClientRequest::Ping(_)));
    }

    #[test]
    fn test_unknown_method_survives_as_custom() {
        let envelope = request("x/y", Some(json!({"a": 1})));
        let decoded = ClientRequest::from_request(&envelope).unwrap();
        match &decoded {
            ClientRequest::Custom(custom) => {
                assert_eq!(custom.method, Method::Custom("x/y".to_string()));
                assert_eq!(custom.params, Some(json!({"a": 1})));
            }
            other => panic!("expected custom request, got {other:?}"),
        }

        // Re-encoding reproduces the original envelope
        let encoded = decoded.into_request(RequestId::number(11)).unwrap();
        let wire = serde_json::to_value(&encoded).unwrap();
        assert_eq!(
            wire,
            json!({"jsonrpc": "2.0", "id": 11, "method": "x/y", "params": {"a": 1}})
        );
    }

    #[test]
    fn test_direction_restricted_miss_is_custom() {
        // A server should not see sampling requests; they survive as custom
        let envelope = request("sampling/createMessage", Some(json!({"messages": [], "maxTokens": 10})));
        let decoded = ClientRequest::from_request(&envelope).unwrap();
        assert!(matches!(decoded, ClientRequest::Custom(_)));

        let any = AnyRequest::from_request(&envelope).unwrap();
        assert!(matches!(any, AnyRequest::Server(ServerRequest::CreateMessage(_))));
    }

    #[test]
    fn test_encode_injects_method_and_omits_empty_params() {
        let encoded = ClientRequest::Ping(PingParams::default())
            .into_request(RequestId::number(3))
            .unwrap();
        let wire = serde_json::to_value(&encoded).unwrap();
        assert_eq!(wire, json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}));

        let initialize = ClientRequest::Initialize(InitializeParams::new(
            "2025-06-18".to_string(),
            ClientCapabilities::default(),
            Implementation::new("c", "1.0"),
        ))
        .into_request(RequestId::number(1))
        .unwrap();
        let wire = serde_json::to_value(&initialize).unwrap();
        assert_eq!(wire["method"], "initialize");
        assert_eq!(wire["params"]["protocolVersion"], "2025-06-18");
    }

    #[test]
    fn test_notification_dispatch_by_direction() {
        let cancelled = JsonRpcNotification::new(
            Method::Cancelled,
            Some(json!({"requestId": 9, "reason": "user"})),
        );
        let from_client = ClientNotification::from_notification(&cancelled).unwrap();
        assert!(matches!(from_client, ClientNotification::Cancelled(_)));
        let from_server = ServerNotification::from_notification(&cancelled).unwrap();
        assert!(matches!(from_server, ServerNotification::Cancelled(_)));

        let log = JsonRpcNotification::new(
            Method::LoggingMessage,
            Some(json!({"level": "error", "data": {"boom": true}})),
        );
        let decoded = ServerNotification::from_notification(&log).unwrap();
        assert!(matches!(decoded, ServerNotification::LoggingMessage(_)));

        // Logging notifications flow server-to-client only
        let wrong_direction = ClientNotification::from_notification(&log).unwrap();
        assert!(matches!(wrong_direction, ClientNotification::Custom(_)));
    }

    #[test]
    fn test_cancelled_notification_encoding() {
        let notification =
            ClientNotification::Cancelled(CancelledParams::new(RequestId::number(9)).with_reason("user"))
                .into_notification()
                .unwrap();
        let wire = serde_json::to_value(&notification).unwrap();
        assert_eq!(
            wire,
            json!({
                "jsonrpc": "2.0",
                "method": "notifications/cancelled",
                "params": {"requestId": 9, "reason": "user"}
            })
        );
    }

    #[test]
    fn test_result_shape_dispatch_order() {
        let initialize = json!({
            "protocolVersion": "2025-06-18",
            "capabilities": {},
            "serverInfo": {"name": "s", "version": "1.0"}
        });
        assert!(matches!(
            ServerResult::from_value(&initialize).unwrap(),
            ServerResult::Initialize(_)
        ));

        let tools = json!({"tools": []});
        assert!(matches!(
            ServerResult::from_value(&tools).unwrap(),
            ServerResult::ListTools(_)
        ));

        let call = json!({"content": [{"type": "text", "text": "ok"}]});
        assert!(matches!(
            ServerResult::from_value(&call).unwrap(),
            ServerResult::CallTool(_)
        ));

        let read = json!({"contents": [{"uri": "file:///a", "text": "body"}]});
        assert!(matches!(
            ServerResult::from_value(&read).unwrap(),
            ServerResult::ReadResource(_)
        ));
    }

    #[test]
    fn test_empty_result_dispatch() {
        let empty = json!({});
        assert!(matches!(
            ServerResult::from_value(&empty).unwrap(),
            ServerResult::Empty(_)
        ));

        let meta_only = json!({"_meta": {"k": "v"}});
        match ServerResult::from_value(&meta_only).unwrap() {
            ServerResult::Empty(result) => {
                assert_eq!(result.meta.unwrap()["k"], json!("v"));
            }
            other => panic!("expected empty result, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_result_shape_fails() {
        let stray = json!({"bogus": 1});
        assert!(ServerResult::from_value(&stray).is_err());
        assert!(ClientResult::from_value(&stray).is_err());
        assert!(AnyResult::from_value(&stray).is_err());
        assert!(ServerResult::from_value(&json!(42)).is_err());
    }

    #[test]
    fn test_client_result_dispatch() {
        let sampled = json!({
            "role": "assistant",
            "content": {"type": "text", "text": "hi"},
            "model": "m"
        });
        assert!(matches!(
            ClientResult::from_value(&sampled).unwrap(),
            ClientResult::CreateMessage(_)
        ));

        let roots = json!({"roots": [{"uri": "file:///w"}]});
        assert!(matches!(
            ClientResult::from_value(&roots).unwrap(),
            ClientResult::ListRoots(_)
        ));

        let elicited = json!({"action": "decline"});
        assert!(matches!(
            ClientResult::from_value(&elicited).unwrap(),
            ClientResult::Elicit(_)
        ));
    }

    #[test]
    fn test_task_result_dispatch() {
        let snapshot = json!({"taskId": "t1", "status": "working"});
        assert!(matches!(
            ServerResult::from_value(&snapshot).unwrap(),
            ServerResult::GetTask(_)
        ));

        let listing = json!({"tasks": []});
        assert!(matches!(
            ServerResult::from_value(&listing).unwrap(),
            ServerResult::ListTasks(_)
        ));

        let created = json!({"task": {"taskId": "t1", "status": "working"}});
        assert!(matches!(
            ClientResult::from_value(&created).unwrap(),
            ClientResult::CreateTask(_)
        ));
    }

    #[test]
    fn test_tool_call_response_encoding() {
        let response = ServerResult::CallTool(CallToolResult::new(vec![ContentBlock::text("ok")]))
            .into_response(RequestId::number(7))
            .unwrap();
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(
            wire,
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "result": {"content": [{"type": "text", "text": "ok"}]}
            })
        );
    }

    #[test]
    fn test_round_trip_typed_results() {
        let original = ServerResult::ListTasks(ListTasksResult {
            tasks: vec![Task::new("t1", TaskStatus::Completed)],
            next_cursor: Some("next".to_string()),
            meta: None,
        });
        let value = original.to_value().unwrap();
        let decoded = ServerResult::from_value(&value).unwrap();
        assert_eq!(decoded, original);
    }
}
