//! MCP protocol method names
//!
//! Module contains the method name constants used in the MCP protocol and the
//! [`Method`] type that carries them on the wire. Every protocol-defined
//! method has a dedicated variant; anything outside the defined set survives
//! round-trips as [`Method::Custom`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Core protocol methods
pub const INITIALIZE: &str = "initialize";
pub const INITIALIZED: &str = "notifications/initialized";
pub const PING: &str = "ping";

// Tool-related methods
pub const TOOLS_LIST: &str = "tools/list";
pub const TOOLS_CALL: &str = "tools/call";
pub const TOOLS_LIST_CHANGED: &str = "notifications/tools/list_changed";

// Resource-related methods
pub const RESOURCES_LIST: &str = "resources/list";
pub const RESOURCES_TEMPLATES_LIST: &str = "resources/templates/list";
pub const RESOURCES_READ: &str = "resources/read";
pub const RESOURCES_SUBSCRIBE: &str = "resources/subscribe";
pub const RESOURCES_UNSUBSCRIBE: &str = "resources/unsubscribe";
pub const RESOURCES_UPDATED: &str = "notifications/resources/updated";
pub const RESOURCES_LIST_CHANGED: &str = "notifications/resources/list_changed";

// Prompt-related methods
pub const PROMPTS_LIST: &str = "prompts/list";
pub const PROMPTS_GET: &str = "prompts/get";
pub const PROMPTS_LIST_CHANGED: &str = "notifications/prompts/list_changed";

// Sampling methods
pub const SAMPLING_CREATE_MESSAGE: &str = "sampling/createMessage";

// Root-related methods
pub const ROOTS_LIST: &str = "roots/list";
pub const ROOTS_LIST_CHANGED: &str = "notifications/roots/list_changed";

// Completion methods
pub const COMPLETION_COMPLETE: &str = "completion/complete";

// Elicitation methods
pub const ELICITATION_CREATE: &str = "elicitation/create";

// Logging methods
pub const LOGGING_SET_LEVEL: &str = "logging/setLevel";
pub const LOGGING_MESSAGE: &str = "notifications/message";

// Task methods
pub const TASKS_GET: &str = "tasks/get";
pub const TASKS_RESULT: &str = "tasks/result";
pub const TASKS_LIST: &str = "tasks/list";
pub const TASKS_CANCEL: &str = "tasks/cancel";
pub const TASKS_STATUS: &str = "notifications/tasks/status";

// Progress and cancellation notifications
pub const PROGRESS: &str = "notifications/progress";
pub const CANCELLED: &str = "notifications/cancelled";

/// A JSON-RPC method name, either protocol-defined or custom.
///
/// On the wire a method is a plain string; parsing never fails because any
/// unknown name is kept verbatim in [`Method::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Initialize,
    Ping,
    ListTools,
    CallTool,
    ListResources,
    ListResourceTemplates,
    ReadResource,
    Subscribe,
    Unsubscribe,
    ListPrompts,
    GetPrompt,
    Complete,
    SetLevel,
    CreateMessage,
    Elicit,
    ListRoots,
    GetTask,
    GetTaskPayload,
    ListTasks,
    CancelTask,
    Initialized,
    Cancelled,
    Progress,
    LoggingMessage,
    ResourceUpdated,
    ResourceListChanged,
    ToolListChanged,
    PromptListChanged,
    RootsListChanged,
    TaskStatus,
    /// A method name outside the protocol-defined set, carried verbatim
    Custom(String),
}

impl Method {
    /// The wire representation of this method
    pub fn as_str(&self) -> &str {
        match self {
            Method::Initialize => INITIALIZE,
            Method::Ping => PING,
            Method::ListTools => TOOLS_LIST,
            Method::CallTool => TOOLS_CALL,
            Method::ListResources => RESOURCES_LIST,
            Method::ListResourceTemplates => RESOURCES_TEMPLATES_LIST,
            Method::ReadResource => RESOURCES_READ,
            Method::Subscribe => RESOURCES_SUBSCRIBE,
            Method::Unsubscribe => RESOURCES_UNSUBSCRIBE,
            Method::ListPrompts => PROMPTS_LIST,
            Method::GetPrompt => PROMPTS_GET,
            Method::Complete => COMPLETION_COMPLETE,
            Method::SetLevel => LOGGING_SET_LEVEL,
            Method::CreateMessage => SAMPLING_CREATE_MESSAGE,
            Method::Elicit => ELICITATION_CREATE,
            Method::ListRoots => ROOTS_LIST,
            Method::GetTask => TASKS_GET,
            Method::GetTaskPayload => TASKS_RESULT,
            Method::ListTasks => TASKS_LIST,
            Method::CancelTask => TASKS_CANCEL,
            Method::Initialized => INITIALIZED,
            Method::Cancelled => CANCELLED,
            Method::Progress => PROGRESS,
            Method::LoggingMessage => LOGGING_MESSAGE,
            Method::ResourceUpdated => RESOURCES_UPDATED,
            Method::ResourceListChanged => RESOURCES_LIST_CHANGED,
            Method::ToolListChanged => TOOLS_LIST_CHANGED,
            Method::PromptListChanged => PROMPTS_LIST_CHANGED,
            Method::RootsListChanged => ROOTS_LIST_CHANGED,
            Method::TaskStatus => TASKS_STATUS,
            Method::Custom(name) => name,
        }
    }

    /// Parse a wire string into a method; unknown names become [`Method::Custom`]
    pub fn from_wire<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        match name.as_str() {
            INITIALIZE => Method::Initialize,
            PING => Method::Ping,
            TOOLS_LIST => Method::ListTools,
            TOOLS_CALL => Method::CallTool,
            RESOURCES_LIST => Method::ListResources,
            RESOURCES_TEMPLATES_LIST => Method::ListResourceTemplates,
            RESOURCES_READ => Method::ReadResource,
            RESOURCES_SUBSCRIBE => Method::Subscribe,
            RESOURCES_UNSUBSCRIBE => Method::Unsubscribe,
            PROMPTS_LIST => Method::ListPrompts,
            PROMPTS_GET => Method::GetPrompt,
            COMPLETION_COMPLETE => Method::Complete,
            LOGGING_SET_LEVEL => Method::SetLevel,
            SAMPLING_CREATE_MESSAGE => Method::CreateMessage,
            ELICITATION_CREATE => Method::Elicit,
            ROOTS_LIST => Method::ListRoots,
            TASKS_GET => Method::GetTask,
            TASKS_RESULT => Method::GetTaskPayload,
            TASKS_LIST => Method::ListTasks,
            TASKS_CANCEL => Method::CancelTask,
            INITIALIZED => Method::Initialized,
            CANCELLED => Method::Cancelled,
            PROGRESS => Method::Progress,
            LOGGING_MESSAGE => Method::LoggingMessage,
            RESOURCES_UPDATED => Method::ResourceUpdated,
            RESOURCES_LIST_CHANGED => Method::ResourceListChanged,
            TOOLS_LIST_CHANGED => Method::ToolListChanged,
            PROMPTS_LIST_CHANGED => Method::PromptListChanged,
            ROOTS_LIST_CHANGED => Method::RootsListChanged,
            TASKS_STATUS => Method::TaskStatus,
            _ => Method::Custom(name),
        }
    }

    /// Whether this method is in the protocol-defined set
    pub fn is_defined(&self) -> bool {
        !matches!(self, Method::Custom(_))
    }

    /// Whether this method names a notification (no response expected)
    pub fn is_notification(&self) -> bool {
        self.as_str().starts_with("notifications/")
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Method {
    fn from(name: &str) -> Self {
        Method::from_wire(name)
    }
}

impl From<String> for Method {
    fn from(name: String) -> Self {
        Method::from_wire(name)
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Method::from_wire(name))
    }
}
