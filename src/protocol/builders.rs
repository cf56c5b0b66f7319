//! Checked builders for user-constructable messages
//!
//! Every builder collects fields through fluent setters and validates at
//! `build()` time: a missing required field fails with an error that names
//! the field and shows correct usage, and the numeric and cross-field
//! invariants of the protocol are enforced before a value can exist.
//! `build(self)` consumes the builder, so each builder instance produces at
//! most one value.

use std::collections::HashMap;

use serde_json::Value;

use crate::core::error::{McpError, McpResult};
use crate::protocol::messages::*;
use crate::protocol::types::*;
use crate::protocol::validation;

fn missing(what: &str, field: &str, example: &str) -> McpError {
    McpError::Validation(format!(
        "{what} is missing required field `{field}`; set it with {example} before build()"
    ))
}

// ============================================================================
// Request builders
// ============================================================================

/// Builder for [`InitializeParams`]
#[derive(Debug, Default)]
pub struct InitializeParamsBuilder {
    protocol_version: Option<String>,
    capabilities: Option<ClientCapabilities>,
    client_info: Option<Implementation>,
    meta: Option<Meta>,
}

impl InitializeParams {
    pub fn builder() -> InitializeParamsBuilder {
        InitializeParamsBuilder::default()
    }
}

impl InitializeParamsBuilder {
    pub fn protocol_version<S: Into<String>>(mut self, version: S) -> Self {
        self.protocol_version = Some(version.into());
        self
    }

    pub fn capabilities(mut self, capabilities: ClientCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn client_info(mut self, client_info: Implementation) -> Self {
        self.client_info = Some(client_info);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<InitializeParams> {
        let protocol_version = self.protocol_version.ok_or_else(|| {
            missing(
                "initialize params",
                "protocolVersion",
                ".protocol_version(\"2025-11-25\")",
            )
        })?;
        let client_info = self.client_info.ok_or_else(|| {
            missing(
                "initialize params",
                "clientInfo",
                ".client_info(Implementation::new(\"my-client\", \"1.0.0\"))",
            )
        })?;
        Ok(InitializeParams {
            protocol_version,
            capabilities: self.capabilities.unwrap_or_default(),
            client_info,
            meta: self.meta,
        })
    }
}

/// Builder for [`CallToolParams`]
#[derive(Debug, Default)]
pub struct CallToolParamsBuilder {
    name: Option<String>,
    arguments: Option<HashMap<String, Value>>,
    meta: Option<Meta>,
}

impl CallToolParams {
    pub fn builder() -> CallToolParamsBuilder {
        CallToolParamsBuilder::default()
    }
}

impl CallToolParamsBuilder {
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add one tool argument
    pub fn argument<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.arguments
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    pub fn arguments(mut self, arguments: HashMap<String, Value>) -> Self {
        self.arguments = Some(arguments);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<CallToolParams> {
        let name = self
            .name
            .ok_or_else(|| missing("tools/call params", "name", ".name(\"my_tool\")"))?;
        Ok(CallToolParams {
            name,
            arguments: self.arguments,
            meta: self.meta,
        })
    }
}

/// Builder for [`ReadResourceParams`]
#[derive(Debug, Default)]
pub struct ReadResourceParamsBuilder {
    uri: Option<String>,
    meta: Option<Meta>,
}

impl ReadResourceParams {
    pub fn builder() -> ReadResourceParamsBuilder {
        ReadResourceParamsBuilder::default()
    }
}

impl ReadResourceParamsBuilder {
    pub fn uri<S: Into<String>>(mut self, uri: S) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<ReadResourceParams> {
        let uri = self.uri.ok_or_else(|| {
            missing(
                "resources/read params",
                "uri",
                ".uri(\"file:///path/to/resource\")",
            )
        })?;
        Ok(ReadResourceParams {
            uri,
            meta: self.meta,
        })
    }
}

/// Builder for [`GetPromptParams`]
#[derive(Debug, Default)]
pub struct GetPromptParamsBuilder {
    name: Option<String>,
    arguments: Option<HashMap<String, String>>,
    meta: Option<Meta>,
}

impl GetPromptParams {
    pub fn builder() -> GetPromptParamsBuilder {
        GetPromptParamsBuilder::default()
    }
}

impl GetPromptParamsBuilder {
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add one templating argument
    pub fn argument<S: Into<String>>(mut self, key: S, value: S) -> Self {
        self.arguments
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<GetPromptParams> {
        let name = self
            .name
            .ok_or_else(|| missing("prompts/get params", "name", ".name(\"my_prompt\")"))?;
        Ok(GetPromptParams {
            name,
            arguments: self.arguments,
            meta: self.meta,
        })
    }
}

/// Builder for [`CompleteParams`]
#[derive(Debug, Default)]
pub struct CompleteParamsBuilder {
    reference: Option<Reference>,
    argument: Option<CompleteArgument>,
    context: Option<CompleteContext>,
    meta: Option<Meta>,
}

impl CompleteParams {
    pub fn builder() -> CompleteParamsBuilder {
        CompleteParamsBuilder::default()
    }
}

impl CompleteParamsBuilder {
    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn argument<S: Into<String>>(mut self, name: S, value: S) -> Self {
        self.argument = Some(CompleteArgument {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn context(mut self, context: CompleteContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<CompleteParams> {
        let reference = self.reference.ok_or_else(|| {
            missing(
                "completion/complete params",
                "ref",
                ".reference(Reference::Prompt { name: \"my_prompt\".into() })",
            )
        })?;
        let argument = self.argument.ok_or_else(|| {
            missing(
                "completion/complete params",
                "argument",
                ".argument(\"language\", \"py\")",
            )
        })?;
        Ok(CompleteParams {
            reference,
            argument,
            context: self.context,
            meta: self.meta,
        })
    }
}

/// Builder for [`SetLevelParams`]
#[derive(Debug, Default)]
pub struct SetLevelParamsBuilder {
    level: Option<LoggingLevel>,
    meta: Option<Meta>,
}

impl SetLevelParams {
    pub fn builder() -> SetLevelParamsBuilder {
        SetLevelParamsBuilder::default()
    }
}

impl SetLevelParamsBuilder {
    pub fn level(mut self, level: LoggingLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<SetLevelParams> {
        let level = self.level.ok_or_else(|| {
            missing(
                "logging/setLevel params",
                "level",
                ".level(LoggingLevel::Warning)",
            )
        })?;
        Ok(SetLevelParams {
            level,
            meta: self.meta,
        })
    }
}

/// Builder for [`CreateMessageParams`]
#[derive(Debug, Default)]
pub struct CreateMessageParamsBuilder {
    messages: Vec<SamplingMessage>,
    max_tokens: Option<u32>,
    system_prompt: Option<String>,
    include_context: Option<String>,
    temperature: Option<f64>,
    stop_sequences: Option<Vec<String>>,
    model_preferences: Option<ModelPreferences>,
    metadata: Option<HashMap<String, Value>>,
    meta: Option<Meta>,
}

impl CreateMessageParams {
    pub fn builder() -> CreateMessageParamsBuilder {
        CreateMessageParamsBuilder::default()
    }
}

impl CreateMessageParamsBuilder {
    /// Add one conversation message
    pub fn message(mut self, message: SamplingMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: Vec<SamplingMessage>) -> Self {
        self.messages = messages;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn system_prompt<S: Into<String>>(mut self, system_prompt: S) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn include_context<S: Into<String>>(mut self, include_context: S) -> Self {
        self.include_context = Some(include_context.into());
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = Some(stop_sequences);
        self
    }

    pub fn model_preferences(mut self, model_preferences: ModelPreferences) -> Self {
        self.model_preferences = Some(model_preferences);
        self
    }

    pub fn metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<CreateMessageParams> {
        if self.messages.is_empty() {
            return Err(missing(
                "sampling/createMessage params",
                "messages",
                ".message(SamplingMessage::user_text(\"...\"))",
            ));
        }
        let max_tokens = self.max_tokens.ok_or_else(|| {
            missing(
                "sampling/createMessage params",
                "maxTokens",
                ".max_tokens(1024)",
            )
        })?;
        if let Some(preferences) = &self.model_preferences {
            validation::validate_model_preferences(preferences)?;
        }
        Ok(CreateMessageParams {
            messages: self.messages,
            max_tokens,
            system_prompt: self.system_prompt,
            include_context: self.include_context,
            temperature: self.temperature,
            stop_sequences: self.stop_sequences,
            model_preferences: self.model_preferences,
            metadata: self.metadata,
            meta: self.meta,
        })
    }
}

/// Builder for [`ElicitParams`]
#[derive(Debug, Default)]
pub struct ElicitParamsBuilder {
    message: Option<String>,
    properties: HashMap<String, PrimitiveSchemaDefinition>,
    required: Option<Vec<String>>,
    meta: Option<Meta>,
}

impl ElicitParams {
    pub fn builder() -> ElicitParamsBuilder {
        ElicitParamsBuilder::default()
    }
}

impl ElicitParamsBuilder {
    pub fn message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Add one requested form field
    pub fn property<S: Into<String>>(mut self, name: S, schema: PrimitiveSchemaDefinition) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn required(mut self, required: Vec<String>) -> Self {
        self.required = Some(required);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<ElicitParams> {
        let message = self.message.ok_or_else(|| {
            missing(
                "elicitation/create params",
                "message",
                ".message(\"Please confirm\")",
            )
        })?;
        if self.properties.is_empty() {
            return Err(missing(
                "elicitation/create params",
                "requestedSchema",
                ".property(\"name\", PrimitiveSchemaDefinition::String { .. })",
            ));
        }
        let mut schema = ElicitationSchema::new(self.properties);
        if let Some(required) = self.required {
            schema = schema.with_required(required);
        }
        Ok(ElicitParams {
            message,
            requested_schema: schema,
            meta: self.meta,
        })
    }
}

/// Builder for [`CancelledParams`]
#[derive(Debug, Default)]
pub struct CancelledParamsBuilder {
    request_id: Option<RequestId>,
    reason: Option<String>,
    meta: Option<Meta>,
}

impl CancelledParams {
    pub fn builder() -> CancelledParamsBuilder {
        CancelledParamsBuilder::default()
    }
}

impl CancelledParamsBuilder {
    pub fn request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn reason<S: Into<String>>(mut self, reason: S) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<CancelledParams> {
        let request_id = self.request_id.ok_or_else(|| {
            missing(
                "notifications/cancelled params",
                "requestId",
                ".request_id(RequestId::number(42))",
            )
        })?;
        request_id.validate()?;
        Ok(CancelledParams {
            request_id,
            reason: self.reason,
            meta: self.meta,
        })
    }
}

/// Builder for [`ProgressParams`]
#[derive(Debug, Default)]
pub struct ProgressParamsBuilder {
    progress_token: Option<ProgressToken>,
    progress: Option<f64>,
    total: Option<f64>,
    message: Option<String>,
    meta: Option<Meta>,
}

impl ProgressParams {
    pub fn builder() -> ProgressParamsBuilder {
        ProgressParamsBuilder::default()
    }
}

impl ProgressParamsBuilder {
    pub fn progress_token(mut self, progress_token: ProgressToken) -> Self {
        self.progress_token = Some(progress_token);
        self
    }

    pub fn progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<ProgressParams> {
        let progress_token = self.progress_token.ok_or_else(|| {
            missing(
                "notifications/progress params",
                "progressToken",
                ".progress_token(RequestId::number(42))",
            )
        })?;
        let progress = self.progress.ok_or_else(|| {
            missing("notifications/progress params", "progress", ".progress(0.5)")
        })?;
        Ok(ProgressParams {
            progress_token,
            progress,
            total: self.total,
            message: self.message,
            meta: self.meta,
        })
    }
}

// ============================================================================
// Result builders
// ============================================================================

/// Builder for [`InitializeResult`]
#[derive(Debug, Default)]
pub struct InitializeResultBuilder {
    protocol_version: Option<String>,
    capabilities: Option<ServerCapabilities>,
    server_info: Option<Implementation>,
    instructions: Option<String>,
    meta: Option<Meta>,
}

impl InitializeResult {
    pub fn builder() -> InitializeResultBuilder {
        InitializeResultBuilder::default()
    }
}

impl InitializeResultBuilder {
    pub fn protocol_version<S: Into<String>>(mut self, version: S) -> Self {
        self.protocol_version = Some(version.into());
        self
    }

    pub fn capabilities(mut self, capabilities: ServerCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn server_info(mut self, server_info: Implementation) -> Self {
        self.server_info = Some(server_info);
        self
    }

    pub fn instructions<S: Into<String>>(mut self, instructions: S) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<InitializeResult> {
        let protocol_version = self.protocol_version.ok_or_else(|| {
            missing(
                "initialize result",
                "protocolVersion",
                ".protocol_version(\"2025-11-25\")",
            )
        })?;
        let server_info = self.server_info.ok_or_else(|| {
            missing(
                "initialize result",
                "serverInfo",
                ".server_info(Implementation::new(\"my-server\", \"1.0.0\"))",
            )
        })?;
        Ok(InitializeResult {
            protocol_version,
            capabilities: self.capabilities.unwrap_or_default(),
            server_info,
            instructions: self.instructions,
            meta: self.meta,
        })
    }
}

/// Builder for [`CallToolResult`]
#[derive(Debug, Default)]
pub struct CallToolResultBuilder {
    content: Vec<ContentBlock>,
    is_error: Option<bool>,
    structured_content: Option<Value>,
    meta: Option<Meta>,
}

impl CallToolResult {
    pub fn builder() -> CallToolResultBuilder {
        CallToolResultBuilder::default()
    }
}

impl CallToolResultBuilder {
    /// Add one content block
    pub fn content_block(mut self, block: ContentBlock) -> Self {
        self.content.push(block);
        self
    }

    /// Add a text content block
    pub fn text<S: Into<String>>(mut self, text: S) -> Self {
        self.content.push(ContentBlock::text(text));
        self
    }

    pub fn is_error(mut self, is_error: bool) -> Self {
        self.is_error = Some(is_error);
        self
    }

    pub fn structured_content(mut self, structured_content: Value) -> Self {
        self.structured_content = Some(structured_content);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<CallToolResult> {
        Ok(CallToolResult {
            content: self.content,
            is_error: self.is_error,
            structured_content: self.structured_content,
            meta: self.meta,
        })
    }
}

/// Builder for [`ReadResourceResult`]
#[derive(Debug, Default)]
pub struct ReadResourceResultBuilder {
    contents: Vec<ResourceContents>,
    meta: Option<Meta>,
}

impl ReadResourceResult {
    pub fn builder() -> ReadResourceResultBuilder {
        ReadResourceResultBuilder::default()
    }
}

impl ReadResourceResultBuilder {
    /// Add one contents entry
    pub fn contents(mut self, contents: ResourceContents) -> Self {
        self.contents.push(contents);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<ReadResourceResult> {
        if self.contents.is_empty() {
            return Err(missing(
                "resources/read result",
                "contents",
                ".contents(ResourceContents::text(\"file:///a\", \"...\"))",
            ));
        }
        Ok(ReadResourceResult {
            contents: self.contents,
            meta: self.meta,
        })
    }
}

/// Builder for [`GetPromptResult`]
#[derive(Debug, Default)]
pub struct GetPromptResultBuilder {
    description: Option<String>,
    messages: Vec<PromptMessage>,
    meta: Option<Meta>,
}

impl GetPromptResult {
    pub fn builder() -> GetPromptResultBuilder {
        GetPromptResultBuilder::default()
    }
}

impl GetPromptResultBuilder {
    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add one prompt message
    pub fn message(mut self, role: Role, content: ContentBlock) -> Self {
        self.messages.push(PromptMessage { role, content });
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<GetPromptResult> {
        if self.messages.is_empty() {
            return Err(missing(
                "prompts/get result",
                "messages",
                ".message(Role::User, ContentBlock::text(\"...\"))",
            ));
        }
        Ok(GetPromptResult {
            description: self.description,
            messages: self.messages,
            meta: self.meta,
        })
    }
}

/// Builder for [`ListToolsResult`]
#[derive(Debug, Default)]
pub struct ListToolsResultBuilder {
    tools: Vec<Tool>,
    next_cursor: Option<Cursor>,
    meta: Option<Meta>,
}

impl ListToolsResult {
    pub fn builder() -> ListToolsResultBuilder {
        ListToolsResultBuilder::default()
    }
}

impl ListToolsResultBuilder {
    /// Add one tool
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn next_cursor<S: Into<String>>(mut self, next_cursor: S) -> Self {
        self.next_cursor = Some(next_cursor.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<ListToolsResult> {
        Ok(ListToolsResult {
            tools: self.tools,
            next_cursor: self.next_cursor,
            meta: self.meta,
        })
    }
}

/// Builder for [`CompleteResult`]
#[derive(Debug, Default)]
pub struct CompleteResultBuilder {
    values: Vec<String>,
    total: Option<u32>,
    has_more: Option<bool>,
    meta: Option<Meta>,
}

impl CompleteResult {
    pub fn builder() -> CompleteResultBuilder {
        CompleteResultBuilder::default()
    }
}

impl CompleteResultBuilder {
    /// Add one completion value
    pub fn value<S: Into<String>>(mut self, value: S) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }

    pub fn total(mut self, total: u32) -> Self {
        self.total = Some(total);
        self
    }

    pub fn has_more(mut self, has_more: bool) -> Self {
        self.has_more = Some(has_more);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<CompleteResult> {
        let completion = Completion {
            values: self.values,
            total: self.total,
            has_more: self.has_more,
        };
        validation::validate_completion(&completion)?;
        Ok(CompleteResult {
            completion,
            meta: self.meta,
        })
    }
}

/// Builder for [`CreateMessageResult`]
#[derive(Debug, Default)]
pub struct CreateMessageResultBuilder {
    role: Option<Role>,
    content: Option<SamplingContent>,
    model: Option<String>,
    stop_reason: Option<StopReason>,
    meta: Option<Meta>,
}

impl CreateMessageResult {
    pub fn builder() -> CreateMessageResultBuilder {
        CreateMessageResultBuilder::default()
    }
}

impl CreateMessageResultBuilder {
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn content(mut self, content: SamplingContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn stop_reason(mut self, stop_reason: StopReason) -> Self {
        self.stop_reason = Some(stop_reason);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<CreateMessageResult> {
        let role = self.role.ok_or_else(|| {
            missing(
                "sampling/createMessage result",
                "role",
                ".role(Role::Assistant)",
            )
        })?;
        let content = self.content.ok_or_else(|| {
            missing(
                "sampling/createMessage result",
                "content",
                ".content(SamplingContent::text(\"...\"))",
            )
        })?;
        let model = self.model.ok_or_else(|| {
            missing(
                "sampling/createMessage result",
                "model",
                ".model(\"claude-3-5-sonnet\")",
            )
        })?;
        Ok(CreateMessageResult {
            role,
            content,
            model,
            stop_reason: self.stop_reason,
            meta: self.meta,
        })
    }
}

/// Builder for [`ElicitResult`]
#[derive(Debug, Default)]
pub struct ElicitResultBuilder {
    action: Option<ElicitationAction>,
    content: Option<HashMap<String, Value>>,
    meta: Option<Meta>,
}

impl ElicitResult {
    pub fn builder() -> ElicitResultBuilder {
        ElicitResultBuilder::default()
    }
}

impl ElicitResultBuilder {
    pub fn action(mut self, action: ElicitationAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn content(mut self, content: HashMap<String, Value>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<ElicitResult> {
        let action = self.action.ok_or_else(|| {
            missing(
                "elicitation/create result",
                "action",
                ".action(ElicitationAction::Accept)",
            )
        })?;
        validation::validate_elicit_content(action, self.content.is_some())?;
        Ok(ElicitResult {
            action,
            content: self.content,
            meta: self.meta,
        })
    }
}

/// Builder for [`ListRootsResult`]
#[derive(Debug, Default)]
pub struct ListRootsResultBuilder {
    roots: Vec<Root>,
    meta: Option<Meta>,
}

impl ListRootsResult {
    pub fn builder() -> ListRootsResultBuilder {
        ListRootsResultBuilder::default()
    }
}

impl ListRootsResultBuilder {
    /// Add one root
    pub fn root(mut self, root: Root) -> Self {
        self.roots.push(root);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<ListRootsResult> {
        for root in &self.roots {
            validation::validate_root_uri(&root.uri)?;
        }
        Ok(ListRootsResult {
            roots: self.roots,
            meta: self.meta,
        })
    }
}

// ============================================================================
// Entity builders
// ============================================================================

/// Builder for [`Tool`]
#[derive(Debug, Default)]
pub struct ToolBuilder {
    name: Option<String>,
    description: Option<String>,
    input_schema: Option<ToolSchema>,
    output_schema: Option<ToolSchema>,
    annotations: Option<ToolAnnotations>,
    title: Option<String>,
    icons: Option<Vec<Icon>>,
    meta: Option<Meta>,
}

impl Tool {
    pub fn builder() -> ToolBuilder {
        ToolBuilder::default()
    }
}

impl ToolBuilder {
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn input_schema(mut self, input_schema: ToolSchema) -> Self {
        self.input_schema = Some(input_schema);
        self
    }

    pub fn output_schema(mut self, output_schema: ToolSchema) -> Self {
        self.output_schema = Some(output_schema);
        self
    }

    pub fn annotations(mut self, annotations: ToolAnnotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icons.get_or_insert_with(Vec::new).push(icon);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<Tool> {
        let name = self
            .name
            .ok_or_else(|| missing("tool", "name", ".name(\"my_tool\")"))?;
        Ok(Tool {
            name,
            description: self.description,
            input_schema: self.input_schema.unwrap_or_default(),
            output_schema: self.output_schema,
            annotations: self.annotations,
            title: self.title,
            icons: self.icons,
            meta: self.meta,
        })
    }
}

/// Builder for [`Resource`]
#[derive(Debug, Default)]
pub struct ResourceBuilder {
    uri: Option<String>,
    name: Option<String>,
    description: Option<String>,
    mime_type: Option<String>,
    annotations: Option<Annotations>,
    size: Option<u64>,
    title: Option<String>,
    icons: Option<Vec<Icon>>,
    meta: Option<Meta>,
}

impl Resource {
    pub fn builder() -> ResourceBuilder {
        ResourceBuilder::default()
    }
}

impl ResourceBuilder {
    pub fn uri<S: Into<String>>(mut self, uri: S) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn mime_type<S: Into<String>>(mut self, mime_type: S) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icons.get_or_insert_with(Vec::new).push(icon);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<Resource> {
        let uri = self
            .uri
            .ok_or_else(|| missing("resource", "uri", ".uri(\"file:///path\")"))?;
        let name = self
            .name
            .ok_or_else(|| missing("resource", "name", ".name(\"my_resource\")"))?;
        if let Some(annotations) = &self.annotations {
            validation::validate_annotations(annotations)?;
        }
        Ok(Resource {
            uri,
            name,
            description: self.description,
            mime_type: self.mime_type,
            annotations: self.annotations,
            size: self.size,
            title: self.title,
            icons: self.icons,
            meta: self.meta,
        })
    }
}

/// Builder for [`Prompt`]
#[derive(Debug, Default)]
pub struct PromptBuilder {
    name: Option<String>,
    description: Option<String>,
    arguments: Vec<PromptArgument>,
    title: Option<String>,
    meta: Option<Meta>,
}

impl Prompt {
    pub fn builder() -> PromptBuilder {
        PromptBuilder::default()
    }
}

impl PromptBuilder {
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add one prompt argument
    pub fn argument(mut self, argument: PromptArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<Prompt> {
        let name = self
            .name
            .ok_or_else(|| missing("prompt", "name", ".name(\"my_prompt\")"))?;
        Ok(Prompt {
            name,
            description: self.description,
            arguments: if self.arguments.is_empty() {
                None
            } else {
                Some(self.arguments)
            },
            title: self.title,
            icons: None,
            meta: self.meta,
        })
    }
}

/// Builder for [`Root`]
#[derive(Debug, Default)]
pub struct RootBuilder {
    uri: Option<String>,
    name: Option<String>,
    meta: Option<Meta>,
}

impl Root {
    pub fn builder() -> RootBuilder {
        RootBuilder::default()
    }
}

impl RootBuilder {
    pub fn uri<S: Into<String>>(mut self, uri: S) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> McpResult<Root> {
        let uri = self
            .uri
            .ok_or_else(|| missing("root", "uri", ".uri(\"file:///workspace\")"))?;
        validation::validate_root_uri(&uri)?;
        Ok(Root {
            uri,
            name: self.name,
            meta: self.meta,
        })
    }
}

/// Builder for [`Annotations`]
#[derive(Debug, Default)]
pub struct AnnotationsBuilder {
    audience: Option<Vec<Role>>,
    priority: Option<f64>,
    last_modified: Option<String>,
}

impl Annotations {
    pub fn builder() -> AnnotationsBuilder {
        AnnotationsBuilder::default()
    }
}

impl AnnotationsBuilder {
    pub fn audience(mut self, audience: Vec<Role>) -> Self {
        self.audience = Some(audience);
        self
    }

    pub fn priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn last_modified<S: Into<String>>(mut self, last_modified: S) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }

    pub fn build(self) -> McpResult<Annotations> {
        let annotations = Annotations {
            audience: self.audience,
            priority: self.priority,
            last_modified: self.last_modified,
        };
        validation::validate_annotations(&annotations)?;
        Ok(annotations)
    }
}

/// Builder for [`ModelPreferences`]
#[derive(Debug, Default)]
pub struct ModelPreferencesBuilder {
    cost_priority: Option<f64>,
    speed_priority: Option<f64>,
    intelligence_priority: Option<f64>,
    hints: Vec<ModelHint>,
}

impl ModelPreferences {
    pub fn builder() -> ModelPreferencesBuilder {
        ModelPreferencesBuilder::default()
    }
}

impl ModelPreferencesBuilder {
    pub fn cost_priority(mut self, cost_priority: f64) -> Self {
        self.cost_priority = Some(cost_priority);
        self
    }

    pub fn speed_priority(mut self, speed_priority: f64) -> Self {
        self.speed_priority = Some(speed_priority);
        self
    }

    pub fn intelligence_priority(mut self, intelligence_priority: f64) -> Self {
        self.intelligence_priority = Some(intelligence_priority);
        self
    }

    /// Add one model hint
    pub fn hint(mut self, hint: ModelHint) -> Self {
        self.hints.push(hint);
        self
    }

    pub fn build(self) -> McpResult<ModelPreferences> {
        let preferences = ModelPreferences {
            cost_priority: self.cost_priority,
            speed_priority: self.speed_priority,
            intelligence_priority: self.intelligence_priority,
            hints: if self.hints.is_empty() {
                None
            } else {
                Some(self.hints)
            },
        };
        validation::validate_model_preferences(&preferences)?;
        Ok(preferences)
    }
}
