// Copyright (c) 2025 MCP Rust Contributors
// SPDX-License-Identifier: MIT

//! Tests for builders, protocol invariants, and the error model.

use mcp_wire::prelude::*;
use serde_json::json;

mod builder_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_errors_name_the_missing_field() {
        let cases: Vec<(McpError, &str)> = vec![
            (
                InitializeParams::builder().build().unwrap_err(),
                "protocolVersion",
            ),
            (CallToolParams::builder().build().unwrap_err(), "name"),
            (ReadResourceParams::builder().build().unwrap_err(), "uri"),
            (GetPromptParams::builder().build().unwrap_err(), "name"),
            (CompleteParams::builder().build().unwrap_err(), "ref"),
            (SetLevelParams::builder().build().unwrap_err(), "level"),
            (CancelledParams::builder().build().unwrap_err(), "requestId"),
            (
                ProgressParams::builder().build().unwrap_err(),
                "progressToken",
            ),
            (InitializeResult::builder().build().unwrap_err(), "protocolVersion"),
            (CreateMessageResult::builder().build().unwrap_err(), "role"),
            (ElicitResult::builder().build().unwrap_err(), "action"),
            (Tool::builder().build().unwrap_err(), "name"),
            (Resource::builder().build().unwrap_err(), "uri"),
            (Prompt::builder().build().unwrap_err(), "name"),
            (Root::builder().build().unwrap_err(), "uri"),
        ];

        for (error, field) in cases {
            let message = error.to_string();
            assert!(
                message.contains(field),
                "error should name `{field}`: {message}"
            );
            assert!(
                message.contains("build()"),
                "error should show usage: {message}"
            );
        }
    }

    #[test]
    fn test_built_values_are_fully_owned() {
        let mut source = HashMap::new();
        source.insert("k".to_string(), json!(1));

        let params = CallToolParams::builder()
            .name("tool")
            .arguments(source.clone())
            .build()
            .unwrap();

        // Mutating the original map must not reach the built value
        source.insert("k2".to_string(), json!(2));
        assert_eq!(params.arguments.unwrap().len(), 1);
    }

    #[test]
    fn test_nested_builders_compose() {
        let result = InitializeResult::builder()
            .protocol_version(LATEST_PROTOCOL_VERSION)
            .server_info(Implementation::with_title("srv", "1.0.0", "Server"))
            .capabilities(ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(true),
                }),
                ..Default::default()
            })
            .instructions("read the docs")
            .build()
            .unwrap();

        let wire = serde_json::to_value(&result).unwrap();
        assert_eq!(wire["capabilities"]["tools"]["listChanged"], true);
        assert_eq!(wire["serverInfo"]["title"], "Server");
    }

    #[test]
    fn test_call_tool_result_builder_content() {
        let result = CallToolResult::builder()
            .text("done")
            .content_block(ContentBlock::resource_link("log", "file:///log"))
            .structured_content(json!({"ok": true}))
            .build()
            .unwrap();
        assert_eq!(result.content.len(), 2);
        assert_eq!(result.structured_content, Some(json!({"ok": true})));
    }
}

mod invariant_tests {
    use super::*;

    #[test]
    fn test_annotation_priority_bounds() {
        assert!(Annotations::builder().priority(1.5).build().is_err());
        assert!(Annotations::builder().priority(-0.01).build().is_err());
        assert!(Annotations::builder().priority(0.0).build().is_ok());
        assert!(Annotations::builder().priority(1.0).build().is_ok());
    }

    #[test]
    fn test_model_preference_priority_bounds() {
        assert!(
            ModelPreferences::builder()
                .cost_priority(-0.1)
                .build()
                .is_err()
        );
        assert!(
            ModelPreferences::builder()
                .speed_priority(1.1)
                .build()
                .is_err()
        );
        assert!(
            ModelPreferences::builder()
                .cost_priority(0.3)
                .speed_priority(0.3)
                .intelligence_priority(0.4)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_completion_values_capped_at_one_hundred() {
        let ok = CompleteResult::builder()
            .values(vec!["v".to_string(); 100])
            .build();
        assert!(ok.is_ok());

        let too_many = CompleteResult::builder()
            .values(vec!["v".to_string(); 101])
            .build();
        assert!(too_many.is_err());
    }

    #[test]
    fn test_root_must_be_file_uri() {
        assert!(Root::builder().uri("http://x").build().is_err());
        assert!(Root::builder().uri("file:///a").build().is_ok());
    }

    #[test]
    fn test_elicit_content_only_on_accept() {
        let mut content = HashMap::new();
        content.insert("answer".to_string(), json!(42));

        assert!(
            ElicitResult::builder()
                .action(ElicitationAction::Decline)
                .content(content.clone())
                .build()
                .is_err()
        );
        assert!(
            ElicitResult::builder()
                .action(ElicitationAction::Accept)
                .content(content)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_empty_string_request_id_rejected() {
        let error = CancelledParams::builder()
            .request_id(RequestId::string(""))
            .build()
            .unwrap_err();
        assert!(error.to_string().contains("empty"));
    }
}

mod protocol_constants_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_supported_versions_newest_first() {
        assert_eq!(SUPPORTED_PROTOCOL_VERSIONS[0], LATEST_PROTOCOL_VERSION);
        for pair in SUPPORTED_PROTOCOL_VERSIONS.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        assert!(SUPPORTED_PROTOCOL_VERSIONS.contains(&"2024-11-05"));
    }

    #[test]
    fn test_version_negotiation() {
        assert_eq!(negotiate_version("2025-06-18"), "2025-06-18");
        assert_eq!(negotiate_version("2031-01-01"), LATEST_PROTOCOL_VERSION);
    }

    #[test]
    fn test_logging_level_ordering() {
        assert!(LoggingLevel::Debug < LoggingLevel::Info);
        assert!(LoggingLevel::Warning < LoggingLevel::Error);
        assert!(LoggingLevel::Alert < LoggingLevel::Emergency);

        // A set-level filter is a simple comparison
        let minimum = LoggingLevel::Warning;
        assert!(LoggingLevel::Error >= minimum);
        assert!(LoggingLevel::Info < minimum);
    }

    #[test]
    fn test_error_code_constants() {
        assert_eq!(error_codes::PARSE_ERROR, -32700);
        assert_eq!(error_codes::INVALID_REQUEST, -32600);
        assert_eq!(error_codes::METHOD_NOT_FOUND, -32601);
        assert_eq!(error_codes::INVALID_PARAMS, -32602);
        assert_eq!(error_codes::INTERNAL_ERROR, -32603);
        assert_eq!(error_codes::CONNECTION_CLOSED, -32000);
        assert_eq!(error_codes::REQUEST_TIMEOUT, -32001);
    }

    #[test]
    fn test_related_task_meta_key() {
        assert_eq!(
            RELATED_TASK_META_KEY,
            "io.modelcontextprotocol/related-task"
        );

        let meta = with_related_task(None, "task-3");
        assert_eq!(related_task_id(&meta), Some("task-3"));

        // Attaching to an existing map preserves other keys
        let mut seeded = Meta::new();
        seeded.insert("custom".to_string(), json!(true));
        let meta = with_related_task(Some(seeded), "task-4");
        assert_eq!(meta["custom"], json!(true));
        assert_eq!(related_task_id(&meta), Some("task-4"));
    }
}

mod error_model_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_peer_error_keeps_code_and_data() {
        let peer = ErrorObject::new(-32000, "Connection closed".to_string())
            .with_data(json!({"attempt": 3}));
        let error = McpError::from(peer.clone());
        match &error {
            McpError::Peer(object) => {
                assert_eq!(object.code, -32000);
                assert_eq!(object.data, Some(json!({"attempt": 3})));
            }
            other => panic!("expected peer error, got {other:?}"),
        }
        assert_eq!(error.jsonrpc_code(), -32000);
    }

    #[test]
    fn test_decode_errors_are_reported_not_fatal() {
        // A decode failure produces an error value; nothing panics and the
        // caller is free to process the next frame.
        let bad_frames = [
            "{",
            r#"{"jsonrpc":"2.0"}"#,
            r#"{"jsonrpc":"1.0","id":1,"method":"ping"}"#,
            r#"{"jsonrpc":"2.0","id":1.5,"method":"ping"}"#,
        ];
        for frame in bad_frames {
            assert!(JsonRpcMessage::from_json(frame).is_err(), "frame: {frame}");
        }

        let good = r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#;
        assert!(JsonRpcMessage::from_json(good).is_ok());
    }

    #[test]
    fn test_error_object_constructors_match_codes() {
        assert_eq!(ErrorObject::parse_error(None).code, -32700);
        assert_eq!(ErrorObject::invalid_request(None).code, -32600);
        assert_eq!(ErrorObject::method_not_found("x/y").code, -32601);
        assert_eq!(ErrorObject::invalid_params(None).code, -32602);
        assert_eq!(ErrorObject::internal_error(None).code, -32603);
        assert_eq!(ErrorObject::connection_closed().code, -32000);
        assert_eq!(ErrorObject::request_timeout().code, -32001);
    }
}
