// Copyright (c) 2025 MCP Rust Contributors
// SPDX-License-Identifier: MIT

//! Tests for envelope classification, direction-aware dispatch, and wire
//! compatibility against literal frames.

use mcp_wire::prelude::*;
use serde_json::json;

mod envelope_shape_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_key_wins_envelope_classification() {
        let frame = r#"{"jsonrpc":"2.0","id":5,"error":{"code":-32603,"message":"boom","data":{"hint":"x"}}}"#;
        match JsonRpcMessage::from_json(frame).unwrap() {
            JsonRpcMessage::Error(response) => {
                assert_eq!(response.error.code, -32603);
                assert_eq!(response.error.data, Some(json!({"hint": "x"})));
            }
            other => panic!("expected error response, got {other:?}"),
        }
    }

    #[test]
    fn test_result_key_means_success_response() {
        let frame = r#"{"jsonrpc":"2.0","id":5,"result":{"tools":[]}}"#;
        assert!(matches!(
            JsonRpcMessage::from_json(frame).unwrap(),
            JsonRpcMessage::Response(_)
        ));
    }

    #[test]
    fn test_method_with_id_means_request() {
        let frame = r#"{"jsonrpc":"2.0","id":"abc","method":"tools/list"}"#;
        match JsonRpcMessage::from_json(frame).unwrap() {
            JsonRpcMessage::Request(request) => {
                assert_eq!(request.id, RequestId::string("abc"));
                assert_eq!(request.method, Method::ListTools);
            }
            other => panic!("expected request, got {other:?}"),
        }
    }

    #[test]
    fn test_method_without_id_means_notification() {
        let frame = r#"{"jsonrpc":"2.0","method":"notifications/progress","params":{"progressToken":1,"progress":0.4}}"#;
        assert!(matches!(
            JsonRpcMessage::from_json(frame).unwrap(),
            JsonRpcMessage::Notification(_)
        ));
    }

    #[test]
    fn test_shapeless_object_is_invalid_request() {
        let error = JsonRpcMessage::from_json(r#"{"jsonrpc":"2.0","id":1}"#).unwrap_err();
        assert_eq!(error.jsonrpc_code(), error_codes::INVALID_REQUEST);
    }

    #[test]
    fn test_invalid_json_is_a_serialization_error() {
        let error = JsonRpcMessage::from_json("{not json").unwrap_err();
        assert_eq!(error.jsonrpc_code(), error_codes::PARSE_ERROR);
    }
}

mod literal_scenario_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initialize_request_decodes_from_wire() {
        let frame = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-06-18","capabilities":{"sampling":{}},"clientInfo":{"name":"c","version":"1.0"}}}"#;
        let request = match JsonRpcMessage::from_json(frame).unwrap() {
            JsonRpcMessage::Request(request) => request,
            other => panic!("expected request, got {other:?}"),
        };

        match ClientRequest::from_request(&request).unwrap() {
            ClientRequest::Initialize(params) => {
                assert_eq!(params.protocol_version, "2025-06-18");
                assert!(params.capabilities.sampling.is_some());
                assert_eq!(params.client_info.name, "c");
            }
            other => panic!("expected initialize, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_call_response_encodes_without_absent_fields() {
        let result = CallToolResult {
            content: vec![ContentBlock::text("ok")],
            is_error: None,
            structured_content: None,
            meta: None,
        };
        let response = ServerResult::CallTool(result)
            .into_response(RequestId::number(7))
            .unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "result": {"content": [{"type": "text", "text": "ok"}]}
            })
        );
    }

    #[test]
    fn test_ping_family_depends_on_receiver_direction() {
        let frame = r#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#;
        let request = match JsonRpcMessage::from_json(frame).unwrap() {
            JsonRpcMessage::Request(request) => request,
            other => panic!("expected request, got {other:?}"),
        };

        // A client treats inbound requests as server-issued
        assert!(matches!(
            ServerRequest::from_request(&request).unwrap(),
            ServerRequest::Ping(_)
        ));
        // A server treats the same bytes as client-issued
        assert!(matches!(
            ClientRequest::from_request(&request).unwrap(),
            ClientRequest::Ping(_)
        ));
    }

    #[test]
    fn test_meta_only_result_is_empty_result() {
        let frame = r#"{"jsonrpc":"2.0","id":4,"result":{"_meta":{"k":"v"}}}"#;
        let response = match JsonRpcMessage::from_json(frame).unwrap() {
            JsonRpcMessage::Response(response) => response,
            other => panic!("expected response, got {other:?}"),
        };

        match AnyResult::from_value(&response.result).unwrap() {
            AnyResult::Empty(result) => {
                assert_eq!(result.meta.unwrap()["k"], json!("v"));
            }
            other => panic!("expected empty result, got {other:?}"),
        }
    }

    #[test]
    fn test_cancelled_notification_wire_format() {
        let notification = ClientNotification::Cancelled(
            CancelledParams::new(RequestId::number(9)).with_reason("user"),
        )
        .into_notification()
        .unwrap();

        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "method": "notifications/cancelled",
                "params": {"requestId": 9, "reason": "user"}
            })
        );
    }

    #[test]
    fn test_unknown_method_round_trips() {
        let frame = r#"{"jsonrpc":"2.0","id":11,"method":"x/y","params":{"a":1}}"#;
        let request = match JsonRpcMessage::from_json(frame).unwrap() {
            JsonRpcMessage::Request(request) => request,
            other => panic!("expected request, got {other:?}"),
        };

        let decoded = ClientRequest::from_request(&request).unwrap();
        match &decoded {
            ClientRequest::Custom(custom) => {
                assert_eq!(custom.method, Method::Custom("x/y".to_string()));
                assert_eq!(custom.params, Some(json!({"a": 1})));
            }
            other => panic!("expected custom request, got {other:?}"),
        }

        let reencoded = decoded.into_request(RequestId::number(11)).unwrap();
        assert_eq!(
            serde_json::to_value(&reencoded).unwrap(),
            json!({"jsonrpc": "2.0", "id": 11, "method": "x/y", "params": {"a": 1}})
        );
    }
}

mod dispatch_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_id_monotonicity_across_built_requests() {
        let ids: Vec<i64> = (0..16)
            .map(|_| {
                let request = ClientRequest::Ping(PingParams::default())
                    .into_request(RequestId::next())
                    .unwrap();
                match request.id {
                    RequestId::Number(n) => n,
                    RequestId::String(s) => panic!("expected number id, got {s}"),
                }
            })
            .collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "ids must strictly increase: {ids:?}");
        }
    }

    #[test]
    fn test_defined_notification_methods_dispatch() {
        let cases: Vec<(&str, serde_json::Value)> = vec![
            (
                "notifications/cancelled",
                json!({"requestId": 1}),
            ),
            (
                "notifications/progress",
                json!({"progressToken": "tok", "progress": 10.0}),
            ),
            ("notifications/message", json!({"level": "info", "data": "x"})),
            ("notifications/resources/updated", json!({"uri": "file:///a"})),
            ("notifications/resources/list_changed", json!({})),
            ("notifications/tools/list_changed", json!({})),
            ("notifications/prompts/list_changed", json!({})),
            (
                "notifications/tasks/status",
                json!({"taskId": "t", "status": "working"}),
            ),
        ];
        for (method, params) in cases {
            let notification =
                JsonRpcNotification::new(Method::from_wire(method), Some(params));
            let decoded = ServerNotification::from_notification(&notification).unwrap();
            assert_eq!(decoded.method().as_str(), method);
            assert!(
                !matches!(decoded, ServerNotification::Custom(_)),
                "{method} fell through to custom"
            );
        }
    }

    #[test]
    fn test_custom_notification_survives() {
        let notification = JsonRpcNotification::new(
            Method::from_wire("vendor/heartbeat"),
            Some(json!({"seq": 4})),
        );
        let decoded = AnyNotification::from_notification(&notification).unwrap();
        match decoded {
            AnyNotification::Custom(custom) => {
                assert_eq!(custom.method.as_str(), "vendor/heartbeat");
                assert_eq!(custom.params, Some(json!({"seq": 4})));
            }
            other => panic!("expected custom notification, got {other:?}"),
        }
    }

    #[test]
    fn test_initialize_result_probed_before_single_keys() {
        // An initialize result also lacks every single-key probe, so the
        // compound probe must run first for it to classify at all.
        let value = json!({
            "protocolVersion": "2025-06-18",
            "capabilities": {"tools": {"listChanged": true}},
            "serverInfo": {"name": "s", "version": "2.0"},
            "instructions": "be nice"
        });
        match ServerResult::from_value(&value).unwrap() {
            ServerResult::Initialize(result) => {
                assert_eq!(result.protocol_version, "2025-06-18");
                assert_eq!(result.instructions.as_deref(), Some("be nice"));
            }
            other => panic!("expected initialize result, got {other:?}"),
        }
    }

    #[test]
    fn test_result_decode_rejects_unknown_shape() {
        assert!(AnyResult::from_value(&json!({"surprise": true})).is_err());
    }

    #[test]
    fn test_decoder_tolerates_unknown_fields() {
        let frame = r#"{"jsonrpc":"2.0","id":2,"method":"resources/read","params":{"uri":"file:///a","futureField":123}}"#;
        let request = match JsonRpcMessage::from_json(frame).unwrap() {
            JsonRpcMessage::Request(request) => request,
            other => panic!("expected request, got {other:?}"),
        };
        match ClientRequest::from_request(&request).unwrap() {
            ClientRequest::ReadResource(params) => assert_eq!(params.uri, "file:///a"),
            other => panic!("expected resources/read, got {other:?}"),
        }
    }
}

mod round_trip_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn round_trip_request(request: ClientRequest) {
        let envelope = request.clone().into_request(RequestId::number(1)).unwrap();
        let wire = serde_json::to_string(&JsonRpcMessage::Request(envelope)).unwrap();
        let decoded_envelope = match JsonRpcMessage::from_json(&wire).unwrap() {
            JsonRpcMessage::Request(envelope) => envelope,
            other => panic!("expected request, got {other:?}"),
        };
        let decoded = ClientRequest::from_request(&decoded_envelope).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_request_round_trips() {
        round_trip_request(ClientRequest::Ping(PingParams::default()));
        round_trip_request(ClientRequest::CallTool(
            CallToolParams::builder()
                .name("echo")
                .argument("message", json!("hello"))
                .build()
                .unwrap(),
        ));
        round_trip_request(ClientRequest::Complete(
            CompleteParams::builder()
                .reference(Reference::Resource {
                    uri: "file:///{path}".to_string(),
                })
                .argument("path", "src/")
                .build()
                .unwrap(),
        ));
        round_trip_request(ClientRequest::SetLevel(
            SetLevelParams::builder()
                .level(LoggingLevel::Notice)
                .build()
                .unwrap(),
        ));
        round_trip_request(ClientRequest::GetTask(GetTaskParams {
            task_id: "task-9".to_string(),
            meta: None,
        }));
    }

    #[test]
    fn test_server_request_round_trips() {
        let request = ServerRequest::CreateMessage(
            CreateMessageParams::builder()
                .message(SamplingMessage::user_text("hi"))
                .max_tokens(64)
                .model_preferences(
                    ModelPreferences::builder()
                        .intelligence_priority(0.9)
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );
        let envelope = request.clone().into_request(RequestId::string("s-1")).unwrap();
        let decoded = ServerRequest::from_request(&envelope).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_result_round_trips() {
        let results = vec![
            ServerResult::ListTools(
                ListToolsResult::builder()
                    .tool(Tool::builder().name("echo").build().unwrap())
                    .next_cursor("p2")
                    .build()
                    .unwrap(),
            ),
            ServerResult::ReadResource(
                ReadResourceResult::builder()
                    .contents(ResourceContents::blob("file:///bin", "aGk="))
                    .build()
                    .unwrap(),
            ),
            ServerResult::GetPrompt(
                GetPromptResult::builder()
                    .description("greeting")
                    .message(Role::User, ContentBlock::text("hi"))
                    .build()
                    .unwrap(),
            ),
            ServerResult::Complete(
                CompleteResult::builder()
                    .value("src/lib.rs")
                    .total(1)
                    .build()
                    .unwrap(),
            ),
            ServerResult::Empty(EmptyResult::default()),
        ];
        for result in results {
            let value = result.to_value().unwrap();
            let decoded = ServerResult::from_value(&value).unwrap();
            assert_eq!(decoded, result);
        }
    }

    #[test]
    fn test_client_result_round_trips() {
        let results = vec![
            ClientResult::CreateMessage(
                CreateMessageResult::builder()
                    .role(Role::Assistant)
                    .content(SamplingContent::text("answer"))
                    .model("claude-3-5-sonnet")
                    .stop_reason(StopReason::EndTurn)
                    .build()
                    .unwrap(),
            ),
            ClientResult::ListRoots(
                ListRootsResult::builder()
                    .root(Root::builder().uri("file:///w").name("w").build().unwrap())
                    .build()
                    .unwrap(),
            ),
            ClientResult::Elicit(
                ElicitResult::builder()
                    .action(ElicitationAction::Cancel)
                    .build()
                    .unwrap(),
            ),
        ];
        for result in results {
            let value = result.to_value().unwrap();
            let decoded = ClientResult::from_value(&value).unwrap();
            assert_eq!(decoded, result);
        }
    }

    #[test]
    fn test_error_response_round_trips_into_peer_error() {
        let frame = r#"{"jsonrpc":"2.0","id":12,"error":{"code":-32001,"message":"Request timeout","data":["late"]}}"#;
        let response = match JsonRpcMessage::from_json(frame).unwrap() {
            JsonRpcMessage::Error(response) => response,
            other => panic!("expected error response, got {other:?}"),
        };

        let error = McpError::from(response.error);
        assert_eq!(error.jsonrpc_code(), error_codes::REQUEST_TIMEOUT);
        assert!(error.to_string().contains("Request timeout"));
    }
}
