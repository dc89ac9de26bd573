//! MCP method handling over JSON-RPC, shared by every transport.

use serde_json::{Value, json};

use crate::{
    protocol::{
        CallToolParams, CallToolResult, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
        JsonRpcError, JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR,
    },
    registry::CommandRegistry,
};

pub const SERVER_NAME: &str = "LinkedIn MCP Server";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Answers MCP requests by delegating tool calls to a [`CommandRegistry`].
#[derive(Clone)]
pub struct McpHandler {
    registry: CommandRegistry,
}

impl McpHandler {
    #[must_use]
    pub const fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Handle one raw message. Returns the serialized response, or `None`
    /// when the message was a notification.
    pub async fn handle_text(&self, text: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(text) {
            Ok(value) => self.handle_value(value).await?,
            Err(e) => {
                tracing::warn!("Unparseable message: {e}");
                parse_error(&e)
            }
        };
        encode(&response)
    }

    /// Like [`McpHandler::handle_text`], for input that may not be UTF-8.
    /// Invalid UTF-8 is answered with a parse error.
    pub async fn handle_bytes(&self, bytes: &[u8]) -> Option<String> {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.handle_text(text).await,
            Err(e) => {
                tracing::warn!("Message is not valid UTF-8: {e}");
                encode(&parse_error(&e))
            }
        }
    }

    async fn handle_value(&self, value: Value) -> Option<JsonRpcResponse> {
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request = match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) if request.jsonrpc == JSONRPC_VERSION => request,
            Ok(request) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(
                        INVALID_REQUEST,
                        format!("Unsupported jsonrpc version: {}", request.jsonrpc),
                    ),
                ));
            }
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(INVALID_REQUEST, format!("Invalid request: {e}")),
                ));
            }
        };
        self.handle_request(request).await
    }

    /// Handle a decoded request. Notifications never produce a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, "Handling request");
        let outcome = self.call(&request.method, request.params).await;

        let id = request.id?;
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => Ok(initialize(params.as_ref())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": CommandRegistry::tools() })),
            "tools/call" => self.call_tool(params).await,
            m if m.starts_with("notifications/") => Ok(Value::Null),
            m => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {m}"),
            )),
        }
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))?;

        let envelope = self
            .registry
            .dispatch(&params.name, params.arguments)
            .await
            .map_err(|e| {
                tracing::warn!(tool = %params.name, "Rejected tool call: {e}");
                JsonRpcError::new(INVALID_PARAMS, e.to_string())
            })?;

        serde_json::to_value(CallToolResult::from_envelope(envelope))
            .map_err(|e| JsonRpcError::new(INVALID_PARAMS, e.to_string()))
    }
}

fn parse_error(e: &dyn std::error::Error) -> JsonRpcResponse {
    JsonRpcResponse::failure(
        Value::Null,
        JsonRpcError::new(PARSE_ERROR, format!("Parse error: {e}")),
    )
}

fn encode(response: &JsonRpcResponse) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to serialize response: {e}");
            None
        }
    }
}

fn initialize(params: Option<&Value>) -> Value {
    let protocol_version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}
