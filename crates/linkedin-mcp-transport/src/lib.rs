//! Command registry and MCP transports.
//!
//! Provides:
//! - Command catalogue and dispatch with the uniform envelope
//! - JSON-RPC 2.0 wire types and the MCP method handler
//! - Line-delimited stdio transport
//! - WebSocket and HTTP transport (feature: websocket)

pub mod commands;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod stdio;

#[cfg(feature = "websocket")]
pub mod websocket;

pub use commands::Command;
pub use handler::McpHandler;
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolDefinition};
pub use registry::{CommandRegistry, DispatchError};
