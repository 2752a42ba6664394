//! TerminalBridge — the Facade entry-point for hosts (MCP server, tests).
//!
//! The bridge owns the multiplexer client and the session registry and exposes
//! one method per public operation.

mod bridge;
mod tools;
mod types;

pub use bridge::TerminalBridge;
pub use tools::{TOOL_CLOSE, TOOL_EXECUTE};
pub use types::{BridgeError, ExecuteOutput, ExecuteRequest, ToolReply};
