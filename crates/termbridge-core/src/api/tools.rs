//! Text-only tool boundary.
//!
//! Hosts see exactly two operations. Every failure is rendered as text
//! starting with `Error`, so a host never receives a failed call from here.

use super::bridge::TerminalBridge;
use super::types::{BridgeError, ExecuteRequest, ToolReply};
use crate::tmux::Multiplexer;

/// Tool name of the send-and-capture operation
pub const TOOL_EXECUTE: &str = "terminal_execute";

/// Tool name of the close operation
pub const TOOL_CLOSE: &str = "terminal_close";

impl<M: Multiplexer> TerminalBridge<M> {
    /// `terminal_execute`: send keys (optional), wait, capture
    pub async fn terminal_execute(&self, request: ExecuteRequest) -> ToolReply {
        match self.execute(request).await {
            Ok(out) => ToolReply::success(format!("Session: {}\n\n{}", out.session, out.output)),
            Err(e) => ToolReply::error(format!("Error executing terminal command: {}", e)),
        }
    }

    /// `terminal_close`: kill a named session
    pub async fn terminal_close(&self, session_name: Option<&str>) -> ToolReply {
        match self.close(session_name).await {
            Ok(name) => ToolReply::success(format!("Session '{}' closed", name)),
            Err(BridgeError::MissingSessionName) => {
                ToolReply::error("Error: sessionName is required")
            }
            Err(e) => ToolReply::error(format!("Error closing terminal session: {}", e)),
        }
    }
}
