//! MCP server exposing the terminal bridge as tools.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use tracing::{debug, info};

use super::tools::{TerminalCloseInput, TerminalExecuteInput};
use termbridge_core::{Settings, TerminalBridge, ToolReply};

/// Instructions sent to the client on initialize
const INSTRUCTIONS: &str = "Persistent terminal sessions backed by a private tmux server. \
Use terminal_execute to type into a session and read its screen, terminal_close to end one.";

/// The termbridge MCP server.
#[derive(Clone)]
pub struct TermbridgeServer {
    bridge: Arc<TerminalBridge>,
    settings: Arc<Settings>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TermbridgeServer {
    pub fn new(bridge: Arc<TerminalBridge>, settings: Arc<Settings>) -> Self {
        Self {
            bridge,
            settings,
            tool_router: Self::tool_router(),
        }
    }

    /// Send keys to a terminal session and capture its screen.
    #[tool(
        name = "terminal_execute",
        description = "Send keys to a persistent terminal session and return its screen. \
Sessions are created on first use and keep their state (directory, environment, running \
programs) between calls; omit sessionName to continue in the last session. keys mixes \
literal text with special keys without separators: C-c / M-x combinations, F1-F12, Enter, \
Tab, BTab, Escape, BSpace (or Backspace), Space, Up, Down, Left, Right, Home, End, PageUp, \
PageDown, IC, DC (e.g. \"vi notes.txtEscape\"). Send no keys with sendEnter=false to read \
the screen without changing it. readWait (ms, max 30000) is the pause before capturing."
    )]
    async fn terminal_execute(
        &self,
        Parameters(input): Parameters<TerminalExecuteInput>,
    ) -> Result<CallToolResult, McpError> {
        debug!(session = ?input.session_name, "Handling terminal_execute");
        let request = input.into_request(&self.settings);
        Ok(into_result(self.bridge.terminal_execute(request).await))
    }

    /// Close a terminal session.
    #[tool(
        name = "terminal_close",
        description = "Close a terminal session by name, terminating every process running \
in it. sessionName is required."
    )]
    async fn terminal_close(
        &self,
        Parameters(input): Parameters<TerminalCloseInput>,
    ) -> Result<CallToolResult, McpError> {
        info!(session = ?input.session_name, "Handling terminal_close");
        let reply = self.bridge.terminal_close(input.session_name.as_deref()).await;
        Ok(into_result(reply))
    }
}

#[tool_handler]
impl ServerHandler for TermbridgeServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }
}

/// Tool failures travel as text results, never as protocol errors
fn into_result(reply: ToolReply) -> CallToolResult {
    if reply.is_error {
        CallToolResult::error(vec![Content::text(reply.text)])
    } else {
        CallToolResult::success(vec![Content::text(reply.text)])
    }
}
