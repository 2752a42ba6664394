//! MCP protocol layer.

mod server;
mod tools;

pub use server::TermbridgeServer;
pub use tools::{TerminalCloseInput, TerminalExecuteInput, TerminalSizeInput};
