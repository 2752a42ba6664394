//! termbridge-core: persistent, named terminal sessions on a private tmux server.
//!
//! Every session created by one [`TerminalBridge`] lives on a tmux server
//! reached through a control socket inside a private temporary directory, so
//! nothing leaks into (or collides with) the user's own tmux sessions.
//!
//! ```text
//! terminal_execute / terminal_close
//!        │
//!        ▼
//! ┌──────────────────┐   keys::parse_keys
//! │  TerminalBridge  │──────────────────────► Vec<KeyToken>
//! └────────┬─────────┘
//!          │ resolve / forget / reset
//!          ▼
//! ┌──────────────────┐   Workspace (temp dir + tmux.sock)
//! │ SessionRegistry  │
//! └────────┬─────────┘
//!          │ has-session / new-session / send-keys / capture-pane / kill-*
//!          ▼
//!      TmuxClient  ──► tmux -S <socket> ...
//! ```

pub mod api;
pub mod config;
pub mod keys;
pub mod session;
pub mod tmux;

pub use api::{
    BridgeError, ExecuteOutput, ExecuteRequest, TerminalBridge, ToolReply, TOOL_CLOSE, TOOL_EXECUTE,
};
pub use config::Settings;
pub use keys::{parse_keys, KeyToken};
pub use session::{SessionInfo, SessionRegistry, Workspace};
pub use tmux::{Multiplexer, TerminalSize, TmuxClient};
