//! Request, response and error types for the [`TerminalBridge`](super::TerminalBridge) facade.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::tmux::TerminalSize;

/// Error type for bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A session operation ran before the workspace existed
    #[error("terminal workspace is not initialized")]
    WorkspaceUninitialized,

    /// The private temporary directory could not be created
    #[error("failed to create terminal workspace: {message}")]
    WorkspaceCreationFailed { message: String },

    /// `tmux new-session` failed
    #[error("failed to create session '{session}': {stderr}")]
    SessionCreationFailed { session: String, stderr: String },

    /// `tmux send-keys` failed
    #[error("failed to send keys to session '{session}': {stderr}")]
    KeyDeliveryFailed { session: String, stderr: String },

    /// `tmux capture-pane` failed
    #[error("failed to capture output of session '{session}': {stderr}")]
    CaptureFailed { session: String, stderr: String },

    /// `tmux kill-session` failed
    #[error("failed to close session '{session}': {stderr}")]
    SessionTerminationFailed { session: String, stderr: String },

    /// The tmux binary is missing or unusable
    #[error("tmux is not available: {message}")]
    ValidationUnavailable { message: String },

    /// Caller-supplied session name contains characters tmux cannot target
    #[error("invalid session name: '{name}' (allowed: letters, digits, '_' and '-')")]
    InvalidSessionName { name: String },

    /// A destructive operation was called without a session name
    #[error("sessionName is required")]
    MissingSessionName,
}

/// Input of one send-and-capture round trip
#[derive(Debug, Clone, Default)]
pub struct ExecuteRequest {
    /// Target session; `None` reuses the last session or generates a name
    pub session_name: Option<String>,
    /// Key notation to send (may be empty)
    pub keys: String,
    /// Send Enter after `keys`
    pub send_enter: bool,
    /// Pause between sending and capturing (capped at 30s)
    pub read_wait: Duration,
    /// Pause between individual keystrokes
    pub key_delay: Option<Duration>,
    /// Size used only when the session has to be created
    pub size: Option<TerminalSize>,
}

impl ExecuteRequest {
    /// A request that only captures the current screen of `session`
    pub fn peek(session: impl Into<String>) -> Self {
        Self {
            session_name: Some(session.into()),
            ..Self::default()
        }
    }

    /// Returns true if nothing would be sent to the session
    pub fn is_peek(&self) -> bool {
        self.keys.is_empty() && !self.send_enter
    }
}

/// Result of a send-and-capture round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteOutput {
    /// Name the request resolved to
    pub session: String,
    /// Captured screen text, trailing whitespace removed
    pub output: String,
}

/// Text result handed back across the tool boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
    pub text: String,
    pub is_error: bool,
}

impl ToolReply {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}
