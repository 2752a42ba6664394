use std::time::Duration;

use tracing::{debug, info, warn};

use super::types::{BridgeError, ExecuteOutput, ExecuteRequest};
use crate::config::{Settings, MAX_READ_WAIT_MS};
use crate::keys::{parse_keys, KeyToken};
use crate::session::{validate_session_name, SessionInfo, SessionRegistry};
use crate::tmux::{deliver_keys, Multiplexer, TmuxClient};

/// Multiplexes named, persistent terminal sessions over one private tmux
/// server.
///
/// One bridge owns one workspace at a time. Calls against different sessions
/// are independent; concurrent calls against the same session may interleave
/// their tmux invocations, so callers that need ordering must serialize.
pub struct TerminalBridge<M: Multiplexer = TmuxClient> {
    mux: M,
    registry: SessionRegistry,
}

impl TerminalBridge<TmuxClient> {
    /// Bridge backed by the tmux binary and name prefix from `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            TmuxClient::with_binary(settings.tmux_path.clone()),
            settings.session_prefix.clone(),
        )
    }
}

impl<M: Multiplexer> TerminalBridge<M> {
    pub fn new(mux: M, session_prefix: impl Into<String>) -> Self {
        Self {
            mux,
            registry: SessionRegistry::new(session_prefix),
        }
    }

    /// Optionally send keys to a session, wait, then capture its screen.
    ///
    /// The session is created if needed. When `keys` is empty and
    /// `send_enter` is false nothing is sent and there is no wait: the call
    /// is a pure capture.
    pub async fn execute(&self, request: ExecuteRequest) -> Result<ExecuteOutput, BridgeError> {
        let session = self
            .registry
            .resolve(&self.mux, request.session_name.as_deref(), request.size)
            .await?;
        let socket = session.workspace.socket_path();

        if !request.is_peek() {
            if !request.keys.is_empty() {
                let tokens = parse_keys(&request.keys);
                debug!(
                    session = %session.name,
                    tokens = tokens.len(),
                    special = tokens.iter().filter(|t| t.is_special()).count(),
                    "Sending keys"
                );
                deliver_keys(&self.mux, socket, &session.name, &tokens, request.key_delay)
                    .await?;
            }
            if request.send_enter {
                self.mux
                    .send_keys(socket, &session.name, &[KeyToken::ENTER])
                    .await?;
            }
            tokio::time::sleep(capped_wait(request.read_wait)).await;
        }

        let output = self.mux.capture_pane(socket, &session.name).await?;
        Ok(ExecuteOutput {
            session: session.name,
            output,
        })
    }

    /// Kill a session by name.
    ///
    /// There is no fallback to the last session: an empty name is rejected
    /// before tmux is touched. Returns the closed session's name.
    pub async fn close(&self, session_name: Option<&str>) -> Result<String, BridgeError> {
        let name = session_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(BridgeError::MissingSessionName)?;
        validate_session_name(name)?;

        let workspace = self.registry.workspace().await?;
        self.mux.kill_session(workspace.socket_path(), name).await?;
        self.registry.forget(name);
        info!(session = %name, "Closed terminal session");
        Ok(name.to_string())
    }

    /// Tear down the tmux server and the workspace directory.
    ///
    /// In-memory state is always cleared, whatever happens externally, and
    /// calling this again (or before any session existed) is a no-op.
    pub async fn cleanup(&self) {
        let Some(workspace) = self.registry.reset() else {
            debug!("Cleanup skipped, no workspace");
            return;
        };

        self.mux.kill_server(workspace.socket_path()).await;
        if let Err(e) = workspace.remove() {
            warn!(dir = %workspace.dir().display(), error = %e, "Failed to remove workspace directory");
        }
        info!(dir = %workspace.dir().display(), "Terminal workspace cleaned up");
    }

    /// Check that the multiplexer binary can be invoked; returns its version
    pub async fn validate(&self) -> Result<String, BridgeError> {
        self.mux.version().await
    }

    /// Sessions resolved since the last cleanup
    pub fn sessions(&self) -> Vec<SessionInfo> {
        self.registry.sessions()
    }

    /// Session reused by requests that name none
    pub fn last_session(&self) -> Option<String> {
        self.registry.last_session()
    }

    /// Whether a workspace currently exists
    pub fn is_initialized(&self) -> bool {
        self.registry.is_initialized()
    }

    /// The multiplexer this bridge drives
    pub fn multiplexer(&self) -> &M {
        &self.mux
    }
}

/// Wait actually applied after sending keys
fn capped_wait(requested: Duration) -> Duration {
    requested.min(Duration::from_millis(MAX_READ_WAIT_MS))
}
