use std::future::Future;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::BridgeError;
use crate::keys::KeyToken;

/// Terminal dimensions in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

/// The operations the bridge needs from a terminal multiplexer.
///
/// Every call is scoped to one control socket and is an independent
/// external invocation.
pub trait Multiplexer: Send + Sync {
    /// Whether `session` exists. Any failure is reported as `false`.
    fn has_session(&self, socket: &Path, session: &str) -> impl Future<Output = bool> + Send;

    /// Create a detached session, optionally with a fixed size
    fn new_session(
        &self,
        socket: &Path,
        session: &str,
        size: Option<TerminalSize>,
    ) -> impl Future<Output = Result<(), BridgeError>> + Send;

    /// Send `tokens` to the session's active pane in one invocation
    fn send_keys(
        &self,
        socket: &Path,
        session: &str,
        tokens: &[KeyToken],
    ) -> impl Future<Output = Result<(), BridgeError>> + Send;

    /// Rendered text of the session's active pane
    fn capture_pane(
        &self,
        socket: &Path,
        session: &str,
    ) -> impl Future<Output = Result<String, BridgeError>> + Send;

    fn kill_session(
        &self,
        socket: &Path,
        session: &str,
    ) -> impl Future<Output = Result<(), BridgeError>> + Send;

    /// Terminate the server behind `socket`. Best effort, never fails.
    fn kill_server(&self, socket: &Path) -> impl Future<Output = ()> + Send;

    /// Version string of the multiplexer binary
    fn version(&self) -> impl Future<Output = Result<String, BridgeError>> + Send;
}

/// Deliver `tokens` to `session`.
///
/// With a non-zero `delay` each token is sent by its own invocation and
/// `delay` elapses between consecutive tokens. Otherwise all tokens go out in
/// a single batch.
pub async fn deliver_keys<M: Multiplexer>(
    mux: &M,
    socket: &Path,
    session: &str,
    tokens: &[KeyToken],
    delay: Option<Duration>,
) -> Result<(), BridgeError> {
    if tokens.is_empty() {
        return Ok(());
    }

    match delay {
        Some(delay) if !delay.is_zero() => {
            for (i, token) in tokens.iter().enumerate() {
                if i > 0 {
                    tokio::time::sleep(delay).await;
                }
                mux.send_keys(socket, session, std::slice::from_ref(token))
                    .await?;
            }
            Ok(())
        }
        _ => mux.send_keys(socket, session, tokens).await,
    }
}
