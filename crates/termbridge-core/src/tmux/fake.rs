//! In-memory multiplexer that records every call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::multiplexer::{Multiplexer, TerminalSize};
use crate::api::BridgeError;
use crate::keys::KeyToken;

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    HasSession(String),
    NewSession(String, Option<TerminalSize>),
    SendKeys(String, Vec<String>),
    Capture(String),
    KillSession(String),
    KillServer,
    Version,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<Call>,
    /// Session name -> screen text
    screens: HashMap<String, String>,
    sockets: Vec<PathBuf>,
    new_session_error: Option<String>,
    send_keys_error: Option<String>,
    capture_error: Option<String>,
}

#[derive(Default)]
pub(crate) struct FakeMultiplexer {
    state: Mutex<FakeState>,
}

impl FakeMultiplexer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_session(&self, name: &str) {
        self.state
            .lock()
            .screens
            .insert(name.to_string(), String::new());
    }

    pub(crate) fn set_screen(&self, name: &str, text: &str) {
        self.state
            .lock()
            .screens
            .insert(name.to_string(), text.to_string());
    }

    pub(crate) fn fail_new_session(&self, stderr: &str) {
        self.state.lock().new_session_error = Some(stderr.to_string());
    }

    pub(crate) fn fail_send_keys(&self, stderr: &str) {
        self.state.lock().send_keys_error = Some(stderr.to_string());
    }

    pub(crate) fn fail_capture(&self, stderr: &str) {
        self.state.lock().capture_error = Some(stderr.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Sockets that session operations have been scoped to, in first-use order
    pub(crate) fn sockets(&self) -> Vec<PathBuf> {
        self.state.lock().sockets.clone()
    }

    pub(crate) fn has_screen(&self, name: &str) -> bool {
        self.state.lock().screens.contains_key(name)
    }

    fn record(&self, socket: Option<&Path>, call: Call) {
        let mut state = self.state.lock();
        if let Some(socket) = socket {
            if !state.sockets.iter().any(|s| s == socket) {
                state.sockets.push(socket.to_path_buf());
            }
        }
        state.calls.push(call);
    }
}

impl Multiplexer for FakeMultiplexer {
    async fn has_session(&self, socket: &Path, session: &str) -> bool {
        self.record(Some(socket), Call::HasSession(session.to_string()));
        self.state.lock().screens.contains_key(session)
    }

    async fn new_session(
        &self,
        socket: &Path,
        session: &str,
        size: Option<TerminalSize>,
    ) -> Result<(), BridgeError> {
        self.record(Some(socket), Call::NewSession(session.to_string(), size));
        let mut state = self.state.lock();
        if let Some(stderr) = state.new_session_error.clone() {
            return Err(BridgeError::SessionCreationFailed {
                session: session.to_string(),
                stderr,
            });
        }
        state.screens.insert(session.to_string(), String::new());
        Ok(())
    }

    async fn send_keys(
        &self,
        socket: &Path,
        session: &str,
        tokens: &[KeyToken],
    ) -> Result<(), BridgeError> {
        let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        self.record(Some(socket), Call::SendKeys(session.to_string(), rendered.clone()));
        let mut state = self.state.lock();
        if let Some(stderr) = state.send_keys_error.clone() {
            return Err(BridgeError::KeyDeliveryFailed {
                session: session.to_string(),
                stderr,
            });
        }
        match state.screens.get_mut(session) {
            Some(screen) => {
                for token in rendered {
                    if token == "Enter" {
                        screen.push('\n');
                    } else {
                        screen.push_str(&token);
                    }
                }
                Ok(())
            }
            None => Err(BridgeError::KeyDeliveryFailed {
                session: session.to_string(),
                stderr: format!("can't find session: {}", session),
            }),
        }
    }

    async fn capture_pane(&self, socket: &Path, session: &str) -> Result<String, BridgeError> {
        self.record(Some(socket), Call::Capture(session.to_string()));
        let state = self.state.lock();
        if let Some(stderr) = state.capture_error.clone() {
            return Err(BridgeError::CaptureFailed {
                session: session.to_string(),
                stderr,
            });
        }
        state
            .screens
            .get(session)
            .map(|s| s.trim_end().to_string())
            .ok_or_else(|| BridgeError::CaptureFailed {
                session: session.to_string(),
                stderr: format!("can't find session: {}", session),
            })
    }

    async fn kill_session(&self, socket: &Path, session: &str) -> Result<(), BridgeError> {
        self.record(Some(socket), Call::KillSession(session.to_string()));
        match self.state.lock().screens.remove(session) {
            Some(_) => Ok(()),
            None => Err(BridgeError::SessionTerminationFailed {
                session: session.to_string(),
                stderr: format!("can't find session: {}", session),
            }),
        }
    }

    async fn kill_server(&self, socket: &Path) {
        self.record(Some(socket), Call::KillServer);
        self.state.lock().screens.clear();
    }

    async fn version(&self) -> Result<String, BridgeError> {
        self.record(None, Call::Version);
        Ok("tmux 3.4".to_string())
    }
}
