use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::info;

use super::namegen::generate_unique_name;
use super::workspace::Workspace;
use crate::api::BridgeError;
use crate::tmux::{Multiplexer, TerminalSize};

/// Session names tmux can target unambiguously (`:` and `.` are separators)
static SESSION_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid SESSION_NAME_PATTERN regex")
});

/// Reject caller-supplied names tmux would misinterpret
pub fn validate_session_name(name: &str) -> Result<(), BridgeError> {
    if SESSION_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(BridgeError::InvalidSessionName {
            name: name.to_string(),
        })
    }
}

/// Cached metadata for a session this process has used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub name: String,
    /// Last time a request resolved to this session
    pub last_used: DateTime<Utc>,
}

/// A session that is known to exist, plus the workspace it lives in
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub workspace: Arc<Workspace>,
    pub name: String,
}

/// Initialize-once gate for one workspace generation
type WorkspaceGate = Arc<OnceCell<Arc<Workspace>>>;

/// Tracks the workspace and the sessions created inside it.
///
/// tmux is the source of truth for whether a session exists; the cache here
/// only records what this process has resolved. Locks are never held across
/// an await.
pub struct SessionRegistry {
    /// Prefix for generated session names
    prefix: String,
    /// Current workspace generation; swapped for a fresh gate on reset
    workspace: Mutex<WorkspaceGate>,
    sessions: Mutex<HashMap<String, SessionInfo>>,
    /// Session reused when a request names none
    last_session: Mutex<Option<String>>,
}

impl SessionRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            workspace: Mutex::new(Arc::new(OnceCell::new())),
            sessions: Mutex::new(HashMap::new()),
            last_session: Mutex::new(None),
        }
    }

    /// The workspace, creating it on first use.
    ///
    /// Concurrent first callers all wait on the same gate and receive the
    /// same workspace.
    pub async fn workspace(&self) -> Result<Arc<Workspace>, BridgeError> {
        let gate = self.workspace.lock().clone();
        gate.get_or_try_init(|| async {
            let workspace = Workspace::create()?;
            info!(dir = %workspace.dir().display(), "Initialized terminal workspace");
            Ok::<_, BridgeError>(Arc::new(workspace))
        })
        .await
        .map(Arc::clone)
    }

    /// The workspace if it has already been created
    pub fn current_workspace(&self) -> Result<Arc<Workspace>, BridgeError> {
        self.workspace
            .lock()
            .get()
            .cloned()
            .ok_or(BridgeError::WorkspaceUninitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.workspace.lock().initialized()
    }

    /// Resolve `name` to an existing session, creating it if tmux does not
    /// know it.
    ///
    /// Without a name the last resolved session is reused, or a new name is
    /// generated. `size` is applied only when the session is created.
    pub async fn resolve<M: Multiplexer>(
        &self,
        mux: &M,
        name: Option<&str>,
        size: Option<TerminalSize>,
    ) -> Result<ResolvedSession, BridgeError> {
        let workspace = self.workspace().await?;

        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => {
                validate_session_name(name)?;
                name.to_string()
            }
            None => match self.last_session() {
                Some(name) => name,
                None => self.generate_name(),
            },
        };

        // A failed check looks the same as a missing session
        if !mux.has_session(workspace.socket_path(), &name).await {
            info!(session = %name, ?size, "Creating terminal session");
            mux.new_session(workspace.socket_path(), &name, size).await?;
        }

        self.touch(&name);
        Ok(ResolvedSession { workspace, name })
    }

    /// Drop `name` from the cache, clearing the last session if it matches
    pub fn forget(&self, name: &str) {
        self.sessions.lock().remove(name);
        let mut last = self.last_session.lock();
        if last.as_deref() == Some(name) {
            *last = None;
        }
    }

    /// Clear all state and start a new workspace generation.
    ///
    /// Returns the workspace that was live, if any, so the caller can tear
    /// it down.
    pub fn reset(&self) -> Option<Arc<Workspace>> {
        let previous = std::mem::replace(&mut *self.workspace.lock(), Arc::new(OnceCell::new()));
        self.sessions.lock().clear();
        *self.last_session.lock() = None;
        previous.get().cloned()
    }

    /// Snapshot of cached sessions, sorted by name
    pub fn sessions(&self) -> Vec<SessionInfo> {
        let mut sessions: Vec<SessionInfo> = self.sessions.lock().values().cloned().collect();
        sessions.sort_by(|a, b| a.name.cmp(&b.name));
        sessions
    }

    pub fn last_session(&self) -> Option<String> {
        self.last_session.lock().clone()
    }

    fn generate_name(&self) -> String {
        let existing: Vec<String> = self.sessions.lock().keys().cloned().collect();
        generate_unique_name(&self.prefix, &existing)
    }

    fn touch(&self, name: &str) {
        let now = Utc::now();
        self.sessions
            .lock()
            .entry(name.to_string())
            .and_modify(|s| s.last_used = now)
            .or_insert_with(|| SessionInfo {
                name: name.to_string(),
                last_used: now,
            });
        *self.last_session.lock() = Some(name.to_string());
    }
}
