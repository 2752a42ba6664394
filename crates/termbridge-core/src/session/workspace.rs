use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::api::BridgeError;

/// File name of the tmux control socket inside the workspace directory
const SOCKET_NAME: &str = "tmux.sock";

/// Private directory plus the tmux control socket inside it.
///
/// All sessions of one bridge live on the tmux server listening on this
/// socket. The directory is removed when the workspace is dropped.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    socket_path: PathBuf,
}

impl Workspace {
    /// Allocate a fresh private directory under the system temp dir
    pub fn create() -> Result<Self, BridgeError> {
        let dir = tempfile::Builder::new()
            .prefix("termbridge-")
            .tempdir()
            .map_err(|e| BridgeError::WorkspaceCreationFailed {
                message: e.to_string(),
            })?;
        let socket_path = dir.path().join(SOCKET_NAME);
        Ok(Self { dir, socket_path })
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now instead of waiting for drop
    pub fn remove(&self) -> std::io::Result<()> {
        match std::fs::remove_dir_all(self.dir.path()) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_lives_inside_private_dir() {
        let ws = Workspace::create().expect("workspace");
        assert!(ws.dir().is_dir());
        assert_eq!(ws.socket_path().parent(), Some(ws.dir()));
        assert!(ws.socket_path().ends_with(SOCKET_NAME));
    }

    #[test]
    fn test_workspaces_are_distinct() {
        let a = Workspace::create().expect("workspace");
        let b = Workspace::create().expect("workspace");
        assert_ne!(a.socket_path(), b.socket_path());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let ws = Workspace::create().expect("workspace");
        let dir = ws.dir().to_path_buf();
        ws.remove().expect("first remove");
        assert!(!dir.exists());
        ws.remove().expect("second remove");
    }
}
