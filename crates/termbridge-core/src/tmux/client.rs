use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::multiplexer::{Multiplexer, TerminalSize};
use crate::api::BridgeError;
use crate::keys::KeyToken;

/// Exit status and captured streams of one tmux invocation
#[derive(Debug)]
struct TmuxOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

impl TmuxOutput {
    /// stderr if tmux wrote any, else a generic description of the exit
    fn error_text(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            "tmux exited with a non-zero status".to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Exact-match session target (`tmux` otherwise accepts name prefixes)
fn session_target(session: &str) -> String {
    format!("={}", session)
}

/// Active pane of an exactly matched session
fn pane_target(session: &str) -> String {
    format!("={}:", session)
}

/// Client for a tmux server reached through an explicit control socket
#[derive(Debug, Clone)]
pub struct TmuxClient {
    /// Path or name of the tmux binary
    tmux_path: String,
}

impl TmuxClient {
    /// Creates a new TmuxClient using `tmux` from `PATH`
    pub fn new() -> Self {
        Self::with_binary("tmux")
    }

    /// Creates a new TmuxClient with a custom tmux binary
    pub fn with_binary(tmux_path: impl Into<String>) -> Self {
        Self {
            tmux_path: tmux_path.into(),
        }
    }

    /// The tmux binary this client invokes
    pub fn binary(&self) -> &str {
        &self.tmux_path
    }

    /// Run `tmux -S <socket> <args>` and collect its output.
    ///
    /// Spawn failures (binary missing, permission denied) come back as `Err`
    /// with the OS error text.
    async fn run(&self, socket: Option<&Path>, args: &[String]) -> Result<TmuxOutput, String> {
        let mut cmd = Command::new(&self.tmux_path);
        if let Some(socket) = socket {
            cmd.arg("-S").arg(socket);
        }
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(tmux = %self.tmux_path, ?args, "Running tmux");

        let output = cmd
            .output()
            .await
            .map_err(|e| format!("{}: {}", self.tmux_path, e))?;

        Ok(TmuxOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run a command that produces no useful stdout, mapping failure to a message
    async fn run_checked(&self, socket: &Path, args: &[String]) -> Result<TmuxOutput, String> {
        let output = self.run(Some(socket), args).await?;
        if output.success {
            Ok(output)
        } else {
            Err(output.error_text())
        }
    }
}

impl Default for TmuxClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments of `new-session` for a detached session
fn new_session_args(session: &str, size: Option<TerminalSize>) -> Vec<String> {
    let mut args = vec![
        "new-session".to_string(),
        "-d".to_string(),
        "-s".to_string(),
        session.to_string(),
    ];
    if let Some(size) = size {
        args.extend([
            "-x".to_string(),
            size.width.to_string(),
            "-y".to_string(),
            size.height.to_string(),
        ]);
    }
    args
}

/// Arguments of `send-keys`, one argument per token
fn send_keys_args(session: &str, tokens: &[KeyToken]) -> Vec<String> {
    let mut args = vec![
        "send-keys".to_string(),
        "-t".to_string(),
        pane_target(session),
    ];
    args.extend(tokens.iter().map(|t| t.as_tmux_arg().into_owned()));
    args
}

impl Multiplexer for TmuxClient {
    async fn has_session(&self, socket: &Path, session: &str) -> bool {
        let args = ["has-session".to_string(), "-t".to_string(), session_target(session)];
        match self.run(Some(socket), &args).await {
            Ok(output) => output.success,
            Err(e) => {
                debug!(session, error = %e, "has-session failed, treating as absent");
                false
            }
        }
    }

    async fn new_session(
        &self,
        socket: &Path,
        session: &str,
        size: Option<TerminalSize>,
    ) -> Result<(), BridgeError> {
        self.run_checked(socket, &new_session_args(session, size))
            .await
            .map(|_| ())
            .map_err(|stderr| BridgeError::SessionCreationFailed {
                session: session.to_string(),
                stderr,
            })
    }

    async fn send_keys(
        &self,
        socket: &Path,
        session: &str,
        tokens: &[KeyToken],
    ) -> Result<(), BridgeError> {
        if tokens.is_empty() {
            return Ok(());
        }
        self.run_checked(socket, &send_keys_args(session, tokens))
            .await
            .map(|_| ())
            .map_err(|stderr| BridgeError::KeyDeliveryFailed {
                session: session.to_string(),
                stderr,
            })
    }

    async fn capture_pane(&self, socket: &Path, session: &str) -> Result<String, BridgeError> {
        let args = [
            "capture-pane".to_string(),
            "-p".to_string(),
            "-t".to_string(),
            pane_target(session),
        ];
        self.run_checked(socket, &args)
            .await
            .map(|output| output.stdout.trim_end().to_string())
            .map_err(|stderr| BridgeError::CaptureFailed {
                session: session.to_string(),
                stderr,
            })
    }

    async fn kill_session(&self, socket: &Path, session: &str) -> Result<(), BridgeError> {
        let args = ["kill-session".to_string(), "-t".to_string(), session_target(session)];
        self.run_checked(socket, &args)
            .await
            .map(|_| ())
            .map_err(|stderr| BridgeError::SessionTerminationFailed {
                session: session.to_string(),
                stderr,
            })
    }

    async fn kill_server(&self, socket: &Path) {
        // No server running is the normal case here
        if let Err(e) = self.run_checked(socket, &["kill-server".to_string()]).await {
            debug!(socket = %socket.display(), error = %e, "kill-server ignored");
        }
    }

    async fn version(&self) -> Result<String, BridgeError> {
        let output = self
            .run(None, &["-V".to_string()])
            .await
            .map_err(|message| BridgeError::ValidationUnavailable { message })?;

        if !output.success {
            return Err(BridgeError::ValidationUnavailable {
                message: output.error_text(),
            });
        }

        Ok(output.stdout.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_creation() {
        assert_eq!(TmuxClient::new().binary(), "tmux");
        assert_eq!(
            TmuxClient::with_binary("/opt/bin/tmux").binary(),
            "/opt/bin/tmux"
        );
    }

    #[test]
    fn test_targets_are_exact_matches() {
        assert_eq!(session_target("work"), "=work");
        assert_eq!(pane_target("work"), "=work:");
    }

    #[test]
    fn test_new_session_args() {
        assert_eq!(
            new_session_args("work", None),
            vec!["new-session", "-d", "-s", "work"]
        );
        assert_eq!(
            new_session_args(
                "work",
                Some(TerminalSize {
                    width: 120,
                    height: 40
                })
            ),
            vec!["new-session", "-d", "-s", "work", "-x", "120", "-y", "40"]
        );
    }

    #[test]
    fn test_send_keys_args_one_per_token() {
        let tokens = crate::keys::parse_keys("a;C-c");
        assert_eq!(
            send_keys_args("work", &tokens),
            vec!["send-keys", "-t", "=work:", "a", "\\;", "C-c"]
        );
    }

    #[test]
    fn test_send_keys_args_use_tmux_key_names() {
        let tokens = crate::keys::parse_keys("xBackspaceSpace");
        assert_eq!(
            send_keys_args("work", &tokens),
            vec!["send-keys", "-t", "=work:", "x", "BSpace", "Space"]
        );
    }

    #[test]
    fn test_error_text_falls_back_when_stderr_empty() {
        let output = TmuxOutput {
            success: false,
            stdout: String::new(),
            stderr: "  \n".to_string(),
        };
        assert_eq!(output.error_text(), "tmux exited with a non-zero status");

        let output = TmuxOutput {
            success: false,
            stdout: String::new(),
            stderr: "no server running on /tmp/x/tmux.sock\n".to_string(),
        };
        assert_eq!(output.error_text(), "no server running on /tmp/x/tmux.sock");
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let client = TmuxClient::with_binary("/nonexistent/termbridge-tmux");
        let err = client.version().await.expect_err("binary should be missing");
        assert!(matches!(err, BridgeError::ValidationUnavailable { .. }));
        assert!(!client.has_session(Path::new("/nonexistent/sock"), "x").await);
    }
}
