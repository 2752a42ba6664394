//! MCP tool input schemas.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use termbridge_core::{ExecuteRequest, Settings, TerminalSize};

/// Terminal dimensions for a newly created session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct TerminalSizeInput {
    /// Columns
    pub width: u16,
    /// Rows
    pub height: u16,
}

/// Input for terminal_execute tool.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TerminalExecuteInput {
    /// Session to use (created if missing). Omit to continue the last session.
    #[serde(default)]
    pub session_name: Option<String>,

    /// Keys in key notation, e.g. "ls -la", "C-c", "vi a.txtEscape"
    #[serde(default)]
    pub keys: Option<String>,

    /// Press Enter after the keys
    #[serde(default)]
    pub send_enter: Option<bool>,

    /// Milliseconds to wait before capturing (max 30000)
    #[serde(default)]
    pub read_wait: Option<u64>,

    /// Milliseconds between individual keystrokes
    #[serde(default)]
    pub key_delay: Option<u64>,

    /// Size used when the session is created
    #[serde(default)]
    pub terminal_size: Option<TerminalSizeInput>,
}

impl TerminalExecuteInput {
    /// Fill unset fields from `settings`
    pub fn into_request(self, settings: &Settings) -> ExecuteRequest {
        let size = self
            .terminal_size
            .filter(|s| s.width > 0 && s.height > 0)
            .map(|s| TerminalSize {
                width: s.width,
                height: s.height,
            })
            .or_else(|| settings.terminal_size());

        ExecuteRequest {
            session_name: self.session_name,
            keys: self.keys.unwrap_or_default(),
            send_enter: self.send_enter.unwrap_or(false),
            read_wait: Duration::from_millis(
                self.read_wait.unwrap_or(settings.default_read_wait_ms),
            ),
            key_delay: self
                .key_delay
                .or(settings.key_delay_ms)
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            size,
        }
    }
}

/// Input for terminal_close tool.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TerminalCloseInput {
    /// Session to close
    #[serde(default)]
    pub session_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_camel_case_arguments() {
        let input: TerminalExecuteInput = serde_json::from_value(serde_json::json!({
            "sessionName": "work",
            "keys": "ls",
            "sendEnter": true,
            "readWait": 250,
            "keyDelay": 20,
            "terminalSize": { "width": 100, "height": 30 }
        }))
        .expect("parse");

        let request = input.into_request(&Settings::default());
        assert_eq!(request.session_name.as_deref(), Some("work"));
        assert_eq!(request.keys, "ls");
        assert!(request.send_enter);
        assert_eq!(request.read_wait, Duration::from_millis(250));
        assert_eq!(request.key_delay, Some(Duration::from_millis(20)));
        assert_eq!(
            request.size,
            Some(TerminalSize {
                width: 100,
                height: 30
            })
        );
    }

    #[test]
    fn test_empty_arguments_use_settings() {
        let input: TerminalExecuteInput =
            serde_json::from_value(serde_json::json!({})).expect("parse");
        let mut settings = Settings::default();
        settings.default_read_wait_ms = 400;
        settings.terminal.width = Some(132);
        settings.terminal.height = Some(43);

        let request = input.into_request(&settings);
        assert_eq!(request.session_name, None);
        assert!(request.is_peek());
        assert_eq!(request.read_wait, Duration::from_millis(400));
        assert_eq!(request.key_delay, None);
        assert_eq!(
            request.size,
            Some(TerminalSize {
                width: 132,
                height: 43
            })
        );
    }

    #[test]
    fn test_zero_key_delay_means_batched() {
        let input = TerminalExecuteInput {
            keys: Some("abc".to_string()),
            key_delay: Some(0),
            ..TerminalExecuteInput::default()
        };
        assert_eq!(input.into_request(&Settings::default()).key_delay, None);
    }

    #[test]
    fn test_close_input_name_optional() {
        let input: TerminalCloseInput =
            serde_json::from_value(serde_json::json!({})).expect("parse");
        assert_eq!(input.session_name, None);
    }
}
