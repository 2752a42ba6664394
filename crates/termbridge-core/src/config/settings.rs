use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::session::validate_session_name;
use crate::tmux::TerminalSize;

/// Upper bound on the pause between sending keys and capturing output
pub const MAX_READ_WAIT_MS: u64 = 30_000;

/// Command line arguments
#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "MCP server exposing persistent tmux terminal sessions"
)]
pub struct Config {
    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// tmux binary to use
    #[arg(long = "tmux")]
    pub tmux_path: Option<String>,

    /// Prefix for generated session names
    #[arg(long)]
    pub session_prefix: Option<String>,
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Application settings (from config file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// tmux binary (name on PATH or absolute path)
    #[serde(default = "default_tmux_path")]
    pub tmux_path: String,

    /// Prefix for generated session names
    #[serde(default = "default_session_prefix")]
    pub session_prefix: String,

    /// Pause after sending keys when the caller gives none (milliseconds)
    #[serde(default = "default_read_wait")]
    pub default_read_wait_ms: u64,

    /// Pause between keystrokes when the caller gives none (milliseconds)
    #[serde(default)]
    pub key_delay_ms: Option<u64>,

    /// Size of newly created sessions
    #[serde(default)]
    pub terminal: TerminalSettings,
}

fn default_tmux_path() -> String {
    "tmux".to_string()
}

fn default_session_prefix() -> String {
    "term-".to_string()
}

fn default_read_wait() -> u64 {
    1000
}

/// Default terminal dimensions; both must be set to take effect
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminalSettings {
    #[serde(default)]
    pub width: Option<u16>,
    #[serde(default)]
    pub height: Option<u16>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tmux_path: default_tmux_path(),
            session_prefix: default_session_prefix(),
            default_read_wait_ms: default_read_wait(),
            key_delay_ms: None,
            terminal: TerminalSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from config file or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        // Try custom path first
        if let Some(p) = path {
            if p.exists() {
                return Self::read(p);
            }
            warn!(path = %p.display(), "Config file not found, using defaults");
        }

        let default_paths = [
            dirs::config_dir().map(|p| p.join("termbridge/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/termbridge/config.toml")),
            dirs::home_dir().map(|p| p.join(".termbridge.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::read(path);
            }
        }

        Ok(Self::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Merge CLI config into settings (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Config) {
        if let Some(ref tmux_path) = cli.tmux_path {
            self.tmux_path = tmux_path.clone();
        }
        if let Some(ref prefix) = cli.session_prefix {
            self.session_prefix = prefix.clone();
        }
    }

    /// Validate and normalize settings values
    pub fn validate(&mut self) {
        if self.default_read_wait_ms > MAX_READ_WAIT_MS {
            self.default_read_wait_ms = MAX_READ_WAIT_MS;
        }
        if self.key_delay_ms == Some(0) {
            self.key_delay_ms = None;
        }
        if self.terminal.width == Some(0) {
            self.terminal.width = None;
        }
        if self.terminal.height == Some(0) {
            self.terminal.height = None;
        }
        if validate_session_name(&self.session_prefix).is_err() {
            warn!(prefix = %self.session_prefix, "Invalid session prefix, using default");
            self.session_prefix = default_session_prefix();
        }
    }

    /// Size applied to sessions created without an explicit size
    pub fn terminal_size(&self) -> Option<TerminalSize> {
        match (self.terminal.width, self.terminal.height) {
            (Some(width), Some(height)) => Some(TerminalSize { width, height }),
            _ => None,
        }
    }
}
