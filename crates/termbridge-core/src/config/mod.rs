mod settings;

pub use settings::{Config, Settings, TerminalSettings, MAX_READ_WAIT_MS};
