mod client;
mod multiplexer;

pub use client::TmuxClient;
pub use multiplexer::{deliver_keys, Multiplexer, TerminalSize};

#[cfg(test)]
pub(crate) mod fake;
