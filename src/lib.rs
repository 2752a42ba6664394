//! termbridge: Model Context Protocol server for persistent terminal sessions.
//!
//! The heavy lifting lives in [`termbridge_core`]; this crate registers the
//! `terminal_execute` and `terminal_close` tools and serves them over stdio.

pub mod mcp;

pub use mcp::TermbridgeServer;
