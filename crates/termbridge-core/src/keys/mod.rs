//! Key notation: a compact way of writing keystrokes as one string.
//!
//! Literal text and tmux key names are written back to back with no
//! delimiter, e.g. `"vi notes.txtEscape"` or `"C-c"`.

mod parser;
mod token;

pub use parser::parse_keys;
pub use token::KeyToken;
