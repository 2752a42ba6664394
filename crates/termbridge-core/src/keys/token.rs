use std::borrow::Cow;
use std::fmt;

/// Notation names tmux does not know, mapped to the tmux spelling
const TMUX_ALIASES: &[(&str, &str)] = &[("Backspace", "BSpace")];

/// One atomic keystroke produced by [`parse_keys`](super::parse_keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    /// A single literal character
    Literal(char),
    /// Modifier combination such as `C-c` or `M-x`
    Modified { modifier: char, key: char },
    /// Function key `F1`..`F12`
    Function(u8),
    /// Named special key (`Enter`, `Escape`, `PageUp`, ...)
    Named(&'static str),
}

impl KeyToken {
    /// The Enter key, sent on its own when a caller asks for it.
    pub const ENTER: KeyToken = KeyToken::Named("Enter");

    /// Argument passed to `tmux send-keys` for this token.
    ///
    /// A bare `;` would be read by tmux as a command separator, so it is
    /// escaped. Aliases such as `Backspace` are sent under their tmux name.
    pub fn as_tmux_arg(&self) -> Cow<'static, str> {
        match self {
            KeyToken::Literal(';') => Cow::Borrowed("\\;"),
            KeyToken::Named(name) => Cow::Borrowed(
                TMUX_ALIASES
                    .iter()
                    .find(|(alias, _)| alias == name)
                    .map_or(*name, |(_, tmux)| *tmux),
            ),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Returns true for tokens that are not plain characters
    pub fn is_special(&self) -> bool {
        !matches!(self, KeyToken::Literal(_))
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Literal(c) => write!(f, "{}", c),
            KeyToken::Modified { modifier, key } => write!(f, "{}-{}", modifier, key),
            KeyToken::Function(n) => write!(f, "F{}", n),
            KeyToken::Named(name) => f.write_str(name),
        }
    }
}
