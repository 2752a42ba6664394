use super::token::KeyToken;

/// Modifier letters accepted in `X-k` combinations
const MODIFIERS: &[char] = &['C', 'M'];

/// Marker letter for function keys
const FUNCTION_MARKER: char = 'F';

/// Highest function key number (F1..F12)
const MAX_FUNCTION_KEY: u8 = 12;

/// Named keys recognised inside key notation (tmux key names plus aliases)
const NAMED_KEYS: &[&str] = &[
    "Enter", "Tab", "BTab", "Escape", "BSpace", "Backspace", "Space", "Up", "Down", "Left",
    "Right", "Home", "End", "PageUp", "PageDown", "PgUp", "PgDn", "PPage", "NPage", "IC", "DC",
];

/// Parse a key notation string into an ordered list of keystrokes.
///
/// Scanning is a single left-to-right pass. At each position the first rule
/// that matches wins:
///
/// 1. `C-x` / `M-x` modifier combination (exactly three characters)
/// 2. `F1`..`F12`; the whole digit run must name a valid key
/// 3. Longest matching entry of the named-key list
/// 4. One literal character
///
/// # Examples
///
/// ```
/// use termbridge_core::{parse_keys, KeyToken};
///
/// let tokens = parse_keys("ls\tC-c");
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[3], KeyToken::Modified { modifier: 'C', key: 'c' });
/// ```
pub fn parse_keys(input: &str) -> Vec<KeyToken> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut pos = 0;

    while pos < chars.len() {
        let rest = &chars[pos..];

        if let Some(token) = match_modifier(rest) {
            tokens.push(token);
            pos += 3;
            continue;
        }

        if let Some((token, len)) = match_function_key(rest) {
            tokens.push(token);
            pos += len;
            continue;
        }

        if let Some(name) = match_named_key(rest) {
            tokens.push(KeyToken::Named(name));
            pos += name.chars().count();
            continue;
        }

        tokens.push(KeyToken::Literal(rest[0]));
        pos += 1;
    }

    tokens
}

fn match_modifier(rest: &[char]) -> Option<KeyToken> {
    match rest {
        [modifier, '-', key, ..] if MODIFIERS.contains(modifier) => Some(KeyToken::Modified {
            modifier: *modifier,
            key: *key,
        }),
        _ => None,
    }
}

fn match_function_key(rest: &[char]) -> Option<(KeyToken, usize)> {
    if rest.first() != Some(&FUNCTION_MARKER) {
        return None;
    }

    let digits: String = rest[1..].iter().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || digits.starts_with('0') {
        return None;
    }

    // A run of digits too long for u8 is simply not a function key
    let number: u8 = digits.parse().ok()?;
    if (1..=MAX_FUNCTION_KEY).contains(&number) {
        Some((KeyToken::Function(number), 1 + digits.len()))
    } else {
        None
    }
}

fn match_named_key(rest: &[char]) -> Option<&'static str> {
    NAMED_KEYS
        .iter()
        .copied()
        .filter(|name| {
            let len = name.chars().count();
            rest.len() >= len && name.chars().zip(rest.iter()).all(|(a, b)| a == *b)
        })
        .max_by_key(|name| name.len())
}
