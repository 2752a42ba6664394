//! Session name generator.
//!
//! Generated names are a fixed prefix followed by a short random identifier
//! (e.g., `"term-k3x9q0ab"`).

use rand::RngExt;

/// Characters used for the random part of a name
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random part of a name
const ID_LEN: usize = 8;

/// Generates a session name from `prefix` and a random identifier.
///
/// # Examples
///
/// ```
/// let name = termbridge_core::session::namegen::generate_session_name("term-");
/// assert!(name.starts_with("term-"));
/// assert_eq!(name.len(), "term-".len() + 8);
/// ```
pub fn generate_session_name(prefix: &str) -> String {
    let mut rng = rand::rng();
    let id: String = (0..ID_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}{}", prefix, id)
}

/// Generates a session name that does not collide with any of `existing`.
///
/// Attempts up to 10 random identifiers, then falls back to appending a Unix
/// timestamp.
pub fn generate_unique_name(prefix: &str, existing: &[String]) -> String {
    for _ in 0..10 {
        let name = generate_session_name(prefix);
        if !existing.contains(&name) {
            return name;
        }
    }
    let name = generate_session_name(prefix);
    let ts = chrono::Utc::now().timestamp();
    format!("{}-{}", name, ts)
}
