//! Canonical identifier syntax and generation.
//!
//! A canonical identifier is the opaque 24-character hexadecimal token the
//! host database uses to name every entity (items, traders, quests, loot keys).

use std::sync::LazyLock;

use regex::Regex;

/// Length of a canonical identifier in characters.
pub const ID_LEN: usize = 24;

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("identifier pattern is valid"));

/// Check whether `value` is a syntactically valid canonical identifier.
///
/// # Example
/// ```
/// use graft::ids::is_valid_id;
///
/// assert!(is_valid_id("5447a9cd4bdc2dbd208b4567"));
/// assert!(!is_valid_id("M4A1"));
/// ```
pub fn is_valid_id(value: &str) -> bool {
    value.len() == ID_LEN && ID_PATTERN.is_match(value)
}

/// Generate a fresh canonical identifier.
///
/// Layout: 8 hex digits of the current UNIX time in seconds followed by
/// 16 random hex digits, so ids sort roughly by creation time.
pub fn generate_id() -> String {
    let seconds = u32::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
    let random = uuid::Uuid::new_v4();
    let tail: String = random.as_bytes()[..8]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();

    format!("{:08x}{}", seconds, tail)
}
