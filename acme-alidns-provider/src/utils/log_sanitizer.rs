//! Log sanitization utilities
//!
//! Response bodies may echo challenge tokens and access key ids; these helpers
//! keep what reaches the log short and partially masked.

/// Maximum number of bytes of a body included in a log line.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters kept visible by [`mask_key`].
const MASK_VISIBLE: usize = 4;

/// Truncate a string for logging without splitting a UTF-8 character.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask all but the first few characters of a key id.
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(MASK_VISIBLE).collect();
    if key.chars().count() <= MASK_VISIBLE {
        "*".repeat(key.chars().count())
    } else {
        format!("{visible}****")
    }
}
