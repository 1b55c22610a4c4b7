//! Log sanitization utilities
//!
//! Keeps account numbers and oversized API responses out of debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of trailing IBAN characters left visible by [`mask_iban`].
const IBAN_VISIBLE_TAIL: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an IBAN for logging: keep the country code and the last four characters.
///
/// `DE89370400440532013000` becomes `DE****************3000`.
/// Values too short to carry both parts are fully masked.
pub fn mask_iban(iban: &str) -> String {
    let chars: Vec<char> = iban.trim().chars().collect();
    if chars.len() <= 2 + IBAN_VISIBLE_TAIL {
        return "*".repeat(chars.len());
    }

    let hidden = chars.len() - 2 - IBAN_VISIBLE_TAIL;
    let mut masked: String = chars[..2].iter().collect();
    masked.push_str(&"*".repeat(hidden));
    masked.extend(&chars[chars.len() - IBAN_VISIBLE_TAIL..]);
    masked
}
