//! # Formatting Utilities
//!
//! Address formatting for compact display (navbar badge).

/// Show the first `prefix_len` and last `suffix_len` characters of an address.
///
/// Addresses too short to shorten meaningfully are returned unchanged.
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= prefix_len + suffix_len {
        return address.to_string();
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - suffix_len..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// [`format_address`] with 4-character prefix and suffix.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4, 4)
}
