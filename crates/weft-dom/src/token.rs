//! Attribute token matching
//!
//! Whole-token containment over whitespace-separated attribute values,
//! the `[attr~="token"]` selector semantics. Never substring matching.

/// Check whether `value`, split on whitespace, contains exactly `token`
pub fn attr_token_contains(value: &str, token: &str) -> bool {
    !token.is_empty() && value.split_whitespace().any(|t| t == token)
}
