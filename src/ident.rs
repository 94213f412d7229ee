//! Identifier validation for section and key names.

/// Returns `true` if `s` is usable as a section or key name.
///
/// A valid identifier is non-empty, starts with an alphabetic character or `_`,
/// and continues with alphanumeric characters or `_`. Letters and digits are
/// judged by Unicode, so `größe` is accepted.
///
/// # Examples
///
/// ```rust
/// use inidoc::is_valid_identifier;
///
/// assert!(is_valid_identifier("server_port"));
/// assert!(is_valid_identifier("_private"));
/// assert!(!is_valid_identifier("2nd"));
/// assert!(!is_valid_identifier("user-id"));
/// assert!(!is_valid_identifier(""));
/// ```
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
