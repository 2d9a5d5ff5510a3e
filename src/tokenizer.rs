//! Boundary trimming and whitespace tokenization of free-text blobs.
//!
//! The boundary set is every character below U+00FF that is not an ASCII
//! letter or digit: ASCII punctuation, control characters, whitespace and the
//! Latin-1 supplement (including accented letters). Tokens never start or end
//! with one of those characters.

/// Whether `c` belongs to the boundary character set.
pub fn is_boundary(c: char) -> bool {
    (c as u32) < 0xFF && !c.is_ascii_alphanumeric()
}

/// Strip leading and trailing boundary characters.
pub fn trim_boundary(text: &str) -> &str {
    text.trim_matches(is_boundary)
}

/// Split a blob on ASCII whitespace and boundary-trim every piece, skipping
/// pieces that end up empty.
///
/// Case is preserved.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_ascii_whitespace()
        .map(trim_boundary)
        .filter(|token| !token.is_empty())
}
