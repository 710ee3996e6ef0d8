//! Tag input normalization.
//!
//! # Responsibility
//! - Turn one comma-separated string into cleaned tag names.
//!
//! # Invariants
//! - Output tokens are lowercase with no surrounding whitespace.
//! - Tokens that trim to nothing are dropped.
//! - Order and duplicates are preserved; duplicate suppression happens in
//!   the repository at association time.

/// Splits raw comma-separated tag input into cleaned tag names.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}
