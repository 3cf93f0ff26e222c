//! String normalization
//!
//! Inserted values and queries are compared through their normalized form:
//! plain lowercase folding, no trimming, no Unicode decomposition. The
//! normalized string is also the identity key for duplicate detection.

/// Normalize a string for indexing and comparison.
///
/// Case folding only. Whitespace and punctuation are left alone here;
/// gram extraction applies its own character filter afterwards.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
}
