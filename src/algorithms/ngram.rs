//! Gram extraction for the inverted index
//!
//! Strings are reduced to overlapping fixed-length substrings ("grams")
//! before indexing. Extraction filters the input down to an allowed
//! alphabet, wraps it in boundary markers so prefixes and suffixes carry
//! weight, then slides a window of the gram length over the result.
//!
//! The gram-count map of a string is its feature vector; its L2 norm is the
//! denominator used for cosine scoring.

use ahash::AHashMap;

/// Boundary marker wrapped around (and padded onto) filtered strings
pub const PAD_CHAR: char = '-';

/// Maximum valid gram size. Larger windows would mostly index padding.
pub const MAX_GRAM_SIZE: usize = 32;

/// Characters that survive filtering: ASCII alphanumerics, the Latin-1
/// supplement block, comma and space. Everything else is dropped before
/// gram extraction.
#[inline]
fn is_gram_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{00C0}'..='\u{00FF}').contains(&c) || c == ',' || c == ' '
}

/// Filter, wrap and pad a normalized string for gram extraction at size `n`.
///
/// The filtered string gets one [`PAD_CHAR`] on each side, then additional
/// trailing pad chars until it is at least `n` chars long.
fn padded_chars(s: &str, n: usize) -> Vec<char> {
    let mut chars = Vec::with_capacity(s.len() + 2);
    chars.push(PAD_CHAR);
    chars.extend(s.chars().filter(|&c| is_gram_char(c)));
    chars.push(PAD_CHAR);

    while chars.len() < n {
        chars.push(PAD_CHAR);
    }
    chars
}

/// Extract the ordered gram sequence of a string at gram size `n`.
///
/// Duplicates are kept; order follows first-occurrence position. Returns an
/// empty sequence for `n == 0`.
#[must_use]
pub fn gram_sequence(s: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }

    padded_chars(s, n)
        .windows(n)
        .map(|w| w.iter().collect())
        .collect()
}

/// Count gram occurrences: the multiset of grams of `s` at size `n`.
#[must_use]
pub fn gram_counts(s: &str, n: usize) -> AHashMap<String, usize> {
    let mut counts = AHashMap::new();
    for gram in gram_sequence(s, n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// L2 norm of a gram-count vector: `sqrt(sum of count^2)`.
#[must_use]
pub fn vector_norm(counts: &AHashMap<String, usize>) -> f64 {
    let sum_of_squares: usize = counts.values().map(|&c| c * c).sum();
    (sum_of_squares as f64).sqrt()
}
