//! Levenshtein (edit) distance implementation
//!
//! Classic dynamic-programming edit distance with unit-cost insertions,
//! deletions and substitutions. Runs in O(m*n) time with a single rolling
//! row, so auxiliary space is O(min(m, n)). Unicode-aware character
//! handling.

use super::EditDistance;
use smallvec::SmallVec;

/// Rolling DP row kept on the stack for strings up to this many chars
const INLINE_ROW_SIZE: usize = 64;

/// Compute the Levenshtein distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: SmallVec<[char; INLINE_ROW_SIZE]> = a.chars().collect();
    let b: SmallVec<[char; INLINE_ROW_SIZE]> = b.chars().collect();

    // Keep the row sized by the shorter string
    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    let m = shorter.len();
    if m == 0 {
        return longer.len();
    }

    let mut row: SmallVec<[usize; INLINE_ROW_SIZE + 1]> = (0..=m).collect();

    for (i, &lc) in longer.iter().enumerate() {
        // row[0] is the cost of deleting the first i+1 chars of `longer`
        let mut prev_diag = row[0];
        row[0] = i + 1;

        for (j, &sc) in shorter.iter().enumerate() {
            let substitution = if lc == sc { prev_diag } else { prev_diag + 1 };
            let insertion = row[j] + 1;
            let deletion = row[j + 1] + 1;

            prev_diag = row[j + 1];
            row[j + 1] = substitution.min(insertion).min(deletion);
        }
    }

    row[m]
}

/// Normalized Levenshtein similarity in [0, 1].
///
/// Defined as `1 - distance / max(len_a, len_b)` over character counts.
/// Two empty strings are identical (1.0); if exactly one side is empty the
/// similarity is 0.0.
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();

    if len_a == 0 && len_b == 0 {
        return 1.0;
    }
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let dist = levenshtein_distance(a, b);
    1.0 - (dist as f64 / len_a.max(len_b) as f64)
}

/// Levenshtein distance calculator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        levenshtein_distance(a, b)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(levenshtein_distance("kitten", "kitten"), 0);
    }

    #[test]
    fn test_classic_pairs() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
    }

    #[test]
    fn test_symmetry() {
        assert_eq!(
            levenshtein_distance("paris", "pariss"),
            levenshtein_distance("pariss", "paris")
        );
    }

    #[test]
    fn test_unicode_chars() {
        // One substitution, counted per char rather than per byte
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
    }

    #[test]
    fn test_long_strings_fall_back_to_heap_row() {
        let a = "a".repeat(200);
        let mut b = "a".repeat(200);
        b.push('b');
        assert_eq!(levenshtein_distance(&a, &b), 1);
    }

    #[test]
    fn test_similarity() {
        assert!((levenshtein_similarity("paris", "paris") - 1.0).abs() < f64::EPSILON);
        // distance 1 over max length 6
        assert!((levenshtein_similarity("paris", "pariss") - (1.0 - 1.0 / 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_empty_rules() {
        assert_eq!(levenshtein_similarity("", ""), 1.0);
        assert_eq!(levenshtein_similarity("", "abc"), 0.0);
        assert_eq!(levenshtein_similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_trait_similarity_matches_free_fn() {
        let lev = Levenshtein::new();
        assert_eq!(EditDistance::distance(&lev, "flaw", "lawn"), 2);
        assert!(
            (EditDistance::similarity(&lev, "flaw", "lawn") - levenshtein_similarity("flaw", "lawn"))
                .abs()
                < f64::EPSILON
        );
    }
}
