//! Approximate string-matching set backed by n-gram inverted indices
//!
//! `FuzzySet` keeps one inverted index per configured gram size. Queries
//! cascade from the largest gram size down: large grams are precise, small
//! grams catch heavier misspellings. The first gram size that produces any
//! match above the score threshold wins; merging across sizes is
//! deliberately avoided.
//!
//! Scoring is sparse cosine similarity over gram-count vectors, optionally
//! re-ranked by normalized Levenshtein similarity over the top candidates.

use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

use crate::algorithms::levenshtein::Levenshtein;
use crate::algorithms::ngram::{gram_counts, vector_norm, MAX_GRAM_SIZE};
use crate::algorithms::normalize::normalize;
use crate::algorithms::EditDistance;

/// Score threshold applied by [`FuzzySet::get`]
pub const DEFAULT_MIN_SCORE: f64 = 0.33;

/// Only this many of the best cosine candidates are re-ranked by edit
/// distance; anything past the cutoff is dropped.
const LEVENSHTEIN_CUTOFF: usize = 50;

/// Errors that can occur when constructing a fuzzy set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FuzzySetError {
    /// Gram size range is empty, starts at zero, or exceeds the maximum
    #[error("invalid gram size range: lower {lower}, upper {upper}")]
    InvalidGramRange { lower: usize, upper: usize },
}

/// Configuration for a [`FuzzySet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzySetConfig {
    /// Re-rank the top cosine candidates by normalized edit distance
    pub use_levenshtein: bool,
    /// Smallest gram size indexed (inclusive)
    pub gram_size_lower: usize,
    /// Largest gram size indexed (inclusive)
    pub gram_size_upper: usize,
}

impl Default for FuzzySetConfig {
    fn default() -> Self {
        Self {
            use_levenshtein: true,
            gram_size_lower: 2,
            gram_size_upper: 3,
        }
    }
}

impl FuzzySetConfig {
    /// Check that the gram size range is non-empty and within bounds.
    ///
    /// A reversed range would leave every bucket unpopulated and turn the
    /// whole set into a silent no-op, so it is rejected here instead.
    pub fn validate(&self) -> Result<(), FuzzySetError> {
        if self.gram_size_lower == 0
            || self.gram_size_lower > self.gram_size_upper
            || self.gram_size_upper > MAX_GRAM_SIZE
        {
            return Err(FuzzySetError::InvalidGramRange {
                lower: self.gram_size_lower,
                upper: self.gram_size_upper,
            });
        }
        Ok(())
    }
}

/// A single ranked query result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    /// Similarity in [0, 1]; 1.0 is an exact match after normalization
    pub score: f64,
    /// The originally inserted value, casing preserved
    pub value: String,
}

/// One indexed entry within a gram bucket. Position in the bucket's item
/// list is the entry's stable index, joined against the postings.
#[derive(Debug, Clone)]
struct ItemRecord {
    /// L2 norm of the gram-count vector at this bucket's gram size
    norm: f64,
    normalized: String,
}

/// Per-gram-size slice of the index: append-only items plus the inverted
/// index mapping each gram to `(item index, occurrence count)` postings.
#[derive(Debug, Clone, Default)]
struct GramBucket {
    postings: AHashMap<String, Vec<(usize, usize)>>,
    items: Vec<ItemRecord>,
}

impl GramBucket {
    fn insert(&mut self, normalized: &str, gram_size: usize) {
        let counts = gram_counts(normalized, gram_size);
        let item_index = self.items.len();
        self.items.push(ItemRecord {
            norm: vector_norm(&counts),
            normalized: normalized.to_string(),
        });
        for (gram, count) in counts {
            self.postings.entry(gram).or_default().push((item_index, count));
        }
    }
}

/// Approximate string-matching set.
///
/// Insertion is incremental and duplicate-aware; lookups return ranked
/// matches with their originally inserted values. Mutation requires
/// `&mut self`, so shared read access and exclusive writes are enforced by
/// the borrow checker. For cross-thread sharing see
/// [`ThreadSafeFuzzySet`](crate::indexing::threadsafe::ThreadSafeFuzzySet).
#[derive(Debug, Clone)]
pub struct FuzzySet {
    config: FuzzySetConfig,
    /// normalized key -> original value; also the uniqueness gate
    exact_set: AHashMap<String, String>,
    /// one bucket per gram size in the configured range
    buckets: AHashMap<usize, GramBucket>,
}

impl FuzzySet {
    /// Create an empty set with the default configuration
    /// (gram sizes 2..=3, Levenshtein re-ranking on).
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(FuzzySetConfig::default())
    }

    /// Create an empty set with an explicit configuration.
    pub fn with_config(config: FuzzySetConfig) -> Result<Self, FuzzySetError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: FuzzySetConfig) -> Self {
        let mut buckets = AHashMap::new();
        for gram_size in config.gram_size_lower..=config.gram_size_upper {
            buckets.insert(gram_size, GramBucket::default());
        }
        Self {
            config,
            exact_set: AHashMap::new(),
            buckets,
        }
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> FuzzySetConfig {
        self.config
    }

    /// Insert a value, returning `true` if it was new.
    ///
    /// Uniqueness is decided on the normalized (lowercased) form; inserting
    /// `"Paris"` and then `"paris"` leaves the set unchanged and returns
    /// `false` the second time. The first-seen casing is the one reported
    /// by queries.
    pub fn add(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        let key = normalize(&value);
        if self.exact_set.contains_key(&key) {
            return false;
        }

        for gram_size in self.config.gram_size_lower..=self.config.gram_size_upper {
            if let Some(bucket) = self.buckets.get_mut(&gram_size) {
                bucket.insert(&key, gram_size);
            }
        }
        self.exact_set.insert(key, value);
        true
    }

    /// Insert many values, returning how many were actually new.
    pub fn add_all<I, S>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inserted = 0;
        for value in values {
            if self.add(value) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Whether a value is present, compared on its normalized form.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.exact_set.contains_key(&normalize(value))
    }

    /// Number of distinct values stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.exact_set.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact_set.is_empty()
    }

    /// Iterate over the stored original values. Each distinct entry appears
    /// exactly once; order is unspecified.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.exact_set.values().map(String::as_str)
    }

    /// Ranked matches for `query` with the default score threshold
    /// ([`DEFAULT_MIN_SCORE`]).
    ///
    /// Returns `None` when nothing scores above the threshold at any gram
    /// size; a returned `Some` list is never empty and is sorted by
    /// descending score. Callers wanting a fallback use `unwrap_or`.
    #[must_use]
    pub fn get(&self, query: &str) -> Option<Vec<FuzzyMatch>> {
        self.get_with_min_score(query, DEFAULT_MIN_SCORE)
    }

    /// Ranked matches for `query` with an explicit minimum score.
    ///
    /// Gram sizes cascade from the upper bound down; the first size whose
    /// pipeline (candidate lookup, scoring, threshold filter) yields any
    /// result is used as-is. A size whose candidates all fall below
    /// `min_score` falls through to the next smaller size.
    #[must_use]
    pub fn get_with_min_score(&self, query: &str, min_score: f64) -> Option<Vec<FuzzyMatch>> {
        let normalized = normalize(query);
        for gram_size in (self.config.gram_size_lower..=self.config.gram_size_upper).rev() {
            if let Some(matches) = self.matches_at(&normalized, gram_size, min_score) {
                return Some(matches);
            }
        }
        None
    }

    /// Look up many queries at once, in parallel. Read-only, so queries
    /// run concurrently over shared state.
    #[must_use]
    pub fn get_batch<S>(&self, queries: &[S]) -> Vec<Option<Vec<FuzzyMatch>>>
    where
        S: AsRef<str> + Sync,
    {
        queries.par_iter().map(|q| self.get(q.as_ref())).collect()
    }

    /// Run the full match pipeline at a single gram size.
    fn matches_at(
        &self,
        normalized: &str,
        gram_size: usize,
        min_score: f64,
    ) -> Option<Vec<FuzzyMatch>> {
        let bucket = self.buckets.get(&gram_size)?;
        let counts = gram_counts(normalized, gram_size);
        let query_norm = vector_norm(&counts);

        // Sparse dot products: only items sharing at least one gram with
        // the query ever get an accumulator entry.
        let mut dot_products: AHashMap<usize, usize> = AHashMap::new();
        for (gram, &query_count) in &counts {
            if let Some(postings) = bucket.postings.get(gram) {
                for &(item_index, item_count) in postings {
                    *dot_products.entry(item_index).or_insert(0) += query_count * item_count;
                }
            }
        }
        if dot_products.is_empty() {
            return None;
        }

        let mut scored: Vec<(f64, &ItemRecord)> = dot_products
            .iter()
            .map(|(&item_index, &dot)| {
                let item = &bucket.items[item_index];
                (dot as f64 / (query_norm * item.norm), item)
            })
            .collect();
        sort_descending(&mut scored);

        if self.config.use_levenshtein {
            // Cosine decides who makes the cut; edit distance decides the
            // final order. The cosine score itself is discarded.
            let lev = Levenshtein::new();
            scored.truncate(LEVENSHTEIN_CUTOFF);
            for entry in &mut scored {
                entry.0 = EditDistance::similarity(&lev, &entry.1.normalized, normalized);
            }
            sort_descending(&mut scored);
        }

        let matches: Vec<FuzzyMatch> = scored
            .into_iter()
            .filter(|&(score, _)| score >= min_score)
            .filter_map(|(score, item)| {
                self.exact_set.get(&item.normalized).map(|original| FuzzyMatch {
                    score,
                    value: original.clone(),
                })
            })
            .collect();

        if matches.is_empty() {
            None
        } else {
            Some(matches)
        }
    }
}

impl Default for FuzzySet {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Into<String>> Extend<S> for FuzzySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, values: I) {
        for value in values {
            self.add(value);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for FuzzySet {
    fn from_iter<I: IntoIterator<Item = S>>(values: I) -> Self {
        let mut set = Self::new();
        set.extend(values);
        set
    }
}

/// Sort by score descending; ties break on the normalized string ascending
/// so equal-score results come back in a deterministic order.
fn sort_descending(entries: &mut [(f64, &ItemRecord)]) {
    entries.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.normalized.cmp(&b.1.normalized))
    });
}
