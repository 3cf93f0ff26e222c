//! fuzzyset - approximate string matching over an in-memory corpus
//!
//! Builds an n-gram inverted index over inserted strings and answers
//! "most similar" queries with sparse cosine similarity over gram-count
//! vectors, optionally re-ranked by normalized Levenshtein similarity.
//!
//! # Features
//! - Incremental insertion with duplicate detection
//! - Gram-size cascade at query time (precision first, recall fallback)
//! - Edit-distance refinement of the top candidates
//! - Thread-safe wrapper for shared-read / exclusive-write access
//!
//! # Example
//!
//! ```
//! use fuzzyset::FuzzySet;
//!
//! let mut set = FuzzySet::new();
//! set.add("Paris");
//! set.add("Berlin");
//!
//! let matches = set.get("pariss").unwrap();
//! assert_eq!(matches[0].value, "Paris");
//! ```

pub mod algorithms;
pub mod indexing;

pub use algorithms::{EditDistance, Similarity};
pub use indexing::fuzzy_set::{
    FuzzyMatch, FuzzySet, FuzzySetConfig, FuzzySetError, DEFAULT_MIN_SCORE,
};
pub use indexing::threadsafe::ThreadSafeFuzzySet;
