//! Indexing structures for approximate string lookup
//!
//! - Fuzzy set: n-gram inverted index with cosine scoring and optional
//!   Levenshtein re-ranking
//! - Thread-safe wrapper: concurrent access to a shared fuzzy set

pub mod fuzzy_set;
pub mod threadsafe;

pub use fuzzy_set::*;
pub use threadsafe::*;
