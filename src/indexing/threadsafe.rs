//! Thread-safe wrapper for the fuzzy set.
//!
//! [`FuzzySet`] itself requires `&mut self` for insertion and is therefore
//! not shareable across threads while it grows. This wrapper uses
//! `parking_lot::RwLock` to provide reader/writer exclusion: queries take a
//! shared read lock and run concurrently, insertions take an exclusive
//! write lock.
//!
//! # Usage
//!
//! ```
//! use fuzzyset::ThreadSafeFuzzySet;
//!
//! let set = ThreadSafeFuzzySet::new();
//!
//! let writer = set.clone();
//! std::thread::spawn(move || {
//!     writer.add("hello");
//! })
//! .join()
//! .unwrap();
//! ```
//!
//! For write-heavy workloads, batch insertions with [`add_all`] or build
//! the whole set up front and share it read-only.
//!
//! [`add_all`]: ThreadSafeFuzzySet::add_all

use parking_lot::RwLock;
use std::sync::Arc;

use super::fuzzy_set::{FuzzyMatch, FuzzySet, FuzzySetConfig, FuzzySetError};

/// Cloneable handle to a shared [`FuzzySet`].
///
/// All clones point at the same underlying set. Every method is safe to
/// call from multiple threads simultaneously.
#[derive(Clone)]
pub struct ThreadSafeFuzzySet {
    inner: Arc<RwLock<FuzzySet>>,
}

impl ThreadSafeFuzzySet {
    /// Create an empty set with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_set(FuzzySet::new())
    }

    /// Create an empty set with an explicit configuration.
    pub fn with_config(config: FuzzySetConfig) -> Result<Self, FuzzySetError> {
        FuzzySet::with_config(config).map(Self::from_set)
    }

    /// Wrap an already-populated set.
    #[must_use]
    pub fn from_set(set: FuzzySet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(set)),
        }
    }

    /// Insert a value, returning `true` if it was new.
    /// Takes an exclusive write lock.
    pub fn add(&self, value: impl Into<String>) -> bool {
        self.inner.write().add(value)
    }

    /// Insert many values under a single write lock, returning how many
    /// were actually new.
    pub fn add_all<I, S>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.write().add_all(values)
    }

    /// Ranked matches with the default score threshold.
    #[must_use]
    pub fn get(&self, query: &str) -> Option<Vec<FuzzyMatch>> {
        self.inner.read().get(query)
    }

    /// Ranked matches with an explicit minimum score.
    #[must_use]
    pub fn get_with_min_score(&self, query: &str, min_score: f64) -> Option<Vec<FuzzyMatch>> {
        self.inner.read().get_with_min_score(query, min_score)
    }

    /// Whether a value is present, compared on its normalized form.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.inner.read().contains(value)
    }

    /// Number of distinct values stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Snapshot of the stored original values.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.inner.read().values().map(str::to_string).collect()
    }

    /// Clone out the current state of the underlying set, e.g. to hand a
    /// consistent snapshot to read-only consumers.
    #[must_use]
    pub fn snapshot(&self) -> FuzzySet {
        self.inner.read().clone()
    }
}

impl Default for ThreadSafeFuzzySet {
    fn default() -> Self {
        Self::new()
    }
}
