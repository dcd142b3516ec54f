//! String interning table.
//!
//! Both set-membership variants store group members as compact integers
//! rather than strings: a token or author name observed millions of times
//! costs one map entry here and eight bytes per set it appears in. Ids are
//! allocated densely starting at 1, in first-seen order, and are never reused
//! or invalidated for the lifetime of the process.
//!
//! ## Atomicity
//!
//! The lookup and the allocation happen under one critical section. Splitting
//! them (check under one lock acquisition, insert under another) would let two
//! workers racing on the same fresh string allocate two ids for it, breaking
//! the string→id bijection.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Compact identifier for an interned string.
///
/// Ids are 1-based and dense: interning N distinct strings yields ids
/// covering exactly `1..=N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(u64);

impl MemberId {
    /// Get the raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
struct InternerInner {
    ids: HashMap<String, MemberId>,
    next: u64,
}

/// Thread-safe string interning table.
pub struct Interner {
    inner: Mutex<InternerInner>,
}

impl Interner {
    /// Create an empty table. The first interned string gets id 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(InternerInner {
                ids: HashMap::new(),
                next: 1,
            }),
        }
    }

    /// Intern a string, returning its permanent id.
    ///
    /// The first call for a given string allocates the next unused id;
    /// subsequent calls return the same id. Safe under concurrent callers.
    pub fn intern(&self, s: &str) -> MemberId {
        let mut inner = self.inner.lock();
        if let Some(&id) = inner.ids.get(s) {
            return id;
        }
        let id = MemberId(inner.next);
        inner.next += 1;
        inner.ids.insert(s.to_owned(), id);
        id
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.inner.lock().ids.len()
    }

    /// Whether no strings have been interned yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_intern_is_stable() {
        let interner = Interner::new();
        let a = interner.intern("hello");
        let b = interner.intern("world");
        assert_ne!(a, b);
        assert_eq!(interner.intern("hello"), a);
        assert_eq!(interner.intern("world"), b);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_ids_are_dense_from_one() {
        let interner = Interner::new();
        let ids: Vec<u64> = ["a", "b", "c", "d"]
            .iter()
            .map(|s| interner.intern(s).as_u64())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_concurrent_interning_never_duplicates() {
        let interner = Arc::new(Interner::new());
        let words: Vec<String> = (0..200).map(|i| format!("word{}", i % 50)).collect();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let interner = Arc::clone(&interner);
            let words = words.clone();
            handles.push(thread::spawn(move || {
                words
                    .iter()
                    .map(|w| (w.clone(), interner.intern(w)))
                    .collect::<Vec<_>>()
            }));
        }

        let mut seen: HashMap<String, MemberId> = HashMap::new();
        for handle in handles {
            for (word, id) in handle.join().unwrap() {
                // Every thread must observe the same id for the same word
                assert_eq!(*seen.entry(word).or_insert(id), id);
            }
        }
        assert_eq!(interner.len(), 50);
    }

    proptest! {
        #[test]
        fn prop_interning_is_a_bijection(words in proptest::collection::vec("[a-z]{1,8}", 1..100)) {
            let interner = Interner::new();
            let distinct: HashSet<&String> = words.iter().collect();

            for word in &words {
                interner.intern(word);
            }

            // N distinct strings -> ids covering exactly {1..N}
            prop_assert_eq!(interner.len(), distinct.len());
            let ids: HashSet<u64> = distinct.iter().map(|w| interner.intern(w).as_u64()).collect();
            prop_assert_eq!(ids, (1..=distinct.len() as u64).collect::<HashSet<u64>>());
        }
    }
}
