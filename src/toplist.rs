//! Bounded, rank-ordered candidate list.
//!
//! Every Phase-2 worker offers its scored candidates into one shared
//! `TopList`. The compare, insert and evict steps happen under a single
//! critical section, so after all offers complete the list holds exactly the
//! K highest-scoring candidates seen, in descending score order. Insertion is
//! insert-then-truncate against the fully sorted sequence; among equal scores
//! the earlier-inserted candidate keeps the higher rank.

use parking_lot::Mutex;

use crate::types::Candidate;

/// Fixed-capacity, score-descending ranked list with thread-safe insertion.
pub struct TopList {
    capacity: usize,
    inner: Mutex<Vec<Candidate>>,
}

impl TopList {
    /// Create a list that retains at most `capacity` candidates.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Vec::with_capacity(capacity + 1)),
        }
    }

    /// Maximum number of candidates retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Offer a candidate for ranking.
    ///
    /// The candidate enters the list if it is not yet full or the score beats
    /// the current K-th best; the lowest entry is evicted on overflow.
    pub fn offer(&self, candidate: Candidate) {
        if self.capacity == 0 {
            return;
        }
        let mut list = self.inner.lock();
        if list.len() == self.capacity {
            match list.last() {
                Some(last) if candidate.score <= last.score => return,
                _ => {}
            }
        }
        // First index whose score is strictly lower; equal scores keep the
        // incumbent ahead.
        let at = list.partition_point(|c| c.score.total_cmp(&candidate.score).is_ge());
        list.insert(at, candidate);
        list.truncate(self.capacity);
    }

    /// Current ranked contents, best first.
    pub fn snapshot(&self) -> Vec<Candidate> {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    fn scores(list: &TopList) -> Vec<f64> {
        list.snapshot().iter().map(|c| c.score).collect()
    }

    #[test]
    fn test_retains_k_best_in_descending_order() {
        let list = TopList::new(3);
        for score in [5.0, 3.0, 9.0, 1.0, 7.0, 2.0] {
            list.offer(Candidate::group("g", score));
        }
        assert_eq!(scores(&list), vec![9.0, 7.0, 5.0]);
    }

    #[test]
    fn test_underfull_list_keeps_everything() {
        let list = TopList::new(10);
        for score in [0.0, 2.0, 1.0] {
            list.offer(Candidate::group("g", score));
        }
        assert_eq!(scores(&list), vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_zero_capacity_accepts_nothing() {
        let list = TopList::new(0);
        list.offer(Candidate::group("g", 100.0));
        assert!(list.snapshot().is_empty());
    }

    #[test]
    fn test_ties_keep_the_incumbent_ahead() {
        let list = TopList::new(2);
        list.offer(Candidate::group("first", 5.0));
        list.offer(Candidate::group("second", 5.0));
        list.offer(Candidate::group("third", 5.0));

        let labels: Vec<String> = list
            .snapshot()
            .iter()
            .map(|c| c.label.to_string())
            .collect();
        assert_eq!(labels, vec!["first", "second"]);
    }

    #[test]
    fn test_concurrent_offers_keep_global_best() {
        let list = Arc::new(TopList::new(5));
        let mut handles = Vec::new();
        for t in 0..8 {
            let list = Arc::clone(&list);
            handles.push(thread::spawn(move || {
                for i in 0..250 {
                    let score = (t * 250 + i) as f64;
                    list.offer(Candidate::group(format!("g{t}-{i}"), score));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(scores(&list), vec![1999.0, 1998.0, 1997.0, 1996.0, 1995.0]);
    }

    proptest! {
        #[test]
        fn prop_snapshot_is_top_k_of_offers(
            offered in proptest::collection::vec(0u32..10_000, 0..200),
            k in 1usize..20,
        ) {
            let list = TopList::new(k);
            for (i, score) in offered.iter().enumerate() {
                list.offer(Candidate::group(format!("g{i}"), *score as f64));
            }

            let mut expected: Vec<f64> = offered.iter().map(|s| *s as f64).collect();
            expected.sort_by(|a, b| b.total_cmp(a));
            expected.truncate(k);
            prop_assert_eq!(scores(&list), expected);
        }
    }
}
