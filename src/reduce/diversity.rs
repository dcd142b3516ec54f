//! Lexical diversity scoring.

use crate::groups::{GroupCursor, MemberSet};
use crate::toplist::TopList;
use crate::types::Candidate;

/// Score every group the cursor hands out by its distinct-member count.
///
/// For the diversity variant the members are interned body tokens, so the
/// score is the size of the group's vocabulary.
pub fn score_diversity(cursor: &GroupCursor<'_, MemberSet>, top: &TopList) {
    while let Some((name, members)) = cursor.next_group() {
        top.offer(Candidate::group(name, members.len() as f64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::MemberIndex;
    use crate::intern::Interner;

    #[test]
    fn test_scores_distinct_member_counts() {
        let interner = Interner::new();
        let index = MemberIndex::new();
        for word in ["wide", "vocabulary", "here"] {
            index.insert("verbose", interner.intern(word));
        }
        index.insert("terse", interner.intern("wide"));
        // Repeats do not inflate the count
        index.insert("terse", interner.intern("wide"));

        let snapshot = index.into_snapshot();
        let top = TopList::new(10);
        score_diversity(&snapshot.cursor(), &top);

        let ranked = top.snapshot();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].to_string(), "verbose: 3");
        assert_eq!(ranked[1].to_string(), "terse: 1");
    }
}
