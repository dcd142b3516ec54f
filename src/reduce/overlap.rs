//! Pairwise membership overlap between groups.
//!
//! For every group G the cursor hands out, the pass intersects G's member set
//! with the set of every group enumerated strictly after G in the snapshot.
//! The asymmetric "after" rule visits each unordered pair exactly once and
//! skips self-pairs; the snapshot's stable name order is what makes the rule
//! well defined. Worst case is O(G² · M) over G groups of average set size M,
//! with per-pair cost bounded by the smaller set.

use crate::groups::{GroupCursor, GroupSnapshot, MemberSet};
use crate::toplist::TopList;
use crate::types::Candidate;

/// Size of the intersection of two member sets.
///
/// Probes the larger set with the elements of the smaller one, bounding the
/// cost by `min(|a|, |b|)` lookups.
pub fn intersection_size(a: &MemberSet, b: &MemberSet) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|member| large.contains(member)).count()
}

/// Intersect every group the cursor hands out against all later groups.
pub fn intersect_pairs(
    snapshot: &GroupSnapshot<MemberSet>,
    cursor: &GroupCursor<'_, MemberSet>,
    top: &TopList,
) {
    while let Some((i, name, members)) = cursor.next_indexed() {
        for j in (i + 1)..snapshot.len() {
            let (other_name, other_members) = match snapshot.get(j) {
                Some(entry) => entry,
                None => break,
            };
            let common = intersection_size(members, other_members);
            top.offer(Candidate::pair(name, other_name, common as f64));
        }
    }
}
