//! Average thread depth via iterative frontier expansion.
//!
//! Depth is reconstructed from an unordered edge list without building
//! pointer-based tree nodes. Starting from the root set, each round matches
//! pending edges whose parent sits in the current frontier; the matched
//! children become the next frontier. The per-round level accounting appends
//! `|frontier| − |new frontier|`, and the final round appends the size of the
//! last frontier. Edge entries are `i64` because a branching frontier makes
//! individual differences negative; the entries telescope, so the total
//! always equals the root count and the weighted average stays well defined.
//!
//! Edges whose parent never enters any frontier are orphans (missing or
//! corrupted parent references) and are silently dropped when no edge
//! resolves in a round. That is policy, not an error.
//!
//! Cost is O(depth × |edges|) per group. Real discussion threads are shallow
//! relative to their edge count, so the repeated linear partition is kept
//! instead of a parent→children index; it stays auditable against the
//! accounting rule above.

use std::collections::HashSet;

use crate::groups::{GroupCursor, ThreadGroup};
use crate::toplist::TopList;
use crate::types::{Candidate, ThreadEdge};

/// Reconstruct the per-level node counts for one group.
///
/// `levels[d]` is the accounting entry for depth `d`; see the module docs for
/// the exact rule. A group with no roots and no resolvable edges yields
/// `[0]`.
pub fn depth_levels(roots: &HashSet<String>, pending: &[ThreadEdge]) -> Vec<i64> {
    let mut levels = Vec::new();
    let mut frontier: HashSet<&str> = roots.iter().map(String::as_str).collect();
    let mut pending: Vec<&ThreadEdge> = pending.iter().collect();

    loop {
        let mut next_frontier: HashSet<&str> = HashSet::new();
        let mut unresolved = Vec::new();
        for edge in pending {
            if frontier.contains(edge.parent.as_str()) {
                next_frontier.insert(edge.child.as_str());
            } else {
                unresolved.push(edge);
            }
        }
        if next_frontier.is_empty() {
            break;
        }
        levels.push(frontier.len() as i64 - next_frontier.len() as i64);
        frontier = next_frontier;
        pending = unresolved;
    }

    // Remaining edges are orphaned and dropped; the last frontier closes the
    // accounting.
    levels.push(frontier.len() as i64);
    levels
}

/// Weighted average depth over per-level counts.
///
/// Computes `Σ levels[d]·d / Σ levels[d]`, or `0.0` when the counts sum to
/// zero.
pub fn average_depth(levels: &[i64]) -> f64 {
    let mut weighted = 0i64;
    let mut total = 0i64;
    for (depth, count) in levels.iter().enumerate() {
        weighted += count * depth as i64;
        total += count;
    }
    if total == 0 {
        return 0.0;
    }
    weighted as f64 / total as f64
}

/// Reduce every group the cursor hands out to its average thread depth.
///
/// Each group is processed by exactly one worker; the expansion itself runs
/// on borrowed snapshot data and mutates nothing shared.
pub fn reduce_thread_depth(cursor: &GroupCursor<'_, ThreadGroup>, top: &TopList) {
    while let Some((name, group)) = cursor.next_group() {
        let levels = depth_levels(&group.roots, &group.pending);
        top.offer(Candidate::group(name, average_depth(&levels)));
    }
}
