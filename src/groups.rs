//! Per-group accumulators and the Phase-2 group cursor.
//!
//! Phase-1 workers write into an accumulator ([`MemberIndex`] for the
//! set-membership variants, [`ThreadIndex`] for the depth variant) under
//! whole-operation critical sections: group creation and the member insert
//! happen under one lock acquisition, so two workers racing to create the
//! same group can never drop a write.
//!
//! Once ingestion is complete the accumulator is frozen into a
//! [`GroupSnapshot`], an immutable name-sorted view shared by reference with
//! every Phase-2 worker. The sort gives the snapshot a stable enumeration
//! order, which the pairwise intersector relies on to visit each unordered
//! pair exactly once. A single [`GroupCursor`] over the snapshot hands each
//! group to exactly one worker, making concurrent mutation of one group's
//! data impossible by construction rather than by convention.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::intern::MemberId;
use crate::types::ThreadEdge;

/// Distinct members accumulated for one group.
pub type MemberSet = HashSet<MemberId>;

/// Per-group accumulator of distinct member ids.
///
/// Used by the diversity variant (members are token ids) and the
/// co-occurrence variant (members are author ids). Insertion is idempotent.
#[derive(Default)]
pub struct MemberIndex {
    inner: Mutex<HashMap<String, MemberSet>>,
}

impl MemberIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member to a group's set, creating the group on first reference.
    ///
    /// Re-inserting an existing (group, member) pair is a no-op.
    pub fn insert(&self, group: &str, member: MemberId) {
        let mut inner = self.inner.lock();
        match inner.get_mut(group) {
            Some(set) => {
                set.insert(member);
            }
            None => {
                inner.insert(group.to_owned(), HashSet::from([member]));
            }
        }
    }

    /// Members of a group; empty for a group never seen.
    pub fn members_of(&self, group: &str) -> MemberSet {
        self.inner.lock().get(group).cloned().unwrap_or_default()
    }

    /// Number of groups created so far.
    pub fn group_count(&self) -> usize {
        self.inner.lock().len()
    }

    /// Freeze the index into an immutable snapshot for Phase 2.
    pub fn into_snapshot(self) -> GroupSnapshot<MemberSet> {
        GroupSnapshot::from_map(self.inner.into_inner())
    }
}

/// Accumulated thread structure for one group: resolved roots plus edges
/// whose parents have not been matched yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadGroup {
    /// Ids of comments known to start a thread (depth 0).
    pub roots: HashSet<String>,
    /// Reply edges awaiting parent resolution, in arrival order.
    pub pending: Vec<ThreadEdge>,
}

/// Per-group accumulator of thread roots and pending reply edges.
#[derive(Default)]
pub struct ThreadIndex {
    inner: Mutex<HashMap<String, ThreadGroup>>,
}

impl ThreadIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one comment for a group, creating the group on first reference.
    ///
    /// Roots join the group's resolved set; replies append a pending edge.
    pub fn record(&self, group: &str, comment_id: &str, parent_id: &str, is_root: bool) {
        let mut inner = self.inner.lock();
        let entry = inner.entry(group.to_owned()).or_default();
        if is_root {
            entry.roots.insert(comment_id.to_owned());
        } else {
            entry.pending.push(ThreadEdge::new(comment_id, parent_id));
        }
    }

    /// Number of groups created so far.
    pub fn group_count(&self) -> usize {
        self.inner.lock().len()
    }

    /// Freeze the index into an immutable snapshot for Phase 2.
    pub fn into_snapshot(self) -> GroupSnapshot<ThreadGroup> {
        GroupSnapshot::from_map(self.inner.into_inner())
    }
}

/// Immutable, name-sorted view of all accumulated groups.
pub struct GroupSnapshot<D> {
    groups: Vec<(String, D)>,
}

impl<D> GroupSnapshot<D> {
    fn from_map(map: HashMap<String, D>) -> Self {
        let mut groups: Vec<(String, D)> = map.into_iter().collect();
        groups.sort_by(|a, b| a.0.cmp(&b.0));
        Self { groups }
    }

    /// Number of groups in the snapshot.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the snapshot holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group at a given enumeration index.
    pub fn get(&self, index: usize) -> Option<(&str, &D)> {
        self.groups.get(index).map(|(name, d)| (name.as_str(), d))
    }

    /// Iterate groups in enumeration (name) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &D)> {
        self.groups.iter().map(|(name, d)| (name.as_str(), d))
    }

    /// Create the shared cursor for one Phase-2 pass over this snapshot.
    pub fn cursor(&self) -> GroupCursor<'_, D> {
        GroupCursor {
            snapshot: self,
            next: AtomicUsize::new(0),
        }
    }
}

/// Monotonic shared cursor over a [`GroupSnapshot`].
///
/// Every Phase-2 worker pulls from the same cursor; each group is handed out
/// exactly once, in snapshot order, and the cursor never rewinds.
pub struct GroupCursor<'a, D> {
    snapshot: &'a GroupSnapshot<D>,
    next: AtomicUsize,
}

impl<'a, D> GroupCursor<'a, D> {
    /// Next unclaimed group, or `None` once the snapshot is exhausted.
    pub fn next_group(&self) -> Option<(&'a str, &'a D)> {
        self.next_indexed().map(|(_, name, data)| (name, data))
    }

    /// Next unclaimed group with its snapshot index.
    ///
    /// The index is what the pairwise intersector uses to pair a group only
    /// with groups enumerated strictly after it.
    pub fn next_indexed(&self) -> Option<(usize, &'a str, &'a D)> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        self.snapshot
            .groups
            .get(index)
            .map(|(name, d)| (index, name.as_str(), d))
    }
}
