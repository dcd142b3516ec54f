//! Pending parent/child edges for thread-depth reconstruction.

use serde::{Deserialize, Serialize};

/// An unresolved parent/child link between two comments.
///
/// Both endpoints are kept as raw id strings: depth reconstruction matches
/// parents by value against the current frontier, so thread ids are never
/// interned. Implements `Ord` for deterministic ordering: (parent, child).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadEdge {
    /// Id of the child comment.
    pub child: String,
    /// Id of the comment it replies to.
    pub parent: String,
}

impl ThreadEdge {
    /// Create a new pending edge.
    pub fn new(child: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            child: child.into(),
            parent: parent.into(),
        }
    }
}

// Canonical ordering: parent, then child
impl PartialOrd for ThreadEdge {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ThreadEdge {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.parent.cmp(&other.parent) {
            std::cmp::Ordering::Equal => self.child.cmp(&other.child),
            ord => ord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_ordering() {
        let e1 = ThreadEdge::new("t1_b", "t1_a");
        let e2 = ThreadEdge::new("t1_c", "t1_a");
        let e3 = ThreadEdge::new("t1_c", "t1_b");

        // Same parent, different child
        assert!(e1 < e2);
        // Different parent
        assert!(e1 < e3);
        assert!(e2 < e3);
    }
}
