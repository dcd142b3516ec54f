//! Scored candidates for the ranked result list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a candidate's score was computed over.
///
/// Single-group variants (diversity, average depth) label candidates with one
/// group name; the co-occurrence variant labels them with the pair of groups
/// whose member sets were intersected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateLabel {
    /// A single group.
    Group(String),
    /// An unordered pair of groups, stored in cursor-enumeration order.
    Pair(String, String),
}

impl fmt::Display for CandidateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(name) => write!(f, "{name}"),
            Self::Pair(a, b) => write!(f, "{a}, {b}"),
        }
    }
}

/// A scored result candidate, ranked by descending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// What was scored.
    pub label: CandidateLabel,
    /// The score; counts are represented exactly (they stay well below 2^53).
    pub score: f64,
}

impl Candidate {
    /// Create a single-group candidate.
    pub fn group(name: impl Into<String>, score: f64) -> Self {
        Self {
            label: CandidateLabel::Group(name.into()),
            score,
        }
    }

    /// Create a group-pair candidate.
    pub fn pair(a: impl Into<String>, b: impl Into<String>, score: f64) -> Self {
        Self {
            label: CandidateLabel::Pair(a.into(), b.into()),
            score,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let single = Candidate::group("askreddit", 12.0);
        assert_eq!(single.to_string(), "askreddit: 12");

        let pair = Candidate::pair("rust", "programming", 3.0);
        assert_eq!(pair.to_string(), "rust, programming: 3");
    }
}
