//! # corpus-kernel
//!
//! Concurrent per-group aggregation over line-delimited comment dumps.
//!
//! The kernel answers one family of questions:
//!
//! > Across a large stream of comments, which groups (subreddits) rank
//! > highest under a given per-group statistic?
//!
//! ## Variants
//!
//! 1. **Lexical diversity** — distinct body tokens per group
//! 2. **Co-occurrence** — common comment authors between group pairs
//! 3. **Thread depth** — average comment-thread depth per group,
//!    reconstructed from unordered parent/child edges
//!
//! ## Architecture
//!
//! ```text
//! Phase 1 (ingestion)            Phase 2 (reduction)
//!
//! LineSource ─► worker pool ─►   GroupSnapshot ─► GroupCursor ─► worker pool
//!                 │ Interner            (frozen, name-sorted)       │
//!                 ▼                                                 ▼
//!        MemberIndex / ThreadIndex                               TopList
//! ```
//!
//! The phases are strictly sequential: the ingestion pool's join is a global
//! barrier, and reduction only ever sees a frozen snapshot.
//!
//! ## Concurrency Guarantees
//!
//! - Every shared mutation (intern, group insert, top-list offer, line read)
//!   is one whole-operation critical section; check-then-write is never split
//!   across lock acquisitions.
//! - The shared group cursor hands each group to exactly one reduction
//!   worker, so per-group state is never mutated concurrently.
//! - No component acquires more than one lock at a time and none calls into
//!   another while holding one; deadlock is impossible by construction.
//!
//! ## Determinism Guarantees
//!
//! - Same input → identical accumulator contents, for any worker count
//! - Group enumeration order is canonical (by name)
//! - The ranked result holds exactly the K best scores seen

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod groups;
pub mod intern;
pub mod pipeline;
pub mod reduce;
pub mod source;
pub mod toplist;
pub mod types;

// Re-exports
pub use groups::{GroupCursor, GroupSnapshot, MemberIndex, MemberSet, ThreadGroup, ThreadIndex};
pub use intern::{Interner, MemberId};
pub use pipeline::{run_cooccurrence, run_diversity, run_thread_depth, PipelineError, RunConfig};
pub use reduce::{average_depth, depth_levels, intersection_size};
pub use source::{LineSource, SourceError};
pub use toplist::TopList;
pub use types::{Candidate, CandidateLabel, RawRecord, RecordError, ThreadEdge, Tokenizer};
