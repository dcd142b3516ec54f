//! Phase-2 reduction passes.
//!
//! Each pass drains the shared group cursor and feeds scored candidates into
//! the shared [`TopList`](crate::toplist::TopList). A pass processes every
//! group it claims to completion before claiming the next, so per-group work
//! never interleaves across workers.

pub mod depth;
pub mod diversity;
pub mod overlap;

pub use depth::{average_depth, depth_levels, reduce_thread_depth};
pub use diversity::score_diversity;
pub use overlap::{intersect_pairs, intersection_size};
