//! Core types for the aggregation kernel.

pub mod candidate;
pub mod edge;
pub mod record;

pub use candidate::{Candidate, CandidateLabel};
pub use edge::ThreadEdge;
pub use record::{RawRecord, RecordError, Tokenizer};
