//! Two-phase worker-pool orchestration.
//!
//! Every variant runs the same shape:
//!
//! 1. **Ingestion** — a fixed pool of workers pulls lines from the shared
//!    [`LineSource`] until end of stream, parses each into a [`RawRecord`]
//!    and writes into the variant's accumulator. The scope join is the global
//!    barrier: no reduction starts until every worker has observed end of
//!    stream.
//! 2. **Reduction** — the accumulator is frozen into a snapshot, a second
//!    pool drains the shared group cursor and feeds scored candidates into
//!    the shared [`TopList`].
//!
//! A malformed line, or a line missing a field the variant requires, fails
//! the whole run: workers surface the error after the join and no result is
//! reported. A failed record never reaches an accumulator because extraction
//! completes before any shared-state write.

use std::io::BufRead;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Instant;
use tracing::info;

use crate::groups::{MemberIndex, ThreadIndex};
use crate::intern::Interner;
use crate::reduce::{intersect_pairs, reduce_thread_depth, score_diversity};
use crate::source::{LineSource, SourceError};
use crate::toplist::TopList;
use crate::types::{Candidate, RawRecord, RecordError, Tokenizer};

/// Error type for a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Reading from the input stream failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// A record was malformed or missing a required field.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Tunables for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Worker threads per phase.
    pub workers: usize,
    /// Number of candidates retained in the ranked result.
    pub top_k: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            top_k: 10,
        }
    }
}

impl RunConfig {
    fn pool_size(&self) -> usize {
        self.workers.max(1)
    }
}

fn join_worker<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Phase 1: drain the source with a worker pool, applying `per_record` to
/// every parsed record. Returns the number of records ingested.
fn ingest<R, F>(
    source: &LineSource<R>,
    config: &RunConfig,
    per_record: F,
) -> Result<u64, PipelineError>
where
    R: BufRead + Send,
    F: Fn(&RawRecord) -> Result<(), RecordError> + Sync,
{
    let records = AtomicU64::new(0);
    thread::scope(|scope| {
        let mut handles = Vec::new();
        for _ in 0..config.pool_size() {
            handles.push(scope.spawn(|| -> Result<(), PipelineError> {
                while let Some(line) = source.next_line()? {
                    let record = RawRecord::parse(&line)?;
                    per_record(&record)?;
                    records.fetch_add(1, Ordering::Relaxed);
                }
                Ok(())
            }));
        }
        // Scope join doubles as the phase barrier; first worker error wins.
        handles.into_iter().try_for_each(join_worker)
    })?;
    Ok(records.into_inner())
}

/// Phase 2: run one reduction pass on a worker pool.
fn reduce<F>(config: &RunConfig, pass: F)
where
    F: Fn() + Sync,
{
    thread::scope(|scope| {
        for _ in 0..config.pool_size() {
            scope.spawn(&pass);
        }
    });
}

/// Rank groups by distinct-token count of their comment bodies.
pub fn run_diversity<R: BufRead + Send>(
    input: R,
    config: &RunConfig,
) -> Result<Vec<Candidate>, PipelineError> {
    let started = Instant::now();
    let source = LineSource::new(input);
    let interner = Interner::new();
    let index = MemberIndex::new();
    let tokenizer = Tokenizer::new();

    let records = ingest(&source, config, |record| {
        let body = record.body()?;
        for token in tokenizer.tokens(body) {
            index.insert(&record.subreddit, interner.intern(&token));
        }
        Ok(())
    })?;
    info!(
        variant = "diversity",
        records,
        groups = index.group_count(),
        distinct_tokens = interner.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "ingestion complete"
    );

    let snapshot = index.into_snapshot();
    let top = TopList::new(config.top_k);
    let cursor = snapshot.cursor();
    reduce(config, || score_diversity(&cursor, &top));
    info!(
        variant = "diversity",
        elapsed_ms = started.elapsed().as_millis() as u64,
        "reduction complete"
    );
    Ok(top.snapshot())
}

/// Rank group pairs by their number of common comment authors.
pub fn run_cooccurrence<R: BufRead + Send>(
    input: R,
    config: &RunConfig,
) -> Result<Vec<Candidate>, PipelineError> {
    let started = Instant::now();
    let source = LineSource::new(input);
    let interner = Interner::new();
    let index = MemberIndex::new();

    let records = ingest(&source, config, |record| {
        let author = record.author()?;
        index.insert(&record.subreddit, interner.intern(author));
        Ok(())
    })?;
    info!(
        variant = "cooccurrence",
        records,
        groups = index.group_count(),
        distinct_authors = interner.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "ingestion complete"
    );

    let snapshot = index.into_snapshot();
    let top = TopList::new(config.top_k);
    let cursor = snapshot.cursor();
    reduce(config, || intersect_pairs(&snapshot, &cursor, &top));
    info!(
        variant = "cooccurrence",
        elapsed_ms = started.elapsed().as_millis() as u64,
        "reduction complete"
    );
    Ok(top.snapshot())
}

/// Rank groups by the average depth of their comment threads.
pub fn run_thread_depth<R: BufRead + Send>(
    input: R,
    config: &RunConfig,
) -> Result<Vec<Candidate>, PipelineError> {
    let started = Instant::now();
    let source = LineSource::new(input);
    let index = ThreadIndex::new();

    let records = ingest(&source, config, |record| {
        let comment_id = record.comment_id()?;
        let parent_id = record.parent_id()?;
        let is_root = record.is_thread_root()?;
        index.record(&record.subreddit, comment_id, parent_id, is_root);
        Ok(())
    })?;
    info!(
        variant = "thread_depth",
        records,
        groups = index.group_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "ingestion complete"
    );

    let snapshot = index.into_snapshot();
    let top = TopList::new(config.top_k);
    let cursor = snapshot.cursor();
    reduce(config, || reduce_thread_depth(&cursor, &top));
    info!(
        variant = "thread_depth",
        elapsed_ms = started.elapsed().as_millis() as u64,
        "reduction complete"
    );
    Ok(top.snapshot())
}
