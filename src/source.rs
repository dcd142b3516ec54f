//! Thread-safe single-pass line dispenser.
//!
//! Phase-1 workers all pull from one `LineSource`. Each line of the
//! underlying stream is handed to exactly one caller: the read and the cursor
//! advance are a single critical section, so no interleaving of callers can
//! skip or duplicate a line. The source is generic over [`BufRead`] so tests
//! and benchmarks can feed in-memory corpora instead of files.

use parking_lot::Mutex;
use std::io::BufRead;

/// Error type for the line source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The underlying stream failed.
    #[error("Input read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared, single-pass dispenser of input lines.
pub struct LineSource<R> {
    reader: Mutex<R>,
}

impl<R: BufRead> LineSource<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
        }
    }

    /// Return the next not-yet-delivered line, or `None` at end of stream.
    ///
    /// The trailing newline is stripped. Holding the lock across the whole
    /// read guarantees exactly-once delivery under concurrent callers.
    pub fn next_line(&self) -> Result<Option<String>, SourceError> {
        let mut reader = self.reader.lock();
        let mut line = String::new();
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}
