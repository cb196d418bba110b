//! Trace reading for recorded optimization runs.
//!
//! A trace is a newline-delimited JSON file with one [`GenerationSnapshot`]
//! per line, appended by the optimization engine after every generation.
//! It is read once, in full, and never re-sorted: file order is playback
//! order.

mod summary;

pub use summary::TraceSummary;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::compute::{Frame, FrameError, FrameIterator, extract_frame};
use crate::schema::GenerationSnapshot;

/// Errors raised while loading a trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("Trace file {} does not exist", path.display())]
    MissingTrace { path: PathBuf },
    #[error("Failed to read trace: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed record on line {line}: {source}")]
    MalformedRecord {
        /// 1-based line number in the trace file.
        line: usize,
        source: serde_json::Error,
    },
}

/// Immutable, ordered sequence of generation snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    snapshots: Vec<GenerationSnapshot>,
}

impl Trace {
    /// Load a trace file.
    ///
    /// Fails with [`TraceError::MissingTrace`] before touching the file system
    /// any further when `path` does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TraceError::MissingTrace {
                path: path.to_path_buf(),
            });
        }

        let trace = Self::from_reader(BufReader::new(File::open(path)?))?;
        log::info!(
            "Loaded {} snapshots from {}",
            trace.len(),
            path.display()
        );
        Ok(trace)
    }

    /// Parse a trace from any buffered reader.
    ///
    /// Blank lines are skipped but still counted, so error line numbers match
    /// what an editor shows.
    ///
    /// Lines are parsed as raw bytes, so invalid UTF-8 is reported as a
    /// malformed record on its line rather than as a read failure.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, TraceError> {
        let mut snapshots = Vec::new();
        for (i, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            let line = line.strip_suffix(b"\r").unwrap_or(&line);
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let snapshot = serde_json::from_slice(line)
                .map_err(|source| TraceError::MalformedRecord { line: i + 1, source })?;
            snapshots.push(snapshot);
        }
        Ok(Self { snapshots })
    }

    /// Build a trace from snapshots already in memory.
    pub fn from_snapshots(snapshots: Vec<GenerationSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Number of snapshots (and therefore frames).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots in file order.
    pub fn snapshots(&self) -> &[GenerationSnapshot] {
        &self.snapshots
    }

    /// Snapshot at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&GenerationSnapshot> {
        self.snapshots.get(index)
    }

    /// Project snapshot `index` into a frame.
    pub fn frame(&self, index: usize) -> Result<Frame, FrameError> {
        extract_frame(self, index)
    }

    /// Lazily project every snapshot, in order.
    pub fn frames(&self) -> FrameIterator<'_> {
        FrameIterator::new(self)
    }

    /// Aggregate statistics for logging.
    pub fn summary(&self) -> TraceSummary {
        TraceSummary::from_trace(self)
    }
}
