#![warn(missing_docs)]
//! Deterministic testing surfaces: per-frame trace log and golden-file snapshots.

mod snapshot;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use snapshot::*;

/// One frame of cursor and pick output, as written to trace logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    /// Frame index, starting at 1 for the first simulated frame.
    pub frame: u64,
    /// Cursor position in viewport pixels.
    pub cursor: [f32; 2],
    /// Which rule produced the cursor: `"accumulated"` or `"overridden"`.
    pub source: &'static str,
    /// Collapsed hit flag across every target.
    pub hit: bool,
    /// Per-target hit flags, in scene order.
    pub hits: Vec<bool>,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create trace directory {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create trace log {}", path.display()))?;
        tracing::debug!(path = %path.display(), "opened jsonl sink");
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append a record to the log.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered records to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
