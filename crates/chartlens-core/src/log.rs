//! Analysis log capability.
//!
//! The analysis log is a product artifact, not operational logging: every
//! model attempt, success, and failure is appended to a flat file so the
//! result of a run can be inspected later. Operational logging stays on
//! `tracing`.
//!
//! The log is injected as a trait object so tests can capture output
//! without touching the filesystem.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only message sink shared by the fallback client and the binaries.
pub trait AnalysisLog: Send + Sync {
    /// Append one message to the log.
    fn append(&self, message: &str);
}

/// File-backed analysis log.
///
/// Each append opens the file, writes `"[YYYY-MM-DD HH:MM:SS] <message>\n"`,
/// and closes it again; the bare message is echoed to stdout. No rotation,
/// no lock — concurrent appends may interleave, which is acceptable here.
pub struct FileAnalysisLog {
    path: PathBuf,
}

impl FileAnalysisLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate the log file. Called once at the start of a standalone run.
    pub fn truncate(&self) -> std::io::Result<()> {
        std::fs::write(&self.path, "")
    }
}

impl AnalysisLog for FileAnalysisLog {
    fn append(&self, message: &str) {
        println!("{}", message);

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("[{}] {}\n", timestamp, message);
        match OpenOptions::new().create(true).append(true).open(&self.path) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(line.as_bytes()) {
                    tracing::warn!(path = %self.path.display(), error = %e, "analysis log write failed");
                }
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "analysis log open failed");
            }
        }
    }
}

/// In-memory analysis log for tests.
#[derive(Default)]
pub struct MemoryAnalysisLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryAnalysisLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended messages, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("analysis log poisoned").clone()
    }
}

impl AnalysisLog for MemoryAnalysisLog {
    fn append(&self, message: &str) {
        self.lines
            .lock()
            .expect("analysis log poisoned")
            .push(message.to_string());
    }
}
