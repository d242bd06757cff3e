//! Plain-text generation log written next to the generated fonts.

use std::fmt::Write as _;
use std::path::Path;

/// File name of the log inside the output folder.
pub const LOG_FILE_NAME: &str = "bmh.log";

const RULE: &str = "====================================================================";

/// One generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Header file name, e.g. `Arial_16.h`.
    pub file_name: String,
    /// BLAKE3 hash of the header contents.
    pub hash: String,
}

/// List of headers produced by one run.
#[derive(Debug, Clone, Default)]
pub struct GenerationLog {
    entries: Vec<LogEntry>,
}

impl GenerationLog {
    /// Start an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generated header.
    pub fn push(&mut self, file_name: impl Into<String>, hash: impl Into<String>) {
        self.entries.push(LogEntry {
            file_name: file_name.into(),
            hash: hash.into(),
        });
    }

    /// Recorded entries in generation order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Render the log text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "bmh version {}", env!("CARGO_PKG_VERSION"));
        let _ = writeln!(out, "{}", RULE);
        for entry in &self.entries {
            let _ = writeln!(out, "{} {}", entry.file_name, entry.hash);
        }
        let _ = writeln!(out, "{}", RULE);
        out
    }

    /// Write the log into `output_folder`.
    pub fn write(&self, output_folder: &Path) -> std::io::Result<()> {
        std::fs::write(output_folder.join(LOG_FILE_NAME), self.render())
    }
}
