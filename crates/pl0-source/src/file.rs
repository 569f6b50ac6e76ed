//! Source file with line-based access.

use std::io;
use std::path::Path;

/// A source file: raw UTF-8 text plus a split view into physical lines.
///
/// Lines end at LF; a trailing CR is stripped so CRLF input renders
/// cleanly in diagnostics.
#[derive(Clone, Debug)]
pub struct SourceFile {
    name: String,
    source: String,
    lines: Vec<String>,
}

impl SourceFile {
    /// Load a file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Ok(Self::from_string(path.display().to_string(), source))
    }

    /// Build from an in-memory string (used heavily by tests).
    pub fn from_string(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let lines = split_lines(&source);
        Self {
            name: name.into(),
            source,
            lines,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Text of a line (1-based), without its terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.lines.get(line as usize - 1).map(String::as_str)
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }
}

fn split_lines(source: &str) -> Vec<String> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
