//! Clang-style diagnostic rendering.

use std::io::{self, Write};

use pl0_core::diag::{Diagnostic, Severity};

use crate::SourceFile;

mod color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD_WHITE: &str = "\x1b[1;37m";
    pub const BOLD_RED: &str = "\x1b[1;31m";
    pub const BOLD_YELLOW: &str = "\x1b[1;33m";
    pub const BOLD_CYAN: &str = "\x1b[1;36m";
    pub const GREEN: &str = "\x1b[32m";
}

/// Renders diagnostics against a source file.
///
/// Output format:
///
/// ```text
/// <filename>:<line>:<col>: <level>: <message>
///     <source line>
///     <spaces>^~~~
/// ```
///
/// The caret column and tilde count are in characters, matching the
/// positions recorded by the lexer.
pub struct DiagnosticRenderer<'a> {
    source: &'a SourceFile,
    use_color: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(source: &'a SourceFile) -> Self {
        Self {
            source,
            use_color: false,
        }
    }

    /// Enable or disable ANSI colour sequences.
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Render one diagnostic to the given writer.
    pub fn render<W: Write>(&self, diag: &Diagnostic, out: &mut W) -> io::Result<()> {
        let paint = |code: &'static str| if self.use_color { code } else { "" };

        write!(
            out,
            "{}{}:{}:{}: {}",
            paint(color::BOLD_WHITE),
            self.source.name(),
            diag.line,
            diag.column,
            paint(color::RESET),
        )?;

        let level_color = match diag.severity {
            Severity::Error => color::BOLD_RED,
            Severity::Warning => color::BOLD_YELLOW,
            Severity::Note => color::BOLD_CYAN,
        };
        write!(
            out,
            "{}{}: {}",
            paint(level_color),
            diag.severity.as_str(),
            paint(color::RESET),
        )?;
        writeln!(
            out,
            "{}{}{}",
            paint(color::BOLD_WHITE),
            diag.message,
            paint(color::RESET),
        )?;

        // Source line echo with caret underline
        if let Some(line_text) = self.source.line_text(diag.line) {
            if !line_text.is_empty() {
                writeln!(out, "    {}", line_text)?;
                writeln!(
                    out,
                    "    {}{}{}",
                    paint(color::GREEN),
                    caret(diag.column, diag.length),
                    paint(color::RESET),
                )?;
            }
        }

        Ok(())
    }

    /// Render all diagnostics in order.
    pub fn render_all<W: Write>(&self, diags: &[Diagnostic], out: &mut W) -> io::Result<()> {
        for diag in diags {
            self.render(diag, out)?;
        }
        Ok(())
    }

    /// Render one diagnostic to a string (test convenience).
    pub fn render_to_string(&self, diag: &Diagnostic) -> String {
        let mut buf = Vec::new();
        self.render(diag, &mut buf)
            .expect("writing to Vec cannot fail");
        String::from_utf8(buf).expect("output is valid UTF-8")
    }
}

/// Build the `^~~~` marker for a 1-based character column.
fn caret(column: u32, length: u32) -> String {
    let mut marker = " ".repeat(column.saturating_sub(1) as usize);
    marker.push('^');
    for _ in 1..length.max(1) {
        marker.push('~');
    }
    marker
}
