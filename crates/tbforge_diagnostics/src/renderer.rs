//! Diagnostic rendering for the terminal.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use tbforge_source::SourceDb;

/// Formats a diagnostic into text.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-style terminal format:
///
/// ```text
/// warning[W201]: entity 'fifo' is not fully wired
///   --> rtl/fifo.vhd:7
///    |
///  7 |     DEPTH : natural := 16
///    |
///    = note: ...
/// ```
///
/// Styling is applied here only; diagnostics themselves never carry escape
/// codes.
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, severity: Severity) -> String {
        if !self.color {
            return text.to_string();
        }
        let code = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note => "36",
        };
        format!("\x1b[1;{code}m{text}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();

        let header = format!("{}[{}]", diag.severity, diag.code);
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(&header, diag.severity),
            diag.message
        ));

        if let Some(place) = source_db.describe(diag.location) {
            out.push_str(&format!("  --> {place}\n"));
            if let Some(text) = source_db.line_text(diag.location) {
                let line_num = diag.location.line.to_string();
                let padding = " ".repeat(line_num.len());
                out.push_str(&format!("{padding} |\n"));
                out.push_str(&format!("{line_num} | {text}\n"));
                out.push_str(&format!("{padding} |\n"));
            }
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}
