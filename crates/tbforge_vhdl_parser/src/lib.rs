//! Line-oriented reader for VHDL entity declarations.
//!
//! This crate extracts an [`Interface`] (entity name, ports, generics) from
//! the declaration part of a VHDL file. It does not parse VHDL in general:
//! each line is read on its own by a four-state machine, and anything outside
//! the entity header is ignored. The main entry point is [`parse_file`].
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): numbers lines, strips `--` comments, and splits
//!   on whitespace.
//! - **Parser** ([`parser`]): the [`DeclarationParser`] state machine and its
//!   [`ParseMode`].
//!
//! Malformed text never fails the parse. In the default permissive mode the
//! current list is truncated at the first unreadable line; in strict mode the
//! line is reported to the [`DiagnosticSink`] and skipped.

#![warn(missing_docs)]

mod decl;
pub mod lexer;
pub mod parser;

pub use parser::{DeclarationParser, ParseMode, ParserState};

use std::path::Path;
use tbforge_diagnostics::DiagnosticSink;
use tbforge_model::Interface;
use tbforge_source::{FileId, SourceDb};

/// File extensions accepted as declaration sources.
pub const DECLARATION_EXTENSIONS: &[&str] = &["vhd", "vhdl"];

/// Parses the entity declaration in a loaded source file.
pub fn parse_file(
    file_id: FileId,
    source_db: &SourceDb,
    sink: &DiagnosticSink,
    mode: ParseMode,
) -> Interface {
    let file = source_db.get_file(file_id);
    let mut parser = DeclarationParser::new(file_id, sink, mode);
    for line in lexer::lex_lines(&file.content) {
        if parser.state() == ParserState::Done {
            break;
        }
        parser.feed(&line);
    }
    let interface = parser.finish();
    log::debug!(
        "{}: entity '{}' with {} ports, {} generics",
        file.path.display(),
        interface.name(),
        interface.ports().len(),
        interface.generics().len()
    );
    interface
}

/// Parses declaration text that is not backed by a file, in permissive mode.
pub fn parse_declaration(text: &str) -> Interface {
    let mut db = SourceDb::new();
    let file_id = db.add_source("<declaration>", text.to_string());
    let sink = DiagnosticSink::new();
    parse_file(file_id, &db, &sink, ParseMode::Permissive)
}

/// Returns `true` if `path` has a VHDL source extension.
pub fn is_declaration_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DECLARATION_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
