//! Conformance test helpers for tbforge.
//!
//! Provides pipeline functions that run declaration text through the parser
//! and the harness generator and return structured results for assertion in
//! the integration tests under `tests/`.

#![warn(missing_docs)]

pub mod clocked;

pub use clocked::ClockedProcess;

use tbforge_config::{load_config_from_str, HarnessConfig};
use tbforge_diagnostics::{Diagnostic, DiagnosticSink};
use tbforge_harness::{GeneratedHarness, HarnessError, HarnessGenerator};
use tbforge_model::Interface;
use tbforge_source::SourceDb;
use tbforge_vhdl_parser::{parse_file, ParseMode};

/// Result of parsing one declaration.
pub struct ParseResult {
    /// The parsed interface.
    pub interface: Interface,
    /// All diagnostics emitted while parsing.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
}

/// Result of running parse then generate.
pub struct PipelineResult {
    /// The parsed interfaces, before wiring.
    pub interfaces: Vec<Interface>,
    /// The generated harness, or why generation failed.
    pub harness: Result<GeneratedHarness, HarnessError>,
}

impl PipelineResult {
    /// The generated text. Panics if generation failed.
    pub fn text(&self) -> &str {
        match &self.harness {
            Ok(harness) => &harness.text,
            Err(e) => panic!("generation failed: {e}"),
        }
    }
}

/// Creates a `HarnessConfig` from TOML text. Panics on invalid TOML.
pub fn make_config(toml: &str) -> HarnessConfig {
    match load_config_from_str(toml) {
        Ok(config) => config,
        Err(e) => panic!("invalid test config: {e}"),
    }
}

/// Parses declaration text in the given mode.
pub fn parse(source: &str, mode: ParseMode) -> ParseResult {
    let mut source_db = SourceDb::new();
    let file_id = source_db.add_source("input.vhd", source.to_string());
    let sink = DiagnosticSink::new();
    let interface = parse_file(file_id, &source_db, &sink, mode);
    ParseResult {
        interface,
        has_errors: sink.has_errors(),
        diagnostics: sink.take_all(),
    }
}

/// Parses every declaration permissively and generates a harness named
/// `bench` that instantiates them in order.
pub fn full_pipeline(sources: &[&str], bench: &str, config: &HarnessConfig) -> PipelineResult {
    let interfaces: Vec<Interface> = sources
        .iter()
        .map(|src| parse(src, ParseMode::Permissive).interface)
        .collect();
    let harness = HarnessGenerator::new(config).generate(bench, interfaces.clone());
    PipelineResult {
        interfaces,
        harness,
    }
}

/// Builds entity declaration text from `(name, mode, type)` port triples
/// and `(name, type, default)` generic triples.
pub fn entity_source(name: &str, generics: &[(&str, &str, &str)], ports: &[(&str, &str, &str)]) -> String {
    let mut out = format!("entity {name} is\n");
    if !generics.is_empty() {
        out.push_str("    generic (\n");
        let lines: Vec<String> = generics
            .iter()
            .map(|(g, ty, default)| format!("        {g} : {ty} := {default}"))
            .collect();
        out.push_str(&lines.join(";\n"));
        out.push_str("\n    );\n");
    }
    if !ports.is_empty() {
        out.push_str("    port (\n");
        let lines: Vec<String> = ports
            .iter()
            .map(|(p, mode, ty)| format!("        {p} : {mode} {ty}"))
            .collect();
        out.push_str(&lines.join(";\n"));
        out.push_str("\n    );\n");
    }
    out.push_str(&format!("end entity {name};\n"));
    out
}

/// Returns the instantiation statement labelled `label` in generated text,
/// up to and including the line that closes it.
pub fn instance_block<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let start = text.find(&format!("{label} : entity work."))?;
    let rest = &text[start..];
    let end = rest.find(";\n")? + 2;
    Some(&rest[..end])
}
