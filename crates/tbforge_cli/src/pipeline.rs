//! The generation pipeline behind the `tbforge` binary.
//!
//! 1. Report unknown flags
//! 2. Load config (explicit `--config`, else `./tbforge.toml`, else defaults)
//! 3. Parse each `--dut` declaration
//! 4. Generate the harness
//! 5. Report DUTs that are not fully wired
//! 6. Write the harness file and render diagnostics

use std::error::Error;
use std::fs;
use std::path::Path;

use tbforge_config::{discover_config, HarnessConfig};
use tbforge_diagnostics::code::{NOT_FULLY_WIRED, UNKNOWN_FLAG, UNSUPPORTED_FILE_TYPE};
use tbforge_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use tbforge_harness::HarnessGenerator;
use tbforge_model::Interface;
use tbforge_source::{FileId, Location, SourceDb};
use tbforge_vhdl_parser::{is_declaration_file, parse_file, ParseMode};

use crate::Cli;

/// Runs one generation. Returns exit code 0 on success and 1 if a declaration
/// file was rejected or, in strict mode, could not be read cleanly.
pub fn run(cli: &Cli, unknown: &[String]) -> Result<i32, Box<dyn Error>> {
    let color = cli.color.enabled();
    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();

    for flag in unknown {
        sink.emit(
            Diagnostic::warning(
                UNKNOWN_FLAG,
                format!("unknown flag '{flag}'"),
                Location::DUMMY,
            )
            .with_help("the flag is ignored"),
        );
    }

    let config = discover_config(cli.config.as_deref(), &std::env::current_dir()?)?;
    let bench = bench_name(&config, &cli.fp)?;
    log::debug!("harness '{bench}' for {} declaration file(s)", cli.dut.len());
    if !cli.quiet {
        eprintln!("   Generating {bench}");
    }

    let mode = if cli.strict {
        ParseMode::Strict
    } else {
        ParseMode::Permissive
    };

    let mut duts = Vec::with_capacity(cli.dut.len());
    let mut files = Vec::with_capacity(cli.dut.len());
    for path in &cli.dut {
        if !is_declaration_file(path) {
            sink.emit(
                Diagnostic::error(
                    UNSUPPORTED_FILE_TYPE,
                    format!("file type of '{}' is not supported", path.display()),
                    Location::DUMMY,
                )
                .with_help("declaration files must end in .vhd or .vhdl"),
            );
            render_diagnostics(&sink, &source_db, color, cli.quiet);
            return Ok(1);
        }
        let file_id = source_db
            .load_file(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let dut = parse_file(file_id, &source_db, &sink, mode);
        if dut.name().is_empty() {
            return Err(format!("no entity declaration found in {}", path.display()).into());
        }
        if !cli.quiet {
            eprintln!("      Parsed {} (entity {})", path.display(), dut.name());
        }
        duts.push(dut);
        files.push(file_id);
    }

    if sink.has_errors() {
        render_diagnostics(&sink, &source_db, color, cli.quiet);
        return Ok(1);
    }

    if cli.dump_model {
        println!("{}", serde_json::to_string_pretty(&duts)?);
    }

    let harness = match HarnessGenerator::new(&config).generate(&bench, duts) {
        Ok(harness) => harness,
        Err(e) => {
            render_diagnostics(&sink, &source_db, color, cli.quiet);
            return Err(e.into());
        }
    };
    for (dut, file) in harness.duts.iter().zip(&files) {
        report_unwired(&sink, &source_db, dut, *file);
    }

    fs::write(&cli.fp, &harness.text)
        .map_err(|e| format!("cannot write {}: {e}", cli.fp.display()))?;

    render_diagnostics(&sink, &source_db, color, cli.quiet);
    if !cli.quiet {
        eprintln!("   Generated {}", cli.fp.display());
    }
    Ok(0)
}

/// The harness entity name: `bench.name` from the config, else the stem of
/// the output file.
pub fn bench_name(config: &HarnessConfig, fp: &Path) -> Result<String, Box<dyn Error>> {
    if let Some(name) = &config.bench.name {
        return Ok(name.clone());
    }
    fp.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| format!("cannot derive a harness name from {}", fp.display()).into())
}

fn report_unwired(sink: &DiagnosticSink, source_db: &SourceDb, dut: &Interface, file: FileId) {
    if dut.is_fully_wired() {
        return;
    }
    let mut diag = Diagnostic::warning(
        NOT_FULLY_WIRED,
        format!("entity '{}' is not fully wired", dut.name()),
        Location::new(file, entity_line(source_db, file)),
    );
    let ports: Vec<&str> = dut.unmapped_ports().collect();
    if !ports.is_empty() {
        diag = diag.with_note(format!("unconnected ports: {}", ports.join(", ")));
    }
    let generics: Vec<&str> = dut.unmapped_generics().collect();
    if !generics.is_empty() {
        diag = diag
            .with_note(format!("generics left at their defaults: {}", generics.join(", ")))
            .with_help("list the generics under `[stimulus] constants` if the package exports them");
    }
    sink.emit(diag);
}

/// The line of the `entity` keyword, or 1 if it cannot be found.
fn entity_line(source_db: &SourceDb, file: FileId) -> u32 {
    source_db
        .get_file(file)
        .numbered_lines()
        .find(|(_, text)| {
            text.trim_start()
                .get(..6)
                .is_some_and(|word| word.eq_ignore_ascii_case("entity"))
        })
        .map_or(1, |(line, _)| line)
}

/// Renders collected diagnostics to stderr, followed by a count summary.
/// With `quiet`, only errors are shown and the summary is omitted. Returns
/// the number rendered.
pub fn render_diagnostics(
    sink: &DiagnosticSink,
    source_db: &SourceDb,
    color: bool,
    quiet: bool,
) -> usize {
    let renderer = TerminalRenderer::new(color);
    let mut shown = 0;
    for diag in sink.diagnostics() {
        if quiet && !diag.severity.is_error() {
            continue;
        }
        eprintln!("{}", renderer.render(&diag, source_db));
        shown += 1;
    }
    if !quiet {
        if let Some(line) = summary(sink) {
            eprintln!("{line}");
        }
    }
    shown
}

/// The `Result:` line, or `None` when the run produced no diagnostics.
fn summary(sink: &DiagnosticSink) -> Option<String> {
    let (errors, warnings) = (sink.error_count(), sink.warning_count());
    (errors + warnings > 0)
        .then(|| format!("   Result: {errors} error(s), {warnings} warning(s)"))
}
