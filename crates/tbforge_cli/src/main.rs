//! tbforge CLI: generates a VHDL simulation harness for one or more entities.
//!
//! ```text
//! tbforge --fp=sim/top_tb.vhd --dut=rtl/fifo.vhd --dut=rtl/filter.vhd
//! ```
//!
//! Each `--dut` file is read for its entity declaration, and the harness at
//! `--fp` instantiates every DUT, wired by port name. Unknown flags are
//! reported and ignored.

#![warn(missing_docs)]

mod args;
mod pipeline;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser, ValueEnum};

/// tbforge: VHDL simulation harness generator.
#[derive(Parser, Debug)]
#[command(name = "tbforge", version, about = "VHDL simulation harness generator")]
pub struct Cli {
    /// Path of the harness file to write.
    #[arg(long, value_name = "PATH")]
    pub fp: PathBuf,

    /// Entity declaration file of a device under test. Repeatable.
    #[arg(long, value_name = "PATH")]
    pub dut: Vec<PathBuf>,

    /// Path to a `tbforge.toml` configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report malformed declaration lines instead of truncating the list.
    #[arg(long)]
    pub strict: bool,

    /// Print the parsed interfaces as JSON before generating.
    #[arg(long)]
    pub dump_model: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn main() {
    let argv = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
    let split = args::split_known(&Cli::command(), argv);
    let cli = match Cli::try_parse_from(&split.known) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    init_logging(&cli);

    match pipeline::run(&cli, &split.unknown) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
