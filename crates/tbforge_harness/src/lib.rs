//! VHDL simulation harness generation.
//!
//! [`HarnessGenerator::generate`] takes the harness name and the parsed DUT
//! interfaces and produces one VHDL file: library clauses, a port-less
//! harness entity, the harness signals ([`signals`]), the fixed clock, stream,
//! and reset processes ([`processes`]), and one instance per DUT
//! ([`instances`]) wired by name through the matching rules of
//! [`tbforge_model::matching`].
//!
//! Generation is a single pass into memory. Nothing is written to disk here.

#![warn(missing_docs)]

pub mod error;
pub mod instances;
pub mod libraries;
pub mod processes;
pub mod signals;
pub mod stream;
pub mod writer;

pub use error::HarnessError;
pub use instances::{GenericExports, STREAM_CONSTANTS};
pub use signals::{BenchSignals, SignalDecl, Tap};
pub use stream::{StreamPulse, StreamSchedule};
pub use writer::VhdlWriter;

use std::collections::HashMap;
use tbforge_common::is_basic_identifier;
use tbforge_config::{resolve_libraries, validate_config, HarnessConfig};
use tbforge_model::Interface;

/// The result of a generation run.
#[derive(Debug, Clone)]
pub struct GeneratedHarness {
    /// The complete VHDL text.
    pub text: String,
    /// The DUT interfaces with their `mapped` flags set by wiring.
    pub duts: Vec<Interface>,
}

/// Generates harnesses from a validated configuration.
pub struct HarnessGenerator<'a> {
    config: &'a HarnessConfig,
}

impl<'a> HarnessGenerator<'a> {
    /// Creates a generator for `config`.
    pub fn new(config: &'a HarnessConfig) -> Self {
        Self { config }
    }

    /// Generates a harness named `bench` that instantiates `duts` in order.
    ///
    /// Fails if the configuration is unusable, a name is not a VHDL
    /// identifier, a DUT has no ports, a DUT port has a width that depends on
    /// a generic, or two DUT ports need conflicting harness signals.
    pub fn generate(
        &self,
        bench: &str,
        mut duts: Vec<Interface>,
    ) -> Result<GeneratedHarness, HarnessError> {
        validate_config(self.config)?;
        check_identifier(bench)?;
        for dut in &duts {
            check_identifier(dut.name())?;
            if dut.ports().is_empty() {
                return Err(HarnessError::NoPorts(dut.name().to_string()));
            }
        }

        let stream = &self.config.stream;
        if let (Some(prescaler), Some(frame_size)) = (stream.prescaler, stream.frame_size) {
            let schedule = StreamSchedule::new(prescaler, frame_size)?;
            log::info!(
                "valid every {} cycles, frame end every {} cycles",
                schedule.valid_period(),
                schedule.frame_period()
            );
        }

        let signals = BenchSignals::plan(bench, &duts, stream)?;
        let exports = GenericExports::from_config(self.config);
        let frequency = self.config.clock.frequency().map_err(|e| {
            HarnessError::Config(tbforge_config::ConfigError::ValidationError(e.to_string()))
        })?;

        let mut w = VhdlWriter::new();
        self.write_banner(&mut w, bench, &duts);
        w.blank();
        libraries::write_libraries(&mut w, &resolve_libraries(self.config));
        w.blank();
        w.line(format!("entity {bench} is"));
        w.line(format!("end entity {bench};"));
        w.blank();
        w.line(format!("architecture rtl of {bench} is"));
        w.indent();
        self.write_constants(&mut w);
        for decl in signals.decls() {
            w.line(decl.render());
        }
        w.dedent();
        w.line("begin");
        w.blank();
        w.indent();
        processes::write_processes(&mut w, &signals, frequency, self.config.bench.time_unit)?;

        let mut seen: HashMap<String, usize> = HashMap::new();
        for dut in duts.iter_mut() {
            let index = seen.entry(dut.name().to_string()).or_insert(0);
            w.blank();
            instances::write_instance(&mut w, dut, *index, signals.wires(), &exports)?;
            *index += 1;
        }

        if !signals.taps().is_empty() {
            w.blank();
            for tap in signals.taps() {
                w.line(tap.render());
            }
        }
        w.dedent();
        w.blank();
        w.line("end architecture rtl;");

        Ok(GeneratedHarness {
            text: w.finish(),
            duts,
        })
    }

    fn write_banner(&self, w: &mut VhdlWriter, bench: &str, duts: &[Interface]) {
        let rule = format!("-- {}", "-".repeat(66));
        w.line(&rule);
        w.line(format!("-- Simulation harness {bench}"));
        w.line(format!(
            "-- Generated by tbforge {}",
            env!("CARGO_PKG_VERSION")
        ));
        if !duts.is_empty() {
            let names: Vec<&str> = duts.iter().map(Interface::name).collect();
            w.line(format!("-- Devices under test: {}", names.join(", ")));
        }
        w.line(&rule);
    }

    fn write_constants(&self, w: &mut VhdlWriter) {
        let stream = &self.config.stream;
        let values = [stream.prescaler, stream.frame_size, stream.lut_depth];
        for (name, value) in STREAM_CONSTANTS.iter().zip(values) {
            if let Some(value) = value {
                w.line(format!("constant {name} : natural := {value};"));
            }
        }
    }
}

fn check_identifier(name: &str) -> Result<(), HarnessError> {
    if is_basic_identifier(name) {
        Ok(())
    } else {
        Err(HarnessError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbforge_config::load_config_from_str;
    use tbforge_vhdl_parser::parse_declaration;

    const FIFO: &str = "\
entity fifo is
    generic (
        DEPTH : natural := 16
    );
    port (
        clk          : in  std_logic;
        resetn       : in  std_logic;
        s_axis_tdata : in  std_logic_vector(7 downto 0);
        s_axis_tlast : in  std_logic;
        m_axis_tdata : out std_logic_vector(7 downto 0)
    );
end entity fifo;
";

    fn generate(config: &HarnessConfig, duts: Vec<Interface>) -> GeneratedHarness {
        HarnessGenerator::new(config).generate("top_tb", duts).unwrap()
    }

    #[test]
    fn layout_order() {
        let out = generate(&HarnessConfig::default(), vec![parse_declaration(FIFO)]).text;
        let positions: Vec<usize> = [
            "library ieee;",
            "entity top_tb is",
            "architecture rtl of top_tb is",
            "signal clk : std_logic := '0';",
            "begin",
            "clk <= not(clk)",
            "fi_sim : process(clk)",
            "data_sim : process(clk)",
            "xsim : process",
            "fifo_0 : entity work.fifo",
            "s_axis_tdata <= s_axis_tdata_i;",
            "end architecture rtl;",
        ]
        .iter()
        .map(|needle| out.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
        assert!(positions.windows(2).all(|p| p[0] < p[1]), "{out}");
        assert!(out.ends_with("end architecture rtl;\n"));
    }

    #[test]
    fn frame_marker_enables_tlast() {
        let result = generate(&HarnessConfig::default(), vec![parse_declaration(FIFO)]);
        assert!(result.text.contains("signal tlast_cnt : natural range 0 to 1023;"));
        assert!(result.text.contains("signal s_axis_tlast : std_logic := '0';"));
        assert!(result.text.contains("s_axis_tlast <= '1';"));
        assert!(result.duts[0].is_fully_wired());
    }

    #[test]
    fn local_constants_from_config() {
        let config =
            load_config_from_str("[stream]\nprescaler = 4\nframe_size = 8\nlut_depth = 64\n")
                .unwrap();
        let out = generate(&config, vec![parse_declaration(FIFO)]).text;
        assert!(out.contains("    constant PRESCALER : natural := 4;\n"));
        assert!(out.contains("    constant FRAME_SIZE : natural := 8;\n"));
        assert!(out.contains("    constant LUT_DEPTH : natural := 64;\n"));
        let plain = generate(&HarnessConfig::default(), vec![parse_declaration(FIFO)]).text;
        assert!(!plain.contains("constant "));
    }

    #[test]
    fn clock_in_seconds_is_not_zero() {
        let config =
            load_config_from_str("[bench]\ntime_unit = \"s\"\n\n[clock]\nfrequency = \"100MHz\"\n")
                .unwrap();
        let out = generate(&config, vec![parse_declaration(FIFO)]).text;
        assert!(out.contains("clk <= not(clk) after 0.000000005 sec; -- 100MHz"), "{out}");
    }

    #[test]
    fn repeated_entities_get_distinct_labels() {
        let duts = vec![
            parse_declaration(FIFO),
            parse_declaration(FIFO),
            parse_declaration("entity inv is\nport (\na : in std_logic\n);\nend;"),
        ];
        let out = generate(&HarnessConfig::default(), duts).text;
        assert!(out.contains("fifo_0 : entity work.fifo"));
        assert!(out.contains("fifo_1 : entity work.fifo"));
        assert!(out.contains("inv_0 : entity work.inv"));
    }

    #[test]
    fn no_duts_still_produces_a_harness() {
        let out = generate(&HarnessConfig::default(), Vec::new()).text;
        assert!(out.contains("xsim : process"));
        assert!(!out.contains("entity work."));
    }

    #[test]
    fn errors() {
        let config = HarnessConfig::default();
        let gen = HarnessGenerator::new(&config);
        assert!(matches!(
            gen.generate("top tb", Vec::new()),
            Err(HarnessError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            gen.generate("tb", vec![Interface::new("empty")]),
            Err(HarnessError::NoPorts(_))
        ));
        let unresolved = parse_declaration(
            "entity w is\nport (\nq : out std_logic_vector(N-1 downto 0)\n);\nend;",
        );
        assert!(matches!(
            gen.generate("tb", vec![unresolved]),
            Err(HarnessError::UnresolvedWidth { .. })
        ));

        let mut bad = HarnessConfig::default();
        bad.bench.lang = "verilog".to_string();
        assert!(matches!(
            HarnessGenerator::new(&bad).generate("tb", Vec::new()),
            Err(HarnessError::Config(_))
        ));
    }

    #[test]
    fn deterministic() {
        let config = HarnessConfig::default();
        let a = generate(&config, vec![parse_declaration(FIFO)]).text;
        let b = generate(&config, vec![parse_declaration(FIFO)]).text;
        assert_eq!(a, b);
    }
}
