//! DUT instantiation statements.

use crate::error::HarnessError;
use crate::writer::VhdlWriter;
use tbforge_config::HarnessConfig;
use tbforge_model::{has_counterpart, Generic, Interface};

/// Generic names that are constants in the harness and generator code.
pub const STREAM_CONSTANTS: [&str; 3] = ["PRESCALER", "FRAME_SIZE", "LUT_DEPTH"];

/// The generics a harness can pass down to its DUTs.
#[derive(Debug, Clone)]
pub struct GenericExports {
    generics: Vec<Generic>,
    exports_all: bool,
}

impl GenericExports {
    /// Builds the exported set from the stream constants and the stimulus
    /// package's constants. Without a configured constant list, every DUT
    /// generic is taken to be exported by the package.
    pub fn from_config(config: &HarnessConfig) -> Self {
        let mut generics: Vec<Generic> = STREAM_CONSTANTS.iter().map(|n| Generic::new(*n)).collect();
        for name in config.stimulus.constants.iter().flatten() {
            if !generics.iter().any(|g| g.name() == name) {
                generics.push(Generic::new(name.as_str()));
            }
        }
        Self {
            generics,
            exports_all: config.stimulus.constants.is_none(),
        }
    }

    /// Returns `true` if `generic` can be associated by name.
    pub fn provides(&self, generic: &Generic) -> bool {
        self.exports_all || has_counterpart(&self.generics, generic)
    }
}

/// Writes the instantiation of `dut` and marks what it wires as mapped.
///
/// `index` is the number of earlier instances of the same entity. Ports are
/// associated with same-named harness signals and generics with same-named
/// constants; anything without a counterpart is left out.
pub fn write_instance(
    w: &mut VhdlWriter,
    dut: &mut Interface,
    index: usize,
    wires: &Interface,
    exports: &GenericExports,
) -> Result<(), HarnessError> {
    if dut.ports().is_empty() {
        return Err(HarnessError::NoPorts(dut.name().to_string()));
    }

    let generic_hits: Vec<usize> = (0..dut.generics().len())
        .filter(|&i| exports.provides(&dut.generics()[i]))
        .collect();
    let port_hits: Vec<usize> = (0..dut.ports().len())
        .filter(|&i| wires.has_signal(&dut.ports()[i]))
        .collect();

    let generic_map: Vec<String> = generic_hits
        .iter()
        .map(|&i| association(dut.generics()[i].name()))
        .collect();
    let port_map: Vec<String> = port_hits
        .iter()
        .map(|&i| association(dut.ports()[i].name()))
        .collect();

    let label = format!("{}_{index}", dut.name());
    log::info!(
        "instance {label}: {} of {} ports, {} of {} generics",
        port_map.len(),
        dut.ports().len(),
        generic_map.len(),
        dut.generics().len()
    );

    let with_generics = dut.has_generics() && !generic_map.is_empty();
    if !with_generics && port_map.is_empty() {
        w.line(format!("{label} : entity work.{};", dut.name()));
    } else {
        w.line(format!("{label} : entity work.{}", dut.name()));
        w.indent();
        if with_generics {
            w.line("generic map (");
            w.indent();
            w.separated(&generic_map, ",");
            w.dedent();
            w.line(if port_map.is_empty() { ");" } else { ")" });
        }
        if !port_map.is_empty() {
            w.line("port map (");
            w.indent();
            w.separated(&port_map, ",");
            w.dedent();
            w.line(");");
        }
        w.dedent();
    }

    for i in port_hits {
        dut.mark_port_mapped(i);
    }
    for i in generic_hits {
        dut.mark_generic_mapped(i);
    }
    Ok(())
}

fn association(name: &str) -> String {
    format!("{name} => {name}")
}
