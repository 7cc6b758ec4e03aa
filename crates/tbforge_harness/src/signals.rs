//! The harness's own signals.
//!
//! Every harness declares the control signals `clk`, `resetn` and `eos` and
//! the stream strobe `s_axis_tvalid`, plus the counters its processes use.
//! Each DUT port is then either wired straight to an existing harness signal
//! that matches it, or gets a net named after the port and a tap signal the
//! user drives (`<port>_i`) or observes (`<port>_o`).

use crate::error::HarnessError;
use tbforge_common::eq_ignore_case;
use tbforge_config::StreamSection;
use tbforge_model::{find_counterpart, Direction, Interface, Signal, SignalKind, Width};

/// Clock.
pub const CLOCK: &str = "clk";
/// Active-low reset.
pub const RESET: &str = "resetn";
/// End-of-simulation strobe.
pub const END_OF_SIM: &str = "eos";
/// Prescaled valid strobe.
pub const VALID: &str = "s_axis_tvalid";
/// Frame-end strobe, declared only when frame marking is on.
pub const LAST: &str = "s_axis_tlast";

pub(crate) const PRESCALER_COUNTER: &str = "prescaler_cnt";
pub(crate) const FRAME_COUNTER: &str = "tlast_cnt";
pub(crate) const TAG_COUNTER: &str = "tuser_cnt";
pub(crate) const POINTER: &str = "pointer";

/// One `signal` declaration in the architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalDecl {
    /// Signal name.
    pub name: String,
    /// VHDL subtype indication.
    pub ty: String,
    /// Initial value, if any.
    pub init: Option<String>,
}

impl SignalDecl {
    fn new(name: &str, ty: impl Into<String>, init: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.into(),
            init: init.map(str::to_string),
        }
    }

    /// Renders the declaration without indentation.
    pub fn render(&self) -> String {
        match &self.init {
            Some(init) => format!("signal {} : {} := {};", self.name, self.ty, init),
            None => format!("signal {} : {};", self.name, self.ty),
        }
    }
}

/// A concurrent assignment between a DUT net and its tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tap {
    /// The net named after the DUT port.
    pub net: String,
    /// The `_i` or `_o` companion.
    pub tap: String,
    /// The DUT port direction.
    pub direction: Direction,
}

impl Tap {
    /// Renders the assignment: inputs are driven from the tap, outputs are
    /// copied to it.
    pub fn render(&self) -> String {
        match self.direction {
            Direction::In => format!("{} <= {};", self.net, self.tap),
            Direction::Out => format!("{} <= {};", self.tap, self.net),
        }
    }
}

/// Returns the VHDL type for a signal kind, or `None` for an unresolved width.
pub fn vhdl_type(kind: &SignalKind) -> Option<String> {
    match kind {
        SignalKind::Scalar => Some("std_logic".to_string()),
        SignalKind::Vector(Width::Resolved(bits)) => {
            Some(format!("std_logic_vector({} downto 0)", bits.saturating_sub(1)))
        }
        SignalKind::Vector(Width::Unresolved(_)) => None,
    }
}

/// The signals of one harness.
#[derive(Debug, Clone)]
pub struct BenchSignals {
    wires: Interface,
    decls: Vec<SignalDecl>,
    taps: Vec<Tap>,
    frame_marking: bool,
    symbol_tag: bool,
}

impl BenchSignals {
    /// Creates the fixed signal set of a harness named `bench`.
    pub fn new(bench: &str) -> Self {
        let mut signals = Self {
            wires: Interface::new(bench),
            decls: Vec::new(),
            taps: Vec::new(),
            frame_marking: false,
            symbol_tag: false,
        };
        for name in [CLOCK, RESET, END_OF_SIM] {
            signals.push_wire(Signal::scalar(name, Direction::In), Some("'0'"));
        }
        signals.push_decl(SignalDecl::new(
            PRESCALER_COUNTER,
            "natural range 0 to PRESCALER-1",
            None,
        ));
        signals.push_wire(Signal::scalar(VALID, Direction::In), Some("'0'"));
        signals.push_decl(SignalDecl::new(
            POINTER,
            "natural range 0 to LUT_DEPTH-1",
            None,
        ));
        signals
    }

    /// Plans the signals for a harness wrapping `duts`, in order.
    pub fn plan(
        bench: &str,
        duts: &[Interface],
        stream: &StreamSection,
    ) -> Result<Self, HarnessError> {
        let mut signals = Self::new(bench);
        for dut in duts {
            for port in dut.ports() {
                signals.note_markers(port.name(), stream);
                signals.add_port(dut.name(), port)?;
            }
        }
        Ok(signals)
    }

    /// Harness signals a DUT port can be wired to.
    pub fn wires(&self) -> &Interface {
        &self.wires
    }

    /// All `signal` declarations in declaration order.
    pub fn decls(&self) -> &[SignalDecl] {
        &self.decls
    }

    /// Net/tap assignments in DUT port order.
    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    /// Returns `true` if some DUT port carries the frame-end marker.
    pub fn frame_marking(&self) -> bool {
        self.frame_marking
    }

    /// Returns `true` if some DUT port carries the symbol tag marker.
    pub fn symbol_tag(&self) -> bool {
        self.symbol_tag
    }

    fn note_markers(&mut self, port: &str, stream: &StreamSection) {
        let lower = port.to_ascii_lowercase();
        if !self.frame_marking && lower.contains(&stream.frame_end_marker.to_ascii_lowercase()) {
            log::debug!("port '{port}' enables frame-end generation");
            self.frame_marking = true;
            self.push_decl(SignalDecl::new(FRAME_COUNTER, "natural range 0 to 1023", None));
            self.push_wire(Signal::scalar(LAST, Direction::In), Some("'0'"));
        }
        if !self.symbol_tag && lower.contains(&stream.symbol_tag_marker.to_ascii_lowercase()) {
            log::debug!("port '{port}' enables the symbol tag counter");
            self.symbol_tag = true;
            self.push_decl(SignalDecl::new(TAG_COUNTER, "natural range 0 to 7", None));
        }
    }

    fn add_port(&mut self, entity: &str, port: &Signal) -> Result<(), HarnessError> {
        if let Some(existing) = find_counterpart(self.wires.ports(), port) {
            log::debug!("{entity}.{} shares harness signal '{}'", port.name(), existing.name());
            return Ok(());
        }

        let conflict = |name: &str| HarnessError::SignalConflict {
            name: name.to_string(),
            entity: entity.to_string(),
        };
        let ty = vhdl_type(port.kind()).ok_or_else(|| HarnessError::UnresolvedWidth {
            entity: entity.to_string(),
            port: port.name().to_string(),
            expr: match port.kind().width() {
                Some(Width::Unresolved(expr)) => expr.clone(),
                _ => String::new(),
            },
        })?;
        let suffix = match port.direction() {
            Direction::In => "_i",
            Direction::Out => "_o",
        };
        let tap = format!("{}{suffix}", port.name());
        for name in [port.name(), tap.as_str()] {
            if self.is_declared(name) {
                return Err(conflict(name));
            }
        }

        self.push_decl(SignalDecl::new(port.name(), ty.clone(), None));
        self.push_decl(SignalDecl::new(&tap, ty, None));
        self.wires.push_port(port.renamed(port.name(), port.direction()));
        self.taps.push(Tap {
            net: port.name().to_string(),
            tap,
            direction: port.direction(),
        });
        Ok(())
    }

    fn is_declared(&self, name: &str) -> bool {
        self.decls.iter().any(|d| eq_ignore_case(&d.name, name))
    }

    fn push_wire(&mut self, signal: Signal, init: Option<&str>) {
        let ty = vhdl_type(signal.kind()).unwrap_or_default();
        self.push_decl(SignalDecl::new(signal.name(), ty, init));
        self.wires.push_port(signal);
    }

    fn push_decl(&mut self, decl: SignalDecl) {
        self.decls.push(decl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dut(name: &str, ports: Vec<Signal>) -> Interface {
        let mut iface = Interface::new(name);
        for port in ports {
            iface.push_port(port);
        }
        iface
    }

    fn names(signals: &BenchSignals) -> Vec<&str> {
        signals.decls().iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn fixed_signals() {
        let signals = BenchSignals::new("tb");
        assert_eq!(
            names(&signals),
            vec!["clk", "resetn", "eos", "prescaler_cnt", "s_axis_tvalid", "pointer"]
        );
        assert_eq!(signals.decls()[0].render(), "signal clk : std_logic := '0';");
        assert!(!signals.frame_marking());
    }

    #[test]
    fn control_ports_are_shared() {
        let d = dut(
            "core",
            vec![
                Signal::scalar("clk", Direction::In),
                Signal::scalar("resetn", Direction::In),
                Signal::vector("din", Direction::In, Width::Resolved(8)),
                Signal::vector("dout", Direction::Out, Width::Resolved(16)),
            ],
        );
        let signals = BenchSignals::plan("tb", &[d], &StreamSection::default()).unwrap();
        let taps: Vec<_> = signals.taps().iter().map(Tap::render).collect();
        assert_eq!(taps, vec!["din <= din_i;", "dout_o <= dout;"]);
        let decls: Vec<_> = signals.decls().iter().map(SignalDecl::render).collect();
        assert!(decls.contains(&"signal din_i : std_logic_vector(7 downto 0);".to_string()));
        assert!(decls.contains(&"signal dout : std_logic_vector(15 downto 0);".to_string()));
    }

    #[test]
    fn markers_add_counters_once() {
        let d = dut(
            "core",
            vec![
                Signal::scalar("s_axis_tlast", Direction::In),
                Signal::scalar("m_axis_tlast", Direction::Out),
                Signal::scalar("s_axis_tuser", Direction::In),
                Signal::scalar("m_axis_TUSER", Direction::Out),
            ],
        );
        let signals = BenchSignals::plan("tb", &[d], &StreamSection::default()).unwrap();
        assert!(signals.frame_marking());
        assert!(signals.symbol_tag());
        let all = names(&signals);
        assert_eq!(all.iter().filter(|n| **n == "tlast_cnt").count(), 1);
        assert_eq!(all.iter().filter(|n| **n == "tuser_cnt").count(), 1);
        assert_eq!(all.iter().filter(|n| **n == "s_axis_tlast").count(), 1);
        // The DUT's own s_axis_tlast is wired to the harness strobe.
        assert!(!signals.taps().iter().any(|t| t.net == "s_axis_tlast"));
    }

    #[test]
    fn shared_net_across_duts() {
        let a = dut("a", vec![Signal::scalar("valid", Direction::Out)]);
        let b = dut("b", vec![Signal::scalar("valid", Direction::In)]);
        let signals = BenchSignals::plan("tb", &[a, b], &StreamSection::default()).unwrap();
        assert_eq!(signals.taps().len(), 1);
        assert_eq!(
            signals.wires().ports().iter().filter(|s| s.name() == "valid").count(),
            1
        );
    }

    #[test]
    fn unresolved_width_is_an_error() {
        let d = dut(
            "fifo",
            vec![Signal::vector(
                "dout",
                Direction::Out,
                Width::Unresolved("WIDTH-1 downto 0".into()),
            )],
        );
        let err = BenchSignals::plan("tb", &[d], &StreamSection::default()).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::UnresolvedWidth { ref expr, .. } if expr == "WIDTH-1 downto 0"
        ));
    }

    #[test]
    fn kind_mismatch_is_a_conflict() {
        let a = dut("a", vec![Signal::scalar("data", Direction::Out)]);
        let b = dut(
            "b",
            vec![Signal::vector("data", Direction::In, Width::Resolved(4))],
        );
        let err = BenchSignals::plan("tb", &[a, b], &StreamSection::default()).unwrap_err();
        assert!(matches!(err, HarnessError::SignalConflict { ref name, .. } if name == "data"));

        let c = dut("c", vec![Signal::vector("clk", Direction::In, Width::Resolved(2))]);
        assert!(BenchSignals::plan("tb", &[c], &StreamSection::default()).is_err());
    }

    #[test]
    fn vector_types() {
        assert_eq!(
            vhdl_type(&SignalKind::Vector(Width::Resolved(1))).as_deref(),
            Some("std_logic_vector(0 downto 0)")
        );
        assert_eq!(vhdl_type(&SignalKind::Vector(Width::Unresolved("N".into()))), None);
    }
}
