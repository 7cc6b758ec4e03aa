//! Fail-open parsing: malformed lists degrade to partial models without
//! diagnostics, and strict mode reports what permissive mode drops.

use tbforge_conformance::{entity_source, parse};
use tbforge_diagnostics::code::MALFORMED_LINE;
use tbforge_model::{Signal, Width};
use tbforge_vhdl_parser::ParseMode;

fn port_names(src: &str, mode: ParseMode) -> Vec<String> {
    parse(src, mode)
        .interface
        .ports()
        .iter()
        .map(|p| Signal::name(p).to_string())
        .collect()
}

const MISSING_COLON: &str = r#"
entity bridge is
    port (
        clk  : in    std_logic;
        sda    inout std_logic;
        scl  : out   std_logic
    );
end entity bridge;
"#;

#[test]
fn malformed_entry_truncates_list() {
    let result = parse(MISSING_COLON, ParseMode::Permissive);
    assert_eq!(result.interface.name(), "bridge");
    assert_eq!(port_names(MISSING_COLON, ParseMode::Permissive), vec!["clk"]);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn strict_mode_reports_and_keeps_reading() {
    let result = parse(MISSING_COLON, ParseMode::Strict);
    assert_eq!(port_names(MISSING_COLON, ParseMode::Strict), vec!["clk", "scl"]);
    assert!(result.has_errors);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, MALFORMED_LINE);
    assert_eq!(result.diagnostics[0].location.line, 5);
}

#[test]
fn bidirectional_port_is_skipped_and_list_continues() {
    let src = entity_source(
        "pads",
        &[],
        &[
            ("clk", "in", "std_logic"),
            ("sda", "inout", "std_logic"),
            ("d", "in", "std_logic_vector(7 downto 0)"),
            ("q", "out", "std_logic"),
        ],
    );
    for mode in [ParseMode::Permissive, ParseMode::Strict] {
        let result = parse(&src, mode);
        assert_eq!(port_names(&src, mode), vec!["clk", "d", "q"]);
        assert!(!result.has_errors);
        assert!(result.diagnostics.is_empty());
    }
}

#[test]
fn oversized_vector_is_unresolved() {
    let src = entity_source(
        "huge",
        &[],
        &[
            ("d", "in", "std_logic_vector(4294967295 downto 0)"),
            ("q", "out", "std_logic"),
        ],
    );
    let iface = parse(&src, ParseMode::Permissive).interface;
    assert_eq!(port_names(&src, ParseMode::Permissive), vec!["d", "q"]);
    assert_eq!(
        iface.ports()[0].kind().width(),
        Some(&Width::Unresolved("4294967295 downto 0".to_string()))
    );
}

#[test]
fn blank_line_ends_list() {
    let src = "\
entity gap is
    port (
        a : in std_logic;

        b : in std_logic
    );
end entity gap;
";
    assert_eq!(port_names(src, ParseMode::Permissive), vec!["a"]);
    assert_eq!(port_names(src, ParseMode::Strict), vec!["a", "b"]);
}

#[test]
fn short_line_ends_list() {
    let src = "\
entity wrapped is
    port (
        a : in std_logic;
        b :
            in std_logic;
        c : in std_logic
    );
end entity wrapped;
";
    let result = parse(src, ParseMode::Permissive);
    assert_eq!(port_names(src, ParseMode::Permissive), vec!["a"]);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn truncated_generics_still_allow_ports() {
    let src = "\
entity mixed is
    generic (
        DEPTH : natural := 16;
        bad generic line here;
        WIDTH : natural := 8
    );
    port (
        clk : in std_logic
    );
end entity mixed;
";
    let iface = parse(src, ParseMode::Permissive).interface;
    let generics: Vec<&str> = iface.generics().iter().map(|g| g.name()).collect();
    assert_eq!(generics, vec!["DEPTH"]);
    assert_eq!(port_names(src, ParseMode::Permissive), vec!["clk"]);
}

#[test]
fn missing_entity_yields_empty_model() {
    let iface = parse("package p is\nend package p;\n", ParseMode::Permissive).interface;
    assert!(iface.name().is_empty());
    assert!(iface.ports().is_empty());
    assert!(iface.generics().is_empty());
}

#[test]
fn unterminated_list_keeps_what_was_read() {
    let src = "entity cut is\n    port (\n        a : in std_logic;\n        b : out std_logic;\n";
    assert_eq!(port_names(src, ParseMode::Permissive), vec!["a", "b"]);
}
