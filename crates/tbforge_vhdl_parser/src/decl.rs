//! Interpretation of single port and generic list entries.

use crate::lexer::DeclLine;
use tbforge_common::is_basic_identifier;
use tbforge_model::{Direction, Generic, Signal, Width};

/// The outcome of reading one list entry.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Reading<T> {
    /// A well-formed entry. `closes_list` is set when the entry is followed by
    /// the list's closing parenthesis on the same line.
    Item { item: T, closes_list: bool },
    /// A well-formed entry of a type the model does not represent.
    Skipped { reason: String, closes_list: bool },
    /// The line does not have the `<name> : <rest>` shape.
    Malformed(String),
}

/// Reads `<name> : <direction> <type>[(<range>)]`.
pub(crate) fn read_port(line: &DeclLine<'_>) -> Reading<Signal> {
    let (name, rest) = match split_name(line.text) {
        Ok(parts) => parts,
        Err(msg) => return Reading::Malformed(msg),
    };
    let (rest, closes_list) = split_list_close(rest);

    let Some((mode, ty)) = rest.trim().split_once(char::is_whitespace) else {
        return Reading::Malformed(format!("port '{name}' has no type"));
    };
    let direction = match mode.to_ascii_lowercase().as_str() {
        "in" => Direction::In,
        "out" | "buffer" => Direction::Out,
        other => {
            return Reading::Skipped {
                reason: format!("port '{name}' has unsupported mode '{other}'"),
                closes_list,
            }
        }
    };

    let ty = strip_default(ty).trim().trim_end_matches(';').trim();
    let lower = ty.to_ascii_lowercase();
    let signal = if lower.contains("vector") {
        Signal::vector(name, direction, vector_width(ty))
    } else if lower.starts_with("std_logic") || lower.starts_with("std_ulogic") {
        Signal::scalar(name, direction)
    } else {
        return Reading::Skipped {
            reason: format!("port '{name}' has unsupported type '{ty}'"),
            closes_list,
        };
    };
    Reading::Item {
        item: signal,
        closes_list,
    }
}

/// Reads `<name> : <type> [:= <default>]`. Only the name is kept; every
/// generic is modeled as a scalar.
pub(crate) fn read_generic(line: &DeclLine<'_>) -> Reading<Generic> {
    match split_name(line.text) {
        Ok((name, rest)) => Reading::Item {
            item: Generic::new(name),
            closes_list: split_list_close(rest).1,
        },
        Err(msg) => Reading::Malformed(msg),
    }
}

/// Computes the width of a vector type from its range constraint.
///
/// `std_logic_vector(7 downto 0)` is 8 bits. Any bound that is not an integer
/// literal makes the width [`Width::Unresolved`], carrying the range text.
pub(crate) fn vector_width(ty: &str) -> Width {
    let Some(range) = range_text(ty) else {
        return Width::Unresolved(ty.to_string());
    };
    let lower = range.to_ascii_lowercase();
    let bounds = if let Some((hi, lo)) = lower.split_once("downto") {
        Some((hi, lo))
    } else {
        lower.split_once(" to ").map(|(lo, hi)| (hi, lo))
    };
    let literal = bounds.and_then(|(hi, lo)| {
        let hi: u32 = hi.trim().parse().ok()?;
        let lo: u32 = lo.trim().parse().ok()?;
        if hi >= lo {
            (hi - lo).checked_add(1)
        } else {
            None
        }
    });
    match literal {
        Some(bits) => Width::Resolved(bits),
        None => Width::Unresolved(range.trim().to_string()),
    }
}

/// Returns the text inside the first balanced `( ... )` of `ty`.
fn range_text(ty: &str) -> Option<&str> {
    let open = ty.find('(')?;
    let mut depth = 0usize;
    for (offset, c) in ty[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&ty[open + 1..open + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits `name : rest`, validating the name.
fn split_name(text: &str) -> Result<(&str, &str), String> {
    let Some((name, rest)) = text.split_once(':') else {
        return Err(format!("expected '<name> : ...', found '{text}'"));
    };
    let name = name.trim();
    if !is_basic_identifier(name) {
        return Err(format!("'{name}' is not a plain identifier"));
    }
    Ok((name, rest))
}

/// Cuts `text` at the first `)` that has no matching `(`, which is the
/// closing parenthesis of the enclosing list.
fn split_list_close(text: &str) -> (&str, bool) {
    let mut depth = 0usize;
    for (pos, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return (&text[..pos], true),
            ')' => depth -= 1,
            _ => {}
        }
    }
    (text, false)
}

fn strip_default(ty: &str) -> &str {
    match ty.find(":=") {
        Some(pos) => &ty[..pos],
        None => ty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbforge_model::SignalKind;

    fn port(text: &str) -> Reading<Signal> {
        read_port(&DeclLine::new(1, text))
    }

    fn item(reading: Reading<Signal>) -> (Signal, bool) {
        match reading {
            Reading::Item { item, closes_list } => (item, closes_list),
            other => panic!("expected an item, got {other:?}"),
        }
    }

    #[test]
    fn scalar_port() {
        let (sig, closes) = item(port("clk : in std_logic;"));
        assert_eq!(sig.name(), "clk");
        assert_eq!(sig.direction(), Direction::In);
        assert_eq!(sig.kind(), &SignalKind::Scalar);
        assert!(!closes);
    }

    #[test]
    fn glued_colon() {
        let (sig, _) = item(port("resetn: in std_logic;"));
        assert_eq!(sig.name(), "resetn");
    }

    #[test]
    fn literal_vector_width() {
        let (sig, _) = item(port("data : out std_logic_vector(7 downto 0);"));
        assert_eq!(sig.direction(), Direction::Out);
        assert_eq!(sig.kind(), &SignalKind::Vector(Width::Resolved(8)));
    }

    #[test]
    fn spaced_range_and_ascending() {
        let (sig, _) = item(port("a : in std_logic_vector ( 31 downto 0 );"));
        assert_eq!(sig.kind().width(), Some(&Width::Resolved(32)));
        let (sig, _) = item(port("b : in std_logic_vector(0 to 3);"));
        assert_eq!(sig.kind().width(), Some(&Width::Resolved(4)));
    }

    #[test]
    fn generic_width_is_unresolved() {
        let (sig, _) = item(port("q : out std_logic_vector(WIDTH-1 downto 0);"));
        assert_eq!(
            sig.kind().width(),
            Some(&Width::Unresolved("WIDTH-1 downto 0".to_string()))
        );
    }

    #[test]
    fn nested_parens_unresolved() {
        assert_eq!(
            vector_width("std_logic_vector(2*(N)-1 downto 0)"),
            Width::Unresolved("2*(N)-1 downto 0".to_string())
        );
        assert_eq!(
            vector_width("std_logic_vector"),
            Width::Unresolved("std_logic_vector".to_string())
        );
    }

    #[test]
    fn width_beyond_u32_is_unresolved() {
        assert_eq!(
            vector_width("std_logic_vector(4294967295 downto 0)"),
            Width::Unresolved("4294967295 downto 0".to_string())
        );
        assert_eq!(
            vector_width("std_logic_vector(0 to 4294967295)"),
            Width::Unresolved("0 to 4294967295".to_string())
        );
        assert_eq!(
            vector_width("std_logic_vector(4294967294 downto 0)"),
            Width::Resolved(u32::MAX)
        );
    }

    #[test]
    fn closing_paren_on_last_port() {
        let (sig, closes) = item(port("dout : out std_logic_vector(7 downto 0));"));
        assert_eq!(sig.kind().width(), Some(&Width::Resolved(8)));
        assert!(closes);
        let (_, closes) = item(port("led : out std_logic);"));
        assert!(closes);
    }

    #[test]
    fn buffer_maps_to_out() {
        let (sig, _) = item(port("cnt : buffer std_logic;"));
        assert_eq!(sig.direction(), Direction::Out);
    }

    #[test]
    fn inout_is_skipped() {
        assert!(matches!(
            port("sda : inout std_logic;"),
            Reading::Skipped { closes_list: false, .. }
        ));
        assert!(matches!(
            port("pad : linkage std_logic);"),
            Reading::Skipped { closes_list: true, .. }
        ));
    }

    #[test]
    fn missing_colon_is_malformed() {
        assert!(matches!(port("clk in std_logic;"), Reading::Malformed(_)));
        assert!(matches!(port("a, b : in std_logic;"), Reading::Malformed(_)));
    }

    #[test]
    fn unsupported_type_is_skipped() {
        assert!(matches!(
            port("count : out integer range 0 to 15;"),
            Reading::Skipped { .. }
        ));
    }

    #[test]
    fn default_value_is_ignored() {
        let (sig, _) = item(port("en : in std_logic := '1';"));
        assert_eq!(sig.kind(), &SignalKind::Scalar);
    }

    #[test]
    fn generic_keeps_only_the_name() {
        match read_generic(&DeclLine::new(1, "DEPTH : natural := 16);")) {
            Reading::Item { item, closes_list } => {
                assert_eq!(item, Generic::new("DEPTH"));
                assert!(closes_list);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            read_generic(&DeclLine::new(1, "DEPTH natural := 16")),
            Reading::Malformed(_)
        ));
    }
}
