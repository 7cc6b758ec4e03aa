//! VHDL basic identifier checks.

/// Returns `true` if `s` is a legal VHDL basic identifier.
///
/// A basic identifier starts with a letter, continues with letters, digits,
/// or single underscores, and does not end with an underscore.
pub fn is_basic_identifier(s: &str) -> bool {
    let bytes = s.as_bytes();
    let Some(&first) = bytes.first() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    if bytes[bytes.len() - 1] == b'_' {
        return false;
    }
    let mut prev_underscore = false;
    for &b in &bytes[1..] {
        match b {
            b'_' if prev_underscore => return false,
            b'_' => prev_underscore = true,
            b if b.is_ascii_alphanumeric() => prev_underscore = false,
            _ => return false,
        }
    }
    true
}

/// Compares two identifiers the way VHDL does (ASCII case-insensitive).
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
