//! Library and `use` clauses at the top of the harness.

use crate::writer::VhdlWriter;
use tbforge_config::LibraryClause;

/// Writes one `library` clause per entry followed by its `use` clauses, with
/// a blank line between libraries.
pub fn write_libraries(w: &mut VhdlWriter, clauses: &[LibraryClause]) {
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        w.line(format!("library {};", clause.library));
        let lib = clause.library.to_ascii_lowercase();
        for package in &clause.packages {
            w.line(format!("use {lib}.{package}.all;"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbforge_config::{resolve_libraries, HarnessConfig};

    #[test]
    fn default_clauses() {
        let mut w = VhdlWriter::new();
        write_libraries(&mut w, &resolve_libraries(&HarnessConfig::default()));
        assert_eq!(
            w.finish(),
            "library ieee;
use ieee.std_logic_1164.all;
use ieee.numeric_std.all;
use ieee.std_logic_textio.all;

library std;
use std.textio.all;

library ieee_proposed;
use ieee_proposed.fixed_pkg.all;
use ieee_proposed.float_pkg.all;

library work;
use work.package_tb.all;
"
        );
    }

    #[test]
    fn each_library_declared_once() {
        let clauses = vec![
            LibraryClause {
                library: "IEEE".to_string(),
                packages: vec!["std_logic_1164".to_string()],
            },
            LibraryClause {
                library: "unisim".to_string(),
                packages: vec![],
            },
        ];
        let mut w = VhdlWriter::new();
        write_libraries(&mut w, &clauses);
        let out = w.finish();
        assert_eq!(out.matches("library ").count(), 2);
        assert!(out.contains("use ieee.std_logic_1164.all;"));
    }
}
