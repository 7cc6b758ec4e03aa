//! Library resolution: turning the configured library list into the clauses
//! written at the top of the harness.

use crate::types::{HarnessConfig, LibrarySpec};
use tbforge_common::eq_ignore_case;

/// One `library` clause and the packages it makes visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryClause {
    /// The library name as first written.
    pub library: String,
    /// Packages in first-seen order, without duplicates.
    pub packages: Vec<String>,
}

impl LibraryClause {
    fn new(library: &str) -> Self {
        Self {
            library: library.to_string(),
            packages: Vec::new(),
        }
    }

    fn add_package(&mut self, package: &str) {
        if !self.packages.iter().any(|p| eq_ignore_case(p, package)) {
            self.packages.push(package.to_string());
        }
    }
}

/// The library every harness needs for `std_logic`.
pub const BASELINE_LIBRARY: &str = "ieee";

/// The package every harness needs for `std_logic`.
pub const BASELINE_PACKAGE: &str = "std_logic_1164";

/// Builds the ordered, deduplicated library clauses for a harness.
///
/// `ieee.std_logic_1164` always comes first. The configured libraries follow
/// in order, then `work` with the stimulus package. A library named twice
/// (in any case) becomes one clause holding the union of its packages.
pub fn resolve_libraries(config: &HarnessConfig) -> Vec<LibraryClause> {
    let stimulus = LibrarySpec {
        name: "work".to_string(),
        packages: vec![config.stimulus.package.clone()],
    };

    let mut clauses = vec![LibraryClause::new(BASELINE_LIBRARY)];
    clauses[0].add_package(BASELINE_PACKAGE);

    for spec in config.libraries.iter().chain(std::iter::once(&stimulus)) {
        let idx = match clauses
            .iter()
            .position(|c| eq_ignore_case(&c.library, &spec.name))
        {
            Some(idx) => idx,
            None => {
                clauses.push(LibraryClause::new(&spec.name));
                clauses.len() - 1
            }
        };
        for package in &spec.packages {
            clauses[idx].add_package(package);
        }
    }
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    fn names(clauses: &[LibraryClause]) -> Vec<&str> {
        clauses.iter().map(|c| c.library.as_str()).collect()
    }

    #[test]
    fn defaults_resolve_in_order() {
        let clauses = resolve_libraries(&HarnessConfig::default());
        assert_eq!(names(&clauses), vec!["ieee", "std", "ieee_proposed", "work"]);
        assert_eq!(
            clauses[0].packages,
            vec!["std_logic_1164", "numeric_std", "std_logic_textio"]
        );
        assert_eq!(clauses[3].packages, vec!["package_tb"]);
    }

    #[test]
    fn duplicates_merge_case_insensitively() {
        let config = load_config_from_str(
            r#"
[[library]]
name = "IEEE"
packages = ["numeric_std", "STD_LOGIC_1164"]

[[library]]
name = "unisim"
packages = ["vcomponents"]

[[library]]
name = "ieee"
packages = ["numeric_std", "math_real"]
"#,
        )
        .unwrap();
        let clauses = resolve_libraries(&config);
        assert_eq!(names(&clauses), vec!["ieee", "unisim", "work"]);
        assert_eq!(
            clauses[0].packages,
            vec!["std_logic_1164", "numeric_std", "math_real"]
        );
    }

    #[test]
    fn stimulus_package_joins_configured_work() {
        let config = load_config_from_str(
            r#"
[stimulus]
package = "stim"

[[library]]
name = "work"
packages = ["helpers", "stim"]
"#,
        )
        .unwrap();
        let clauses = resolve_libraries(&config);
        assert_eq!(names(&clauses), vec!["ieee", "work"]);
        assert_eq!(clauses[1].packages, vec!["helpers", "stim"]);
    }
}
