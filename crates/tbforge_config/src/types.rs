//! Configuration types deserialized from `tbforge.toml`.

use serde::Deserialize;
use tbforge_common::{Frequency, ParseFrequencyError, TimeUnit};

/// The full harness configuration.
///
/// Every section is optional; a missing file or an empty file yields the
/// same [`Default`] configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HarnessConfig {
    /// Harness entity naming, output language, and time unit.
    #[serde(default)]
    pub bench: BenchSection,
    /// The simulated clock.
    #[serde(default)]
    pub clock: ClockSection,
    /// The streaming stimulus generators.
    #[serde(default)]
    pub stream: StreamSection,
    /// The companion stimulus package.
    #[serde(default)]
    pub stimulus: StimulusSection,
    /// Libraries and packages made visible to the harness, in order.
    #[serde(default = "default_libraries", rename = "library")]
    pub libraries: Vec<LibrarySpec>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            bench: BenchSection::default(),
            clock: ClockSection::default(),
            stream: StreamSection::default(),
            stimulus: StimulusSection::default(),
            libraries: default_libraries(),
        }
    }
}

/// The `[bench]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchSection {
    /// Harness entity name. Defaults to the output file stem.
    #[serde(default)]
    pub name: Option<String>,
    /// Output language. Only `"vhdl"` is supported.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Unit of the clock half period literal.
    #[serde(default)]
    pub time_unit: TimeUnit,
}

impl Default for BenchSection {
    fn default() -> Self {
        Self {
            name: None,
            lang: default_lang(),
            time_unit: TimeUnit::default(),
        }
    }
}

/// The `[clock]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClockSection {
    /// The clock frequency as a string (e.g., `"100MHz"`), parsed to [`Frequency`].
    #[serde(default = "default_frequency")]
    pub frequency: String,
}

impl ClockSection {
    /// Parses the configured frequency.
    pub fn frequency(&self) -> Result<Frequency, ParseFrequencyError> {
        self.frequency.parse()
    }
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
        }
    }
}

/// The `[stream]` section.
///
/// `prescaler`, `frame_size` and `lut_depth` are optional. When set, the
/// harness declares a local constant of the same name; when unset, the value
/// comes from the stimulus package.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreamSection {
    /// Cycles between two valid pulses.
    #[serde(default)]
    pub prescaler: Option<u32>,
    /// Valid pulses per frame.
    #[serde(default)]
    pub frame_size: Option<u32>,
    /// Depth of the stimulus lookup table.
    #[serde(default)]
    pub lut_depth: Option<u32>,
    /// Port-name substring that enables frame-end generation.
    #[serde(default = "default_frame_end_marker")]
    pub frame_end_marker: String,
    /// Port-name substring that enables the symbol tag counter.
    #[serde(default = "default_symbol_tag_marker")]
    pub symbol_tag_marker: String,
}

impl Default for StreamSection {
    fn default() -> Self {
        Self {
            prescaler: None,
            frame_size: None,
            lut_depth: None,
            frame_end_marker: default_frame_end_marker(),
            symbol_tag_marker: default_symbol_tag_marker(),
        }
    }
}

/// The `[stimulus]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StimulusSection {
    /// The package in `work` that declares the stimulus constants.
    #[serde(default = "default_package")]
    pub package: String,
    /// Constants the package exports. `None` means the package is assumed to
    /// export every generic a DUT declares.
    #[serde(default)]
    pub constants: Option<Vec<String>>,
}

impl Default for StimulusSection {
    fn default() -> Self {
        Self {
            package: default_package(),
            constants: None,
        }
    }
}

/// One `[[library]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibrarySpec {
    /// Library name, e.g. `ieee`.
    pub name: String,
    /// Packages to `use` from the library.
    #[serde(default)]
    pub packages: Vec<String>,
}

impl LibrarySpec {
    /// Creates a library entry.
    pub fn new(name: &str, packages: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            packages: packages.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// The library list used when the configuration has no `[[library]]` entry.
pub fn default_libraries() -> Vec<LibrarySpec> {
    vec![
        LibrarySpec::new("ieee", &["numeric_std", "std_logic_textio"]),
        LibrarySpec::new("std", &["textio"]),
        LibrarySpec::new("ieee_proposed", &["fixed_pkg", "float_pkg"]),
    ]
}

fn default_lang() -> String {
    "vhdl".to_string()
}

fn default_frequency() -> String {
    "100MHz".to_string()
}

fn default_frame_end_marker() -> String {
    "last".to_string()
}

fn default_symbol_tag_marker() -> String {
    "tuser".to_string()
}

fn default_package() -> String {
    "package_tb".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config: HarnessConfig = toml::from_str("").unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.libraries.len(), 3);
        assert_eq!(config.stimulus.package, "package_tb");
        assert_eq!(config.bench.time_unit, TimeUnit::Ns);
    }

    #[test]
    fn library_array_replaces_defaults() {
        let config: HarnessConfig = toml::from_str(
            r#"
[[library]]
name = "unisim"
packages = ["vcomponents"]
"#,
        )
        .unwrap();
        assert_eq!(config.libraries, vec![LibrarySpec::new("unisim", &["vcomponents"])]);
    }

    #[test]
    fn clock_frequency_parses() {
        let clock = ClockSection {
            frequency: "250MHz".to_string(),
        };
        assert_eq!(clock.frequency().unwrap(), Frequency::from_mhz(250.0));
        assert!(ClockSection {
            frequency: "fast".to_string()
        }
        .frequency()
        .is_err());
    }
}
