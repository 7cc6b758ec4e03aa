//! Configuration file discovery, loading, and validation.

use crate::error::ConfigError;
use crate::types::HarnessConfig;
use std::path::Path;
use tbforge_common::is_basic_identifier;

/// The file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "tbforge.toml";

/// Largest frame size the generated frame counter can hold.
pub const MAX_FRAME_SIZE: u32 = 1024;

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<HarnessConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `tbforge.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<HarnessConfig, ConfigError> {
    let config: HarnessConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Finds the configuration for a run.
///
/// An explicit path must exist. Without one, `<dir>/tbforge.toml` is used if
/// present, otherwise the built-in defaults.
pub fn discover_config(explicit: Option<&Path>, dir: &Path) -> Result<HarnessConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let candidate = dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        load_config(&candidate)
    } else {
        Ok(HarnessConfig::default())
    }
}

/// Validates that configuration values are consistent.
pub fn validate_config(config: &HarnessConfig) -> Result<(), ConfigError> {
    if !config.bench.lang.eq_ignore_ascii_case("vhdl") {
        return Err(ConfigError::UnsupportedLanguage(config.bench.lang.clone()));
    }
    if let Some(name) = &config.bench.name {
        check_identifier("bench.name", name)?;
    }

    let frequency = config
        .clock
        .frequency()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
    if !frequency.is_usable() {
        return Err(ConfigError::ValidationError(format!(
            "clock.frequency must be above zero, got '{}'",
            config.clock.frequency
        )));
    }
    if frequency.half_period_fs().is_none() {
        return Err(ConfigError::ValidationError(format!(
            "clock.frequency '{}' is too high: the half period is below one femtosecond",
            config.clock.frequency
        )));
    }

    let stream = &config.stream;
    if stream.prescaler == Some(0) {
        return Err(ConfigError::ValidationError(
            "stream.prescaler must be at least 1".to_string(),
        ));
    }
    if let Some(size) = stream.frame_size {
        if !(1..=MAX_FRAME_SIZE).contains(&size) {
            return Err(ConfigError::ValidationError(format!(
                "stream.frame_size must be between 1 and {MAX_FRAME_SIZE}, got {size}"
            )));
        }
    }
    if stream.lut_depth == Some(0) {
        return Err(ConfigError::ValidationError(
            "stream.lut_depth must be at least 1".to_string(),
        ));
    }
    if stream.frame_end_marker.is_empty() {
        return Err(ConfigError::MissingField("stream.frame_end_marker".to_string()));
    }
    if stream.symbol_tag_marker.is_empty() {
        return Err(ConfigError::MissingField("stream.symbol_tag_marker".to_string()));
    }

    if config.stimulus.package.is_empty() {
        return Err(ConfigError::MissingField("stimulus.package".to_string()));
    }
    check_identifier("stimulus.package", &config.stimulus.package)?;
    for constant in config.stimulus.constants.iter().flatten() {
        check_identifier("stimulus.constants", constant)?;
    }

    for lib in &config.libraries {
        check_identifier("library.name", &lib.name)?;
        for package in &lib.packages {
            check_identifier("library.packages", package)?;
        }
    }
    Ok(())
}

fn check_identifier(field: &str, value: &str) -> Result<(), ConfigError> {
    if is_basic_identifier(value) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{field}: '{value}' is not a valid VHDL identifier"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbforge_common::TimeUnit;

    #[test]
    fn parse_full_config() {
        let toml = r#"
[bench]
name = "top_tb"
lang = "VHDL"
time_unit = "ps"

[clock]
frequency = "250MHz"

[stream]
prescaler = 4
frame_size = 8
lut_depth = 1024
frame_end_marker = "eof"

[stimulus]
package = "stim_pkg"
constants = ["WIDTH", "MODE"]

[[library]]
name = "ieee"
packages = ["numeric_std"]

[[library]]
name = "unisim"
packages = ["vcomponents"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.bench.name.as_deref(), Some("top_tb"));
        assert_eq!(config.bench.time_unit, TimeUnit::Ps);
        assert_eq!(config.clock.frequency().unwrap().mhz(), 250.0);
        assert_eq!(config.stream.prescaler, Some(4));
        assert_eq!(config.stream.frame_end_marker, "eof");
        assert_eq!(config.stream.symbol_tag_marker, "tuser");
        assert_eq!(config.stimulus.constants.as_ref().map(Vec::len), Some(2));
        assert_eq!(config.libraries.len(), 2);
    }

    #[test]
    fn unsupported_language_is_fatal() {
        let err = load_config_from_str("[bench]\nlang = \"verilog\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedLanguage(lang) if lang == "verilog"));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn unknown_time_unit_is_a_parse_error() {
        let err = load_config_from_str("[bench]\ntime_unit = \"hours\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn stream_bounds() {
        for bad in [
            "[stream]\nprescaler = 0\n",
            "[stream]\nframe_size = 0\n",
            "[stream]\nframe_size = 1025\n",
            "[stream]\nlut_depth = 0\n",
        ] {
            let err = load_config_from_str(bad).unwrap_err();
            assert!(matches!(err, ConfigError::ValidationError(_)), "{bad}");
        }
        assert!(load_config_from_str("[stream]\nframe_size = 1024\n").is_ok());
    }

    #[test]
    fn bad_frequency() {
        let err = load_config_from_str("[clock]\nfrequency = \"0MHz\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        let err = load_config_from_str("[clock]\nfrequency = \"quick\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        let err = load_config_from_str("[clock]\nfrequency = \"10000000GHz\"\n").unwrap_err();
        assert!(err.to_string().contains("femtosecond"), "{err}");
    }

    #[test]
    fn coarse_time_unit_is_accepted() {
        let config =
            load_config_from_str("[bench]\ntime_unit = \"s\"\n\n[clock]\nfrequency = \"1GHz\"\n")
                .unwrap();
        assert_eq!(config.bench.time_unit, tbforge_common::TimeUnit::S);
    }

    #[test]
    fn identifiers_are_checked() {
        let err = load_config_from_str("[bench]\nname = \"top tb\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        let err = load_config_from_str("[stimulus]\npackage = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
        let err =
            load_config_from_str("[[library]]\nname = \"ieee\"\npackages = [\"fixed pkg\"]\n")
                .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn discover_prefers_explicit_then_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = discover_config(None, dir.path()).unwrap();
        assert_eq!(config, HarnessConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[stream]\nprescaler = 2\n").unwrap();
        let config = discover_config(None, dir.path()).unwrap();
        assert_eq!(config.stream.prescaler, Some(2));

        let other = dir.path().join("other.toml");
        std::fs::write(&other, "[stream]\nprescaler = 9\n").unwrap();
        let config = discover_config(Some(&other), dir.path()).unwrap();
        assert_eq!(config.stream.prescaler, Some(9));
    }

    #[test]
    fn missing_explicit_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_config(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
