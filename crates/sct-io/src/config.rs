//! Options file loading.
//!
//! Options live in a `sector` section, mirroring the layout of the wider
//! model configuration:
//!
//! ```toml
//! [sector]
//! relocation_steel = false
//! flexibility_steel = true
//! ```
//!
//! Unknown sections and keys are ignored; missing keys default to disabled.

use anyhow::{Context, Result};
use sct_industry::SteelOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorConfig {
    pub sector: SteelOptions,
}

/// Load a config file, choosing the parser by extension (`toml`, `yaml`/`yml`,
/// `json`) and trying each in turn otherwise.
pub fn load_config(path: &Path) -> Result<SectorConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config '{}'", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => {
            toml::from_str(&data).context("parsing config toml")
        }
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            parse_yaml(&data)
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(&data).context("parsing config json")
        }
        _ => toml::from_str(&data)
            .map_err(anyhow::Error::from)
            .or_else(|_| parse_yaml(&data))
            .or_else(|_| serde_json::from_str(&data).map_err(anyhow::Error::from))
            .context("parsing config"),
    }
}

fn parse_yaml(data: &str) -> Result<SectorConfig> {
    // an empty YAML document is null rather than an empty mapping
    if data.trim().is_empty() {
        return Ok(SectorConfig::default());
    }
    serde_yaml::from_str(data).context("parsing config yaml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_toml_sector_section() {
        let file = write(
            ".toml",
            "[sector]\nflexibility_steel = true\n\n[costs]\nyear = 2030\n",
        );
        let config = load_config(file.path()).unwrap();
        assert!(config.sector.flexibility_steel);
        assert!(!config.sector.relocation_steel);
    }

    #[test]
    fn test_yaml_sector_section() {
        let file = write(".yaml", "sector:\n  relocation_steel: true\n");
        let config = load_config(file.path()).unwrap();
        assert!(config.sector.relocation_steel);
        assert!(!config.sector.flexibility_steel);
    }

    #[test]
    fn test_missing_section_defaults_to_disabled() {
        let file = write(".yml", "");
        assert_eq!(load_config(file.path()).unwrap(), SectorConfig::default());

        let file = write(".json", "{}");
        assert_eq!(load_config(file.path()).unwrap(), SectorConfig::default());
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        let file = write(".cfg", r#"{"sector": {"flexibility_steel": true}}"#);
        assert!(load_config(file.path()).unwrap().sector.flexibility_steel);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let file = write(".toml", "[sector]\nrelocation_steel = \"yes\"\n");
        assert!(load_config(file.path()).is_err());
    }
}
