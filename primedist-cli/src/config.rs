//! Configuration handling for the primedist CLI
//!
//! Supports loading configuration from primedist.toml files with CLI argument overrides.

use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use primedist_core::MatchParams;

use crate::error::CliError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default number of threads to use
    #[serde(default = "default_threads")]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Maximum tolerated edit distance (k)
    #[serde(default = "default_max_edits")]
    pub max_edits: usize,

    /// Trailing primer bases that must match exactly (m)
    #[serde(default = "default_end_matches")]
    pub end_matches: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Scan output format ("tsv" or "json")
    #[serde(default = "default_format")]
    pub format: String,
}

// Default value functions
fn default_threads() -> usize { num_cpus::get() }
fn default_max_edits() -> usize { MatchParams::default().max_edits }
fn default_end_matches() -> usize { MatchParams::default().end_matches }
fn default_format() -> String { "tsv".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { threads: default_threads() }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_edits: default_max_edits(),
            end_matches: default_end_matches(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: default_format() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            matching: MatchingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl MatchingConfig {
    /// Resolve matching parameters, letting CLI flags override the file
    pub fn params(&self, max_edits: Option<usize>, end_matches: Option<usize>) -> MatchParams {
        MatchParams {
            max_edits: max_edits.unwrap_or(self.max_edits),
            end_matches: end_matches.unwrap_or(self.end_matches),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find primedist.toml in current directory
                let default_path = PathBuf::from("primedist.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: primedist.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            CliError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.matching.max_edits, 4);
        assert_eq!(config.matching.end_matches, 4);
        assert_eq!(config.output.format, "tsv");
        assert!(config.general.threads > 0);
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.matching.max_edits = 2;
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded_config = Config::load_from_file(temp_file.path())?;

        assert_eq!(loaded_config.matching.max_edits, 2);
        assert_eq!(loaded_config.matching.end_matches, config.matching.end_matches);
        assert_eq!(loaded_config.output.format, config.output.format);

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let config: Config = toml::from_str("[matching]\nend_matches = 6\n")?;
        assert_eq!(config.matching.end_matches, 6);
        assert_eq!(config.matching.max_edits, 4);
        assert_eq!(config.output.format, "tsv");
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_config_error() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(temp_file.path(), "[matching]\nmax_edits = \"four\"\n")?;

        let err = Config::load_from_file(temp_file.path()).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::Config { .. })));
        Ok(())
    }

    #[test]
    fn test_cli_overrides() {
        let matching = MatchingConfig::default();
        let params = matching.params(Some(1), None);
        assert_eq!(params.max_edits, 1);
        assert_eq!(params.end_matches, 4);
    }

    #[test]
    fn test_example_toml_generation() {
        let example = Config::example_toml().unwrap();
        assert!(example.contains("[general]"));
        assert!(example.contains("[matching]"));
        assert!(example.contains("[output]"));
    }
}
