//! pddl-check configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project-local configuration file, relative to the working directory.
pub const LOCAL_CONFIG: &str = ".pddl-check.yml";

/// Output format of reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report output format
    pub format: OutputFormat,

    /// Treat warnings as failures when computing the exit status
    pub strict: bool,

    /// Include info issues in text output
    #[serde(rename = "show-info")]
    pub show_info: bool,

    /// Reject input files larger than this many bytes
    #[serde(rename = "max-input-bytes")]
    pub max_input_bytes: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            strict: false,
            show_info: true,
            max_input_bytes: None,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let mut candidates = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("pddl-check").join("pddl-check.yml"));
        }

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return Ok(config),
                Err(e) => log::warn!("Failed to load config from {}: {:#}", path.display(), e),
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Check that `len` bytes of input are within `max_input_bytes`.
    pub fn check_input_size(&self, path: &Path, len: u64) -> Result<()> {
        match self.max_input_bytes {
            Some(max) if len > max => Err(eyre::eyre!(
                "{} is {} bytes, larger than the configured limit of {} bytes",
                path.display(),
                len,
                max
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let c = Config::default();

        assert_eq!(c.format, OutputFormat::Text);
        assert!(!c.strict);
        assert!(c.show_info);
        assert_eq!(c.max_input_bytes, None);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let c: Config = serde_yaml::from_str("strict: true\n").unwrap();

        assert!(c.strict);
        assert!(c.show_info);
        assert_eq!(c.format, OutputFormat::Text);
    }

    #[test]
    fn load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yml");
        fs::write(&path, "format: json\nshow-info: false\nmax-input-bytes: 1024\n").unwrap();

        let c = Config::load(Some(&path)).unwrap();
        assert_eq!(c.format, OutputFormat::Json);
        assert!(!c.show_info);
        assert_eq!(c.max_input_bytes, Some(1024));
    }

    #[test]
    fn explicit_file_errors_are_fatal() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("missing.yml");
        assert!(Config::load(Some(&missing)).is_err());

        let bad = dir.path().join("bad.yml");
        fs::write(&bad, "format: xml\n").unwrap();
        let err = Config::load(Some(&bad)).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn input_size_limit() {
        let c = Config {
            max_input_bytes: Some(10),
            ..Config::default()
        };
        let path = Path::new("big.pddl");

        assert!(c.check_input_size(path, 10).is_ok());
        assert!(c.check_input_size(path, 11).is_err());
        assert!(Config::default().check_input_size(path, u64::MAX).is_ok());
    }
}
