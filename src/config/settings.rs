// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Shell settings loaded from TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::progression::{InputMethod, SuggestMode};

/// Front-end preferences. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Render chord symbols with the alternate table ("Cmaj", "CΔ7")
    pub alt_symbols: bool,
    pub input_method: InputMethod,
    /// One of trace, debug, info, warn, error
    pub log_level: String,
    /// Chords per suggested progression
    pub suggest_length: usize,
    pub suggest_mode: SuggestMode,
    /// Suggest seventh chords instead of triads
    pub sevenths: bool,
    /// Fixed RNG seed for repeatable suggestions
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alt_symbols: false,
            input_method: InputMethod::Free,
            log_level: "warn".to_string(),
            suggest_length: 4,
            suggest_mode: SuggestMode::Functional,
            sevenths: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Parse settings from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse TOML settings")
    }

    /// The configured log level
    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse()
            .with_context(|| format!("Invalid log level: {:?}", self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_is_default() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.level().unwrap(), Level::WARN);
    }

    #[test]
    fn test_parse_settings() {
        let toml = r#"
alt_symbols = true
input_method = "generic"
log_level = "debug"
suggest_length = 8
suggest_mode = "random_in_key"
seed = 42
"#;
        let settings = Settings::from_toml(toml).unwrap();
        assert!(settings.alt_symbols);
        assert_eq!(settings.input_method, InputMethod::Generic);
        assert_eq!(settings.level().unwrap(), Level::DEBUG);
        assert_eq!(settings.suggest_length, 8);
        assert_eq!(settings.suggest_mode, SuggestMode::RandomInKey);
        assert!(!settings.sevenths);
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn test_invalid_values() {
        assert!(Settings::from_toml("input_method = \"mouse\"").is_err());
        let settings = Settings::from_toml("log_level = \"loud\"").unwrap();
        assert!(settings.level().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sevenths = true").unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert!(settings.sevenths);
        assert!(Settings::load("/nonexistent/settings.toml").is_err());
    }
}
