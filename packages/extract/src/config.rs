//! Extraction options and their TOML configuration file.
//!
//! Every key is optional:
//!
//! ```toml
//! anchor = "Olympic Dam"
//! row_policy = "strict"
//! metals = ["Cu", "U3O8", "Au"]
//! ```

use std::path::Path;

use serde::Deserialize;

/// Anchor used when none is configured.
pub const DEFAULT_ANCHOR: &str = "Olympic Dam";

/// Metal extracted when none is requested.
pub const DEFAULT_METAL: &str = "Cu";

/// Errors loading an [`ExtractConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`ExtractConfig`].
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// What to do with matching rows whose width differs from the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Missing cells read as absent.
    #[default]
    Lenient,
    /// Fail with [`crate::ExtractError::RaggedRow`].
    Strict,
}

/// Per-call extraction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Case-sensitive substring identifying the record holding the table.
    pub anchor: String,
    /// Handling of ragged matching rows.
    pub row_policy: RowPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.to_owned(),
            row_policy: RowPolicy::default(),
        }
    }
}

impl ExtractOptions {
    /// Overrides the record anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: &str) -> Self {
        anchor.clone_into(&mut self.anchor);
        self
    }

    /// Overrides the row policy.
    #[must_use]
    pub fn with_row_policy(mut self, row_policy: RowPolicy) -> Self {
        self.row_policy = row_policy;
        self
    }
}

/// Contents of an extraction config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Record anchor.
    pub anchor: String,
    /// Row width handling.
    pub row_policy: RowPolicy,
    /// Metals to extract when none are given on the command line.
    pub metals: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.to_owned(),
            row_policy: RowPolicy::default(),
            metals: vec![DEFAULT_METAL.to_owned()],
        }
    }
}

impl ExtractConfig {
    /// Parses a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the TOML is malformed or a key has
    /// the wrong type.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let toml_str = std::fs::read_to_string(path)?;
        let config = Self::parse(&toml_str)?;
        log::debug!("Loaded extract config from {}", path.display());
        Ok(config)
    }

    /// Builds [`ExtractOptions`] from this config.
    #[must_use]
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions::default()
            .with_anchor(&self.anchor)
            .with_row_policy(self.row_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ExtractConfig::parse("").unwrap();
        assert_eq!(config, ExtractConfig::default());
        assert_eq!(config.anchor, "Olympic Dam");
        assert_eq!(config.metals, vec!["Cu".to_owned()]);
        assert_eq!(config.options(), ExtractOptions::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = ExtractConfig::parse(
            r#"
anchor = "Escondida"
row_policy = "strict"
metals = ["Cu", "Au"]
"#,
        )
        .unwrap();
        assert_eq!(config.anchor, "Escondida");
        assert_eq!(config.row_policy, RowPolicy::Strict);
        assert_eq!(config.metals, vec!["Cu".to_owned(), "Au".to_owned()]);

        let options = config.options();
        assert_eq!(options.anchor, "Escondida");
        assert_eq!(options.row_policy, RowPolicy::Strict);
    }

    #[test]
    fn rejects_unknown_row_policy() {
        let err = ExtractConfig::parse(r#"row_policy = "sloppy""#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ExtractConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
