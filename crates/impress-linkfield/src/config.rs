//! Configuration for file-field parsing and formatting
//!
//! Controls how link targets are classified, how character references are
//! written back, and what happens to records that cannot be interpreted.

use serde::{Deserialize, Serialize};

use crate::classify::{PathSyntax, DEFAULT_URL_SCHEMES};
use crate::error::ConfigError;
use crate::formatter::EntityPolicy;

/// What a multi-record parse does with a record whose target is invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRecordPolicy {
    /// Abort the whole parse on the first invalid record
    #[default]
    Fail,
    /// Drop invalid records and keep the rest
    Skip,
}

/// File-field configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkFieldConfig {
    /// Path grammar used to validate targets (defaults to the host platform)
    pub path_syntax: PathSyntax,
    /// URL schemes accepted when a target is not a valid path
    pub url_schemes: Vec<String>,
    /// How `&#...;` references are written when formatting
    pub entity_policy: EntityPolicy,
    pub on_invalid_record: InvalidRecordPolicy,
}

impl Default for LinkFieldConfig {
    fn default() -> Self {
        Self {
            path_syntax: PathSyntax::native(),
            url_schemes: DEFAULT_URL_SCHEMES.iter().map(|s| s.to_string()).collect(),
            entity_policy: EntityPolicy::default(),
            on_invalid_record: InvalidRecordPolicy::default(),
        }
    }
}

impl LinkFieldConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load and validate configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url_schemes.is_empty() {
            return Err(ConfigError::Invalid(
                "url_schemes must list at least one scheme".to_string(),
            ));
        }

        // RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
        for scheme in &self.url_schemes {
            let mut chars = scheme.chars();
            let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
            if !valid {
                return Err(ConfigError::Invalid(format!(
                    "'{}' is not a valid URL scheme",
                    scheme
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LinkFieldConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.on_invalid_record, InvalidRecordPolicy::Fail);
        assert_eq!(config.entity_policy, EntityPolicy::Preserve);
        assert_eq!(config.path_syntax, PathSyntax::native());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = LinkFieldConfig::from_toml(
            r#"
path_syntax = "windows"
on_invalid_record = "skip"
"#,
        )
        .unwrap();
        assert_eq!(config.path_syntax, PathSyntax::Windows);
        assert_eq!(config.on_invalid_record, InvalidRecordPolicy::Skip);
        assert_eq!(config.url_schemes, LinkFieldConfig::default().url_schemes);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = LinkFieldConfig::new();
        config.entity_policy = EntityPolicy::Escape;
        config.url_schemes = vec!["https".to_string()];
        let toml_str = config.to_toml().unwrap();
        assert_eq!(LinkFieldConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_json_config() {
        let config = LinkFieldConfig::from_json(r#"{"entity_policy": "escape"}"#).unwrap();
        assert_eq!(config.entity_policy, EntityPolicy::Escape);
        assert!(LinkFieldConfig::from_json("{").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            LinkFieldConfig::from_toml("url_schemes = []"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LinkFieldConfig::from_toml(r#"url_schemes = ["1http"]"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LinkFieldConfig::from_toml(r#"path_syntax = "amiga""#),
            Err(ConfigError::Toml(_))
        ));
    }
}
