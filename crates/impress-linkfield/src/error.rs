//! Error types for file-field parsing and configuration

/// Error raised while turning a record-group into a [`LinkedFileRecord`].
///
/// Malformed escapes, unterminated character references and missing or
/// surplus sub-fields never produce an error; only a link target that is
/// neither a path nor a URL does.
///
/// [`LinkedFileRecord`]: crate::LinkedFileRecord
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkFieldError {
    #[error("could not interpret link target '{value}': {reason}")]
    InvalidTarget { value: String, reason: String },
}

impl LinkFieldError {
    /// The raw target text that could not be classified
    pub fn value(&self) -> &str {
        match self {
            LinkFieldError::InvalidTarget { value, .. } => value,
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
