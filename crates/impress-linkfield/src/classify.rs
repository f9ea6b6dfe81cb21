//! Path and URL classification of link targets
//!
//! A link target is interpreted as a filesystem path first. Only when the
//! text is not a valid path is it tried as a URL; when both fail the path
//! error is reported, since the path is the primary interpretation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::LinkFieldConfig;
use crate::error::LinkFieldError;
use crate::record::LinkTarget;

/// URL schemes accepted by default
pub const DEFAULT_URL_SCHEMES: &[&str] = &["http", "https", "ftp", "file", "jar", "mailto"];

/// Syntax violation reported by a classifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SyntaxError(pub String);

/// Decides whether a target string is a path or a URL.
///
/// Implementations must be side-effect free: no filesystem or network access.
pub trait TargetClassifier {
    /// Interpret `value` as a filesystem path
    fn parse_path(&self, value: &str) -> Result<PathBuf, SyntaxError>;

    /// Interpret `value` as a URL
    fn parse_url(&self, value: &str) -> Result<Url, SyntaxError>;

    /// Classify `value`, trying the path interpretation before the URL one
    fn classify(&self, value: &str) -> Result<LinkTarget, LinkFieldError> {
        let path_error = match self.parse_path(value) {
            Ok(path) => return Ok(LinkTarget::Path(path)),
            Err(e) => e,
        };
        tracing::trace!(value, reason = %path_error, "not a valid path, trying URL");

        self.parse_url(value)
            .map(LinkTarget::Url)
            .map_err(|_| LinkFieldError::InvalidTarget {
                value: value.to_string(),
                reason: path_error.0,
            })
    }
}

/// Path grammar used to validate path targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathSyntax {
    Posix,
    Windows,
}

impl PathSyntax {
    /// The syntax of the platform this binary was built for
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Check `value` against this syntax
    pub fn validate(self, value: &str) -> Result<(), SyntaxError> {
        match self {
            Self::Posix => match value.find('\0') {
                Some(index) => Err(SyntaxError(format!("Nul character not allowed at index {}", index))),
                None => Ok(()),
            },
            Self::Windows => validate_windows_path(value),
        }
    }
}

impl Default for PathSyntax {
    fn default() -> Self {
        Self::native()
    }
}

fn validate_windows_path(value: &str) -> Result<(), SyntaxError> {
    let bytes = value.as_bytes();
    let has_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';

    for (index, c) in value.char_indices() {
        let illegal = match c {
            '<' | '>' | '"' | '|' | '?' | '*' => true,
            ':' => !(has_drive && index == 1),
            c => c.is_control() && (c as u32) < 0x20,
        };
        if illegal {
            return Err(SyntaxError(format!("Illegal char <{}> at index {}", c, index)));
        }
    }
    Ok(())
}

/// Classifier backed by a path syntax and a URL scheme allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultClassifier {
    path_syntax: PathSyntax,
    url_schemes: Vec<String>,
}

impl DefaultClassifier {
    pub fn new<I, S>(path_syntax: PathSyntax, url_schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path_syntax,
            url_schemes: url_schemes
                .into_iter()
                .map(|s| s.into().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &LinkFieldConfig) -> Self {
        Self::new(config.path_syntax, config.url_schemes.iter().cloned())
    }

    pub fn path_syntax(&self) -> PathSyntax {
        self.path_syntax
    }
}

impl Default for DefaultClassifier {
    fn default() -> Self {
        Self::new(PathSyntax::native(), DEFAULT_URL_SCHEMES.iter().copied())
    }
}

impl TargetClassifier for DefaultClassifier {
    fn parse_path(&self, value: &str) -> Result<PathBuf, SyntaxError> {
        self.path_syntax.validate(value)?;
        Ok(PathBuf::from(value))
    }

    fn parse_url(&self, value: &str) -> Result<Url, SyntaxError> {
        let url = Url::parse(value).map_err(|e| SyntaxError(e.to_string()))?;
        if self.url_schemes.iter().any(|s| s == url.scheme()) {
            Ok(url)
        } else {
            Err(SyntaxError(format!("unknown protocol: {}", url.scheme())))
        }
    }
}
