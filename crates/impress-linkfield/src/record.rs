//! Linked-file record data structures

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::file_types::{file_type_for_token, infer_file_type, FileType};

/// Where a linked file lives: a filesystem path or a remote URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTarget {
    Path(PathBuf),
    Url(Url),
}

impl LinkTarget {
    /// The target as it is written into the field
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Self::Path(path) => path.to_string_lossy(),
            Self::Url(url) => Cow::Borrowed(url.as_str()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Path(path) => path.as_os_str().is_empty(),
            Self::Url(_) => false,
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    /// Check whether the target points at a web resource.
    ///
    /// Path targets count as online when their text looks like a web address,
    /// since on POSIX systems every URL is also a syntactically valid path.
    pub fn is_online_link(&self) -> bool {
        match self {
            Self::Url(url) => !matches!(url.scheme(), "file"),
            Self::Path(path) => {
                let text = path.to_string_lossy();
                text.starts_with("http://") || text.starts_with("https://") || text.contains("www.")
            }
        }
    }

    /// Lowercased extension of the last path segment, if any
    pub fn extension(&self) -> Option<String> {
        let segment = match self {
            Self::Path(path) => path.file_name()?.to_string_lossy().into_owned(),
            Self::Url(url) => url.path_segments()?.next_back()?.to_string(),
        };
        Path::new(&segment)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

impl Default for LinkTarget {
    fn default() -> Self {
        Self::Path(PathBuf::new())
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

/// A single entry of a `file` field: description, link target and file type
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkedFileRecord {
    description: String,
    target: LinkTarget,
    file_type: String,
}

impl LinkedFileRecord {
    pub fn new(
        description: impl Into<String>,
        target: LinkTarget,
        file_type: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            target,
            file_type: file_type.into(),
        }
    }

    /// Create a record pointing at a filesystem path
    pub fn from_path(
        description: impl Into<String>,
        path: impl Into<PathBuf>,
        file_type: impl Into<String>,
    ) -> Self {
        Self::new(description, LinkTarget::Path(path.into()), file_type)
    }

    /// Create a record pointing at a URL
    pub fn from_url(description: impl Into<String>, url: Url, file_type: impl Into<String>) -> Self {
        Self::new(description, LinkTarget::Url(url), file_type)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn target(&self) -> &LinkTarget {
        &self.target
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// A record without a target is degenerate but still constructible
    pub fn has_target(&self) -> bool {
        !self.target.is_empty()
    }

    pub fn is_online_link(&self) -> bool {
        self.target.is_online_link()
    }

    /// Resolve the file type from the type token, falling back to the target's extension
    pub fn file_type_info(&self) -> Option<&'static FileType> {
        file_type_for_token(&self.file_type).or_else(|| infer_file_type(&self.target))
    }
}
