//! External file type table
//!
//! Maps the short type token stored in the third sub-field of a linked-file
//! record (`PDF`, `Markdown`, ...) to a known file type.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::record::LinkTarget;

/// A known external file type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileType {
    /// Display name, also the token written into the field
    pub name: &'static str,
    /// Canonical extension without the dot
    pub extension: &'static str,
    pub mime_type: &'static str,
}

const fn file_type(name: &'static str, extension: &'static str, mime_type: &'static str) -> FileType {
    FileType {
        name,
        extension,
        mime_type,
    }
}

static FILE_TYPES: &[FileType] = &[
    file_type("PDF", "pdf", "application/pdf"),
    file_type("PostScript", "ps", "application/postscript"),
    file_type("Word", "doc", "application/msword"),
    file_type(
        "Word 2007+",
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    file_type("OpenDocument text", "odt", "application/vnd.oasis.opendocument.text"),
    file_type("Excel", "xls", "application/excel"),
    file_type(
        "Excel 2007+",
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    file_type(
        "OpenDocument spreadsheet",
        "ods",
        "application/vnd.oasis.opendocument.spreadsheet",
    ),
    file_type("PowerPoint", "ppt", "application/vnd.ms-powerpoint"),
    file_type(
        "PowerPoint 2007+",
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    file_type(
        "OpenDocument presentation",
        "odp",
        "application/vnd.oasis.opendocument.presentation",
    ),
    file_type("Rich Text Format", "rtf", "application/rtf"),
    file_type("Plain text", "txt", "text/plain"),
    file_type("LaTeX", "tex", "application/x-latex"),
    file_type("BibTeX", "bib", "text/x-bibtex"),
    file_type("Markdown", "md", "text/markdown"),
    file_type("HTML", "html", "text/html"),
    file_type("EPUB", "epub", "application/epub+zip"),
    file_type("Djvu", "djvu", "image/vnd.djvu"),
    file_type("PNG image", "png", "image/png"),
    file_type("GIF image", "gif", "image/gif"),
    file_type("JPG image", "jpg", "image/jpeg"),
    file_type("SVG image", "svg", "image/svg+xml"),
    file_type("ZIP archive", "zip", "application/zip"),
    file_type("URL", "html", "text/html"),
];

lazy_static! {
    /// Lookup by lowercased name, extension or MIME type.
    ///
    /// Names win over extensions, extensions over MIME types; within one key
    /// kind the first table entry wins.
    static ref BY_TOKEN: HashMap<String, &'static FileType> = {
        let mut m = HashMap::new();
        for ft in FILE_TYPES {
            m.entry(ft.name.to_lowercase()).or_insert(ft);
        }
        for ft in FILE_TYPES {
            m.entry(ft.extension.to_string()).or_insert(ft);
        }
        for ft in FILE_TYPES {
            m.entry(ft.mime_type.to_string()).or_insert(ft);
        }
        m
    };

    static ref BY_EXTENSION: HashMap<&'static str, &'static FileType> = {
        let mut m = HashMap::new();
        for ft in FILE_TYPES {
            m.entry(ft.extension).or_insert(ft);
        }
        for (alias, extension) in [("jpeg", "jpg"), ("htm", "html"), ("markdown", "md")] {
            if let Some(ft) = m.get(extension).copied() {
                m.insert(alias, ft);
            }
        }
        m
    };
}

/// Look up a file type by its token (case-insensitive).
///
/// The token may be the type name (`PDF`), an extension (`pdf`) or a MIME
/// type (`application/pdf`), since all three appear in real-world fields.
pub fn file_type_for_token(token: &str) -> Option<&'static FileType> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    BY_TOKEN.get(&token.to_lowercase()).copied()
}

/// Look up a file type by extension, with or without a leading dot
pub fn file_type_for_extension(extension: &str) -> Option<&'static FileType> {
    let extension = extension.trim().trim_start_matches('.').to_lowercase();
    BY_EXTENSION.get(extension.as_str()).copied()
}

/// Guess the file type of a link target from its extension
pub fn infer_file_type(target: &LinkTarget) -> Option<&'static FileType> {
    target
        .extension()
        .and_then(|ext| file_type_for_extension(&ext))
}

/// Human-readable description for a type token, or the token itself when unknown
pub fn describe_file_type(token: &str) -> String {
    file_type_for_token(token)
        .map(|ft| ft.name.to_string())
        .unwrap_or_else(|| token.to_string())
}

/// All known file types, in table order
pub fn all_file_types() -> &'static [FileType] {
    FILE_TYPES
}
