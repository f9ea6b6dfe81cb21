//! Linked-file field parsing and formatting
//!
//! A bibliographic entry stores its attached files in a single `file` field:
//!
//! ```text
//! description:target:fileType;description:target:fileType;...
//! ```
//!
//! This crate converts such a value into [`LinkedFileRecord`]s and back.
//!
//! Features:
//! - Escape-aware tokenizer (`\:`, `\;`, `\\`) that keeps numeric character
//!   references like `&#59;` intact
//! - Normalization of short or legacy record forms into three fields
//! - Path-first, URL-fallback classification of link targets
//! - Round-trip formatting
//! - File type lookup for the type token
//!
//! # Example
//! ```
//! use impress_linkfield::{format_file_field, parse_file_field};
//!
//! let records = parse_file_field(":papers/Smith2024.pdf:PDF;Supplement:data.zip:ZIP").unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].description(), "Supplement");
//! assert_eq!(format_file_field(&records), ":papers/Smith2024.pdf:PDF;Supplement:data.zip:ZIP");
//! ```

pub mod classify;
pub mod config;
mod error;
pub mod file_types;
mod formatter;
mod normalize;
pub mod parser;
mod record;
mod tokenizer;

pub use classify::{DefaultClassifier, PathSyntax, SyntaxError, TargetClassifier};
pub use config::{InvalidRecordPolicy, LinkFieldConfig};
pub use error::{ConfigError, LinkFieldError};
pub use file_types::{describe_file_type, file_type_for_token, FileType};
pub use formatter::{escape_value, format_file_field, format_record, format_records, EntityPolicy};
pub use normalize::{normalize, Repair};
pub use parser::{parse_file_field, FileFieldParseError, FileFieldParseResult, FileFieldParser};
pub use record::{LinkTarget, LinkedFileRecord};
pub use tokenizer::{tokenize, RawGroup};
