//! File-field parser
//!
//! Combines the tokenizer and the normalizer into a parse of a complete
//! `file` field value, with a configurable policy for invalid records.

use serde::Serialize;

use crate::classify::{DefaultClassifier, TargetClassifier};
use crate::config::{InvalidRecordPolicy, LinkFieldConfig};
use crate::error::LinkFieldError;
use crate::normalize::normalize;
use crate::record::LinkedFileRecord;
use crate::tokenizer::tokenize;

/// A record-group that could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFieldParseError {
    /// Zero-based position of the record-group in the field
    pub index: usize,
    /// The offending target text
    pub value: String,
    pub message: String,
}

/// Result of a recovering parse: every valid record plus every failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileFieldParseResult {
    pub records: Vec<LinkedFileRecord>,
    pub errors: Vec<FileFieldParseError>,
}

impl FileFieldParseResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parser for `file` field values
#[derive(Debug, Clone, Default)]
pub struct FileFieldParser<C = DefaultClassifier> {
    classifier: C,
    on_invalid: InvalidRecordPolicy,
}

impl FileFieldParser {
    /// Create a parser with the default classifier that fails on invalid records
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LinkFieldConfig) -> Self {
        Self {
            classifier: DefaultClassifier::from_config(config),
            on_invalid: config.on_invalid_record,
        }
    }
}

impl<C: TargetClassifier> FileFieldParser<C> {
    /// Create a parser around a custom classifier
    pub fn with_classifier(classifier: C) -> Self {
        Self {
            classifier,
            on_invalid: InvalidRecordPolicy::default(),
        }
    }

    pub fn on_invalid(mut self, policy: InvalidRecordPolicy) -> Self {
        self.on_invalid = policy;
        self
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Parse a field value into records.
    ///
    /// With [`InvalidRecordPolicy::Fail`] the first invalid record aborts the
    /// parse; with [`InvalidRecordPolicy::Skip`] invalid records are dropped
    /// and logged.
    pub fn parse(&self, value: &str) -> Result<Vec<LinkedFileRecord>, LinkFieldError> {
        let mut records = Vec::new();

        for (index, group) in tokenize(value).into_iter().enumerate() {
            match normalize(group, &self.classifier) {
                Ok(record) => records.push(record),
                Err(e) => match self.on_invalid {
                    InvalidRecordPolicy::Fail => return Err(e),
                    InvalidRecordPolicy::Skip => {
                        tracing::warn!(index, "skipping linked file: {}", e);
                    }
                },
            }
        }

        Ok(records)
    }

    /// Parse a field value, collecting every failure instead of stopping.
    ///
    /// Ignores the configured policy.
    pub fn parse_report(&self, value: &str) -> FileFieldParseResult {
        let mut result = FileFieldParseResult::default();

        for (index, group) in tokenize(value).into_iter().enumerate() {
            match normalize(group, &self.classifier) {
                Ok(record) => result.records.push(record),
                Err(e) => result.errors.push(FileFieldParseError {
                    index,
                    value: e.value().to_string(),
                    message: e.to_string(),
                }),
            }
        }

        result
    }
}

/// Parse a field value with the default classifier, failing on the first invalid record
pub fn parse_file_field(value: &str) -> Result<Vec<LinkedFileRecord>, LinkFieldError> {
    FileFieldParser::new().parse(value)
}
