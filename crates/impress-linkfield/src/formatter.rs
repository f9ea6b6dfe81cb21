//! File-field formatting module
//!
//! Converts [`LinkedFileRecord`] values back into the escaped
//! `description:target:fileType;...` field format.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::record::LinkedFileRecord;

lazy_static! {
    /// A well-formed numeric character reference at the start of the input
    static ref NUMERIC_ENTITY: Regex = Regex::new(r"^&#(?:[0-9]+|[xX][0-9a-fA-F]+);").unwrap();
}

/// How numeric character references inside values are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityPolicy {
    /// Write well-formed references such as `&#44;` verbatim
    #[default]
    Preserve,
    /// Escape every `&#` so nothing is read back as a reference
    Escape,
}

/// Escape a single sub-field value.
///
/// `\`, `:` and `;` are prefixed with `\`. An `&` is only escaped when it is
/// followed by `#`, because that is the only place the tokenizer treats it
/// specially.
pub fn escape_value(value: &str, policy: EntityPolicy) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(c) = rest.chars().next() {
        if c == '&' && rest[1..].starts_with('#') {
            let entity = match policy {
                EntityPolicy::Preserve => NUMERIC_ENTITY.find(rest),
                EntityPolicy::Escape => None,
            };
            match entity {
                Some(m) => {
                    result.push_str(m.as_str());
                    rest = &rest[m.end()..];
                    continue;
                }
                None => result.push('\\'),
            }
        } else if matches!(c, '\\' | ':' | ';') {
            result.push('\\');
        }
        result.push(c);
        rest = &rest[c.len_utf8()..];
    }

    result
}

/// Format a single record as `description:target:fileType`
pub fn format_record(record: &LinkedFileRecord, policy: EntityPolicy) -> String {
    let mut result = escape_value(record.description(), policy);
    result.push(':');
    result.push_str(&escape_value(&record.target().as_str(), policy));
    result.push(':');
    result.push_str(&escape_value(record.file_type(), policy));
    result
}

/// Format multiple records into one field value, separated by `;`
pub fn format_records(records: &[LinkedFileRecord], policy: EntityPolicy) -> String {
    records
        .iter()
        .map(|record| format_record(record, policy))
        .collect::<Vec<_>>()
        .join(";")
}

/// Format records with the default entity policy
pub fn format_file_field(records: &[LinkedFileRecord]) -> String {
    format_records(records, EntityPolicy::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_separators() {
        assert_eq!(escape_value("a:b;c", EntityPolicy::Preserve), r"a\:b\;c");
        assert_eq!(escape_value(r"C:\x", EntityPolicy::Preserve), r"C\:\\x");
    }

    #[test]
    fn test_plain_ampersand_untouched() {
        assert_eq!(escape_value("Smith & Jones", EntityPolicy::Escape), "Smith & Jones");
        assert_eq!(escape_value("a&", EntityPolicy::Preserve), "a&");
    }

    #[test]
    fn test_entity_preserved() {
        assert_eq!(escape_value("desc&#59;more", EntityPolicy::Preserve), "desc&#59;more");
        assert_eq!(escape_value("&#x3B;", EntityPolicy::Preserve), "&#x3B;");
    }

    #[test]
    fn test_entity_escaped() {
        assert_eq!(escape_value("desc&#59;more", EntityPolicy::Escape), r"desc\&#59\;more");
    }

    #[test]
    fn test_malformed_entity_escaped() {
        assert_eq!(escape_value("&#12", EntityPolicy::Preserve), r"\&#12");
        assert_eq!(escape_value("&#1:2;", EntityPolicy::Preserve), r"\&#1\:2\;");
        assert_eq!(escape_value("&#;", EntityPolicy::Preserve), r"\&#\;");
    }

    #[test]
    fn test_non_ascii_values() {
        assert_eq!(escape_value("Müller: Übersicht", EntityPolicy::Preserve), r"Müller\: Übersicht");
    }

    #[test]
    fn test_format_record() {
        let record = LinkedFileRecord::from_path("my:paper", "/home/user/paper.pdf", "PDF");
        assert_eq!(
            format_record(&record, EntityPolicy::Preserve),
            r"my\:paper:/home/user/paper.pdf:PDF"
        );
    }

    #[test]
    fn test_format_records() {
        let records = vec![
            LinkedFileRecord::from_path("a", "b", "c"),
            LinkedFileRecord::from_path("", "d", ""),
        ];
        assert_eq!(format_file_field(&records), "a:b:c;:d:");
        assert_eq!(format_file_field(&[]), "");
    }
}
