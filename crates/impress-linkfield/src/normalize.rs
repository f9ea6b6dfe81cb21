//! Record normalization
//!
//! Turns a raw record-group of up to three sub-fields into a canonical
//! [`LinkedFileRecord`], repairing the abbreviated forms older writers
//! produced.

use crate::classify::TargetClassifier;
use crate::error::LinkFieldError;
use crate::record::LinkedFileRecord;
use crate::tokenizer::RawGroup;

/// Which lone sub-field, if any, should be moved into the target slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    /// Only the file type was written (`::paper.pdf` style legacy value)
    FileTypeAsTarget,
    /// Only the description was written (a bare `paper.pdf`)
    DescriptionAsTarget,
    None,
}

impl Repair {
    /// Decide the repair from the emptiness of `(description, target, file_type)`
    pub fn for_fields(description: &str, target: &str, file_type: &str) -> Self {
        match (description.is_empty(), target.is_empty(), file_type.is_empty()) {
            (true, true, false) => Self::FileTypeAsTarget,
            (false, true, true) => Self::DescriptionAsTarget,
            _ => Self::None,
        }
    }
}

/// Normalize one record-group into a [`LinkedFileRecord`].
///
/// Missing sub-fields are padded with empty strings and sub-fields beyond the
/// third are discarded. Fails only when a non-empty target is neither a
/// valid path nor a valid URL.
pub fn normalize<C>(group: RawGroup, classifier: &C) -> Result<LinkedFileRecord, LinkFieldError>
where
    C: TargetClassifier + ?Sized,
{
    let mut fields = group.into_iter();
    let description = fields.next().unwrap_or_default();
    let target = fields.next().unwrap_or_default();
    let file_type = fields.next().unwrap_or_default();

    let classified = classifier.classify(&target)?;

    match Repair::for_fields(&description, &target, &file_type) {
        Repair::FileTypeAsTarget => {
            tracing::debug!(value = %file_type, "lone file type reinterpreted as link target");
            Ok(LinkedFileRecord::new("", classifier.classify(&file_type)?, ""))
        }
        Repair::DescriptionAsTarget => {
            tracing::debug!(value = %description, "lone description reinterpreted as link target");
            Ok(LinkedFileRecord::new("", classifier.classify(&description)?, ""))
        }
        Repair::None => Ok(LinkedFileRecord::new(description, classified, file_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{DefaultClassifier, PathSyntax, DEFAULT_URL_SCHEMES};
    use crate::record::LinkTarget;
    use std::path::PathBuf;

    fn classifier() -> DefaultClassifier {
        DefaultClassifier::new(PathSyntax::Posix, DEFAULT_URL_SCHEMES.iter().copied())
    }

    fn group(fields: &[&str]) -> RawGroup {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_full_group() {
        let record = normalize(group(&["a", "b", "c"]), &classifier()).unwrap();
        assert_eq!(record, LinkedFileRecord::from_path("a", "b", "c"));
    }

    #[test]
    fn test_extra_fields_truncated() {
        let record = normalize(group(&["a", "b", "c", "d", "e"]), &classifier()).unwrap();
        assert_eq!(record, LinkedFileRecord::from_path("a", "b", "c"));
    }

    #[test]
    fn test_empty_group_is_degenerate_record() {
        let record = normalize(RawGroup::new(), &classifier()).unwrap();
        assert_eq!(record, LinkedFileRecord::default());
        assert!(!record.has_target());
    }

    #[test]
    fn test_lone_description_becomes_target() {
        let record = normalize(group(&["paper.pdf"]), &classifier()).unwrap();
        assert_eq!(record, LinkedFileRecord::from_path("", "paper.pdf", ""));
    }

    #[test]
    fn test_lone_file_type_becomes_target() {
        let record = normalize(group(&["", "", "paper.pdf"]), &classifier()).unwrap();
        assert_eq!(record, LinkedFileRecord::from_path("", "paper.pdf", ""));
    }

    #[test]
    fn test_two_fields_without_target_pass_through() {
        let record = normalize(group(&["Notes", "", "PDF"]), &classifier()).unwrap();
        assert_eq!(record, LinkedFileRecord::from_path("Notes", "", "PDF"));
    }

    #[test]
    fn test_repair_patterns() {
        assert_eq!(Repair::for_fields("", "", "x"), Repair::FileTypeAsTarget);
        assert_eq!(Repair::for_fields("x", "", ""), Repair::DescriptionAsTarget);
        assert_eq!(Repair::for_fields("", "", ""), Repair::None);
        assert_eq!(Repair::for_fields("x", "y", ""), Repair::None);
        assert_eq!(Repair::for_fields("", "y", "z"), Repair::None);
        assert_eq!(Repair::for_fields("x", "y", "z"), Repair::None);
    }

    #[test]
    fn test_url_target_with_windows_syntax() {
        let classifier = DefaultClassifier::new(PathSyntax::Windows, DEFAULT_URL_SCHEMES.iter().copied());
        let record = normalize(group(&["", "https://example.org/a.pdf", "PDF"]), &classifier).unwrap();
        assert!(record.target().is_url());
        assert_eq!(record.target().as_str(), "https://example.org/a.pdf");
    }

    #[test]
    fn test_invalid_target_fails() {
        let err = normalize(group(&["d", "bad\0path", "PDF"]), &classifier()).unwrap_err();
        assert_eq!(err.value(), "bad\0path");
        assert!(err.to_string().starts_with("could not interpret link target 'bad"));
    }

    #[test]
    fn test_repaired_value_is_classified() {
        let record = normalize(group(&["/home/user/paper.pdf"]), &classifier()).unwrap();
        assert_eq!(
            record.target(),
            &LinkTarget::Path(PathBuf::from("/home/user/paper.pdf"))
        );
    }
}
