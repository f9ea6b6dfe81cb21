//! Escaped-field tokenizer
//!
//! Splits a serialized `file` field into record-groups and sub-fields:
//! - `;` separates record-groups, `:` separates sub-fields within a group
//! - `\` makes the following character literal
//! - a numeric character reference such as `&#59;` is kept verbatim and its
//!   closing `;` does not end the record-group
//!
//! The scanner never fails. An unterminated `&#...` keeps the scanner in the
//! entity state until the end of the input.

/// Raw sub-fields of one record-group, before normalization
pub type RawGroup = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Inside `&#...;`, where `;` closes the reference instead of the group
    InEntity,
    /// The previous character was an unescaped `\`
    Escaped { resume_entity: bool },
}

/// What the scanner does with the current character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Append,
    Skip,
    EndField,
    EndGroup,
}

/// Transition table: `(state, char, next char is '#') -> (action, next state)`
fn transition(state: ScanState, c: char, hash_follows: bool) -> (Action, ScanState) {
    use ScanState::*;

    match (state, c) {
        (Escaped { resume_entity }, _) => {
            let next = if resume_entity { InEntity } else { Normal };
            (Action::Append, next)
        }
        (Normal, '\\') => (Action::Skip, Escaped { resume_entity: false }),
        (InEntity, '\\') => (Action::Skip, Escaped { resume_entity: true }),
        (Normal, '&') if hash_follows => (Action::Append, InEntity),
        (InEntity, ';') => (Action::Append, Normal),
        (_, ':') => (Action::EndField, state),
        (Normal, ';') => (Action::EndGroup, Normal),
        _ => (Action::Append, state),
    }
}

/// Accumulates sub-fields and record-groups while scanning
#[derive(Debug, Default)]
struct GroupBuilder {
    groups: Vec<RawGroup>,
    fields: RawGroup,
    buffer: String,
}

impl GroupBuilder {
    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.buffer));
    }

    fn end_group(&mut self) {
        self.end_field();
        self.groups.push(std::mem::take(&mut self.fields));
    }

    /// Flush whatever is pending at end of input.
    ///
    /// An empty trailing buffer is not a field, and an empty trailing group
    /// is not a record, so `a:b:c;` yields a single group.
    fn finish(mut self) -> Vec<RawGroup> {
        if !self.buffer.is_empty() {
            self.fields.push(self.buffer);
        }
        if !self.fields.is_empty() {
            self.groups.push(self.fields);
        }
        self.groups
    }
}

/// Split a serialized field into record-groups of unescaped sub-fields.
///
/// Empty or whitespace-only input yields no groups.
///
/// # Example
/// ```
/// use impress_linkfield::tokenize;
///
/// let groups = tokenize("Main:paper.pdf:PDF;Notes\\: draft:notes.md");
/// assert_eq!(groups, vec![
///     vec!["Main".to_string(), "paper.pdf".to_string(), "PDF".to_string()],
///     vec!["Notes: draft".to_string(), "notes.md".to_string()],
/// ]);
/// ```
pub fn tokenize(raw: &str) -> Vec<RawGroup> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let mut builder = GroupBuilder::default();
    let mut state = ScanState::Normal;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        let hash_follows = chars.peek() == Some(&'#');
        let (action, next) = transition(state, c, hash_follows);
        match action {
            Action::Append => builder.buffer.push(c),
            Action::Skip => {}
            Action::EndField => builder.end_field(),
            Action::EndGroup => builder.end_group(),
        }
        state = next;
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(fields: &[&str]) -> RawGroup {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
    }

    #[test]
    fn test_single_group() {
        assert_eq!(tokenize("a:b:c"), vec![group(&["a", "b", "c"])]);
    }

    #[test]
    fn test_trailing_separator_adds_no_group() {
        assert_eq!(tokenize("a:b:c;"), vec![group(&["a", "b", "c"])]);
    }

    #[test]
    fn test_trailing_colon_keeps_short_group() {
        assert_eq!(tokenize("a:b:"), vec![group(&["a", "b"])]);
    }

    #[test]
    fn test_empty_middle_group() {
        assert_eq!(
            tokenize("a:b:c;;d:e:f"),
            vec![group(&["a", "b", "c"]), group(&[""]), group(&["d", "e", "f"])]
        );
    }

    #[test]
    fn test_escaped_separators() {
        assert_eq!(tokenize(r"a\:b:c\;d"), vec![group(&["a:b", "c;d"])]);
    }

    #[test]
    fn test_escaped_backslash_does_not_cascade() {
        assert_eq!(tokenize(r"a\\:b"), vec![group(&[r"a\", "b"])]);
    }

    #[test]
    fn test_trailing_lone_backslash_is_dropped() {
        assert_eq!(tokenize(r"abc\"), vec![group(&["abc"])]);
    }

    #[test]
    fn test_entity_semicolon_is_literal() {
        assert_eq!(
            tokenize("desc&#59;more:file.pdf:"),
            vec![group(&["desc&#59;more", "file.pdf"])]
        );
    }

    #[test]
    fn test_ampersand_without_hash() {
        assert_eq!(
            tokenize("Smith & Jones:a.pdf;b"),
            vec![group(&["Smith & Jones", "a.pdf"]), group(&["b"])]
        );
    }

    #[test]
    fn test_escaped_ampersand_does_not_open_entity() {
        assert_eq!(tokenize(r"\&#1;x"), vec![group(&["&#1"]), group(&["x"])]);
    }

    #[test]
    fn test_colon_inside_entity_still_splits() {
        assert_eq!(tokenize("&#1:2;x;y"), vec![group(&["&#1", "2;x"]), group(&["y"])]);
    }

    #[test]
    fn test_escape_inside_entity_returns_to_entity() {
        assert_eq!(tokenize(r"&#\;1;x;y"), vec![group(&["&#;1;x"]), group(&["y"])]);
    }

    #[test]
    fn test_first_semicolon_closes_entity() {
        assert_eq!(tokenize("&#12 a;b;c"), vec![group(&["&#12 a;b"]), group(&["c"])]);
    }

    #[test]
    fn test_unterminated_entity_is_accepted() {
        assert_eq!(
            tokenize("x:&#12 & a:b"),
            vec![group(&["x", "&#12 & a", "b"])]
        );
    }
}
