use std::path::Path;

use serde::Deserialize;

use ripple_core::ChangeInfo;

use crate::error::{FormatError, ValidationError};

pub const CHANGE_FILE_EXTENSION: &str = "json";

const MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

#[derive(Deserialize)]
#[serde(untagged)]
enum ChangeFileContent {
    Grouped { changes: Vec<ChangeInfo> },
    Single(ChangeInfo),
}

#[must_use]
pub fn is_change_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == CHANGE_FILE_EXTENSION)
}

/// Parses a change file holding either one change or a `{ "changes": [...] }` group.
///
/// # Errors
///
/// Returns [`FormatError::Json`] if the content is not a recognised change file and
/// [`FormatError::Validation`] if it holds no changes or a change without a package name.
#[must_use = "parsing result should be handled"]
pub fn parse_change_file(content: &str) -> Result<Vec<ChangeInfo>, FormatError> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(ValidationError::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        }
        .into());
    }

    let changes = match serde_json::from_str(content)? {
        ChangeFileContent::Grouped { changes } => changes,
        ChangeFileContent::Single(change) => vec![change],
    };

    if changes.is_empty() {
        return Err(ValidationError::NoChanges.into());
    }

    if let Some(index) = changes
        .iter()
        .position(|change| change.package_name.trim().is_empty())
    {
        return Err(ValidationError::EmptyPackageName { index }.into());
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::ChangeType;

    #[test]
    fn parses_single_change() {
        let json = r#"{
            "type": "patch",
            "comment": "Fix critical bug",
            "packageName": "my-package",
            "email": "dev@example.com",
            "dependentChangeType": "patch"
        }"#;

        let changes = parse_change_file(json).expect("single change should parse");

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].package_name, "my-package");
        assert_eq!(changes[0].change_type, ChangeType::Patch);
        assert_eq!(changes[0].comment, "Fix critical bug");
    }

    #[test]
    fn parses_grouped_changes_in_order() {
        let json = r#"{
            "changes": [
                { "type": "minor", "packageName": "a" },
                { "type": "none", "packageName": "b" }
            ]
        }"#;

        let changes = parse_change_file(json).expect("grouped changes should parse");

        let names: Vec<_> = changes.iter().map(|c| c.package_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(changes[1].change_type, ChangeType::None);
    }

    #[test]
    fn rejects_empty_group() {
        let result = parse_change_file(r#"{ "changes": [] }"#);

        assert!(matches!(
            result,
            Err(FormatError::Validation(ValidationError::NoChanges))
        ));
    }

    #[test]
    fn rejects_blank_package_name() {
        let json = r#"{
            "changes": [
                { "type": "minor", "packageName": "a" },
                { "type": "minor", "packageName": "  " }
            ]
        }"#;

        let result = parse_change_file(json);

        assert!(matches!(
            result,
            Err(FormatError::Validation(ValidationError::EmptyPackageName {
                index: 1
            }))
        ));
    }

    #[test]
    fn rejects_unknown_change_type() {
        let result = parse_change_file(r#"{ "type": "huge", "packageName": "a" }"#);

        assert!(matches!(result, Err(FormatError::Json(_))));
    }

    #[test]
    fn rejects_invalid_json() {
        let result = parse_change_file("not json");

        assert!(matches!(result, Err(FormatError::Json(_))));
    }

    #[test]
    fn recognizes_json_extension() {
        assert!(is_change_file(Path::new("change/foo-1234.json")));
        assert!(!is_change_file(Path::new("change/README.md")));
        assert!(!is_change_file(Path::new("change/json")));
    }
}
