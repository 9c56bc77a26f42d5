//! Version name validation.

use serde_json::Value;

use crate::error::VersionNameError;

/// Longest accepted version name, in characters.
pub const MAX_VERSION_NAME_LEN: usize = 32;

/// Characters rejected in file names on at least one supported platform.
const INVALID_PATH_CHARS: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

/// Validate a version name.
///
/// Checks run from the most general to the most specific, so the first
/// failing rule gives the most useful message. `None` stands for a missing
/// name.
///
/// ```
/// use folio_versioning::validate_version_name;
///
/// assert!(validate_version_name(Some("1.0.0")).is_ok());
/// assert!(validate_version_name(Some("1.0/beta")).is_err());
/// ```
pub fn validate_version_name(name: Option<&str>) -> Result<(), VersionNameError> {
    let Some(name) = name else {
        return Err(VersionNameError::NotAString {
            found_type: "object",
            value: "null".to_owned(),
        });
    };

    if name.trim().is_empty() {
        return Err(VersionNameError::Blank(name.to_owned()));
    }
    if name.chars().count() > MAX_VERSION_NAME_LEN {
        return Err(VersionNameError::TooLong(name.to_owned()));
    }
    if name == "." || name == ".." {
        return Err(VersionNameError::Reserved(name.to_owned()));
    }
    if name.contains(['/', '\\']) {
        return Err(VersionNameError::PathSeparator(name.to_owned()));
    }
    if name
        .chars()
        .any(|c| c.is_control() || INVALID_PATH_CHARS.contains(&c))
    {
        return Err(VersionNameError::InvalidPath(name.to_owned()));
    }

    Ok(())
}

/// Validate a version name read from JSON.
pub fn validate_version_value(value: &Value) -> Result<&str, VersionNameError> {
    match value {
        Value::String(name) => {
            validate_version_name(Some(name))?;
            Ok(name)
        }
        Value::Null => validate_version_name(None).map(|()| ""),
        other => Err(VersionNameError::NotAString {
            found_type: json_type_name(other),
            value: other.to_string(),
        }),
    }
}

/// Name of a JSON value's type as JavaScript's `typeof` reports it.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null | Value::Array(_) | Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn message(name: Option<&str>) -> String {
        validate_version_name(name).unwrap_err().to_string()
    }

    #[test]
    fn test_valid_names() {
        for name in ["1.0.0", "v2", "2021-05", "next-beta", "a".repeat(32).as_str()] {
            assert!(validate_version_name(Some(name)).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            message(None),
            "Versions should be strings. Found type \"object\" for version \"null\"."
        );
    }

    #[test]
    fn test_blank_names() {
        assert_eq!(
            message(Some("")),
            "Invalid version name \"\": version name must contain at least one non-whitespace character."
        );
        assert!(matches!(
            validate_version_name(Some("  \t")),
            Err(VersionNameError::Blank(_))
        ));
    }

    #[test]
    fn test_too_long() {
        let name = "a".repeat(255);
        assert_eq!(
            message(Some(&name)),
            format!("Invalid version name \"{name}\": version name cannot be longer than 32 characters.")
        );
    }

    #[test]
    fn test_dot_names() {
        assert_eq!(
            message(Some("..")),
            "Invalid version name \"..\": version name should not be \".\" or \"..\"."
        );
        assert_eq!(
            message(Some(".")),
            "Invalid version name \".\": version name should not be \".\" or \"..\"."
        );
    }

    #[test]
    fn test_slashes() {
        assert_eq!(
            message(Some("foo/bar")),
            "Invalid version name \"foo/bar\": version name should not include slash (/) or backslash (\\)."
        );
        assert_eq!(
            message(Some("foo\\bar")),
            "Invalid version name \"foo\\bar\": version name should not include slash (/) or backslash (\\)."
        );
    }

    #[test]
    fn test_invalid_path_characters() {
        assert_eq!(
            message(Some("<foo|bar>")),
            "Invalid version name \"<foo|bar>\": version name should be a valid file path."
        );
        assert_eq!(
            message(Some("foo:bar")),
            "Invalid version name \"foo:bar\": version name should be a valid file path."
        );
        assert!(matches!(
            validate_version_name(Some("foo\0bar")),
            Err(VersionNameError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_rule_order() {
        // Long and slashed: length is reported first.
        let name = format!("{}/x", "a".repeat(40));
        assert!(matches!(
            validate_version_name(Some(&name)),
            Err(VersionNameError::TooLong(_))
        ));
    }

    #[test]
    fn test_validate_json_values() {
        assert_eq!(validate_version_value(&json!("1.0.0")).unwrap(), "1.0.0");
        assert_eq!(
            validate_version_value(&json!(1)).unwrap_err().to_string(),
            "Versions should be strings. Found type \"number\" for version \"1\"."
        );
        assert_eq!(
            validate_version_value(&Value::Null).unwrap_err().to_string(),
            "Versions should be strings. Found type \"object\" for version \"null\"."
        );
        assert!(validate_version_value(&json!(["a"])).is_err());
    }
}
