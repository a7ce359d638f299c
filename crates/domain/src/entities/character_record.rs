//! Character records as they arrive from a characters JSON source.
//!
//! Parsing is deliberately forgiving below the top level: the document must be
//! a JSON array, but individual records may be missing fields, carry numbers
//! where strings are expected, or contain `null` sections. Those degrade to
//! empty values instead of failing the whole import.

use serde_json::Value;

use crate::error::DomainError;
use crate::value_objects::DisplayName;

/// One raw character from the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRecord {
    name: Option<String>,
    race: Option<String>,
    content: Option<CharacterContent>,
    /// The record exactly as it appeared in the source, kept for provenance
    raw: Value,
}

/// Optional structured biography of a character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterContent {
    pub excerpt: Option<String>,
    pub sections: Vec<ContentSection>,
}

/// One titled (or untitled) biography section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSection {
    pub title: Option<String>,
    pub text: Option<String>,
}

impl CharacterRecord {
    /// Build a record from one element of the source array.
    pub fn from_value(raw: Value) -> Self {
        let name = raw.get("name").and_then(scalar_to_string);
        let race = raw.get("race").and_then(scalar_to_string);
        let content = raw.get("content").and_then(CharacterContent::from_value);
        Self {
            name,
            race,
            content,
            raw,
        }
    }

    /// Builder used by tests and callers that already hold typed data.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let raw = serde_json::json!({ "name": name });
        Self::from_value(raw)
    }

    /// The raw name, untrimmed, if the record had one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Display name with the placeholder applied for blank names.
    pub fn display_name(&self, placeholder: &str) -> DisplayName {
        DisplayName::from_raw_or(self.name.as_deref(), placeholder)
    }

    /// Trimmed race, empty when absent.
    pub fn race(&self) -> &str {
        self.race.as_deref().map(str::trim).unwrap_or_default()
    }

    pub fn content(&self) -> Option<&CharacterContent> {
        self.content.as_ref()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl CharacterContent {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let excerpt = object.get("excerpt").and_then(scalar_to_string);
        let sections = object
            .get("sections")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| is_truthy(item))
                    .map(|item| ContentSection {
                        title: item.get("title").and_then(scalar_to_string),
                        text: item.get("text").and_then(scalar_to_string),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Some(Self { excerpt, sections })
    }
}

/// Parse a characters document into records.
///
/// # Errors
///
/// Returns `DomainError::Parse` when the text is not JSON or the top-level
/// value is not an array.
pub fn parse_character_array(text: &str) -> Result<Vec<CharacterRecord>, DomainError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DomainError::parse(format!("Invalid characters JSON: {e}")))?;
    let Value::Array(items) = value else {
        return Err(DomainError::parse("JSON is not an array of characters."));
    };
    Ok(items.into_iter().map(CharacterRecord::from_value).collect())
}

/// Strings pass through, numbers and booleans are stringified, everything else is absent.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::UNNAMED_CHARACTER;

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_character_array("not json").unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_character_array(r#"{"name": "Mira"}"#).unwrap_err();
        assert_eq!(
            err,
            DomainError::parse("JSON is not an array of characters.")
        );
    }

    #[test]
    fn test_parse_reads_fields_leniently() {
        let records = parse_character_array(
            r#"[
                {"name": " Mira ", "race": "Elf", "content": {
                    "excerpt": "A ranger.",
                    "sections": [null, {"title": "Past", "text": "Grew up north."}, {"text": 42}]
                }},
                {"name": 7},
                {}
            ]"#,
        )
        .expect("parse");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name(), Some(" Mira "));
        assert_eq!(records[0].display_name(UNNAMED_CHARACTER).as_str(), "Mira");
        assert_eq!(records[0].race(), "Elf");
        let content = records[0].content().expect("content");
        assert_eq!(content.excerpt.as_deref(), Some("A ranger."));
        assert_eq!(content.sections.len(), 2);
        assert_eq!(content.sections[1].text.as_deref(), Some("42"));

        assert_eq!(records[1].display_name(UNNAMED_CHARACTER).as_str(), "7");
        assert_eq!(
            records[2].display_name(UNNAMED_CHARACTER).as_str(),
            UNNAMED_CHARACTER
        );
        assert_eq!(records[2].race(), "");
    }

    #[test]
    fn test_raw_record_is_retained() {
        let records = parse_character_array(r#"[{"name": "Mira", "extra": [1, 2]}]"#)
            .expect("parse");
        assert_eq!(
            records[0].raw(),
            &serde_json::json!({"name": "Mira", "extra": [1, 2]})
        );
    }
}
