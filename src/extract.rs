//! JSON extraction from free-form assistant text.
//!
//! Assistants are asked for bare JSON but often wrap it in prose or
//! markdown fences. Extraction takes the span from the first opening
//! delimiter to the last closing one and parses that. When no span is
//! found the whole trimmed text is tried as-is.
//!
//! Parsing happens in two steps so failures can be told apart:
//! text → [`serde_json::Value`] (a parse error), then value → `T`
//! (a shape error).

use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("empty response")]
    Empty,

    #[error("could not parse JSON: {0}")]
    Parse(String),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// Extract and decode the outermost JSON object in `text`.
pub fn extract_object<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    extract(text, '{', '}')
}

/// Extract and decode the outermost JSON array in `text`.
pub fn extract_array<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    extract(text, '[', ']')
}

fn extract<T: DeserializeOwned>(text: &str, open: char, close: char) -> Result<T, ExtractError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::Empty);
    }

    let candidate = delimited_span(trimmed, open, close).unwrap_or(trimmed);
    let value: Value =
        serde_json::from_str(candidate).map_err(|e| ExtractError::Parse(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| ExtractError::Shape(e.to_string()))
}

/// The slice from the first `open` to the last `close`, inclusive.
fn delimited_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: String,
    }

    #[test]
    fn bare_object() {
        let named: Named = extract_object(r#"{"name": "Pomfret"}"#).unwrap();
        assert_eq!(named.name, "Pomfret");
    }

    #[test]
    fn object_inside_markdown_fence() {
        let text = "Here you go:\n```json\n{\"name\": \"Mackerel\"}\n```\nHope that helps!";
        let named: Named = extract_object(text).unwrap();
        assert_eq!(named.name, "Mackerel");
    }

    #[test]
    fn nested_objects_use_outermost_span() {
        let text = r#"Result: {"name": "Rohu", "extra": {"depth": 2}} done"#;
        let named: Named = extract_object(text).unwrap();
        assert_eq!(named.name, "Rohu");
    }

    #[test]
    fn array_amid_prose() {
        let text = r#"Sure! [{"name": "A"}, {"name": "B"}] Let me know."#;
        let list: Vec<Named> = extract_array(text).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "B");
    }

    #[test]
    fn blank_text_is_empty() {
        assert_eq!(extract_object::<Named>("   \n").unwrap_err(), ExtractError::Empty);
        assert_eq!(extract_array::<Vec<Named>>("").unwrap_err(), ExtractError::Empty);
    }

    #[test]
    fn prose_without_json_is_parse_error() {
        let err = extract_object::<Named>("I could not see a fish in this picture.").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn truncated_json_is_parse_error() {
        let err = extract_object::<Named>(r#"{"name": "Catla", "#).unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn wrong_shape_is_shape_error() {
        let err = extract_object::<Named>(r#"{"title": "Catla"}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Shape(_)));

        let err = extract_array::<Vec<Named>>(r#"[1, 2, 3]"#).unwrap_err();
        assert!(matches!(err, ExtractError::Shape(_)));
    }

    #[test]
    fn reversed_delimiters_fall_back_to_whole_text() {
        let err = extract_object::<Named>("} nothing here {").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }
}
