use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::types::IntentRecord;

// Pre-compiled regex for performance
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?").expect("invalid regex"));

/// Strip markdown code-fence markers from model output.
///
/// Models sometimes wrap JSON in ```json fences even when told not to;
/// removing the markers makes fenced and unfenced responses parse identically.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE_RE.replace_all(text, "").trim().to_string()
}

/// Parse a single intent record from model output
pub fn parse_intent(text: &str) -> Result<IntentRecord, serde_json::Error> {
    serde_json::from_str(&strip_code_fences(text))
}

/// Parse an outline (ordered chapter titles) from model output.
///
/// The output format is requested, not guaranteed, so three shapes are
/// accepted: an object with an "outline" array, a bare array, or any object
/// whose first array-valued field holds the titles. Non-string items are
/// skipped. Returns None when no usable title list is found.
pub fn parse_outline(text: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(&strip_code_fences(text)).ok()?;

    let items = match &value {
        Value::Object(map) => match map.get("outline") {
            Some(Value::Array(items)) => Some(items),
            _ => map.values().find_map(|v| v.as_array()),
        },
        Value::Array(items) => Some(items),
        _ => None,
    }?;

    let titles: Vec<String> = items
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.to_string())
        .collect();

    if titles.is_empty() {
        None
    } else {
        Some(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentiment;

    #[test]
    fn test_strip_code_fences_json() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fences_bare() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fences_noop() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_intent_fenced_matches_unfenced() {
        let bare = r#"{"intent": "book_ticket", "params": {"destination": "Shanghai"}, "sentiment": "urgent"}"#;
        let fenced = format!("```json\n{}\n```", bare);

        let a = parse_intent(bare).unwrap();
        let b = parse_intent(&fenced).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.intent, "book_ticket");
        assert_eq!(a.sentiment, Sentiment::Urgent);
        assert_eq!(a.params["destination"], "Shanghai");
    }

    #[test]
    fn test_parse_intent_rejects_unknown_sentiment() {
        let text = r#"{"intent": "x", "params": {}, "sentiment": "confused"}"#;
        assert!(parse_intent(text).is_err());
    }

    #[test]
    fn test_parse_intent_rejects_prose() {
        assert!(parse_intent("Sure! Here's what I found:").is_err());
    }

    #[test]
    fn test_parse_outline_object_with_outline_key() {
        let text = r#"{"outline": ["One", "Two", "Three"]}"#;
        assert_eq!(
            parse_outline(text),
            Some(vec!["One".into(), "Two".into(), "Three".into()])
        );
    }

    #[test]
    fn test_parse_outline_bare_array() {
        let text = r#"["One", "Two", "Three"]"#;
        assert_eq!(
            parse_outline(text),
            Some(vec!["One".into(), "Two".into(), "Three".into()])
        );
    }

    #[test]
    fn test_parse_outline_first_array_field() {
        let text = r#"{"chapters": ["One", "Two", "Three"], "note": "x"}"#;
        assert_eq!(
            parse_outline(text),
            Some(vec!["One".into(), "Two".into(), "Three".into()])
        );
    }

    #[test]
    fn test_parse_outline_shapes_agree() {
        let a = parse_outline(r#"{"outline": ["One", "Two"]}"#);
        let b = parse_outline(r#"["One", "Two"]"#);
        let c = parse_outline(r#"{"titles": ["One", "Two"]}"#);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_parse_outline_fenced() {
        let text = "```json\n{\"outline\": [\"One\"]}\n```";
        assert_eq!(parse_outline(text), Some(vec!["One".into()]));
    }

    #[test]
    fn test_parse_outline_skips_non_strings() {
        let text = r#"{"outline": ["One", 2, {"title": "Three"}, "Four"]}"#;
        assert_eq!(parse_outline(text), Some(vec!["One".into(), "Four".into()]));
    }

    #[test]
    fn test_parse_outline_rejects_empty() {
        assert_eq!(parse_outline(r#"{"outline": []}"#), None);
        assert_eq!(parse_outline(r#"{"note": "no lists here"}"#), None);
        assert_eq!(parse_outline("not json"), None);
        assert_eq!(parse_outline(r#""just a string""#), None);
    }
}
