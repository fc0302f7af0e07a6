//! Text frames exchanged over the websocket.
//!
//! Client commands are `PARAMS:{json}`, `VALIDATE`, `GENERATE` and `PREVIEW`.
//! Replies carry a `NAME_UPDATE:` prefix followed by a JSON payload.

use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Replace the session's parameter set with this JSON document.
    Params(&'a str),
    Validate,
    Generate,
    Preview,
}

impl<'a> Command<'a> {
    pub fn parse(text: &'a str) -> Option<Self> {
        if let Some(json) = text.strip_prefix("PARAMS:") {
            return Some(Command::Params(json));
        }
        match text.trim() {
            "VALIDATE" => Some(Command::Validate),
            "GENERATE" => Some(Command::Generate),
            "PREVIEW" => Some(Command::Preview),
            _ => None,
        }
    }
}

/// `NAME_UPDATE:{json}`. Serialization failures degrade to an empty object.
pub fn update<T: Serialize>(name: &str, payload: &T) -> String {
    let json = serde_json::to_string(payload).unwrap_or_else(|_| "{}".to_string());
    format!("{}_UPDATE:{}", name, json)
}

/// Format an error as a JSON message for the frontend
pub fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!(
        "ERROR_UPDATE:{}",
        json!({
            "code": code,
            "message": message,
            "severity": severity
        })
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("VALIDATE"), Some(Command::Validate));
        assert_eq!(Command::parse("GENERATE\n"), Some(Command::Generate));
        assert_eq!(Command::parse("PREVIEW"), Some(Command::Preview));
        assert_eq!(Command::parse(r#"PARAMS:{"cap":{}}"#), Some(Command::Params(r#"{"cap":{}}"#)));
        assert_eq!(Command::parse("REGEN"), None);
    }

    #[test]
    fn test_error_frame() {
        let frame = format_error("BAD", "went \"wrong\"", "error");
        let json: serde_json::Value = serde_json::from_str(frame.strip_prefix("ERROR_UPDATE:").unwrap()).unwrap();
        assert_eq!(json["code"], "BAD");
        assert_eq!(json["message"], "went \"wrong\"");
    }

    #[test]
    fn test_update_frame() {
        assert_eq!(update("VALIDATION", &vec![1, 2]), "VALIDATION_UPDATE:[1,2]");
    }
}
