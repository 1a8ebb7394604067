// Message codec — JSON text handed across the front-end boundary

use super::types::Message;
use crate::store::User;
use crate::ChatStoreError;
use serde::Serialize;

/// Rendered in place of a user that does not exist
pub const EMPTY_OBJECT: &str = "{}";

/// Rendered in place of an empty or unknown conversation
pub const EMPTY_ARRAY: &str = "[]";

/// Serialize any value to compact JSON
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, ChatStoreError> {
    serde_json::to_string(value).map_err(|e| {
        tracing::warn!("JSON encoding failed: {}", e);
        ChatStoreError::Serialization
    })
}

/// Serialize any value to indented JSON (CLI output)
pub fn encode_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, ChatStoreError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        tracing::warn!("JSON encoding failed: {}", e);
        ChatStoreError::Serialization
    })
}

/// JSON array of messages, in the order given
pub fn encode_messages(messages: &[Message]) -> Result<String, ChatStoreError> {
    encode(messages)
}

/// JSON array of user profiles, in the order given
pub fn encode_users(users: &[User]) -> Result<String, ChatStoreError> {
    encode(users)
}

/// JSON object for a user, or `{}` when absent
pub fn encode_user(user: Option<&User>) -> Result<String, ChatStoreError> {
    match user {
        Some(user) => encode(user),
        None => Ok(EMPTY_OBJECT.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn msg(id: u32, text: &str) -> Message {
        Message::new(
            id,
            1,
            2,
            text.to_string(),
            NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_empty_sequences_render_as_empty_array() {
        assert_eq!(encode_messages(&[]).unwrap(), EMPTY_ARRAY);
        assert_eq!(encode_users(&[]).unwrap(), EMPTY_ARRAY);
    }

    #[test]
    fn test_missing_user_renders_as_empty_object() {
        assert_eq!(encode_user(None).unwrap(), EMPTY_OBJECT);
    }

    #[test]
    fn test_user_shape() {
        let user = User::new(3, "Dmitry", "👨‍🔧");
        let json = encode_user(Some(&user)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["id"], 3);
        assert_eq!(value["name"], "Dmitry");
        assert_eq!(value["avatar"], "👨‍🔧");
        assert_eq!(value["status"], "В сети");
        assert_eq!(value["online"], true);
        assert_eq!(value.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_escaping_round_trips() {
        let original = "line1\nline2\"quoted\"";
        let json = encode_messages(&[msg(1, original)]).unwrap();

        assert!(json.contains(r#"line1\nline2\"quoted\""#));
        let parsed: Vec<Message> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].text, original);
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let original = "tab\tcr\rback\u{8}feed\u{c}slash\\solidus/";
        let json = encode_messages(&[msg(1, original)]).unwrap();

        assert!(json.contains(r"\t"));
        assert!(json.contains(r"\r"));
        assert!(json.contains(r"\b"));
        assert!(json.contains(r"\f"));
        assert!(json.contains(r"\\"));
        assert!(!json.contains('\t'));

        // Escaped solidus from other producers decodes to the same text
        let alt = json.replace("solidus/", r"solidus\/");
        let a: Vec<Message> = serde_json::from_str(&json).unwrap();
        let b: Vec<Message> = serde_json::from_str(&alt).unwrap();
        assert_eq!(a[0].text, original);
        assert_eq!(b[0].text, original);
    }

    #[test]
    fn test_pretty_output_parses_to_same_value() {
        let messages = vec![msg(1, "a"), msg(2, "b")];
        let compact: serde_json::Value =
            serde_json::from_str(&encode_messages(&messages).unwrap()).unwrap();
        let pretty: serde_json::Value =
            serde_json::from_str(&encode_pretty(&messages).unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }
}
