//! Reply extraction from upstream response bodies.
//!
//! The v2 chat endpoint usually answers
//! `{"status":"success","data":{"response":"..."}}`, but deployments have
//! been observed returning the text under other keys or at the root, so
//! extraction stays deliberately flexible.

use serde_json::Value;

/// Keys tried, in order, when digging the reply text out of a response.
const REPLY_KEYS: [&str; 4] = ["response", "answer", "text", "message"];

/// Pull the reply text out of a parsed upstream response.
///
/// Looks under `data` when it is an object, otherwise at the root. Returns
/// the first string value found under a known key, trimmed. `None` means
/// the caller should fall back to the raw body snippet.
pub fn extract_reply(value: &Value) -> Option<String> {
    let root = value.as_object()?;
    let data = if root.contains_key("data") {
        &root["data"]
    } else {
        value
    };
    let data = data.as_object()?;

    for key in REPLY_KEYS {
        if let Some(text) = data.get(key).and_then(Value::as_str) {
            return Some(text.trim().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_from_data_response() {
        let body = json!({"status": "success", "data": {"response": " 안녕하세요 "}});
        assert_eq!(extract_reply(&body).as_deref(), Some("안녕하세요"));
    }

    #[test]
    fn extracts_from_root_when_data_missing() {
        let body = json!({"answer": "root-level"});
        assert_eq!(extract_reply(&body).as_deref(), Some("root-level"));
    }

    #[test]
    fn key_order_prefers_response() {
        let body = json!({"data": {"message": "later", "response": "first"}});
        assert_eq!(extract_reply(&body).as_deref(), Some("first"));
    }

    #[test]
    fn non_object_data_yields_none() {
        let body = json!({"data": "just a string"});
        assert_eq!(extract_reply(&body), None);
    }

    #[test]
    fn non_object_root_yields_none() {
        assert_eq!(extract_reply(&json!(["a", "b"])), None);
        assert_eq!(extract_reply(&json!("text")), None);
    }

    #[test]
    fn non_string_values_are_skipped() {
        let body = json!({"data": {"response": 42, "text": "fallback key"}});
        assert_eq!(extract_reply(&body).as_deref(), Some("fallback key"));
    }
}
