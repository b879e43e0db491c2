// src/services/normalizer.rs
//
// Turns whatever the upstream sent back into a reply string. Every shape has a
// fallback, so this never fails.

use serde_json::Value;

pub const NO_REPLY: &str = "No reply from AI service.";

const FALLBACK_FIELDS: &[&str] = &["reply", "response", "answer", "text", "output"];

/// Normalize a raw upstream body. Non-JSON bodies are used as plain text.
pub fn normalize_body(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => normalize_value(&value),
        Err(_) => non_empty(raw).unwrap_or_else(|| NO_REPLY.to_string()),
    }
}

pub fn normalize_value(value: &Value) -> String {
    if let Some(reply) = extract_reply(value) {
        return reply;
    }
    match value {
        Value::Null => NO_REPLY.to_string(),
        Value::String(_) => NO_REPLY.to_string(),
        other => other.to_string(),
    }
}

/// Try the known shapes in order; `None` when nothing matched.
pub fn extract_reply(value: &Value) -> Option<String> {
    let matchers: [fn(&Value) -> Option<String>; 5] = [
        bare_string,
        chat_completion,
        message_object,
        message_string,
        fallback_fields,
    ];
    matchers.iter().find_map(|m| m(value))
}

fn bare_string(value: &Value) -> Option<String> {
    value.as_str().and_then(non_empty)
}

fn chat_completion(value: &Value) -> Option<String> {
    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .and_then(non_empty)
}

fn message_object(value: &Value) -> Option<String> {
    let message = value.get("message")?.as_object()?;
    ["content", "text"]
        .iter()
        .find_map(|k| message.get(*k).and_then(Value::as_str).and_then(non_empty))
        .or_else(|| Some(Value::Object(message.clone()).to_string()))
}

fn message_string(value: &Value) -> Option<String> {
    value.get("message").and_then(Value::as_str).and_then(non_empty)
}

fn fallback_fields(value: &Value) -> Option<String> {
    FALLBACK_FIELDS
        .iter()
        .find_map(|k| value.get(*k).and_then(Value::as_str).and_then(non_empty))
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
