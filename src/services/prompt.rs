// src/services/prompt.rs
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PromptMessage {
    pub role: &'static str, // "system" | "user"
    pub content: String,
}

/// Body of an OpenAI-style chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionBody {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

pub fn build_structured_body(
    system_prompt: &str,
    user_text: &str,
    model: &str,
    temperature: f32,
    max_tokens: u32,
) -> ChatCompletionBody {
    ChatCompletionBody {
        model: model.to_string(),
        messages: vec![
            PromptMessage {
                role: "system",
                content: system_prompt.to_string(),
            },
            PromptMessage {
                role: "user",
                content: user_text.trim().to_string(),
            },
        ],
        temperature,
        max_tokens,
    }
}

/// Single-string prompt for upstreams that only take one text parameter.
/// The reply language is locked to `language`.
pub fn build_flat_prompt(system_prompt: &str, user_text: &str, language: &str) -> String {
    format!(
        "{system}\n\n\
         IMPORTANT: You MUST reply only in the language that matches this language code: {lang}.\n\
         Language code: {lang}\n\n\
         User: {user}\n\
         Assistant:",
        system = system_prompt.trim_end(),
        lang = language,
        user = user_text.trim(),
    )
}
