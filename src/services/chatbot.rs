// src/services/chatbot.rs
use crate::{
    error::AppError,
    message::ChatRequest,
    services::{
        greeting::{canned_greeting, is_simple_greeting},
        persona::SYSTEM_PROMPT,
    },
    state::AppState,
};

/// Uppercase primary subtag of a language hint (`de-DE` -> `DE`), or
/// `default` when the hint is missing or blank.
pub fn resolve_language(hint: Option<&str>, default: &str) -> String {
    hint.map(str::trim)
        .and_then(|h| h.split(['-', '_']).next())
        .filter(|code| !code.is_empty())
        .unwrap_or(default)
        .to_uppercase()
}

pub async fn generate_reply(state: &AppState, request: &ChatRequest) -> Result<String, AppError> {
    let user_text = request.message.as_deref().unwrap_or_default().trim();
    if user_text.is_empty() {
        return Err(AppError::InvalidRequest("message is required".to_string()));
    }

    let hint = request
        .detected_language
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .or(request.ui_lang.as_deref());
    let language = resolve_language(hint, &state.default_language);

    if state.greetings_enabled && is_simple_greeting(user_text) {
        tracing::debug!(%language, "answered with canned greeting");
        return Ok(canned_greeting(&language).to_string());
    }

    let reply = state
        .upstream
        .complete(SYSTEM_PROMPT, user_text, &language)
        .await?;

    tracing::debug!(%language, reply_len = reply.len(), "upstream reply");
    Ok(reply)
}
