// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatRequest {
    // Missing is reported as an invalid request, not a decode failure.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "detectedLanguage")]
    pub detected_language: Option<String>,
    /// Page language sent by the site widget; used when no detected language is given.
    #[serde(default)]
    pub ui_lang: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub message: String,
}
