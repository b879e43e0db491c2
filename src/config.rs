// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STRUCTURED_URL: &str =
    "https://firebase-ai-models.matrixzat99.workers.dev/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;
pub const DEFAULT_TEMPERATURE: f32 = 0.6;
pub const MAX_TEMPERATURE: f32 = 2.0;
pub const DEFAULT_MAX_TOKENS: u32 = 400;
pub const DEFAULT_LANGUAGE: &str = "EN";

/// Wire contract spoken with the upstream inference API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpstreamMode {
    /// GET with a single concatenated `query` and a `model` parameter.
    Flat,
    /// POST with an OpenAI-style chat completion body.
    Structured,
}

impl std::str::FromStr for UpstreamMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "text" => Ok(UpstreamMode::Flat),
            "structured" | "chat" => Ok(UpstreamMode::Structured),
            other => bail!("unknown upstream mode '{other}' (expected 'flat' or 'structured')"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub mode: UpstreamMode,
    pub url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub upstream: UpstreamConfig,
    pub default_language: String,
    pub greetings_enabled: bool,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Load from the process environment. Call `dotenvy::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mode = match get("CHAT_UPSTREAM_MODE") {
            Some(raw) => raw.parse::<UpstreamMode>()?,
            None => UpstreamMode::Flat,
        };

        let url = match (get("CHAT_UPSTREAM_URL"), mode) {
            (Some(url), _) => url,
            (None, UpstreamMode::Structured) => DEFAULT_STRUCTURED_URL.to_string(),
            (None, UpstreamMode::Flat) => {
                bail!("CHAT_UPSTREAM_URL must be set when CHAT_UPSTREAM_MODE is 'flat'")
            }
        };

        let timeout_secs = match get("CHAT_UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("invalid CHAT_UPSTREAM_TIMEOUT_SECS '{raw}'"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("CHAT_UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }

        let temperature = match get("CHAT_TEMPERATURE") {
            Some(raw) => raw
                .parse::<f32>()
                .with_context(|| format!("invalid CHAT_TEMPERATURE '{raw}'"))?,
            None => DEFAULT_TEMPERATURE,
        };
        if !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
            bail!("CHAT_TEMPERATURE must be between 0 and {MAX_TEMPERATURE}, got {temperature}");
        }

        let max_tokens = match get("CHAT_MAX_TOKENS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("invalid CHAT_MAX_TOKENS '{raw}'"))?,
            None => DEFAULT_MAX_TOKENS,
        };

        let greetings_enabled = match get("CHAT_GREETINGS_ENABLED") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("invalid CHAT_GREETINGS_ENABLED '{raw}'"))?,
            None => true,
        };

        Ok(Config {
            bind_addr: get("CHAT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            upstream: UpstreamConfig {
                mode,
                url,
                model: get("CHAT_UPSTREAM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_key: get("CHAT_UPSTREAM_API_KEY"),
                timeout: Duration::from_secs(timeout_secs),
                temperature,
                max_tokens,
            },
            default_language: get("CHAT_DEFAULT_LANGUAGE")
                .map(|l| l.to_uppercase())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            greetings_enabled,
            static_dir: get("CHAT_STATIC_DIR").map(PathBuf::from),
        })
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("expected a boolean"),
    }
}
