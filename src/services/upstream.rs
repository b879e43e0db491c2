// src/services/upstream.rs
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{UpstreamConfig, UpstreamMode};
use crate::services::normalizer::normalize_body;
use crate::services::prompt::{build_flat_prompt, build_structured_body};

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection failure, timeout, or a body that could not be read.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    #[error("upstream returned status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        UpstreamError::Unreachable(e.to_string())
    }
}

/// One completion call against the inference API. Implementations own the
/// wire format and hand back an already normalized reply.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
        language: &str,
    ) -> Result<String, UpstreamError>;
}

/// POSTs an OpenAI-style chat completion body.
pub struct StructuredClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl StructuredClient {
    pub fn new(http: reqwest::Client, cfg: &UpstreamConfig) -> Self {
        Self {
            http,
            url: cfg.url.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[async_trait]
impl UpstreamClient for StructuredClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
        _language: &str,
    ) -> Result<String, UpstreamError> {
        let body = build_structured_body(
            system_prompt,
            user_text,
            &self.model,
            self.temperature,
            self.max_tokens,
        );

        let mut req = self.http.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        read_reply(req, "structured").await
    }
}

/// GETs `?query=<prompt>&model=<model>` with the whole prompt flattened into one string.
pub struct FlatTextClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl FlatTextClient {
    pub fn new(http: reqwest::Client, cfg: &UpstreamConfig) -> Self {
        Self {
            http,
            url: cfg.url.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
        }
    }
}

#[async_trait]
impl UpstreamClient for FlatTextClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
        language: &str,
    ) -> Result<String, UpstreamError> {
        let prompt = build_flat_prompt(system_prompt, user_text, language);

        let mut req = self
            .http
            .get(&self.url)
            .query(&[("query", prompt.as_str()), ("model", self.model.as_str())]);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        read_reply(req, "flat").await
    }
}

async fn read_reply(req: reqwest::RequestBuilder, mode: &str) -> Result<String, UpstreamError> {
    let started = Instant::now();

    let resp = req.send().await.map_err(|e| {
        tracing::warn!(mode, error = %e, elapsed_ms = started.elapsed().as_millis() as u64, "upstream request failed");
        UpstreamError::from(e)
    })?;

    let status = resp.status();
    tracing::debug!(mode, status = status.as_u16(), elapsed_ms = started.elapsed().as_millis() as u64, "upstream responded");

    if !status.is_success() {
        tracing::warn!(mode, status = status.as_u16(), "upstream returned non-success status");
        return Err(UpstreamError::Status(status.as_u16()));
    }

    let text = resp.text().await?;
    Ok(normalize_body(&text))
}

/// Shared HTTP client with the hard per-call timeout applied.
pub fn build_http_client(cfg: &UpstreamConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(cfg.timeout).build()
}

pub fn build_upstream(cfg: &UpstreamConfig) -> anyhow::Result<Arc<dyn UpstreamClient>> {
    let http = build_http_client(cfg)?;
    let client: Arc<dyn UpstreamClient> = match cfg.mode {
        UpstreamMode::Structured => Arc::new(StructuredClient::new(http, cfg)),
        UpstreamMode::Flat => Arc::new(FlatTextClient::new(http, cfg)),
    };
    Ok(client)
}
