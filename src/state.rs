// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::upstream::{UpstreamClient, build_upstream};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub upstream: Arc<dyn UpstreamClient>,
    pub default_language: String,
    pub greetings_enabled: bool,
}

impl AppState {
    pub fn new(upstream: Arc<dyn UpstreamClient>) -> Self {
        Self {
            upstream,
            default_language: crate::config::DEFAULT_LANGUAGE.to_string(),
            greetings_enabled: true,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            upstream: build_upstream(&config.upstream)?,
            default_language: config.default_language.clone(),
            greetings_enabled: config.greetings_enabled,
        })
    }
}
