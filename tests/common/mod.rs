#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use site_chat_backend::config::{UpstreamConfig, UpstreamMode};
use site_chat_backend::services::upstream::{UpstreamClient, UpstreamError};
use tokio::sync::Mutex;

/// In-memory upstream that records every call.
pub struct StubUpstream {
    pub calls: AtomicUsize,
    pub last_call: Mutex<Option<(String, String)>>,
    outcome: fn() -> Result<String, UpstreamError>,
}

impl StubUpstream {
    pub fn replying(outcome: fn() -> Result<String, UpstreamError>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
            outcome,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamClient for StubUpstream {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_text: &str,
        language: &str,
    ) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().await = Some((user_text.to_string(), language.to_string()));
        (self.outcome)()
    }
}

/// Serve `router` on an ephemeral local port.
pub async fn spawn_stub_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub fn upstream_config(mode: UpstreamMode, url: String, timeout: Duration) -> UpstreamConfig {
    UpstreamConfig {
        mode,
        url,
        model: "test-model".to_string(),
        api_key: None,
        timeout,
        temperature: 0.6,
        max_tokens: 400,
    }
}
