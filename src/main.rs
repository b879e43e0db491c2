use std::sync::Arc;

use anyhow::Context;
use site_chat_backend::{
    config::Config, routes::build_app, services::persona::PERSONA_VERSION, state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,site_chat_backend=debug".into()),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let state = Arc::new(AppState::from_config(&config).context("building upstream client")?);

    tracing::info!(
        mode = ?config.upstream.mode,
        upstream = %config.upstream.url,
        model = %config.upstream.model,
        timeout_secs = config.upstream.timeout.as_secs(),
        greetings = config.greetings_enabled,
        persona = PERSONA_VERSION,
        "chat proxy configured"
    );
    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "serving static site");
    }

    let app = build_app(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!("🚀 chat backend running at http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
