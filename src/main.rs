//! SoulConnect Coach server binary.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use soulconnect_coach::adapters::{
    app_router, spawn_idle_purge, ChatCompletionsConfig, ChatCompletionsProvider,
    CoachingAppState, InMemorySessionStore, LlmCoachingGateway,
};
use soulconnect_coach::application::CoachingOrchestrator;
use soulconnect_coach::config::{AiConfig, AppConfig, ServerConfig};
use soulconnect_coach::domain::coaching::ProfileCatalog;
use soulconnect_coach::ports::{AIProvider, SessionStore};

/// Startup error. `try_init` reports `Send + Sync` errors.
type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server)?;
    config.validate()?;

    let provider: Arc<dyn AIProvider> = Arc::new(build_provider(&config.ai)?);
    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "AI provider ready");

    let gateway = Arc::new(LlmCoachingGateway::new(provider));
    let orchestrator = Arc::new(CoachingOrchestrator::new(gateway));
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let profiles = Arc::new(ProfileCatalog::samples());

    let purge = spawn_idle_purge(
        sessions.clone(),
        config.session.idle_ttl(),
        config.session.purge_interval(),
    );

    let state = CoachingAppState::new(orchestrator, sessions, profiles);
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    purge.abort();
    tracing::info!("Shut down");
    Ok(())
}

fn build_provider(ai: &AiConfig) -> Result<ChatCompletionsProvider, BoxError> {
    let api_key = ai.api_key().unwrap_or_default();
    let config = ChatCompletionsConfig::new(api_key)
        .with_provider_name(&ai.provider_name)
        .with_base_url(&ai.base_url)
        .with_model(&ai.model)
        .with_timeout(ai.timeout());

    Ok(ChatCompletionsProvider::new(config)?)
}

fn init_tracing(server: &ServerConfig) -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.is_production() {
        builder.json().try_init()?;
    } else {
        builder.try_init()?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_can_only_be_initialised_once() {
        let server = ServerConfig::default();

        assert!(init_tracing(&server).is_ok());
        assert!(init_tracing(&server).is_err());
    }

    #[test]
    fn provider_is_built_from_ai_config() {
        let mut ai = AiConfig::default();
        ai.api_key = Some("test-key".to_string());
        ai.model = "glm-4-flash".to_string();

        let provider = build_provider(&ai).unwrap();

        let info = provider.provider_info();
        assert_eq!(info.name, "zhipu");
        assert_eq!(info.model, "glm-4-flash");
    }
}
