// Pretext - social-engineering training exercise server
// Main entry point

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pretext::config::load_config;
use pretext::game::TurnEngine;
use pretext::levels::LevelRegistry;
use pretext::notify::{self, NotifyHandle, TelegramNotifier};
use pretext::providers::{Generator, OpenAiGenerator};
use pretext::server::{self, AppState, RateLimiter};
use pretext::signals::SignalExtractor;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config()?;

    // Register scenario levels
    let registry = Arc::new(LevelRegistry::with_builtins()?);
    tracing::info!("Registered {} levels", registry.len());

    // Generation service client
    let mut generator = OpenAiGenerator::new(
        config.generation.api_key.clone(),
        config.generation.model.clone(),
        config.generation.temperature,
        config.generation.max_tokens,
    )?;
    if let Some(base_url) = &config.generation.base_url {
        generator = generator.with_base_url(base_url.clone());
    }
    let generator: Arc<dyn Generator> = Arc::new(generator);

    // Notification sidecar (fire-and-forget)
    let notifier = match &config.telegram {
        Some(telegram) => notify::spawn_notifier(Arc::new(TelegramNotifier::new(
            telegram.bot_token.clone(),
            telegram.chat_id.clone(),
        )?)),
        None => {
            tracing::info!("Telegram notifications disabled");
            NotifyHandle::disabled()
        }
    };

    // Turn engine
    let engine = Arc::new(TurnEngine::new(
        Arc::clone(&registry),
        SignalExtractor::new()?,
        generator,
        notifier,
        Duration::from_secs(config.generation.timeout_seconds),
    ));

    // HTTP server
    let state = Arc::new(AppState {
        engine,
        registry,
        debug_responses: config.server.debug_responses,
    });
    let limiter = RateLimiter::new(
        config.server.rate_limit_per_second,
        config.server.rate_limit_burst,
    );
    let router = server::create_router(state, limiter);

    server::serve(&config.server.bind_address, router).await
}
