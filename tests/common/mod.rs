// Deterministic collaborator stubs shared by integration tests

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use pretext::game::TurnEngine;
use pretext::levels::LevelRegistry;
use pretext::notify::NotifyHandle;
use pretext::providers::Generator;
use pretext::signals::SignalExtractor;

/// Generator returning a fixed reply.
pub struct CannedGenerator {
    reply: String,
}

impl CannedGenerator {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
        })
    }
}

#[async_trait]
impl Generator for CannedGenerator {
    async fn generate(&self, _system_prompt: &str, _user_message: &str) -> Result<String> {
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "canned"
    }
}

/// Generator that always fails, for exercising the fallback branch.
pub struct FailingGenerator;

impl FailingGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _system_prompt: &str, _user_message: &str) -> Result<String> {
        Err(anyhow!("generation service unavailable"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Turn engine over the builtin levels with a stubbed generator and no
/// notification sidecar.
pub fn engine_with(generator: Arc<dyn Generator>) -> TurnEngine {
    TurnEngine::new(
        Arc::new(LevelRegistry::with_builtins().expect("builtin levels must load")),
        SignalExtractor::new().expect("embedded patterns must compile"),
        generator,
        NotifyHandle::disabled(),
        Duration::from_secs(5),
    )
}
