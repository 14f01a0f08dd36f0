// Generation service boundary
//
// The persona's replies come from an external text-generation service.
// Everything behind this trait is a collaborator: the pipeline hands over
// an instruction document and the formatted player email, and gets back
// reply text or an error. Tests substitute deterministic fakes.

use anyhow::Result;
use async_trait::async_trait;

mod openai;

pub use openai::OpenAiGenerator;

/// Trait for reply generation services.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce the persona's reply to one player email.
    ///
    /// A single attempt; callers bound it with a timeout and handle
    /// failure themselves. No retry contract is assumed.
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String>;

    /// Provider name for logging (e.g., "openai").
    fn name(&self) -> &str;
}
