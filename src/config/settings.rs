// Configuration structs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    /// Telegram notification sidecar; notifications are disabled when the
    /// section is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<TelegramConfig>,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:23925")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Sustained request rate per client IP
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_second: f64,

    /// Burst capacity per client IP
    #[serde(default = "default_rate_burst")]
    pub rate_limit_burst: f64,

    /// Allow turn responses to carry signal detail and prompt internals
    /// when the caller asks for debug output
    #[serde(default = "default_true")]
    pub debug_responses: bool,
}

/// Generation service settings (OpenAI-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API key; can also come from the OPENAI_API_KEY environment variable
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Custom endpoint; the provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Upper bound on one generation attempt; past it the turn takes the
    /// fallback branch
    #[serde(default = "default_generation_timeout")]
    pub timeout_seconds: u64,
}

/// Telegram notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:23925".to_string()
}

fn default_rate_limit() -> f64 {
    1.0
}

fn default_rate_burst() -> f64 {
    5.0
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    150
}

fn default_generation_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            rate_limit_per_second: default_rate_limit(),
            rate_limit_burst: default_rate_burst(),
            debug_responses: default_true(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_generation_timeout(),
        }
    }
}

impl Config {
    /// Validate configuration and return helpful errors.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.server.bind_address.contains(':') {
            anyhow::bail!(
                "Invalid bind address '{}': expected IP:PORT (e.g. 127.0.0.1:23925)",
                self.server.bind_address
            );
        }

        if self.generation.api_key.trim().is_empty() {
            anyhow::bail!(
                "No generation API key configured.\n\
                 Set OPENAI_API_KEY or add it under [generation] in the config file."
            );
        }

        if self.generation.timeout_seconds == 0 {
            anyhow::bail!("generation timeout_seconds must be greater than 0");
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            anyhow::bail!(
                "generation temperature {} out of range (0.0-2.0)",
                self.generation.temperature
            );
        }

        if self.generation.max_tokens == 0 {
            anyhow::bail!("generation max_tokens must be greater than 0");
        }

        if self.server.rate_limit_per_second <= 0.0 || self.server.rate_limit_burst < 1.0 {
            anyhow::bail!("rate limit must allow at least one request");
        }

        if let Some(telegram) = &self.telegram {
            if telegram.bot_token.trim().is_empty() || telegram.chat_id.trim().is_empty() {
                anyhow::bail!("[telegram] section needs both bot_token and chat_id");
            }
        }

        Ok(())
    }
}
