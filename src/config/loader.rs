// Configuration loader
// Loads settings from ~/.pretext/config.toml; secrets may come from the
// environment instead, and existing environment values win over the file.

use std::path::Path;

use anyhow::{Context, Result};
use std::fs;

use super::settings::{Config, TelegramConfig};

/// Load configuration from the default location plus environment.
pub fn load_config() -> Result<Config> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home.join(".pretext/config.toml");
    load_config_from(&config_path)
}

/// Load configuration from an explicit path plus environment. The file is
/// optional; environment variables fill in or override secrets:
/// `OPENAI_API_KEY`, `PRETEXT_BOT_TOKEN`, `PRETEXT_BOT_CHAT_ID`.
pub fn load_config_from(config_path: &Path) -> Result<Config> {
    let mut config = if config_path.exists() {
        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?
    } else {
        Config::default()
    };

    if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
        if !api_key.is_empty() {
            config.generation.api_key = api_key;
        }
    }

    if config.telegram.is_none() {
        if let (Ok(bot_token), Ok(chat_id)) = (
            std::env::var("PRETEXT_BOT_TOKEN"),
            std::env::var("PRETEXT_BOT_CHAT_ID"),
        ) {
            if !bot_token.is_empty() && !chat_id.is_empty() {
                config.telegram = Some(TelegramConfig { bot_token, chat_id });
            }
        }
    }

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}
