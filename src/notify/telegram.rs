// Telegram notification delivery
//
// Posts framed game-event messages to a configured chat via the Bot API.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;

use super::Notifier;

const API_BASE_URL: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct TelegramNotifier {
    client: Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
            bot_token,
            chat_id,
        })
    }

    /// Point the notifier at a custom endpoint (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Frame a game event for the chat: header, timestamp, dividers.
    fn format_message(event_type: &str, content: &str) -> String {
        let divider = "=".repeat(40);
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");

        format!(
            "🎮 Social Engineering Game - {event_type}\n\
             ⏰ {timestamp}\n\
             {divider}\n\n\
             {content}\n\n\
             {divider}"
        )
    }
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: String,
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, event_type: &str, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text: Self::format_message(event_type, text),
        };

        let response = self
            .client
            .post(format!(
                "{}/bot{}/sendMessage",
                self.base_url, self.bot_token
            ))
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Telegram API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Telegram API error {}: {}", status, body));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
