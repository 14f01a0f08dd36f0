// Turn types
//
// One turn = one player email in, one persona reply and success flag out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::signals::SignalSet;

/// A player-submitted email. Ephemeral: constructed per turn, never stored.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub from: String,
    pub subject: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl EmailMessage {
    pub fn new(from: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            subject: subject.into(),
            body: body.into(),
            timestamp: Utc::now(),
        }
    }

    /// The form in which the email reaches the generation service.
    pub fn formatted(&self) -> String {
        format!("From: {}\nSubject: {}\n\n{}", self.from, self.subject, self.body)
    }
}

/// Wire-level turn submission. Field names are the external contract.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    /// Level to address; the registry default when absent.
    #[serde(default)]
    pub target_character: Option<String>,
    /// Request signal detail and prompt internals in the result.
    #[serde(default)]
    pub debug: bool,
}

/// Observability payload, attached only when the caller asked for debug
/// output. Never needed for correctness.
#[derive(Debug, Clone, Serialize)]
pub struct DebugInfo {
    /// The player's email as the persona saw it.
    pub email: String,
    /// The full instruction document sent to the generation service.
    pub system_prompt: String,
    /// The raw user-message input to the generation service.
    pub raw_input: String,
}

/// Outcome of one complete turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The persona's reply (generated, or the out-of-office fallback).
    pub response: String,
    /// Whether the reply disclosed the level's credential in the required
    /// format.
    pub success: bool,
    pub signals: SignalSet,
    pub debug: Option<DebugInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_email_layout() {
        let message = EmailMessage::new("a@b.com", "Hello", "line one\nline two");
        assert_eq!(
            message.formatted(),
            "From: a@b.com\nSubject: Hello\n\nline one\nline two"
        );
    }

    #[test]
    fn test_turn_request_defaults() {
        let request: TurnRequest = serde_json::from_str(r#"{"from": "a@b.com"}"#).unwrap();
        assert_eq!(request.from, "a@b.com");
        assert!(request.subject.is_empty());
        assert!(request.target_character.is_none());
        assert!(!request.debug);
    }
}
