// Risk signal extraction
//
// Pure classification of an incoming message into named boolean signals.
// The set of kinds is fixed and small; every evaluation returns all of
// them so downstream display never has to special-case absent signals.

mod types;
mod urgency;

pub use types::{SignalResult, SignalSet, SUPERVISOR_MATCH, URGENCY};
pub use urgency::UrgencyMatcher;

use anyhow::Result;

use crate::game::EmailMessage;
use crate::levels::Persona;

/// True iff the sender address is exactly the persona's supervisor address,
/// compared case-insensitively. No trimming, no fuzzy matching: look-alike
/// local parts and domain mismatches fail.
pub fn supervisor_match(from_email: &str, supervisor_email: &str) -> bool {
    !from_email.is_empty() && from_email.eq_ignore_ascii_case(supervisor_email)
}

/// Stateless evaluator holding the compiled urgency matcher.
pub struct SignalExtractor {
    urgency: UrgencyMatcher,
}

impl SignalExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            urgency: UrgencyMatcher::new()?,
        })
    }

    /// Classify a message against a persona. Never mutates either; two
    /// calls with the same inputs produce the same set.
    pub fn evaluate(&self, message: &EmailMessage, persona: &Persona) -> SignalSet {
        let mut signals = SignalSet::default();

        signals.insert(
            SUPERVISOR_MATCH,
            SignalResult {
                passed: supervisor_match(&message.from, &persona.supervisor_email),
                name: "Supervisor Check".to_string(),
                description: "Checks if the email is from your supervisor".to_string(),
            },
        );

        let combined = format!("{} {}", message.subject, message.body);
        signals.insert(
            URGENCY,
            SignalResult {
                passed: self.urgency.is_urgent(&combined),
                name: "Urgency Check".to_string(),
                description: "Checks for urgent or time-pressuring language".to_string(),
            },
        );

        signals
    }
}
