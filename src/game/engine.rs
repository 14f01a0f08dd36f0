// Turn orchestration
//
// Sequences one turn: validate, resolve, extract signals, assemble the
// instruction document, call the generation service, detect a win, notify.
// Terminal on first completion; once past validation a turn always
// produces an outcome (generation failures take the fallback branch).

use std::sync::Arc;
use std::time::Duration;

use crate::game::error::TurnError;
use crate::game::types::{DebugInfo, EmailMessage, TurnOutcome, TurnRequest};
use crate::game::win;
use crate::levels::{Level, LevelRegistry};
use crate::notify::NotifyHandle;
use crate::prompt;
use crate::providers::Generator;
use crate::signals::SignalExtractor;

/// Notification event type for completed turns.
const GAME_ROUND_EVENT: &str = "GAME_ROUND";

pub struct TurnEngine {
    registry: Arc<LevelRegistry>,
    extractor: SignalExtractor,
    generator: Arc<dyn Generator>,
    notifier: NotifyHandle,
    generation_timeout: Duration,
}

impl TurnEngine {
    pub fn new(
        registry: Arc<LevelRegistry>,
        extractor: SignalExtractor,
        generator: Arc<dyn Generator>,
        notifier: NotifyHandle,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            extractor,
            generator,
            notifier,
            generation_timeout,
        }
    }

    /// Run one complete turn.
    ///
    /// Errors only before the turn starts (validation, resolution). After
    /// that every path produces a [`TurnOutcome`]; a generation failure or
    /// timeout yields the persona's out-of-office reply with
    /// `success = false`.
    pub async fn run_turn(&self, request: &TurnRequest) -> Result<TurnOutcome, TurnError> {
        let message = validate(request)?;
        let level = self.resolve(request.target_character.as_deref())?;
        let persona = &level.persona;

        let signals = self.extractor.evaluate(&message, persona);
        let system_prompt = prompt::assemble(persona, &signals, &level.examples);
        let user_message = message.formatted();

        tracing::info!(
            level = %level.name,
            from = %message.from,
            subject = %message.subject,
            "Processing turn"
        );

        let generation = tokio::time::timeout(
            self.generation_timeout,
            self.generator.generate(&system_prompt, &user_message),
        )
        .await;

        // Single attempt by design: on failure the fallback reply keeps the
        // narrative going and the win flag stays false.
        let (response, generated) = match generation {
            Ok(Ok(reply)) => (reply, true),
            Ok(Err(error)) => {
                tracing::warn!(
                    level = %level.name,
                    provider = self.generator.name(),
                    "Generation failed, sending out-of-office reply: {error:#}"
                );
                (persona.out_of_office(), false)
            }
            Err(_) => {
                tracing::warn!(
                    level = %level.name,
                    provider = self.generator.name(),
                    timeout_secs = self.generation_timeout.as_secs(),
                    "Generation timed out, sending out-of-office reply"
                );
                (persona.out_of_office(), false)
            }
        };

        let success = generated && win::password_disclosed(&response, &level.credential);
        if success {
            tracing::info!(level = %level.name, "Credential disclosed - player wins the round");
        }

        self.notifier.send(
            GAME_ROUND_EVENT,
            turn_summary(&level, &message, &signals, &response, success),
        );

        let debug = request.debug.then(|| DebugInfo {
            email: user_message.clone(),
            system_prompt,
            raw_input: user_message,
        });

        Ok(TurnOutcome {
            response,
            success,
            signals,
            debug,
        })
    }

    fn resolve(&self, target: Option<&str>) -> Result<Arc<Level>, TurnError> {
        match target {
            Some(name) => self
                .registry
                .resolve(name)
                .ok_or_else(|| TurnError::UnknownCharacter(name.to_string())),
            None => self
                .registry
                .default_level()
                .ok_or_else(|| TurnError::UnknownCharacter("default".to_string())),
        }
    }
}

/// Check required fields and build the per-turn message. Blank-after-trim
/// counts as missing.
fn validate(request: &TurnRequest) -> Result<EmailMessage, TurnError> {
    if request.from.trim().is_empty() {
        return Err(TurnError::MissingField("from"));
    }
    if request.subject.trim().is_empty() {
        return Err(TurnError::MissingField("subject"));
    }
    if request.body.trim().is_empty() {
        return Err(TurnError::MissingField("body"));
    }
    Ok(EmailMessage::new(
        request.from.clone(),
        request.subject.clone(),
        request.body.clone(),
    ))
}

/// Human-readable round summary for the notification side-channel.
fn turn_summary(
    level: &Level,
    message: &EmailMessage,
    signals: &crate::signals::SignalSet,
    response: &str,
    success: bool,
) -> String {
    format!(
        "Level: {}\nFrom: {}\nSubject: {}\n\n{}\n\nSecurity checks:\n{}\n\nResponse:\n{}\n\nRound won: {}",
        level.name,
        message.from,
        message.subject,
        message.body,
        prompt::format_signal_results(signals),
        response,
        if success { "yes" } else { "no" },
    )
}
