// Persona and level definitions
//
// A Level binds one Persona, the player-facing objective, and the credential
// that counts as a win. Levels are loaded from TOML data files and are
// immutable after registration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// An entry in a persona's colleague directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colleague {
    pub name: String,
    pub role: String,
    pub email: String,
    /// Name of this colleague's supervisor (absent for the top of the chain).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<String>,
    pub responsibilities: String,
}

/// Narrative background: what the persona has been up to and what they do
/// day to day. Flows verbatim into the instruction document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    pub recent_events: String,
    pub common_tasks: String,
}

/// A simulated employee: fixed identity, behavioral traits, and the people
/// they know. The credential itself lives on the enclosing [`Level`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    #[serde(default)]
    pub years_at_company: u32,
    pub supervisor: String,
    pub supervisor_email: String,
    #[serde(default)]
    pub desk_location: String,
    /// Free-text trait list, rendered verbatim into the prompt.
    pub personality: String,
    pub background: Background,
    #[serde(default)]
    pub colleagues: Vec<Colleague>,
}

impl Persona {
    /// Domain part of the persona's email address.
    pub fn mail_domain(&self) -> &str {
        self.email.rsplit('@').next().unwrap_or_default()
    }

    /// Canned reply used when the generation service is unavailable.
    ///
    /// Built from identity fields only: no model call, no credential.
    /// IT departments route urgent matters to the helpdesk alias on the
    /// persona's mail domain; everyone else points at their supervisor.
    pub fn out_of_office(&self) -> String {
        let contact = if self.department.contains("IT") {
            format!("helpdesk@{}", self.mail_domain())
        } else {
            self.supervisor_email.clone()
        };

        format!(
            "Hi,\n\n\
             Thank you for your email. I am currently Out of Office and will not \
             be able to respond to your request at this time. I will return to \
             the office as soon as possible.\n\n\
             For urgent {} matters, please contact {}.\n\n\
             Best regards,\n{}\n{}",
            self.department, contact, self.name, self.role
        )
    }
}

/// A fixed (sample message, ideal reply) pair appended to the instruction
/// document as few-shot guidance. Static level data, never derived from
/// runtime state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkedExample {
    pub message: String,
    pub reply: String,
}

/// One scenario: a persona, what the player is trying to get out of them,
/// and the credential string that constitutes a win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub objective: String,
    pub credential: String,
    pub persona: Persona,
    #[serde(default)]
    pub examples: Vec<WorkedExample>,
}

impl Level {
    /// Parse a level from TOML and validate it.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let level: Level = toml::from_str(contents).context("Failed to parse level TOML")?;
        level.validate()?;
        Ok(level)
    }

    /// Load a built-in level by name.
    pub fn load_builtin(name: &str) -> Result<Self> {
        let contents = match name {
            "janet" => include_str!("../../data/levels/janet.toml"),
            "derek" => include_str!("../../data/levels/derek.toml"),
            _ => bail!("Unknown builtin level: {}", name),
        };

        Self::from_toml(contents).with_context(|| format!("Invalid builtin level: {}", name))
    }

    /// Built-in level names, in the order they should be registered.
    pub fn builtin_names() -> Vec<&'static str> {
        vec!["janet", "derek"]
    }

    /// Reject levels that would break the pipeline downstream: every turn
    /// needs a registry key, a credential to detect, and a supervisor
    /// address for the supervisor-match signal.
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("Level name must not be empty");
        }
        if self.credential.trim().is_empty() {
            bail!("Level '{}' has no credential configured", self.name);
        }
        if self.persona.name.trim().is_empty() || self.persona.email.trim().is_empty() {
            bail!("Level '{}' persona needs a name and email", self.name);
        }
        if !self.persona.email.contains('@') {
            bail!(
                "Level '{}' persona email '{}' is not an address",
                self.name,
                self.persona.email
            );
        }
        if self.persona.supervisor_email.trim().is_empty() {
            bail!("Level '{}' persona has no supervisor email", self.name);
        }
        Ok(())
    }
}
