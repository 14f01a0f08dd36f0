// Turn error taxonomy
//
// Only the failures that stop a turn before it starts live here.
// Generation failures are recovered inside the engine (fallback reply) and
// notification failures are swallowed, so neither has a variant.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    /// A required submission field is missing or blank. Surfaced to the
    /// caller; the turn never starts.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The named target is not in the registry.
    #[error("unknown character: {0}")]
    UnknownCharacter(String),
}
