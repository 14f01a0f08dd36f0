// Wire types for the HTTP surface
//
// Field names here are the external JSON contract; keep them stable.

use serde::Serialize;

use crate::game::DebugInfo;
use crate::levels::Level;
use crate::signals::SignalSet;

/// Body of a successful `/send_email` turn.
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub response: String,
    pub success: bool,
    #[serde(rename = "securityChecks", skip_serializing_if = "Option::is_none")]
    pub security_checks: Option<SignalSet>,
    #[serde(rename = "debugInfo", skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
}

/// Error body for rejected turns. Never carries persona internals.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Player-safe view of a level: identity and objective, never the
/// credential.
#[derive(Debug, Serialize)]
pub struct LevelSummary {
    pub name: String,
    pub objective: String,
    pub character: CharacterSummary,
}

#[derive(Debug, Serialize)]
pub struct CharacterSummary {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
}

impl From<&Level> for LevelSummary {
    fn from(level: &Level) -> Self {
        Self {
            name: level.name.clone(),
            objective: level.objective.clone(),
            character: CharacterSummary {
                name: level.persona.name.clone(),
                email: level.persona.email.clone(),
                role: level.persona.role.clone(),
                department: level.persona.department.clone(),
            },
        }
    }
}
