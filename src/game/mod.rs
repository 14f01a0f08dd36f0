// Turn evaluation pipeline
// Public interface for the engine, turn types, and win detection

mod engine;
mod error;
mod types;
pub mod win;

pub use engine::TurnEngine;
pub use error::TurnError;
pub use types::{DebugInfo, EmailMessage, TurnOutcome, TurnRequest};
