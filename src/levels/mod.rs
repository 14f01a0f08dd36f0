// Level and persona data model
// Public interface for scenario definitions and the registry

mod registry;
mod types;

pub use registry::LevelRegistry;
pub use types::{Background, Colleague, Level, Persona, WorkedExample};
