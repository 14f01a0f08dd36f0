// Level registry
//
// Owned, write-once-at-startup store for scenario definitions. Lookup is
// case-insensitive; re-registering a name replaces the previous entry.
// Shared read-only (behind Arc) by the rest of the pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use super::types::Level;

#[derive(Debug, Default)]
pub struct LevelRegistry {
    levels: HashMap<String, Arc<Level>>,
    /// Normalized names in registration order; re-registration keeps the
    /// original position.
    order: Vec<String>,
}

impl LevelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every built-in level.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        for name in Level::builtin_names() {
            registry.register(Level::load_builtin(name)?);
        }
        Ok(registry)
    }

    /// Insert or replace a level, keyed by lowercase name. Last write wins.
    pub fn register(&mut self, level: Level) {
        let key = normalize(&level.name);
        if self.levels.insert(key.clone(), Arc::new(level)).is_none() {
            self.order.push(key);
        }
    }

    /// Case-insensitive lookup.
    pub fn resolve(&self, name: &str) -> Option<Arc<Level>> {
        self.levels.get(&normalize(name)).cloned()
    }

    /// The level a turn targets when no character is named: the first one
    /// registered.
    pub fn default_level(&self) -> Option<Arc<Level>> {
        self.order.first().and_then(|key| self.levels.get(key).cloned())
    }

    /// All levels in registration order.
    pub fn list(&self) -> Vec<Arc<Level>> {
        self.order
            .iter()
            .filter_map(|key| self.levels.get(key).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
