// Signal set types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Map key for the supervisor-match signal.
pub const SUPERVISOR_MATCH: &str = "supervisor_match";
/// Map key for the urgency signal.
pub const URGENCY: &str = "urgency";

/// Outcome of one signal evaluation, with display fields so callers never
/// need to special-case absent signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalResult {
    pub passed: bool,
    pub name: String,
    pub description: String,
}

/// The full set of risk signals for one message. Always contains every
/// signal kind regardless of which fired. BTreeMap keeps iteration order
/// stable so anything rendered from it is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalSet(BTreeMap<String, SignalResult>);

impl SignalSet {
    pub fn insert(&mut self, kind: &str, result: SignalResult) {
        self.0.insert(kind.to_string(), result);
    }

    pub fn get(&self, kind: &str) -> Option<&SignalResult> {
        self.0.get(kind)
    }

    /// True iff every signal in the set passed.
    pub fn all_passed(&self) -> bool {
        self.0.values().all(|result| result.passed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SignalResult)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
