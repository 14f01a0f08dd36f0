// Urgency language matcher
//
// The indicator list lives in data/urgency_patterns.json, grouped by
// category, and is compiled once into RegexSets at construction. Keyword
// patterns use word boundaries and match case-insensitively; structural
// cues (repeated exclamation marks, uppercase runs) match the raw text,
// since lowercasing first would make an uppercase run invisible.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use regex::{RegexSet, RegexSetBuilder};
use serde::Deserialize;

const EMBEDDED_PATTERNS: &str = include_str!("../../data/urgency_patterns.json");

#[derive(Deserialize)]
struct PatternFile {
    /// category name -> regex patterns, matched case-insensitively
    keywords: BTreeMap<String, Vec<String>>,
    /// patterns matched against the raw (case-preserved) text
    structural: Vec<String>,
}

pub struct UrgencyMatcher {
    keywords: RegexSet,
    structural: RegexSet,
}

impl UrgencyMatcher {
    /// Compile the embedded indicator set.
    pub fn new() -> Result<Self> {
        Self::from_json(EMBEDDED_PATTERNS)
    }

    /// Compile an indicator set from JSON. Split out from [`new`] so tests
    /// can exercise custom pattern files.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: PatternFile =
            serde_json::from_str(json).context("Failed to parse urgency pattern file")?;

        let keyword_patterns: Vec<&String> = file.keywords.values().flatten().collect();
        let keywords = RegexSetBuilder::new(&keyword_patterns)
            .case_insensitive(true)
            .build()
            .context("Invalid urgency keyword pattern")?;

        let structural = RegexSetBuilder::new(&file.structural)
            .build()
            .context("Invalid urgency structural pattern")?;

        Ok(Self {
            keywords,
            structural,
        })
    }

    /// True iff the text contains any urgency indicator.
    pub fn is_urgent(&self, text: &str) -> bool {
        self.keywords.is_match(text) || self.structural.is_match(text)
    }

    pub fn pattern_count(&self) -> usize {
        self.keywords.len() + self.structural.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> UrgencyMatcher {
        UrgencyMatcher::new().expect("embedded patterns must compile")
    }

    #[test]
    fn test_embedded_patterns_compile() {
        assert!(matcher().pattern_count() > 100);
    }

    #[test]
    fn test_immediate_action_words() {
        let m = matcher();
        assert!(m.is_urgent("urgent: please respond"));
        assert!(m.is_urgent("I need this asap"));
        assert!(m.is_urgent("this is critical"));
        assert!(m.is_urgent("we have an emergency"));
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let m = matcher();
        assert!(m.is_urgent("URGENT: please respond"));
        assert!(m.is_urgent("Urgent matter"));
    }

    #[test]
    fn test_word_boundaries_prevent_substring_hits() {
        let m = matcher();
        assert!(!m.is_urgent("The surgery went well"));
        assert!(!m.is_urgent("insurgents were mentioned in the article"));
        assert!(!m.is_urgent("the emergence of new ideas"));
        assert!(!m.is_urgent("a criticalism-free review"));
    }

    #[test]
    fn test_deadline_and_followup_phrases() {
        let m = matcher();
        assert!(m.is_urgent("this is the final notice"));
        assert!(m.is_urgent("need it by end of day"));
        assert!(m.is_urgent("this is my second request"));
        assert!(m.is_urgent("still waiting on your reply"));
    }

    #[test]
    fn test_exclamation_runs() {
        let m = matcher();
        assert!(m.is_urgent("answer me!!!"));
        assert!(!m.is_urgent("great job!!"));
        assert!(!m.is_urgent("great job!"));
    }

    #[test]
    fn test_uppercase_runs_require_raw_case() {
        let m = matcher();
        assert!(m.is_urgent("CRITICAL SYSTEM ALERT!!!"));
        assert!(m.is_urgent("please READ this"));
        assert!(!m.is_urgent("please read this"));
        // Two capitals are not a run
        assert!(!m.is_urgent("the IT desk"));
    }

    #[test]
    fn test_calm_text_does_not_fire() {
        let m = matcher();
        assert!(!m.is_urgent("Weekly report attached"));
        assert!(!m.is_urgent("See you at lunch on Friday"));
    }

    #[test]
    fn test_custom_pattern_file() {
        let m = UrgencyMatcher::from_json(
            r#"{"keywords": {"custom": ["\\bfrobnicate\\b"]}, "structural": []}"#,
        )
        .unwrap();
        assert!(m.is_urgent("please Frobnicate the server"));
        assert!(!m.is_urgent("urgent"));
    }

    #[test]
    fn test_invalid_pattern_file_rejected() {
        assert!(UrgencyMatcher::from_json("not json").is_err());
        assert!(
            UrgencyMatcher::from_json(r#"{"keywords": {"bad": ["("]}, "structural": []}"#).is_err()
        );
    }
}
