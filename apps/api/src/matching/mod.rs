//! Skill Matcher: finds which vocabulary phrases occur in résumé text.
//!
//! Matching is exact and case-insensitive on whole words or phrases. A phrase
//! counts when it is not glued to another word character (Unicode alphanumeric
//! or `_`) on either outer edge. Punctuation inside the phrase (`c++`,
//! `node.js`, `ci/cd`) is matched literally.
//!
//! Two entry points:
//! - [`match_skills`] compiles patterns on the fly. Blank phrases are skipped.
//! - [`CompiledVocabulary`] compiles once per role at catalog load and rejects
//!   blank phrases up front.

pub mod pattern;

use std::collections::HashSet;

use thiserror::Error;
use tracing::warn;

pub use pattern::{PatternError, SkillPattern};

#[derive(Debug, Error, PartialEq)]
pub enum VocabularyError {
    #[error("Skill phrase at position {index} is empty")]
    EmptyPhrase { index: usize },

    #[error("Failed to compile pattern for skill '{phrase}': {message}")]
    Pattern { phrase: String, message: String },
}

/// Returns the lower-cased vocabulary phrases found in `text`.
///
/// The haystack is lower-cased once up front. An empty vocabulary or empty
/// text yields an empty set. Blank phrases are skipped; a phrase whose pattern
/// fails to compile is logged and skipped.
pub fn match_skills<S: AsRef<str>>(text: &str, vocabulary: &[S]) -> HashSet<String> {
    if vocabulary.is_empty() || text.is_empty() {
        return HashSet::new();
    }
    let haystack = text.to_lowercase();

    vocabulary
        .iter()
        .filter_map(|phrase| match SkillPattern::new(phrase.as_ref()) {
            Ok(pattern) => Some(pattern),
            Err(PatternError::Blank) => None,
            Err(e) => {
                warn!("Skipping skill phrase: {e}");
                None
            }
        })
        .filter(|pattern| pattern.is_match(&haystack))
        .map(|pattern| pattern.phrase().to_string())
        .collect()
}

/// Vocabulary entries whose lower-cased form is not in `matched`, in
/// vocabulary order and original spelling.
pub fn missing_skills<S: AsRef<str>>(vocabulary: &[S], matched: &HashSet<String>) -> Vec<String> {
    vocabulary
        .iter()
        .map(AsRef::as_ref)
        .filter(|skill| !matched.contains(&skill.to_lowercase()))
        .map(String::from)
        .collect()
}

/// A role's vocabulary with one boundary pattern precompiled per phrase.
#[derive(Debug, Clone)]
pub struct CompiledVocabulary {
    phrases: Vec<String>,
    patterns: Vec<SkillPattern>,
}

impl CompiledVocabulary {
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Result<Self, VocabularyError> {
        let patterns = phrases
            .iter()
            .enumerate()
            .map(|(index, phrase)| {
                SkillPattern::new(phrase.as_ref()).map_err(|e| match e {
                    PatternError::Blank => VocabularyError::EmptyPhrase { index },
                    PatternError::Compile { phrase, message } => {
                        VocabularyError::Pattern { phrase, message }
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            phrases: phrases.iter().map(|p| p.as_ref().to_string()).collect(),
            patterns,
        })
    }

    /// Phrases as configured (original spelling, original order).
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Same contract as [`match_skills`], using the precompiled patterns.
    pub fn match_text(&self, text: &str) -> HashSet<String> {
        if self.patterns.is_empty() || text.is_empty() {
            return HashSet::new();
        }
        let haystack = text.to_lowercase();
        self.patterns
            .iter()
            .filter(|pattern| pattern.is_match(&haystack))
            .map(|pattern| pattern.phrase().to_string())
            .collect()
    }

    /// Splits the vocabulary into (matched, missing).
    ///
    /// Matched phrases are lower-cased and listed once each, in vocabulary
    /// order. Missing phrases keep their configured spelling.
    pub fn partition(&self, text: &str) -> (Vec<String>, Vec<String>) {
        let found = self.match_text(text);
        let mut seen = HashSet::new();
        let matched = self
            .patterns
            .iter()
            .map(SkillPattern::phrase)
            .filter(|phrase| found.contains(*phrase) && seen.insert(*phrase))
            .map(String::from)
            .collect();
        (matched, missing_skills(&self.phrases, &found))
    }
}
