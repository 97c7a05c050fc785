use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("Skill phrase is empty")]
    Blank,

    #[error("Failed to compile pattern for skill '{phrase}': {message}")]
    Compile { phrase: String, message: String },
}

/// Whole-phrase boundary pattern for one lower-cased skill phrase.
///
/// The regex crate has no lookaround, so the outer boundaries are consuming
/// groups. Only existence is tested, which makes that equivalent.
#[derive(Debug, Clone)]
pub struct SkillPattern {
    phrase: String,
    regex: Regex,
}

impl SkillPattern {
    pub fn new(phrase: &str) -> Result<Self, PatternError> {
        if phrase.trim().is_empty() {
            return Err(PatternError::Blank);
        }
        let phrase = phrase.to_lowercase();
        let source = format!(r"(?:^|[^\w]){}(?:[^\w]|$)", regex::escape(&phrase));
        let regex = Regex::new(&source).map_err(|e| PatternError::Compile {
            phrase: phrase.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { phrase, regex })
    }

    /// The lower-cased phrase this pattern searches for.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// `haystack` must already be lower-cased.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}
