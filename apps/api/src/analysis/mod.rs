//! Résumé skill-gap analysis: extract → match → partition into have/missing.

pub mod handlers;
pub mod report;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{LearningResource, RoleProfile};
use crate::extraction::{extract_text, ExtractError};

/// Outcome of matching one résumé against one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub role: String,
    /// Lower-cased, in vocabulary order.
    pub skills_matched: Vec<String>,
    /// Configured spelling, in vocabulary order.
    pub skills_missing: Vec<String>,
    pub resources: Vec<LearningResource>,
}

/// Matches already-extracted résumé text against `role`.
pub fn analyze_text(text: &str, role: &RoleProfile) -> SkillGapReport {
    let (skills_matched, skills_missing) = role.vocabulary.partition(text);
    info!(
        role = %role.name,
        matched = skills_matched.len(),
        missing = skills_missing.len(),
        "Skill match complete"
    );
    SkillGapReport {
        role: role.name.clone(),
        skills_matched,
        skills_missing,
        resources: role.resources.clone(),
    }
}

/// Extracts the PDF at `path` and analyzes it against `role`.
pub fn analyze_resume(path: &Path, role: &RoleProfile) -> Result<SkillGapReport, ExtractError> {
    let text = extract_text(path)?;
    if text.trim().is_empty() {
        info!(path = %path.display(), "Document has no extractable text (image-only pages?)");
    }
    Ok(analyze_text(&text, role))
}
