use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::SkillGapReport;
use crate::catalog::LearningResource;

pub const REPORT_FILE_NAME: &str = "last_session_report.json";

/// Snapshot of the most recent upload, written for offline review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub report_id: Uuid,
    pub timestamp: String,
    pub role: String,
    pub skills_have: Vec<String>,
    pub skills_missing: Vec<String>,
    pub resources: Vec<LearningResource>,
}

impl SessionReport {
    pub fn from_analysis(analysis: &SkillGapReport) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            role: analysis.role.clone(),
            skills_have: analysis.skills_matched.clone(),
            skills_missing: analysis.skills_missing.clone(),
            resources: analysis.resources.clone(),
        }
    }
}

/// Overwrites `<dir>/last_session_report.json`, creating `dir` if needed.
pub fn save_report(dir: &Path, report: &SessionReport) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory '{}'", dir.display()))?;
    let path = dir.join(REPORT_FILE_NAME);
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write report '{}'", path.display()))?;
    info!(path = %path.display(), report_id = %report.report_id, "Session report saved");
    Ok(path)
}
