use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub role_skills_path: PathBuf,
    pub learning_links_path: PathBuf,
    pub model_path: PathBuf,
    pub report_dir: PathBuf,
    /// Where uploads are staged. `None` means the system temp dir.
    pub upload_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            role_skills_path: env_or("ROLE_SKILLS_PATH", "data/role_skills.json").into(),
            learning_links_path: env_or("LEARNING_LINKS_PATH", "data/role_learning_links.json")
                .into(),
            model_path: env_or("MODEL_PATH", "model/career_predictor.json").into(),
            report_dir: env_or("REPORT_DIR", "output").into(),
            upload_dir: std::env::var("UPLOAD_DIR").ok().map(PathBuf::from),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            role_skills_path: "data/role_skills.json".into(),
            learning_links_path: "data/role_learning_links.json".into(),
            model_path: "model/career_predictor.json".into(),
            report_dir: "output".into(),
            upload_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
