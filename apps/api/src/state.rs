use std::sync::Arc;

use anyhow::{Context, Result};

use crate::catalog::RoleCatalog;
use crate::classifier::DomainClassifier;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Built once in `main`; everything behind the `Arc`s is read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RoleCatalog>,
    pub classifier: Arc<DomainClassifier>,
    pub config: Config,
}

impl AppState {
    /// Loads the catalog and classifier artifact. Any failure here is fatal.
    pub fn load(config: Config) -> Result<Self> {
        let catalog = RoleCatalog::load(&config.role_skills_path, &config.learning_links_path)
            .context("Failed to load role catalog")?;
        let classifier = DomainClassifier::load(&config.model_path)
            .context("Failed to load domain classifier artifact")?;

        Ok(Self {
            catalog: Arc::new(catalog),
            classifier: Arc::new(classifier),
            config,
        })
    }
}
