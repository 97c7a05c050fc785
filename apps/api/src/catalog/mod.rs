//! Role catalog: role → skill vocabulary and role → learning resources.
//!
//! Loaded once at startup from two JSON files and never mutated afterwards.
//! Every role's vocabulary is compiled into boundary patterns at load time,
//! so a blank skill phrase is a startup error rather than a silent wildcard.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::matching::{CompiledVocabulary, VocabularyError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog file '{path}' is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid vocabulary for role '{role}': {source}")]
    Vocabulary {
        role: String,
        #[source]
        source: VocabularyError,
    },

    #[error("Roles '{first}' and '{second}' differ only by case")]
    AmbiguousRole { first: String, second: String },

    #[error("Role catalog is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct RoleProfile {
    /// Role name as configured.
    pub name: String,
    pub vocabulary: CompiledVocabulary,
    pub resources: Vec<LearningResource>,
}

/// Read-only role catalog, keyed by lower-cased role name.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: BTreeMap<String, RoleProfile>,
}

impl RoleCatalog {
    pub fn load(
        skills_path: impl AsRef<Path>,
        links_path: impl AsRef<Path>,
    ) -> Result<Self, CatalogError> {
        let skills: BTreeMap<String, Vec<String>> = read_json(skills_path.as_ref())?;
        let links: BTreeMap<String, Vec<LearningResource>> = read_json(links_path.as_ref())?;
        let catalog = Self::from_maps(skills, links)?;
        info!(roles = ?catalog.role_names(), "Role catalog loaded");
        Ok(catalog)
    }

    pub fn from_maps(
        skills: BTreeMap<String, Vec<String>>,
        mut links: BTreeMap<String, Vec<LearningResource>>,
    ) -> Result<Self, CatalogError> {
        if skills.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut roles: BTreeMap<String, RoleProfile> = BTreeMap::new();
        for (name, phrases) in skills {
            let vocabulary =
                CompiledVocabulary::new(&phrases).map_err(|source| CatalogError::Vocabulary {
                    role: name.clone(),
                    source,
                })?;
            let resources = links.remove(&name).unwrap_or_default();
            let key = normalize_role(&name);
            if let Some(existing) = roles.get(&key) {
                return Err(CatalogError::AmbiguousRole {
                    first: existing.name.clone(),
                    second: name,
                });
            }
            roles.insert(
                key,
                RoleProfile {
                    name,
                    vocabulary,
                    resources,
                },
            );
        }

        for orphan in links.keys() {
            warn!(role = %orphan, "Learning resources configured for unknown role; ignoring");
        }

        Ok(Self { roles })
    }

    /// Case-insensitive, whitespace-trimmed role lookup.
    pub fn resolve(&self, role: &str) -> Option<&RoleProfile> {
        self.roles.get(&normalize_role(role))
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.roles.values().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

fn normalize_role(role: &str) -> String {
    role.trim().to_lowercase()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
        path: path.display().to_string(),
        source,
    })
}
