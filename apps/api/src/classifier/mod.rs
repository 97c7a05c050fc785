//! Domain Classifier: predicts a career domain from a free-text skill list.
//!
//! A bag-of-words [`CountVectorizer`] feeds a [`MultinomialNb`]. Both are
//! trained offline by the `train-model` binary and persisted together as one
//! JSON artifact, loaded once at startup.

pub mod handlers;
pub mod naive_bayes;
pub mod vectorizer;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub use naive_bayes::{MultinomialNb, DEFAULT_ALPHA};
pub use vectorizer::CountVectorizer;

/// Errors from loading, saving or training the model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Training dataset is empty")]
    EmptyDataset,

    #[error("Model shape mismatch: {0}")]
    Shape(String),

    #[error("Model artifact I/O error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Model artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-request classification failures.
#[derive(Debug, Error, PartialEq)]
pub enum ClassifyError {
    #[error("No skills provided")]
    EmptyInput,

    #[error("Classification failed: {0}")]
    Model(String),
}

/// One labeled training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub skills: String,
    pub domain: String,
}

/// The built-in training set used when no dataset file is given.
pub fn sample_dataset() -> Vec<TrainingRow> {
    [
        ("python, pandas, numpy, matplotlib", "Data Analyst"),
        ("html, css, javascript", "Web Development"),
        ("python, machine learning, deep learning", "AI/ML"),
        ("linux, networking, firewall, wireshark", "Cybersecurity"),
        ("react, node.js, mongodb, express", "Web Development"),
        ("excel, data cleaning, matplotlib", "Data Analyst"),
        ("cybersecurity, kali linux, wireshark", "Cybersecurity"),
        ("tensorflow, keras, pandas, sklearn", "AI/ML"),
    ]
    .into_iter()
    .map(|(skills, domain)| TrainingRow {
        skills: skills.to_string(),
        domain: domain.to_string(),
    })
    .collect()
}

/// Vectorizer and model, trained together and persisted together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainClassifier {
    vectorizer: CountVectorizer,
    model: MultinomialNb,
}

impl DomainClassifier {
    pub fn train(rows: &[TrainingRow]) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        let documents: Vec<&str> = rows.iter().map(|r| r.skills.as_str()).collect();
        let labels: Vec<String> = rows.iter().map(|r| r.domain.clone()).collect();

        let vectorizer = CountVectorizer::fit(&documents);
        let x: Vec<Vec<u64>> = documents.iter().map(|d| vectorizer.transform(d)).collect();
        let model = MultinomialNb::fit(&x, &labels, DEFAULT_ALPHA)?;

        info!(
            samples = rows.len(),
            features = vectorizer.n_features(),
            classes = model.classes().len(),
            "Trained domain classifier"
        );
        Ok(Self { vectorizer, model })
    }

    /// Predicts the most probable domain for `skills_text`.
    pub fn classify(&self, skills_text: &str) -> Result<String, ClassifyError> {
        if skills_text.trim().is_empty() {
            return Err(ClassifyError::EmptyInput);
        }
        let row = self.vectorizer.transform(skills_text);
        self.model
            .predict(&row)
            .map(String::from)
            .map_err(|e| ClassifyError::Model(e.to_string()))
    }

    pub fn domains(&self) -> &[String] {
        self.model.classes()
    }

    /// Loads the JSON artifact written by [`DomainClassifier::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let classifier: Self = serde_json::from_str(&raw)?;
        classifier.validate()?;
        info!(
            path = %path.display(),
            domains = ?classifier.domains(),
            "Loaded domain classifier"
        );
        Ok(classifier)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        let io_err = |source| ModelError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_err)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if !self.vectorizer.is_consistent() {
            return Err(ModelError::Shape(
                "vectorizer columns are not a dense 0..n range".to_string(),
            ));
        }
        if self.vectorizer.n_features() != self.model.n_features() {
            return Err(ModelError::Shape(format!(
                "vectorizer has {} features, model expects {}",
                self.vectorizer.n_features(),
                self.model.n_features()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained() -> DomainClassifier {
        DomainClassifier::train(&sample_dataset()).unwrap()
    }

    #[test]
    fn test_sample_dataset_covers_four_domains() {
        let classifier = trained();
        assert_eq!(
            classifier.domains(),
            &["AI/ML", "Cybersecurity", "Data Analyst", "Web Development"]
        );
    }

    #[test]
    fn test_classify_training_style_inputs() {
        let classifier = trained();
        assert_eq!(classifier.classify("html css javascript").unwrap(), "Web Development");
        assert_eq!(classifier.classify("wireshark, kali linux").unwrap(), "Cybersecurity");
        assert_eq!(classifier.classify("tensorflow keras").unwrap(), "AI/ML");
        assert_eq!(classifier.classify("Excel and data cleaning").unwrap(), "Data Analyst");
    }

    #[test]
    fn test_classify_rejects_blank_input() {
        let classifier = trained();
        assert_eq!(classifier.classify(""), Err(ClassifyError::EmptyInput));
        assert_eq!(classifier.classify("  \n\t"), Err(ClassifyError::EmptyInput));
    }

    #[test]
    fn test_unknown_tokens_still_yield_a_label() {
        let classifier = trained();
        let label = classifier.classify("underwater basket weaving").unwrap();
        assert!(classifier.domains().contains(&label));
    }

    #[test]
    fn test_train_rejects_empty_dataset() {
        assert!(matches!(
            DomainClassifier::train(&[]),
            Err(ModelError::EmptyDataset)
        ));
    }

    #[test]
    fn test_save_then_load_predicts_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model").join("career_predictor.json");
        let classifier = trained();
        classifier.save(&path).unwrap();

        let loaded = DomainClassifier::load(&path).unwrap();
        for text in ["python pandas", "react express", "firewall", "deep learning"] {
            assert_eq!(loaded.classify(text), classifier.classify(text));
        }
    }

    #[test]
    fn test_shipped_artifact_matches_fresh_training() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("model/career_predictor.json");
        let shipped = DomainClassifier::load(path).unwrap();
        let fresh = trained();
        assert_eq!(shipped.domains(), fresh.domains());
        for text in ["python, sql, tableau", "kali linux", "react", "keras pandas"] {
            assert_eq!(shipped.classify(text), fresh.classify(text));
        }
    }

    #[test]
    fn test_load_missing_artifact_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = DomainClassifier::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn test_load_corrupt_artifact_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            DomainClassifier::load(&path),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn test_load_rejects_feature_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mismatch.json");
        std::fs::write(
            &path,
            r#"{
                "vectorizer": {"vocabulary": {"python": 0, "sql": 1}},
                "model": {"alpha": 1.0, "classes": ["a"], "class_counts": [1], "feature_counts": [[1]]}
            }"#,
        )
        .unwrap();
        assert!(matches!(
            DomainClassifier::load(&path),
            Err(ModelError::Shape(_))
        ));
    }
}
