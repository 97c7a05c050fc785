use serde::{Deserialize, Serialize};

use super::ModelError;

/// Multinomial Naive Bayes over token-count vectors.
///
/// Only raw counts are persisted. Log priors and smoothed log likelihoods are
/// derived whenever a model is built or deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NaiveBayesCounts", into = "NaiveBayesCounts")]
pub struct MultinomialNb {
    counts: NaiveBayesCounts,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

/// Persisted form of [`MultinomialNb`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesCounts {
    pub alpha: f64,
    /// Sorted class labels.
    pub classes: Vec<String>,
    /// Training documents per class.
    pub class_counts: Vec<u64>,
    /// `feature_counts[class][column]`
    pub feature_counts: Vec<Vec<u64>>,
}

pub const DEFAULT_ALPHA: f64 = 1.0;

impl MultinomialNb {
    /// Fits on count vectors `x` with labels `y`.
    pub fn fit(x: &[Vec<u64>], y: &[String], alpha: f64) -> Result<Self, ModelError> {
        if x.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        if x.len() != y.len() {
            return Err(ModelError::Shape(format!(
                "{} samples but {} labels",
                x.len(),
                y.len()
            )));
        }
        let n_features = x[0].len();

        let mut classes: Vec<String> = y.to_vec();
        classes.sort();
        classes.dedup();

        let mut class_counts = vec![0_u64; classes.len()];
        let mut feature_counts = vec![vec![0_u64; n_features]; classes.len()];
        for (row, label) in x.iter().zip(y) {
            if row.len() != n_features {
                return Err(ModelError::Shape(format!(
                    "expected {n_features} features, got {}",
                    row.len()
                )));
            }
            // classes was built from y, so the label is always present
            let class = classes.binary_search(label).unwrap_or_default();
            class_counts[class] += 1;
            for (total, count) in feature_counts[class].iter_mut().zip(row) {
                *total += count;
            }
        }

        Self::try_from(NaiveBayesCounts {
            alpha,
            classes,
            class_counts,
            feature_counts,
        })
    }

    /// Most probable class label for one count vector.
    pub fn predict(&self, row: &[u64]) -> Result<&str, ModelError> {
        let scores = self.joint_log_likelihood(row)?;
        let best = scores
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((i, score)),
            })
            .map(|(i, _)| i)
            .ok_or(ModelError::EmptyDataset)?;
        Ok(&self.counts.classes[best])
    }

    /// Unnormalized log posterior per class, in `classes()` order.
    pub fn joint_log_likelihood(&self, row: &[u64]) -> Result<Vec<f64>, ModelError> {
        if row.len() != self.n_features() {
            return Err(ModelError::Shape(format!(
                "expected {} features, got {}",
                self.n_features(),
                row.len()
            )));
        }
        Ok(self
            .feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(log_probs, prior)| {
                prior
                    + row
                        .iter()
                        .zip(log_probs)
                        .map(|(&count, lp)| count as f64 * lp)
                        .sum::<f64>()
            })
            .collect())
    }

    pub fn classes(&self) -> &[String] {
        &self.counts.classes
    }

    pub fn n_features(&self) -> usize {
        self.counts.feature_counts.first().map_or(0, Vec::len)
    }
}

impl TryFrom<NaiveBayesCounts> for MultinomialNb {
    type Error = ModelError;

    fn try_from(counts: NaiveBayesCounts) -> Result<Self, Self::Error> {
        let n_classes = counts.classes.len();
        if n_classes == 0 {
            return Err(ModelError::EmptyDataset);
        }
        if counts.class_counts.len() != n_classes || counts.feature_counts.len() != n_classes {
            return Err(ModelError::Shape(format!(
                "{n_classes} classes but {} class counts and {} feature rows",
                counts.class_counts.len(),
                counts.feature_counts.len()
            )));
        }
        let n_features = counts.feature_counts[0].len();
        if counts.feature_counts.iter().any(|r| r.len() != n_features) {
            return Err(ModelError::Shape("ragged feature count rows".to_string()));
        }
        if counts.alpha.is_nan() || counts.alpha <= 0.0 {
            return Err(ModelError::Shape(format!(
                "alpha must be positive, got {}",
                counts.alpha
            )));
        }

        let total_docs: u64 = counts.class_counts.iter().sum();
        if total_docs == 0 {
            return Err(ModelError::EmptyDataset);
        }
        let class_log_prior = counts
            .class_counts
            .iter()
            .map(|&c| (c as f64).ln() - (total_docs as f64).ln())
            .collect();

        let smoothing = counts.alpha * n_features as f64;
        let feature_log_prob = counts
            .feature_counts
            .iter()
            .map(|row| {
                let denominator = (row.iter().sum::<u64>() as f64 + smoothing).ln();
                row.iter()
                    .map(|&c| (c as f64 + counts.alpha).ln() - denominator)
                    .collect()
            })
            .collect();

        Ok(Self {
            counts,
            class_log_prior,
            feature_log_prob,
        })
    }
}

impl From<MultinomialNb> for NaiveBayesCounts {
    fn from(model: MultinomialNb) -> Self {
        model.counts
    }
}
