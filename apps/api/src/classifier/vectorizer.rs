use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Tokens are runs of two or more word characters.
fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static token pattern is valid"))
}

/// Lower-cases `text` and splits it into bag-of-words tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Bag-of-words vectorizer. Columns follow the sorted token order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountVectorizer {
    vocabulary: BTreeMap<String, usize>,
}

impl CountVectorizer {
    /// Learns the vocabulary from `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut tokens: Vec<String> = documents
            .iter()
            .flat_map(|doc| tokenize(doc.as_ref()))
            .collect();
        tokens.sort();
        tokens.dedup();

        let vocabulary = tokens
            .into_iter()
            .enumerate()
            .map(|(column, token)| (token, column))
            .collect();
        Self { vocabulary }
    }

    /// Token counts for `text`. Tokens outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> Vec<u64> {
        let mut counts = vec![0; self.vocabulary.len()];
        for token in tokenize(text) {
            if let Some(&column) = self.vocabulary.get(&token) {
                counts[column] += 1;
            }
        }
        counts
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// Columns must be exactly `0..len`, each used once.
    pub(crate) fn is_consistent(&self) -> bool {
        let mut columns: Vec<usize> = self.vocabulary.values().copied().collect();
        columns.sort_unstable();
        columns.iter().enumerate().all(|(i, &c)| i == c)
    }
}
