use anyhow::{Result, bail};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{CorpusLoader, EmbeddingModel, Normalizer};

/// The loaded data every request scores against: the per-day secret words
/// and the embedding model. Built once and shared behind an `Arc`; a reload
/// builds a new catalog rather than mutating this one.
pub struct Catalog {
    secret_words: Vec<String>, // Normalized
    model: Arc<dyn EmbeddingModel>,
    normalizer: Arc<dyn Normalizer>,
}

impl Catalog {
    pub fn new(
        words: Vec<String>,
        model: Arc<dyn EmbeddingModel>,
        normalizer: Arc<dyn Normalizer>,
    ) -> Result<Self> {
        if words.is_empty() {
            bail!("Word corpus is empty");
        }

        let secret_words: Vec<String> = words
            .iter()
            .map(|word| normalizer.normalize(word))
            .collect();

        let unknown = secret_words
            .iter()
            .filter(|word| !model.knows(word))
            .count();
        if unknown > 0 {
            warn!(
                "{} of {} secret words are missing from the embedding vocabulary",
                unknown,
                secret_words.len()
            );
        }

        info!(
            "Catalog ready with {} secret words and {} vocabulary entries",
            secret_words.len(),
            model.vocabulary_size()
        );

        Ok(Self {
            secret_words,
            model,
            normalizer,
        })
    }

    pub fn load(
        corpus: &dyn CorpusLoader,
        model: Arc<dyn EmbeddingModel>,
        normalizer: Arc<dyn Normalizer>,
    ) -> Result<Self> {
        Self::new(corpus.words()?, model, normalizer)
    }

    /// Number of days the corpus covers.
    pub fn len(&self) -> usize {
        self.secret_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secret_words.is_empty()
    }

    pub(crate) fn secret_word(&self, position: usize) -> Option<&str> {
        self.secret_words.get(position).map(String::as_str)
    }

    pub fn model(&self) -> &dyn EmbeddingModel {
        self.model.as_ref()
    }

    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("days", &self.secret_words.len())
            .field("vocabulary_size", &self.model.vocabulary_size())
            .finish()
    }
}
