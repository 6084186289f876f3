use anyhow::{Context, Result, anyhow, bail};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("no vector for word {0:?}")]
    MissingVector(String),
    #[error("word {0:?} has a zero vector")]
    DegenerateVector(String),
}

/// Word-embedding capability consumed by the scorer. Words are passed
/// already normalized.
pub trait EmbeddingModel: Send + Sync {
    fn knows(&self, word: &str) -> bool;

    /// Similarity in [-1, 1]; self-similarity is 1.
    fn similarity(&self, a: &str, b: &str) -> Result<f32, ModelError>;

    fn vocabulary_size(&self) -> usize;
}

/// In-memory table of word vectors compared by cosine similarity.
#[derive(Debug, Clone, Default)]
pub struct WordVectors {
    index: HashMap<String, usize>,
    vectors: Vec<Vec<f32>>, // Unit length, or all zeros for degenerate entries
    dim: usize,
}

impl WordVectors {
    /// Load vectors in the word2vec text format: an optional `count dim`
    /// header, then one `word v1 .. vN` line per word.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open vectors file {}", path.display()))?;
        let vectors = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse vectors file {}", path.display()))?;

        info!(
            "Loaded {} word vectors of dimension {} from {}",
            vectors.len(),
            vectors.dim(),
            path.display()
        );
        Ok(vectors)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut entries = Vec::new();

        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };

            let values: Vec<&str> = fields.collect();
            if line_number == 0 && is_header(word, &values) {
                continue;
            }

            let vector = values
                .iter()
                .map(|value| value.parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Invalid number on line {}", line_number + 1))?;

            entries.push((word.to_string(), vector));
        }

        Self::from_entries(entries)
    }

    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut vectors = Self::default();

        for (word, vector) in entries {
            let word = word.into();
            if vector.is_empty() {
                bail!("Word {:?} has no vector components", word);
            }
            if vectors.vectors.is_empty() {
                vectors.dim = vector.len();
            } else if vector.len() != vectors.dim {
                return Err(anyhow!(
                    "Word {:?} has dimension {}, expected {}",
                    word,
                    vector.len(),
                    vectors.dim
                ));
            }
            if vectors.index.contains_key(&word) {
                warn!("Ignoring duplicate vector for word {:?}", word);
                continue;
            }

            vectors.index.insert(word, vectors.vectors.len());
            vectors.vectors.push(unit(vector));
        }

        Ok(vectors)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn vector(&self, word: &str) -> Result<&[f32], ModelError> {
        let vector = self
            .index
            .get(word)
            .map(|&i| self.vectors[i].as_slice())
            .ok_or_else(|| ModelError::MissingVector(word.to_string()))?;

        if vector.iter().all(|&component| component == 0.0) {
            return Err(ModelError::DegenerateVector(word.to_string()));
        }
        Ok(vector)
    }
}

fn is_header(first: &str, rest: &[&str]) -> bool {
    rest.len() == 1 && first.parse::<usize>().is_ok() && rest[0].parse::<usize>().is_ok()
}

fn unit(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|&x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
    vector
}

impl EmbeddingModel for WordVectors {
    fn knows(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32, ModelError> {
        let (a, b) = (self.vector(a)?, self.vector(b)?);
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        Ok(dot.clamp(-1.0, 1.0))
    }

    fn vocabulary_size(&self) -> usize {
        self.len()
    }
}
