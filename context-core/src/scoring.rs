use context_types::{DayIndex, GuessError, ScoredGuess};
use tracing::{debug, warn};

use crate::{Catalog, DayResolver};

/// Largest possible similarity; distances are expressed relative to it.
pub const MAX_VAL: f64 = 1.0;
/// Distance units per unit of `1 - similarity`.
pub const SCALE: f64 = 1000.0;

/// Turn a similarity into the player-facing distance.
///
/// Returns `None` for non-finite input. Similarity is clamped to [-1, 1],
/// so the result lies in [0, 2 * SCALE].
pub fn scale_distance(similarity: f32) -> Option<u32> {
    if !similarity.is_finite() {
        return None;
    }

    let distance = 1.0 - f64::from(similarity.clamp(-1.0, 1.0));
    let scaled = (distance / MAX_VAL.abs() * SCALE).round();
    Some(scaled as u32)
}

/// Scores guesses for one catalog. Pure: the same day, word, catalog and
/// today always give the same result.
pub struct DistanceScorer<'a> {
    catalog: &'a Catalog,
}

impl<'a> DistanceScorer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn score(
        &self,
        day_index: DayIndex,
        today_index: DayIndex,
        raw_word: &str,
    ) -> Result<ScoredGuess, GuessError> {
        let position = DayResolver::validate(day_index, today_index, self.catalog.len())?;
        let secret = self
            .catalog
            .secret_word(position)
            .ok_or(GuessError::BadDay { day_index })?;

        let word = self.catalog.normalize(raw_word);

        // Exact match is the win and never depends on model arithmetic
        if word == secret {
            return Ok(ScoredGuess {
                word: raw_word.to_string(),
                distance: 0,
            });
        }

        if word.is_empty() || !self.catalog.model().knows(&word) {
            debug!("Unknown word {:?} (normalized {:?})", raw_word, word);
            return Err(GuessError::UnknownWord {
                word: raw_word.to_string(),
            });
        }

        let similarity = self
            .catalog
            .model()
            .similarity(secret, &word)
            .map_err(|e| {
                warn!("Embedding model failed on day {}: {}", day_index, e);
                GuessError::ScoringFailed {
                    reason: e.to_string(),
                }
            })?;

        let distance = scale_distance(similarity).ok_or_else(|| {
            warn!(
                "Embedding model returned similarity {} on day {}",
                similarity, day_index
            );
            GuessError::ScoringFailed {
                reason: format!("non-finite similarity {}", similarity),
            }
        })?;

        // Only the secret word itself may score 0
        Ok(ScoredGuess {
            word: raw_word.to_string(),
            distance: distance.max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArabicNormalizer, EmbeddingModel, ModelError, WordVectors};
    use std::sync::Arc;

    fn test_catalog() -> Catalog {
        let vectors = WordVectors::from_entries(vec![
            ("سياره", vec![1.0, 0.0, 0.0]),
            ("بيت", vec![0.0, 1.0, 0.0]),
            ("شجره", vec![0.0, 0.0, 1.0]),
            ("عربه", vec![0.8, 0.6, 0.0]),
            ("قطار", vec![-1.0, 0.0, 0.0]),
            ("ظل", vec![0.0, 0.0, 0.0]),
        ])
        .unwrap();

        Catalog::new(
            vec!["سيارة".into(), "بيت".into(), "شجرة".into()],
            Arc::new(vectors),
            Arc::new(ArabicNormalizer),
        )
        .unwrap()
    }

    #[test]
    fn test_scale_distance() {
        assert_eq!(scale_distance(1.0), Some(0));
        assert_eq!(scale_distance(0.0), Some(1000));
        assert_eq!(scale_distance(-1.0), Some(2000));
        assert_eq!(scale_distance(0.8), Some(200));
        assert_eq!(scale_distance(0.4567), Some(543));
        assert_eq!(scale_distance(0.4564), Some(544));
        // Out of range similarity is clamped
        assert_eq!(scale_distance(1.2), Some(0));
        assert_eq!(scale_distance(-3.0), Some(2000));
        assert_eq!(scale_distance(f32::NAN), None);
        assert_eq!(scale_distance(f32::INFINITY), None);
    }

    #[test]
    fn test_secret_word_scores_exactly_zero() {
        let catalog = test_catalog();
        let scorer = DistanceScorer::new(&catalog);

        for (day, word) in ["سيارة", "بيت", "شجرة"].iter().enumerate() {
            let scored = scorer.score(day as DayIndex, 10, word).unwrap();
            assert_eq!(scored.distance, 0);
            assert_eq!(scored.word, *word);
        }
    }

    #[test]
    fn test_equivalent_spelling_also_wins() {
        let catalog = test_catalog();
        let scorer = DistanceScorer::new(&catalog);

        // Tashkeel and taa marbuta variants normalize to the secret
        let scored = scorer.score(0, 10, "سيّارَه").unwrap();
        assert_eq!(scored.distance, 0);
        assert_eq!(scored.word, "سيّارَه");
    }

    #[test]
    fn test_distance_for_other_words() {
        let catalog = test_catalog();
        let scorer = DistanceScorer::new(&catalog);

        assert_eq!(scorer.score(0, 10, "عربة").unwrap().distance, 200);
        assert_eq!(scorer.score(0, 10, "بيت").unwrap().distance, 1000);
        assert_eq!(scorer.score(0, 10, "قطار").unwrap().distance, 2000);
        assert_eq!(scorer.score(1, 10, "عربة").unwrap().distance, 400);
    }

    #[test]
    fn test_bad_day() {
        let catalog = test_catalog();
        let scorer = DistanceScorer::new(&catalog);

        assert_eq!(
            scorer.score(-1, 10, "بيت"),
            Err(GuessError::BadDay { day_index: -1 })
        );
        assert_eq!(
            scorer.score(2, 1, "بيت"),
            Err(GuessError::BadDay { day_index: 2 })
        );
        assert_eq!(
            scorer.score(5, 10, "بيت"),
            Err(GuessError::BadDay { day_index: 5 })
        );
    }

    #[test]
    fn test_bad_day_takes_precedence_over_unknown_word() {
        let catalog = test_catalog();
        let scorer = DistanceScorer::new(&catalog);

        assert!(matches!(
            scorer.score(7, 10, "zz368xyz"),
            Err(GuessError::BadDay { .. })
        ));
    }

    #[test]
    fn test_unknown_word() {
        let catalog = test_catalog();
        let scorer = DistanceScorer::new(&catalog);

        assert_eq!(
            scorer.score(0, 10, "zz368xyz"),
            Err(GuessError::UnknownWord {
                word: "zz368xyz".to_string()
            })
        );
        // Normalizes to nothing
        assert!(matches!(
            scorer.score(0, 10, "ـــ"),
            Err(GuessError::UnknownWord { .. })
        ));
    }

    #[test]
    fn test_model_fault_becomes_scoring_failure() {
        let catalog = test_catalog();
        let scorer = DistanceScorer::new(&catalog);

        let result = scorer.score(0, 10, "ظل");
        assert!(matches!(result, Err(GuessError::ScoringFailed { .. })));
    }

    struct NanModel;

    impl EmbeddingModel for NanModel {
        fn knows(&self, _word: &str) -> bool {
            true
        }

        fn similarity(&self, _a: &str, _b: &str) -> Result<f32, ModelError> {
            Ok(f32::NAN)
        }

        fn vocabulary_size(&self) -> usize {
            0
        }
    }

    #[test]
    fn test_non_finite_similarity_becomes_scoring_failure() {
        let catalog = Catalog::new(
            vec!["بيت".into()],
            Arc::new(NanModel),
            Arc::new(ArabicNormalizer),
        )
        .unwrap();
        let scorer = DistanceScorer::new(&catalog);

        assert!(matches!(
            scorer.score(0, 0, "شجرة"),
            Err(GuessError::ScoringFailed { .. })
        ));
        // The win path never reaches the model
        assert_eq!(scorer.score(0, 0, "بيت").unwrap().distance, 0);
    }

    struct NearIdentityModel;

    impl EmbeddingModel for NearIdentityModel {
        fn knows(&self, _word: &str) -> bool {
            true
        }

        fn similarity(&self, _a: &str, _b: &str) -> Result<f32, ModelError> {
            Ok(0.99999)
        }

        fn vocabulary_size(&self) -> usize {
            0
        }
    }

    #[test]
    fn test_non_secret_word_never_scores_zero() {
        let catalog = Catalog::new(
            vec!["بيت".into()],
            Arc::new(NearIdentityModel),
            Arc::new(ArabicNormalizer),
        )
        .unwrap();
        let scorer = DistanceScorer::new(&catalog);

        assert_eq!(scorer.score(0, 0, "منزل").unwrap().distance, 1);
    }
}
