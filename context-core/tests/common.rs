#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use context_core::{
    ArabicNormalizer, Catalog, ContextGame, DayResolver, FixedClock, StaticCorpus, WordVectors,
};
use std::sync::Arc;

pub const CORPUS: [&str; 3] = ["سيارة", "بيت", "شجرة"];

pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()
}

/// Vocabulary keyed by normalized forms, as an aravec model is.
pub fn create_test_vectors() -> WordVectors {
    WordVectors::from_entries(vec![
        ("سياره", vec![1.0, 0.0, 0.0, 0.0]),
        ("بيت", vec![0.0, 1.0, 0.0, 0.0]),
        ("شجره", vec![0.0, 0.0, 1.0, 0.0]),
        ("عربه", vec![0.9, 0.1, 0.0, 0.0]),
        ("منزل", vec![0.1, 0.95, 0.0, 0.05]),
        ("غابه", vec![0.0, 0.2, 0.9, 0.1]),
        ("طريق", vec![0.5, 0.3, 0.2, 0.4]),
    ])
    .unwrap()
}

pub fn create_test_catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::load(
            &StaticCorpus::new(CORPUS),
            Arc::new(create_test_vectors()),
            Arc::new(ArabicNormalizer),
        )
        .unwrap(),
    )
}

/// A game whose "today" is `days_since_epoch` days after the epoch.
pub fn create_game_on_day(days_since_epoch: u64) -> ContextGame {
    let today = epoch().checked_add_days(Days::new(days_since_epoch)).unwrap();
    ContextGame::new(
        DayResolver::new(epoch()),
        Arc::new(FixedClock(today)),
        create_test_catalog(),
    )
}

/// Today is well past the end of the corpus.
pub fn create_test_game() -> ContextGame {
    create_game_on_day(10)
}

pub fn words_of(guesses: &[context_types::Guess]) -> Vec<String> {
    guesses.iter().map(|g| g.word().to_string()).collect()
}
