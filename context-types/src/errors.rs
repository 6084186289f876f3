use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::DayIndex;

/// Why a guess did not produce a distance. The display text is the
/// user-facing detail.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum GuessError {
    #[error("Bad day!")]
    BadDay { day_index: DayIndex },
    #[error("I'm sorry, I don't know this word")]
    UnknownWord { word: String },
    #[error("The word {word} was already guessed.")]
    DuplicateGuess { word: String },
    #[error("Something went wrong!")]
    ScoringFailed { reason: String },
}

impl GuessError {
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// Whether the ledger keeps this failure in the day's history.
    pub fn is_recorded(&self) -> bool {
        matches!(self, GuessError::UnknownWord { .. })
    }

    /// Duplicates are surfaced as warnings rather than errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, GuessError::DuplicateGuess { .. })
    }
}
