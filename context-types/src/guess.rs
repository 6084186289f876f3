use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DayIndex;

/// A successfully scored guess, as returned to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoredGuess {
    pub word: String, // Raw text as typed
    pub distance: u32,
}

impl ScoredGuess {
    pub fn is_win(&self) -> bool {
        self.distance == 0
    }

    pub fn band(&self) -> DistanceBand {
        DistanceBand::from_distance(self.distance)
    }
}

/// One entry of a day's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Guess {
    Scored { word: String, distance: u32 },
    Failed { word: String, detail: String },
}

impl Guess {
    pub fn word(&self) -> &str {
        match self {
            Guess::Scored { word, .. } => word,
            Guess::Failed { word, .. } => word,
        }
    }

    pub fn distance(&self) -> Option<u32> {
        match self {
            Guess::Scored { distance, .. } => Some(*distance),
            Guess::Failed { .. } => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Guess::Scored { .. } => None,
            Guess::Failed { detail, .. } => Some(detail),
        }
    }

    pub fn band(&self) -> Option<DistanceBand> {
        self.distance().map(DistanceBand::from_distance)
    }
}

impl From<ScoredGuess> for Guess {
    fn from(scored: ScoredGuess) -> Self {
        Guess::Scored {
            word: scored.word,
            distance: scored.distance,
        }
    }
}

/// How close a distance is, used by front-ends to colour results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DistanceBand {
    Close, // [0, 100)
    Near,  // [100, 1000)
    Far,   // 1000 and beyond, i.e. similarity at or below zero
}

impl DistanceBand {
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0..100 => DistanceBand::Close,
            100..1000 => DistanceBand::Near,
            _ => DistanceBand::Far,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DayStatus {
    Unplayed,
    InProgress,
    Won,
}

/// Everything a front-end needs to render one day.
/// Never carries the secret word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DaySummary {
    pub day_index: DayIndex,
    pub day_number: DayIndex, // 1-based, as shown to players
    pub guess_count: u32,
    pub status: DayStatus,
    pub guesses: Vec<Guess>, // Ascending by distance, failed guesses last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_serializes_with_explicit_kind() {
        let scored = Guess::Scored {
            word: "بيت".to_string(),
            distance: 412,
        };
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["kind"], "scored");
        assert_eq!(json["distance"], 412);
        assert!(json.get("detail").is_none());

        let failed = Guess::Failed {
            word: "zz368xyz".to_string(),
            detail: "I'm sorry, I don't know this word".to_string(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["kind"], "failed");
        assert!(json.get("distance").is_none());
    }

    #[test]
    fn test_guess_accessors() {
        let guess: Guess = ScoredGuess {
            word: "سيارة".to_string(),
            distance: 0,
        }
        .into();
        assert_eq!(guess.word(), "سيارة");
        assert_eq!(guess.distance(), Some(0));
        assert_eq!(guess.detail(), None);
        assert_eq!(guess.band(), Some(DistanceBand::Close));

        let failed = Guess::Failed {
            word: "x".to_string(),
            detail: "nope".to_string(),
        };
        assert_eq!(failed.distance(), None);
        assert_eq!(failed.detail(), Some("nope"));
        assert_eq!(failed.band(), None);
    }

    #[test]
    fn test_distance_band_boundaries() {
        assert_eq!(DistanceBand::from_distance(0), DistanceBand::Close);
        assert_eq!(DistanceBand::from_distance(99), DistanceBand::Close);
        assert_eq!(DistanceBand::from_distance(100), DistanceBand::Near);
        assert_eq!(DistanceBand::from_distance(999), DistanceBand::Near);
        assert_eq!(DistanceBand::from_distance(1000), DistanceBand::Far);
        assert_eq!(DistanceBand::from_distance(2000), DistanceBand::Far);
    }

    #[test]
    fn test_scored_guess_win() {
        let win = ScoredGuess {
            word: "بيت".to_string(),
            distance: 0,
        };
        assert!(win.is_win());
        assert!(
            !ScoredGuess {
                word: "بيت".to_string(),
                distance: 1,
            }
            .is_win()
        );
    }
}
