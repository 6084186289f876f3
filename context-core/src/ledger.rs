use context_types::{DayIndex, DayStatus, DaySummary, Guess, GuessError, ScoredGuess, SessionId};
use std::collections::HashMap;
use tracing::info;

/// Result of a guess the ledger accepted and scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub guess: ScoredGuess,
    pub guess_count: u32,
    /// True only for the guess that moved the day into Won.
    pub newly_won: bool,
}

/// One day's guesses in submission order.
#[derive(Debug, Clone, Default)]
pub struct DayHistory {
    guesses: Vec<Guess>,
    guess_count: u32,
    won: bool,
}

impl DayHistory {
    fn contains_word(&self, raw_word: &str) -> bool {
        self.guesses.iter().any(|guess| guess.word() == raw_word)
    }

    /// Guesses ascending by distance; failed guesses last. Ties keep
    /// submission order.
    pub fn ordered(&self) -> Vec<Guess> {
        let mut ordered = self.guesses.clone();
        ordered.sort_by_key(|guess| guess.distance().map_or((1, 0), |d| (0, d)));
        ordered
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    pub fn status(&self) -> DayStatus {
        if self.won {
            DayStatus::Won
        } else {
            DayStatus::InProgress
        }
    }
}

/// All of one session's guess history, keyed by day.
#[derive(Debug, Clone)]
pub struct SessionLedger {
    session_id: SessionId,
    days: HashMap<DayIndex, DayHistory>,
}

impl SessionLedger {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            days: HashMap::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Record a guess for `day_index`, scoring it with `score`.
    ///
    /// A raw word already recorded for the day is rejected before scoring.
    /// Unknown words are recorded as failed guesses; bad days and scoring
    /// faults leave the ledger untouched.
    pub fn submit<F>(
        &mut self,
        day_index: DayIndex,
        raw_word: &str,
        score: F,
    ) -> Result<Submission, GuessError>
    where
        F: FnOnce(&str) -> Result<ScoredGuess, GuessError>,
    {
        if self
            .days
            .get(&day_index)
            .is_some_and(|day| day.contains_word(raw_word))
        {
            return Err(GuessError::DuplicateGuess {
                word: raw_word.to_string(),
            });
        }

        match score(raw_word) {
            Ok(scored) => {
                let day = self.days.entry(day_index).or_default();
                day.guesses.push(scored.clone().into());
                day.guess_count += 1;

                let newly_won = scored.is_win() && !day.won;
                if newly_won {
                    day.won = true;
                    info!(
                        "Session {} solved day {} in {} guesses",
                        self.session_id, day_index, day.guess_count
                    );
                }

                Ok(Submission {
                    guess: scored,
                    guess_count: day.guess_count,
                    newly_won,
                })
            }
            Err(error) if error.is_recorded() => {
                self.days
                    .entry(day_index)
                    .or_default()
                    .guesses
                    .push(Guess::Failed {
                        word: raw_word.to_string(),
                        detail: error.detail(),
                    });
                Err(error)
            }
            Err(error) => Err(error),
        }
    }

    pub fn list(&self, day_index: DayIndex) -> Vec<Guess> {
        self.days
            .get(&day_index)
            .map(DayHistory::ordered)
            .unwrap_or_default()
    }

    pub fn count(&self, day_index: DayIndex) -> u32 {
        self.days
            .get(&day_index)
            .map_or(0, DayHistory::guess_count)
    }

    pub fn status(&self, day_index: DayIndex) -> DayStatus {
        self.days
            .get(&day_index)
            .map_or(DayStatus::Unplayed, DayHistory::status)
    }

    pub fn summary(&self, day_index: DayIndex) -> DaySummary {
        DaySummary {
            day_index,
            day_number: day_index + 1,
            guess_count: self.count(day_index),
            status: self.status(day_index),
            guesses: self.list(day_index),
        }
    }

    /// Forget everything recorded for one day, including its win.
    pub fn reset(&mut self, day_index: DayIndex) -> bool {
        self.days.remove(&day_index).is_some()
    }

    pub fn played_days(&self) -> Vec<DayIndex> {
        let mut days: Vec<DayIndex> = self.days.keys().copied().collect();
        days.sort_unstable();
        days
    }
}
