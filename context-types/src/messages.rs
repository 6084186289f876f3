use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{DaySummary, DistanceBand, GuessError, ScoredGuess};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientMessage {
    SelectDay { date: NaiveDate },
    SubmitGuess { word: String },
    ShowHistory,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServerMessage {
    DayChanged { summary: DaySummary },
    GuessScored {
        guess: ScoredGuess,
        band: DistanceBand,
        guess_count: u32,
    },
    GuessRejected { error: GuessError },
    DayWon { word: String, guess_count: u32 },
    History { summary: DaySummary },
    Error { message: String },
}
