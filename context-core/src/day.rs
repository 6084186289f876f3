use chrono::NaiveDate;
use context_types::{DayIndex, GuessError};

/// First day of the game; day index 0.
pub const DEFAULT_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2023, 2, 1) {
    Some(date) => date,
    None => panic!("invalid epoch"),
};

/// Source of "today" for deciding which days are playable.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The host's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DayResolver {
    epoch: NaiveDate,
}

impl DayResolver {
    pub fn new(epoch: NaiveDate) -> Self {
        Self { epoch }
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Days between the epoch and `date`; negative before the epoch
    pub fn resolve(&self, date: NaiveDate) -> DayIndex {
        (date - self.epoch).num_days()
    }

    /// The only gate deciding whether a day can be played.
    ///
    /// A day is playable when it is neither before the epoch nor after
    /// `today_index`, and the corpus has a word for it. On success the
    /// corpus position is returned.
    pub fn validate(
        day_index: DayIndex,
        today_index: DayIndex,
        corpus_len: usize,
    ) -> Result<usize, GuessError> {
        let in_calendar = (0..=today_index).contains(&day_index);
        match usize::try_from(day_index) {
            Ok(position) if in_calendar && position < corpus_len => Ok(position),
            _ => Err(GuessError::BadDay { day_index }),
        }
    }
}

impl Default for DayResolver {
    fn default() -> Self {
        Self::new(DEFAULT_EPOCH)
    }
}
