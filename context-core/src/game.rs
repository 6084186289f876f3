use chrono::NaiveDate;
use context_types::{DayIndex, DaySummary, Guess, GuessError, ScoredGuess};
use std::sync::Arc;
use tracing::debug;

use crate::{Catalog, Clock, DayResolver, DistanceScorer, SessionLedger, Submission};

/// Entry point for front-ends: resolves days and routes guesses through the
/// scorer into a caller-owned ledger.
#[derive(Clone)]
pub struct ContextGame {
    resolver: DayResolver,
    clock: Arc<dyn Clock>,
    catalog: Arc<Catalog>,
}

impl ContextGame {
    pub fn new(resolver: DayResolver, clock: Arc<dyn Clock>, catalog: Arc<Catalog>) -> Self {
        Self {
            resolver,
            clock,
            catalog,
        }
    }

    /// Same resolver and clock, scoring against another catalog.
    pub fn with_catalog(&self, catalog: Arc<Catalog>) -> Self {
        Self {
            resolver: self.resolver,
            clock: self.clock.clone(),
            catalog,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn resolver(&self) -> &DayResolver {
        &self.resolver
    }

    pub fn today_index(&self) -> DayIndex {
        self.resolver.resolve(self.clock.today())
    }

    /// Today's index, or the catalog's last day when today is past it.
    pub fn latest_playable_day(&self) -> DayIndex {
        let last_day = self.catalog.len() as DayIndex - 1;
        self.today_index().min(last_day)
    }

    pub fn validate_day(&self, day_index: DayIndex) -> Result<DayIndex, GuessError> {
        DayResolver::validate(day_index, self.today_index(), self.catalog.len())
            .map(|_| day_index)
            .inspect_err(|_| debug!("Rejected day {}", day_index))
    }

    pub fn resolve_and_validate_day(&self, date: NaiveDate) -> Result<DayIndex, GuessError> {
        self.validate_day(self.resolver.resolve(date))
    }

    pub fn score(&self, day_index: DayIndex, raw_word: &str) -> Result<ScoredGuess, GuessError> {
        DistanceScorer::new(&self.catalog).score(day_index, self.today_index(), raw_word)
    }

    pub fn submit_guess(
        &self,
        ledger: &mut SessionLedger,
        day_index: DayIndex,
        raw_word: &str,
    ) -> Result<Submission, GuessError> {
        // Day first, so a stale day is BadDay even for a word already recorded
        self.validate_day(day_index)?;

        let today_index = self.today_index();
        let scorer = DistanceScorer::new(&self.catalog);
        ledger.submit(day_index, raw_word, |word| {
            scorer.score(day_index, today_index, word)
        })
    }

    pub fn list_history(&self, ledger: &SessionLedger, day_index: DayIndex) -> Vec<Guess> {
        ledger.list(day_index)
    }

    pub fn guess_count(&self, ledger: &SessionLedger, day_index: DayIndex) -> u32 {
        ledger.count(day_index)
    }

    pub fn day_summary(&self, ledger: &SessionLedger, day_index: DayIndex) -> DaySummary {
        ledger.summary(day_index)
    }
}

impl std::fmt::Debug for ContextGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextGame")
            .field("epoch", &self.resolver.epoch())
            .field("today_index", &self.today_index())
            .field("catalog", &self.catalog)
            .finish()
    }
}
