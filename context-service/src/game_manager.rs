use anyhow::Result;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use context_core::{
    ArabicNormalizer, Catalog, ContextGame, CorpusLoader, GameEvent, GameEventBus,
    GameEventHandler, SessionLedger, SheetFile, Submission, WordVectors,
};
use context_types::{DayIndex, DaySummary, Guess, GuessError, SessionId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    #[error("Session {0} not found")]
    SessionNotFound(SessionId),
    #[error(transparent)]
    Guess(#[from] GuessError),
}

/// Where a catalog comes from; called at startup and on every reload.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<Catalog>;
}

/// Word sheet plus word2vec vectors on disk, normalized as Arabic text.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    corpus: SheetFile,
    vectors_path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(corpus_path: impl Into<PathBuf>, vectors_path: impl Into<PathBuf>) -> Self {
        let corpus_path: PathBuf = corpus_path.into();
        Self {
            corpus: SheetFile::new(corpus_path),
            vectors_path: vectors_path.into(),
        }
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> Result<Catalog> {
        let words = self.corpus.words()?;
        let vectors = WordVectors::from_file(&self.vectors_path)?;
        Catalog::new(words, Arc::new(vectors), Arc::new(ArabicNormalizer))
    }
}

#[derive(Debug)]
struct Session {
    ledger: SessionLedger,
    last_activity: Instant,
}

impl Session {
    fn new(session_id: SessionId) -> Self {
        Self {
            ledger: SessionLedger::new(session_id),
            last_activity: Instant::now(),
        }
    }

    fn update_activity(&mut self) {
        self.last_activity = Instant::now();
    }

    fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }
}

/// Owns the shared game and every session's ledger.
///
/// Each session sits behind its own mutex, so overlapping requests for one
/// session are applied one at a time while other sessions proceed.
pub struct GameManager {
    game: RwLock<Arc<ContextGame>>,
    source: Arc<dyn CatalogSource>,
    sessions: DashMap<SessionId, Arc<Mutex<Session>>>,
    event_bus: StdMutex<GameEventBus>,
}

impl GameManager {
    /// Load the catalog from `source` and start with no sessions.
    pub async fn new(
        source: Arc<dyn CatalogSource>,
        game_template: impl FnOnce(Arc<Catalog>) -> ContextGame,
    ) -> Result<Self> {
        let catalog = load_catalog(source.clone()).await?;
        Ok(Self {
            game: RwLock::new(Arc::new(game_template(catalog))),
            source,
            sessions: DashMap::new(),
            event_bus: StdMutex::new(GameEventBus::new()),
        })
    }

    pub fn add_event_handler(&self, handler: Box<dyn GameEventHandler>) {
        if let Ok(mut bus) = self.event_bus.lock() {
            bus.add_handler(handler);
        }
    }

    fn publish(&self, event: GameEvent) {
        match self.event_bus.lock() {
            Ok(mut bus) => bus.publish(event),
            Err(_) => error!("Event bus poisoned, dropping {:?}", event),
        }
    }

    pub async fn game(&self) -> Arc<ContextGame> {
        self.game.read().await.clone()
    }

    /// Reload corpus and model from the catalog source. Requests already
    /// holding the old game finish against it.
    pub async fn reload(&self) -> Result<()> {
        let catalog = load_catalog(self.source.clone()).await?;
        let (days, vocabulary_size) = (catalog.len(), catalog.model().vocabulary_size());

        {
            let mut game = self.game.write().await;
            let reloaded = game.with_catalog(catalog);
            *game = Arc::new(reloaded);
        }

        info!("Reloaded catalog: {} days, {} words", days, vocabulary_size);
        self.publish(GameEvent::CatalogReloaded {
            days,
            vocabulary_size,
        });
        Ok(())
    }

    pub fn create_session(&self) -> SessionId {
        let session_id = SessionId::new();
        self.sessions
            .insert(session_id, Arc::new(Mutex::new(Session::new(session_id))));

        info!("Created session {}", session_id);
        self.publish(GameEvent::SessionStarted { session_id });
        session_id
    }

    pub fn has_session(&self, session_id: SessionId) -> bool {
        self.sessions.contains_key(&session_id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn session(&self, session_id: SessionId) -> Result<Arc<Mutex<Session>>, ManagerError> {
        self.sessions
            .get(&session_id)
            .map(|entry| entry.value().clone())
            .ok_or(ManagerError::SessionNotFound(session_id))
    }

    pub async fn resolve_and_validate_day(&self, date: NaiveDate) -> Result<DayIndex, GuessError> {
        self.game().await.resolve_and_validate_day(date)
    }

    pub async fn today_index(&self) -> DayIndex {
        self.game().await.today_index()
    }

    pub async fn latest_playable_day(&self) -> DayIndex {
        self.game().await.latest_playable_day()
    }

    pub async fn submit_guess(
        &self,
        session_id: SessionId,
        day_index: DayIndex,
        raw_word: &str,
    ) -> Result<Submission, ManagerError> {
        let session = self.session(session_id)?;
        let game = self.game().await;

        let mut session = session.lock().await;
        session.update_activity();

        let result = game.submit_guess(&mut session.ledger, day_index, raw_word);
        drop(session);

        match &result {
            Ok(submission) => {
                self.publish(GameEvent::GuessScored {
                    session_id,
                    day_index,
                    guess: submission.guess.clone(),
                    guess_count: submission.guess_count,
                });
                if submission.newly_won {
                    self.publish(GameEvent::DayWon {
                        session_id,
                        day_index,
                        guess_count: submission.guess_count,
                    });
                }
            }
            Err(error) => {
                if matches!(error, GuessError::ScoringFailed { .. }) {
                    warn!("Scoring failed for session {}: {:?}", session_id, error);
                }
                self.publish(GameEvent::GuessRejected {
                    session_id,
                    day_index,
                    error: error.clone(),
                });
            }
        }

        result.map_err(ManagerError::from)
    }

    pub async fn list_history(
        &self,
        session_id: SessionId,
        day_index: DayIndex,
    ) -> Result<Vec<Guess>, ManagerError> {
        let session = self.session(session_id)?;
        let session = session.lock().await;
        Ok(session.ledger.list(day_index))
    }

    pub async fn guess_count(
        &self,
        session_id: SessionId,
        day_index: DayIndex,
    ) -> Result<u32, ManagerError> {
        let session = self.session(session_id)?;
        let session = session.lock().await;
        Ok(session.ledger.count(day_index))
    }

    pub async fn day_summary(
        &self,
        session_id: SessionId,
        day_index: DayIndex,
    ) -> Result<DaySummary, ManagerError> {
        let session = self.session(session_id)?;
        let mut session = session.lock().await;
        session.update_activity();
        Ok(session.ledger.summary(day_index))
    }

    pub async fn reset_day(
        &self,
        session_id: SessionId,
        day_index: DayIndex,
    ) -> Result<bool, ManagerError> {
        let session = self.session(session_id)?;
        let mut session = session.lock().await;
        Ok(session.ledger.reset(day_index))
    }

    /// Drop sessions idle for longer than `timeout`. Sessions a request has
    /// already picked up, locked or not, are skipped. Returns how many were
    /// removed.
    pub fn cleanup_idle_sessions(&self, timeout: Duration) -> usize {
        let mut expired = Vec::new();

        self.sessions.retain(|session_id, session| {
            if Arc::strong_count(session) > 1 {
                return true;
            }
            let keep = match session.try_lock() {
                Ok(session) => !session.is_expired(timeout),
                Err(_) => true,
            };
            if !keep {
                expired.push(*session_id);
            }
            keep
        });

        for session_id in &expired {
            info!("Session {} expired", session_id);
            self.publish(GameEvent::SessionExpired {
                session_id: *session_id,
            });
        }
        expired.len()
    }
}

async fn load_catalog(source: Arc<dyn CatalogSource>) -> Result<Arc<Catalog>> {
    let catalog = tokio::task::spawn_blocking(move || source.load()).await??;
    Ok(Arc::new(catalog))
}
