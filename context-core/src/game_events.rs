use context_types::{DayIndex, GuessError, ScoredGuess, SessionId};

#[derive(Debug, Clone)]
pub enum GameEvent {
    SessionStarted {
        session_id: SessionId,
    },
    GuessScored {
        session_id: SessionId,
        day_index: DayIndex,
        guess: ScoredGuess,
        guess_count: u32,
    },
    GuessRejected {
        session_id: SessionId,
        day_index: DayIndex,
        error: GuessError,
    },
    DayWon {
        session_id: SessionId,
        day_index: DayIndex,
        guess_count: u32,
    },
    SessionExpired {
        session_id: SessionId,
    },
    CatalogReloaded {
        days: usize,
        vocabulary_size: usize,
    },
}

impl GameEvent {
    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            GameEvent::SessionStarted { session_id } => Some(*session_id),
            GameEvent::GuessScored { session_id, .. } => Some(*session_id),
            GameEvent::GuessRejected { session_id, .. } => Some(*session_id),
            GameEvent::DayWon { session_id, .. } => Some(*session_id),
            GameEvent::SessionExpired { session_id } => Some(*session_id),
            GameEvent::CatalogReloaded { .. } => None,
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}
