use std::sync::Arc;
use tracing::{info, warn};

use crate::game_manager::{GameManager, ManagerError};
use context_types::{ClientMessage, DayIndex, ServerMessage, SessionId};

/// Translates one client's messages into manager calls and replies.
/// Tracks which day the client is looking at.
pub struct MessageHandler {
    session_id: SessionId,
    current_day: DayIndex,
    game_manager: Arc<GameManager>,
}

impl MessageHandler {
    /// Open a new session positioned on today's game, or on the last day the
    /// word sheet covers when today is past it.
    pub async fn new(game_manager: Arc<GameManager>) -> Self {
        let session_id = game_manager.create_session();
        let current_day = game_manager.latest_playable_day().await;

        let today_index = game_manager.today_index().await;
        if current_day < today_index {
            info!(
                "Day {} is past the word sheet, session {} starts on day {}",
                today_index, session_id, current_day
            );
        }

        Self {
            session_id,
            current_day,
            game_manager,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn current_day(&self) -> DayIndex {
        self.current_day
    }

    pub async fn handle_message(&mut self, message: ClientMessage) -> Vec<ServerMessage> {
        match message {
            ClientMessage::SelectDay { date } => self.handle_select_day(date).await,
            ClientMessage::SubmitGuess { word } => self.handle_submit_guess(word).await,
            ClientMessage::ShowHistory => self.handle_show_history().await,
        }
    }

    async fn handle_select_day(&mut self, date: chrono::NaiveDate) -> Vec<ServerMessage> {
        match self.game_manager.resolve_and_validate_day(date).await {
            Ok(day_index) => {
                self.current_day = day_index;
                info!("Session {} switched to day {}", self.session_id, day_index);
                match self.game_manager.day_summary(self.session_id, day_index).await {
                    Ok(summary) => vec![ServerMessage::DayChanged { summary }],
                    Err(e) => vec![manager_error(e)],
                }
            }
            Err(error) => vec![ServerMessage::GuessRejected { error }],
        }
    }

    async fn handle_submit_guess(&mut self, word: String) -> Vec<ServerMessage> {
        // Blank input is a no-op, not a guess
        if word.trim().is_empty() {
            return Vec::new();
        }

        match self
            .game_manager
            .submit_guess(self.session_id, self.current_day, &word)
            .await
        {
            Ok(submission) => {
                let mut replies = vec![ServerMessage::GuessScored {
                    band: submission.guess.band(),
                    guess: submission.guess.clone(),
                    guess_count: submission.guess_count,
                }];
                if submission.newly_won {
                    replies.push(ServerMessage::DayWon {
                        word: submission.guess.word,
                        guess_count: submission.guess_count,
                    });
                }
                replies
            }
            Err(e) => vec![manager_error(e)],
        }
    }

    async fn handle_show_history(&self) -> Vec<ServerMessage> {
        match self
            .game_manager
            .day_summary(self.session_id, self.current_day)
            .await
        {
            Ok(summary) => vec![ServerMessage::History { summary }],
            Err(e) => vec![manager_error(e)],
        }
    }
}

fn manager_error(error: ManagerError) -> ServerMessage {
    match error {
        ManagerError::Guess(error) => ServerMessage::GuessRejected { error },
        ManagerError::SessionNotFound(session_id) => {
            warn!("Message for unknown session {}", session_id);
            ServerMessage::Error {
                message: ManagerError::SessionNotFound(session_id).to_string(),
            }
        }
    }
}
