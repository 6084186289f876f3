use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use context_core::{ContextGame, DayResolver, SystemClock};
use context_service::{
    config::Config,
    game_manager::{FileCatalogSource, GameManager},
    handlers::MessageHandler,
};
use context_types::{ClientMessage, DaySummary, DistanceBand, Guess, ServerMessage};

const HELP: &str = "Guess the secret word. Type a word and press enter.
  /day YYYY-MM-DD   play a previous day
  /history          show this day's guesses
  /reload           reload the word sheet and vectors
  /quit             leave";

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Loading words from {} and vectors from {}",
        config.corpus_path.display(),
        config.vectors_path.display()
    );

    let source = Arc::new(FileCatalogSource::new(
        config.corpus_path.clone(),
        config.vectors_path.clone(),
    ));
    let epoch = config.epoch;
    let game_manager = match GameManager::new(source, |catalog| {
        ContextGame::new(DayResolver::new(epoch), Arc::new(SystemClock), catalog)
    })
    .await
    {
        Ok(manager) => Arc::new(manager),
        Err(e) => {
            error!("Failed to load the game catalog: {:#}", e);
            error!("Set CORPUS_PATH and VECTORS_PATH to a word sheet and a word2vec text file.");
            std::process::exit(1);
        }
    };

    // Periodically drop idle sessions
    let cleanup_manager = game_manager.clone();
    let idle_timeout = config.session_idle_timeout;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let removed = cleanup_manager.cleanup_idle_sessions(idle_timeout);
            if removed > 0 {
                info!("Removed {} idle sessions", removed);
            }
        }
    });

    let mut handler = MessageHandler::new(game_manager.clone()).await;
    println!("{}", HELP);
    if handler.current_day() < game_manager.today_index().await {
        println!(
            "Today's word is not in the sheet yet. Playing day #{}, the latest one.",
            handler.current_day() + 1
        );
    }
    render(&handler.handle_message(ClientMessage::ShowHistory).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        let message = match line.trim() {
            "/quit" => break,
            "/history" => ClientMessage::ShowHistory,
            "/reload" => {
                match game_manager.reload().await {
                    Ok(()) => println!("Word list reloaded."),
                    Err(e) => error!("Reload failed: {:#}", e),
                }
                continue;
            }
            command if command.starts_with("/day") => {
                match command.trim_start_matches("/day").trim().parse() {
                    Ok(date) => ClientMessage::SelectDay { date },
                    Err(_) => {
                        println!("Dates look like 2023-02-01.");
                        continue;
                    }
                }
            }
            _ => ClientMessage::SubmitGuess { word: line.clone() },
        };

        render(&handler.handle_message(message).await);
    }

    info!("Session {} finished", handler.session_id());
}

fn render(messages: &[ServerMessage]) {
    for message in messages {
        match message {
            ServerMessage::DayChanged { summary } | ServerMessage::History { summary } => {
                render_summary(summary)
            }
            ServerMessage::GuessScored { guess, band, .. } => {
                println!("{} {}  #{}", band_marker(*band), guess.word, guess.distance)
            }
            ServerMessage::GuessRejected { error } if error.is_warning() => {
                println!("⚠️  {}", error)
            }
            ServerMessage::GuessRejected { error } => println!("🤖 {}", error),
            ServerMessage::DayWon { guess_count, .. } => {
                println!("✅ Congrats! You got the word in {} guesses", guess_count)
            }
            ServerMessage::Error { message } => println!("🚨 {}", message),
        }
    }
}

fn render_summary(summary: &DaySummary) {
    println!("Day: #{}  Guess: #{}", summary.day_number, summary.guess_count);
    for guess in &summary.guesses {
        if let Guess::Scored { word, distance } = guess {
            let band = DistanceBand::from_distance(*distance);
            println!("  {} {}  #{}", band_marker(band), word, distance);
        }
    }
}

fn band_marker(band: DistanceBand) -> &'static str {
    match band {
        DistanceBand::Close => "🟦",
        DistanceBand::Near => "🟨",
        DistanceBand::Far => "🟥",
    }
}
