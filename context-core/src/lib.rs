pub mod catalog;
pub mod corpus;
pub mod day;
pub mod embedding;
pub mod game;
pub mod game_events;
pub mod ledger;
pub mod normalizer;
pub mod scoring;

// Re-export main components
pub use catalog::*;
pub use corpus::*;
pub use day::*;
pub use embedding::*;
pub use game::*;
pub use game_events::*;
pub use ledger::*;
pub use normalizer::*;
pub use scoring::*;
