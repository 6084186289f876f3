pub mod config;
pub mod game_manager;
pub mod handlers;
