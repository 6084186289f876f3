use anyhow::{Context, Result};
use chrono::NaiveDate;
use context_core::DEFAULT_EPOCH;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub epoch: NaiveDate,
    pub corpus_path: PathBuf,
    pub vectors_path: PathBuf,
    pub session_idle_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source, falling back to defaults
    /// for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let idle_minutes: u64 = parse_or(&lookup, "SESSION_IDLE_MINUTES", 120)?;

        Ok(Self {
            epoch: parse_or(&lookup, "GAME_EPOCH", DEFAULT_EPOCH)?,
            corpus_path: lookup("CORPUS_PATH")
                .unwrap_or_else(|| "./data/words.tsv".to_string())
                .into(),
            vectors_path: lookup("VECTORS_PATH")
                .unwrap_or_else(|| "./data/vectors.txt".to_string())
                .into(),
            session_idle_timeout: Duration::from_secs(idle_minutes * 60),
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", key, value)),
        None => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epoch: DEFAULT_EPOCH,
            corpus_path: "./data/words.tsv".into(),
            vectors_path: "./data/vectors.txt".into(),
            session_idle_timeout: Duration::from_secs(120 * 60),
        }
    }
}
