use std::env;
use std::path::PathBuf;

use crate::domain::rules::WINNING_SCORE;
use crate::error::AppError;

pub const DEFAULT_SNAPSHOT_DIR: &str = "./snapshots";

/// Per-process match settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Score at which the last round is triggered.
    pub winning_score: u32,
    /// Directory the file snapshot store writes into.
    pub snapshot_dir: PathBuf,
    /// Fixed shuffle seed; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            winning_score: WINNING_SCORE,
            snapshot_dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
            rng_seed: None,
        }
    }
}

impl MatchConfig {
    /// Builds the configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let winning_score = match optional_var("CODEX_WINNING_SCORE") {
            Some(raw) => parse_winning_score(&raw)?,
            None => WINNING_SCORE,
        };
        let snapshot_dir = optional_var("CODEX_SNAPSHOT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_DIR));
        let rng_seed = optional_var("CODEX_RNG_SEED")
            .map(|raw| parse_seed(&raw))
            .transpose()?;

        Ok(Self {
            winning_score,
            snapshot_dir,
            rng_seed,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_winning_score(mut self, winning_score: u32) -> Self {
        self.winning_score = winning_score;
        self
    }
}

/// Get an environment variable, treating empty values as unset
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_winning_score(raw: &str) -> Result<u32, AppError> {
    let value: u32 = raw.trim().parse().map_err(|_| {
        AppError::config(format!(
            "CODEX_WINNING_SCORE must be a positive integer, got '{raw}'"
        ))
    })?;
    if value == 0 {
        return Err(AppError::config("CODEX_WINNING_SCORE must be greater than zero"));
    }
    Ok(value)
}

fn parse_seed(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::config(format!("CODEX_RNG_SEED must be a u64, got '{raw}'")))
}
