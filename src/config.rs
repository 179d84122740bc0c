//! Runtime configuration read from the environment at start-up.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::Randomizer;
use crate::types::TICK_MS;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Session RNG seed
    pub seed: u32,
    pub randomizer: Randomizer,
    /// Host loop step in milliseconds
    pub tick_ms: u32,
    /// Log file; logging is off when unset
    pub log_path: Option<String>,
    /// Values that were present but invalid (reported once logging is up)
    pub warnings: Vec<String>,
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();
        let value = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let seed = match value("BLOCKFALL_SEED") {
            Some(s) => s.parse().unwrap_or_else(|_| {
                warnings.push(format!("BLOCKFALL_SEED={:?} is not a u32, using clock seed", s));
                clock_seed()
            }),
            None => clock_seed(),
        };

        let randomizer = match value("BLOCKFALL_RANDOMIZER") {
            Some(s) => Randomizer::parse(&s).unwrap_or_else(|| {
                warnings.push(format!(
                    "BLOCKFALL_RANDOMIZER={:?} is not uniform or bag7, using uniform",
                    s
                ));
                Randomizer::default()
            }),
            None => Randomizer::default(),
        };

        let tick_ms = match value("BLOCKFALL_TICK_MS") {
            Some(s) => match s.parse::<u32>() {
                Ok(ms) if ms >= 1 => ms,
                _ => {
                    warnings.push(format!(
                        "BLOCKFALL_TICK_MS={:?} is not a positive integer, using {}",
                        s, TICK_MS
                    ));
                    TICK_MS
                }
            },
            None => TICK_MS,
        };

        let log_path = value("BLOCKFALL_LOG_PATH");

        Self {
            seed,
            randomizer,
            tick_ms,
            log_path,
            warnings,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
