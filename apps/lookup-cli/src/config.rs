//! Centralized configuration for lookup-cli.
//!
//! All environment variables are loaded and validated at startup to fail fast
//! on misconfiguration rather than halfway through a run.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use domain::Item;

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Configuration error.
#[derive(Debug)]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error for {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log format
    pub log_format: LogFormat,
    /// Items replacing the sample primary seed, if `PRIMARY_SEED_PATH` is set
    pub primary_seed: Option<Vec<Item>>,
    /// Items replacing the sample secondary seed, if `SECONDARY_SEED_PATH` is set
    pub secondary_seed: Option<Vec<Item>>,
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// Seed files are read here so a bad path fails before any operation runs.
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_format =
            LogFormat::from_str(&env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".into()));

        let primary_seed = seed_path("PRIMARY_SEED_PATH")
            .map(|path| load_seed("PRIMARY_SEED_PATH", &path))
            .transpose()?;
        let secondary_seed = seed_path("SECONDARY_SEED_PATH")
            .map(|path| load_seed("SECONDARY_SEED_PATH", &path))
            .transpose()?;

        Ok(Self {
            log_format,
            primary_seed,
            secondary_seed,
        })
    }

    /// Log warnings about seeds that break the one-item-per-id expectation.
    pub fn warn_if_suspicious(&self) {
        let seeds = [
            ("PRIMARY_SEED_PATH", &self.primary_seed),
            ("SECONDARY_SEED_PATH", &self.secondary_seed),
        ];
        for (field, seed) in seeds {
            let Some(items) = seed else { continue };
            let dupes = duplicate_ids(items);
            if !dupes.is_empty() {
                tracing::warn!(
                    field,
                    ids = ?dupes,
                    "seed repeats ids; lookups and deletes take the first match"
                );
            }
        }
    }
}

fn seed_path(field: &str) -> Option<PathBuf> {
    env::var(field)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Read a JSON array of items from `path`.
pub fn load_seed(field: &'static str, path: &Path) -> Result<Vec<Item>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError {
        field,
        message: format!("cannot read '{}': {}", path.display(), e),
    })?;
    serde_json::from_str(&raw).map_err(|e| ConfigError {
        field,
        message: format!("invalid seed in '{}': {}", path.display(), e),
    })
}

fn duplicate_ids(items: &[Item]) -> Vec<i64> {
    let mut seen = Vec::with_capacity(items.len());
    let mut dupes = Vec::new();
    for item in items {
        if seen.contains(&item.id) {
            if !dupes.contains(&item.id) {
                dupes.push(item.id);
            }
        } else {
            seen.push(item.id);
        }
    }
    dupes
}
