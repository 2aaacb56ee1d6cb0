// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENV_API_URL: &str = "FLOWML_API_URL";
pub const ENV_TIMEOUT_MS: &str = "FLOWML_TIMEOUT_MS";
pub const ENV_STATE_DIR: &str = "FLOWML_STATE_DIR";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_STATE_DIR: &str = ".flowml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where the backend lives and where local state goes.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub state_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the environment, falling back to defaults
    /// for unset or empty variables. Malformed numbers are an error, not
    /// a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or(ENV_API_URL, DEFAULT_BASE_URL);
        let timeout_ms = match env_nonempty(ENV_TIMEOUT_MS) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid {
                    name: ENV_TIMEOUT_MS,
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT_MS,
        };
        let state_dir = PathBuf::from(env_or(ENV_STATE_DIR, DEFAULT_STATE_DIR));
        Ok(Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            state_dir,
        })
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_or(name: &str, default: &str) -> String {
    env_nonempty(name).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
