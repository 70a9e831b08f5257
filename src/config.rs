//! Configuration loading
//!
//! Reads process configuration from the environment (with `.env` support for
//! local development). A missing credential never aborts startup: the
//! provider layer degrades to its lazy-failing stand-in instead.

use anyhow::Result;
use std::env;
use tracing::warn;

/// Default ceiling on supervisor dispatch cycles per run.
pub const MAX_ITERATIONS: u32 = 10;

/// Process-wide configuration for the coding workflow.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model identifier passed to the provider.
    pub model: String,

    /// OpenAI API key. `None` degrades the provider.
    pub api_key: Option<String>,

    /// Ceiling on supervisor dispatch cycles, enforced by the engine.
    pub max_iterations: u32,

    /// Default log filter for the tracing subscriber.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            api_key: None,
            max_iterations: MAX_ITERATIONS,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Recognized variables: `OPENAI_API_KEY`, `OPENAI_MODEL`,
    /// `MAX_ITERATIONS`, `LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        // Load .env if present; silently ignore if not.
        let _ = dotenvy::dotenv();

        let mut config = Config::default();

        if let Ok(val) = env::var("OPENAI_API_KEY") {
            config.api_key = Some(val);
        }
        if let Ok(val) = env::var("OPENAI_MODEL") {
            config.model = val;
        }
        if let Ok(val) = env::var("MAX_ITERATIONS") {
            match val.parse::<u32>() {
                Ok(parsed) if parsed > 0 => config.max_iterations = parsed,
                _ => warn!(value = %val, "ignoring invalid MAX_ITERATIONS"),
            }
        }
        if let Ok(val) = env::var("LOG_LEVEL") {
            config.log_level = val;
        }

        Ok(config)
    }
}
