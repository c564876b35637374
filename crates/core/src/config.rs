use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Settings for hosts that evaluate builtins from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl EvalConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            log_filter: env_or("POLICY_LOG", "warn"),
        }
    }

    pub fn log_summary(&self) {
        tracing::debug!(log_filter = %self.log_filter, "eval config loaded");
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
        }
    }
}
