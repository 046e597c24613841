//! Environment-driven configuration

use crate::matcher::{RuleTableError, Script};
use crate::state_machine::Timing;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BOT_NAME: &str = "Zikai AI";
/// Sessions with no stream and no submissions for this long are closed
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rule file {path}: {source}")]
    ReadRules {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rule file {path} is invalid: {source}")]
    InvalidRules {
        path: PathBuf,
        source: RuleTableError,
    },
}

/// Server and session configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub port: u16,
    /// JSON script overriding the built-in rules and welcome
    pub rules_path: Option<PathBuf>,
    pub timing: Timing,
    pub bot_name: String,
    pub idle_timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            rules_path: None,
            timing: Timing::default(),
            bot_name: DEFAULT_BOT_NAME.to_string(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let duration = |key: &str, default: Duration, unit: fn(u64) -> Duration| -> Duration {
            lookup(key).map_or(default, |raw| match raw.trim().parse::<u64>() {
                Ok(n) => unit(n),
                Err(e) => {
                    tracing::warn!(key, value = %raw, error = %e, "Ignoring invalid duration");
                    default
                }
            })
        };
        let millis = |key: &str, default: Duration| duration(key, default, Duration::from_millis);

        let port = lookup("HOMEPAGE_CHAT_PORT").map_or(defaults.port, |raw| {
            raw.trim().parse().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "Ignoring invalid port");
                defaults.port
            })
        });

        let mut reveal_interval = millis(
            "HOMEPAGE_CHAT_REVEAL_INTERVAL_MS",
            defaults.timing.reveal_interval,
        );
        // tokio intervals panic on a zero period
        if reveal_interval.is_zero() {
            reveal_interval = Duration::from_millis(1);
        }

        let idle_timeout = duration(
            "HOMEPAGE_CHAT_IDLE_TIMEOUT_SECS",
            defaults.idle_timeout,
            Duration::from_secs,
        )
        .max(Duration::from_secs(1));

        Self {
            port,
            rules_path: lookup("HOMEPAGE_CHAT_RULES")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            timing: Timing {
                welcome_delay: millis(
                    "HOMEPAGE_CHAT_WELCOME_DELAY_MS",
                    defaults.timing.welcome_delay,
                ),
                thinking_delay: millis(
                    "HOMEPAGE_CHAT_THINKING_DELAY_MS",
                    defaults.timing.thinking_delay,
                ),
                reveal_interval,
            },
            bot_name: lookup("HOMEPAGE_CHAT_BOT_NAME")
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(defaults.bot_name),
            idle_timeout,
        }
    }

    /// Load the configured script, or the built-in one
    pub fn load_script(&self) -> Result<Script, ConfigError> {
        let Some(path) = &self.rules_path else {
            return Ok(Script::builtin());
        };

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadRules {
            path: path.clone(),
            source,
        })?;
        let script = Script::from_json(&json).map_err(|source| ConfigError::InvalidRules {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), rules = script.rules.len(), "Loaded rule file");
        Ok(script)
    }
}
