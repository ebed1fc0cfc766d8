use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

use crate::services::providers::gemini::GEMINI_API_BASE;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;
const DEFAULT_BOT_USERNAME: &str = "your_bot";

#[derive(Debug, Clone)]
pub struct AstroConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub bot: BotSettings,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Absent key means every reading is served from the fallback texts.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct BotSettings {
    pub token: Option<Secret<String>>,
    pub username: String,
}

impl AstroConfig {
    pub fn load() -> Result<Self, AppError> {
        let mut common = core_config::Config::load()?;

        if let Some(port) = optional_env("PORT") {
            common.port = port.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("PORT must be a port number: {}", e))
            })?;
        }
        if let Some(level) = optional_env("LOG_LEVEL") {
            common.log_level = level;
        }

        let timeout_secs = match optional_env("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_TIMEOUT_SECS must be a number of seconds: {}",
                    e
                ))
            })?,
            None => DEFAULT_GEMINI_TIMEOUT_SECS,
        };

        Ok(AstroConfig {
            common,
            gemini: GeminiSettings {
                api_key: optional_env("GEMINI_API_KEY").map(Secret::new),
                model: optional_env("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: optional_env("GEMINI_API_BASE")
                    .unwrap_or_else(|| GEMINI_API_BASE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            bot: BotSettings {
                token: optional_env("BOT_TOKEN").map(Secret::new),
                username: optional_env("BOT_USERNAME")
                    .unwrap_or_else(|| DEFAULT_BOT_USERNAME.to_string()),
            },
            otlp_endpoint: optional_env("OTLP_ENDPOINT"),
        })
    }

    /// Configuration for tests and local runs: fallback generation, random port.
    pub fn for_tests() -> Self {
        AstroConfig {
            common: core_config::Config {
                port: 0,
                ..core_config::Config::default()
            },
            gemini: GeminiSettings {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: GEMINI_API_BASE.to_string(),
                timeout: Duration::from_secs(DEFAULT_GEMINI_TIMEOUT_SECS),
            },
            bot: BotSettings {
                token: None,
                username: DEFAULT_BOT_USERNAME.to_string(),
            },
            otlp_endpoint: None,
        }
    }
}

/// Unset and empty variables are treated alike.
fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
