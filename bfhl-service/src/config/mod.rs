use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

const DEFAULT_OFFICIAL_EMAIL: &str = "official@example.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Process-wide settings, read once at startup and immutable afterwards.
#[derive(Clone)]
pub struct BfhlConfig {
    pub common: core_config::Config,
    /// Operator identity echoed in every response envelope.
    pub official_email: String,
    pub gemini: GeminiSettings,
}

#[derive(Clone)]
pub struct GeminiSettings {
    /// `None` disables the AI operation without failing startup.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    /// Upper bound on a single provider call.
    pub timeout: Duration,
}

impl BfhlConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let timeout_secs: u64 = get_env(
            "AI_TIMEOUT_SECS",
            Some(&DEFAULT_AI_TIMEOUT_SECS.to_string()),
            false,
        )?
        .parse()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("AI_TIMEOUT_SECS must be an integer: {}", e))
        })?;

        Ok(BfhlConfig {
            common: common_config,
            official_email: get_env("OFFICIAL_EMAIL", Some(DEFAULT_OFFICIAL_EMAIL), is_prod)?,
            gemini: GeminiSettings {
                api_key: env::var("GEMINI_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .map(Secret::new),
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), false)?,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
