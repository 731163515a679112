//! Application constants and the immutable runtime configuration.
//!
//! `AppConfig` is resolved once at startup and shared via `Arc` with the
//! provider clients, the AI client and the HTTP layer. Nothing downstream
//! reads the environment directly.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "outreach-enricher";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_SPECTER_BASE_URL: &str = "https://app.tryspecter.com/api/v1";
pub const DEFAULT_APOLLO_BASE_URL: &str = "https://api.apollo.io/api/v1";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "outreach_enricher=info,tower_http=info"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// Credentials and endpoint for one upstream HTTP API.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Language-model settings.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    /// When false, outreach emails are assembled from templates only.
    pub draft_enabled: bool,
}

/// Runtime configuration, loaded once before any pipeline run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub specter: ProviderConfig,
    pub apollo: ProviderConfig,
    pub openai: AiConfig,
    /// Whether the fallback provider is consulted at all.
    pub fallback_enabled: bool,
    pub bind_addr: SocketAddr,
    /// Upper bound on a whole enrichment request, across all upstream calls.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::MissingVar(key));

        let specter_key = required("SPECTER_API_KEY")?;
        let apollo_key = required("APOLLO_API_KEY")?;
        let openai_key = required("OPENAI_API_KEY")?;

        let provider_timeout = Duration::from_secs(parse_or(
            get("PROVIDER_TIMEOUT_SECS"),
            "PROVIDER_TIMEOUT_SECS",
            DEFAULT_PROVIDER_TIMEOUT_SECS,
        )?);
        let request_timeout = Duration::from_secs(parse_or(
            get("REQUEST_TIMEOUT_SECS"),
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidVar {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        Ok(Self {
            specter: ProviderConfig {
                base_url: get("SPECTER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_SPECTER_BASE_URL.to_string()),
                api_key: specter_key,
                timeout: provider_timeout,
            },
            apollo: ProviderConfig {
                base_url: get("APOLLO_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_APOLLO_BASE_URL.to_string()),
                api_key: apollo_key,
                timeout: provider_timeout,
            },
            openai: AiConfig {
                base_url: get("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                api_key: openai_key,
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
                timeout: provider_timeout,
                draft_enabled: parse_flag(get("AI_DRAFT_ENABLED"), "AI_DRAFT_ENABLED", true)?,
            },
            fallback_enabled: parse_flag(get("FALLBACK_ENABLED"), "FALLBACK_ENABLED", true)?,
            bind_addr,
            request_timeout,
        })
    }
}

fn parse_or(value: Option<String>, name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => match v.parse::<u64>() {
            Ok(0) => Err(ConfigError::InvalidVar {
                name,
                reason: "must be greater than zero".into(),
            }),
            Ok(n) => Ok(n),
            Err(e) => Err(ConfigError::InvalidVar {
                name,
                reason: e.to_string(),
            }),
        },
    }
}

fn parse_flag(value: Option<String>, name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(default);
    };
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidVar {
            name,
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const KEYS: [(&str, &str); 3] = [
        ("SPECTER_API_KEY", "spk"),
        ("APOLLO_API_KEY", "apk"),
        ("OPENAI_API_KEY", "oak"),
    ];

    #[test]
    fn defaults_applied_when_only_keys_present() {
        let config = AppConfig::from_lookup(lookup_from(&KEYS)).unwrap();
        assert_eq!(config.specter.base_url, DEFAULT_SPECTER_BASE_URL);
        assert_eq!(config.apollo.base_url, DEFAULT_APOLLO_BASE_URL);
        assert_eq!(config.openai.model, DEFAULT_OPENAI_MODEL);
        assert_eq!(config.specter.timeout, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(300));
        assert!(config.fallback_enabled);
        assert!(config.openai.draft_enabled);
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&KEYS[..2])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("OPENAI_API_KEY"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut pairs = KEYS.to_vec();
        pairs[0] = ("SPECTER_API_KEY", "   ");
        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("SPECTER_API_KEY"));
    }

    #[test]
    fn overrides_are_read() {
        let mut pairs = KEYS.to_vec();
        pairs.extend([
            ("SPECTER_BASE_URL", "http://localhost:9000"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("PROVIDER_TIMEOUT_SECS", "5"),
            ("FALLBACK_ENABLED", "false"),
            ("AI_DRAFT_ENABLED", "0"),
            ("BIND_ADDR", "127.0.0.1:3000"),
        ]);
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.specter.base_url, "http://localhost:9000");
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.apollo.timeout, Duration::from_secs(5));
        assert!(!config.fallback_enabled);
        assert!(!config.openai.draft_enabled);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn malformed_values_rejected() {
        let mut pairs = KEYS.to_vec();
        pairs.push(("REQUEST_TIMEOUT_SECS", "soon"));
        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "REQUEST_TIMEOUT_SECS", .. }));

        let mut pairs = KEYS.to_vec();
        pairs.push(("FALLBACK_ENABLED", "maybe"));
        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "FALLBACK_ENABLED", .. }));

        let mut pairs = KEYS.to_vec();
        pairs.push(("PROVIDER_TIMEOUT_SECS", "0"));
        assert!(AppConfig::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn app_name_is_stable() {
        assert_eq!(APP_NAME, "outreach-enricher");
    }
}
