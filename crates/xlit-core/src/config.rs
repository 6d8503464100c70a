use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

/// Process-wide configuration for the transliteration service.
///
/// Read from the environment once at startup and passed into constructors;
/// nothing consults the environment after boot. Malformed numeric values
/// fall back to the defaults rather than aborting.
#[derive(Clone, Debug)]
pub struct XlitConfig {
    /// Target language code (`XLIT_LANG`).
    pub lang: String,
    /// Beam width forwarded to the engine (`BEAM_WIDTH`).
    pub beam_width: u32,
    /// Candidates per word when the request omits `topk` (`TOPK`).
    pub topk_default: u32,
    /// Static bearer token (`XLIT_API_KEY`). Unset or empty = open access.
    pub api_key: Option<SecretString>,
    /// Base URL of the engine sidecar (`XLIT_ENGINE_URL`).
    pub engine_url: String,
    /// Listen port (`PORT`).
    pub port: u16,
    /// Bound on each outbound engine call (`REQUEST_TIMEOUT_SECS`).
    pub request_timeout: Duration,
}

impl Default for XlitConfig {
    fn default() -> Self {
        Self {
            lang: "hi".to_string(),
            beam_width: 10,
            topk_default: 3,
            api_key: None,
            engine_url: "http://127.0.0.1:8500".to_string(),
            port: 8000,
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl XlitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lang: env_str("XLIT_LANG").unwrap_or(defaults.lang),
            beam_width: env_parse("BEAM_WIDTH").unwrap_or(defaults.beam_width),
            topk_default: env_parse("TOPK").unwrap_or(defaults.topk_default),
            api_key: env_str("XLIT_API_KEY")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(SecretString::from),
            engine_url: env_str("XLIT_ENGINE_URL").unwrap_or(defaults.engine_url),
            port: env_parse("PORT").unwrap_or(defaults.port),
            request_timeout: env_parse("REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

/// Configuration for the message board service.
#[derive(Clone, Debug)]
pub struct BoardConfig {
    /// Postgres connection string (`DATABASE_URL`). Required.
    pub database_url: String,
    /// Listen port (`BOARD_PORT`).
    pub port: u16,
    /// Bound on connect and query (`DB_TIMEOUT_SECS`).
    pub db_timeout: Duration,
}

impl BoardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env_str("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        Ok(Self {
            database_url,
            port: env_parse("BOARD_PORT").unwrap_or(8001),
            db_timeout: env_parse("DB_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(10)),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

fn env_str(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env_str(key)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_match_contract() {
        let config = XlitConfig::default();
        assert_eq!(config.lang, "hi");
        assert_eq!(config.beam_width, 10);
        assert_eq!(config.topk_default, 3);
        assert!(config.api_key.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        std::env::set_var("XLIT_TEST_BAD_NUM", "not-a-number");
        let parsed: Option<u32> = env_parse("XLIT_TEST_BAD_NUM");
        assert_eq!(parsed, None);
        std::env::remove_var("XLIT_TEST_BAD_NUM");
    }

    #[test]
    fn empty_env_var_reads_as_unset() {
        std::env::set_var("XLIT_TEST_EMPTY", "");
        assert_eq!(env_str("XLIT_TEST_EMPTY"), None);
        std::env::remove_var("XLIT_TEST_EMPTY");
    }

    #[test]
    fn blank_api_key_disables_auth() {
        // Mirrors from_env's trim-then-filter on the key.
        let key = Some("   ".to_string())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(SecretString::from);
        assert!(key.is_none());

        let key = Some(" secret ".to_string())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(SecretString::from);
        assert_eq!(key.unwrap().expose_secret(), "secret");
    }

    #[test]
    fn board_config_requires_database_url() {
        std::env::remove_var("DATABASE_URL");
        assert!(matches!(
            BoardConfig::from_env(),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }
}
