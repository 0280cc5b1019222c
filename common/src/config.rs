//! Configuration management via environment variables
//!
//! Reads the poll target and rate from the environment, parses them and
//! fails fast on malformed values.

use std::time::Duration;

use url::Url;

use crate::error::CommonError;

/// 対象URLの環境変数名
pub const ENV_URL: &str = "URL";

/// レート（リクエスト/秒）の環境変数名
pub const ENV_RPS: &str = "RPS";

/// 対象URLのデフォルト値
pub const DEFAULT_URL: &str = "http://localhost:8080";

/// レートのデフォルト値
pub const DEFAULT_RPS: &str = "1";

/// リクエストタイムアウト（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Get an environment variable, treating an empty value as unset
///
/// # Returns
/// * `Some(value)` - The variable is set to a non-empty value
/// * `None` - The variable is unset, empty, or not valid unicode
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value
///
/// Returns `default` when the variable is unset or empty.
///
/// # Example
/// ```
/// use ratepoll_common::config::get_env_or;
///
/// let url = get_env_or("RATEPOLL_DOC_UNSET_VAR", "http://localhost:8080");
/// assert_eq!(url, "http://localhost:8080");
/// ```
pub fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|| default.to_string())
}

/// Parse the poll target as an absolute URL
pub fn parse_target_url(value: &str) -> Result<Url, CommonError> {
    Url::parse(value).map_err(|source| CommonError::InvalidUrl {
        value: value.to_string(),
        source,
    })
}

/// Parse a requests-per-second value
///
/// A float parse is tried first; failing that, a 32-bit integer parse is
/// widened to `f64`.
pub fn parse_rate(value: &str) -> Result<f64, CommonError> {
    if let Ok(rate) = value.parse::<f64>() {
        return Ok(rate);
    }
    if let Ok(rate) = value.parse::<i32>() {
        return Ok(f64::from(rate));
    }
    Err(CommonError::InvalidRate(value.to_string()))
}

/// ポーラー設定
///
/// 起動時に一度だけ構築され、以降は変更されない。
#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    /// ポーリング対象URL
    pub target_url: Url,
    /// 1秒あたりの最大リクエスト数
    pub rps: f64,
    /// 1リクエストあたりのタイムアウト
    pub request_timeout: Duration,
}

impl PollerConfig {
    /// Load configuration from `URL` and `RPS`
    pub fn from_env() -> Result<Self, CommonError> {
        let url = get_env_or(ENV_URL, DEFAULT_URL);
        let rps = get_env_or(ENV_RPS, DEFAULT_RPS);
        Self::from_values(&url, &rps)
    }

    /// Build configuration from raw string values
    pub fn from_values(url: &str, rps: &str) -> Result<Self, CommonError> {
        let target_url = parse_target_url(url)?;
        let rps = parse_rate(rps)?;
        if rps < 0.0 {
            tracing::warn!(rps, "Rate is negative, no request will be issued");
        } else if rps.is_nan() || rps == 0.0 {
            tracing::warn!(rps, "Rate is zero, only a single request will be issued");
        }

        Ok(Self {
            target_url,
            rps,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// タイムアウトを設定
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_rate_accepts_floats_and_integers() {
        assert_eq!(parse_rate("2").unwrap(), 2.0);
        assert_eq!(parse_rate("0.5").unwrap(), 0.5);
        assert_eq!(parse_rate("10").unwrap(), 10.0);
        assert_eq!(parse_rate("1e1").unwrap(), 10.0);
        assert_eq!(parse_rate("-3").unwrap(), -3.0);
    }

    #[test]
    fn test_parse_rate_rejects_garbage() {
        let err = parse_rate("abc").unwrap_err();
        assert!(matches!(err, CommonError::InvalidRate(ref v) if v == "abc"));

        assert!(parse_rate("").is_err());
        assert!(parse_rate(" 1").is_err());
        assert!(parse_rate("0x10").is_err());
    }

    #[test]
    fn test_parse_target_url_valid() {
        let url = parse_target_url("http://example.com:8080/health?x=1").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.port(), Some(8080));
        assert_eq!(url.path(), "/health");
    }

    #[test]
    fn test_parse_target_url_rejects_control_characters() {
        let err = parse_target_url("http://bad\u{0}host:8080/").unwrap_err();
        assert!(matches!(err, CommonError::InvalidUrl { .. }));
    }

    #[test]
    fn test_parse_target_url_rejects_relative() {
        assert!(parse_target_url("not a url").is_err());
    }

    #[test]
    fn test_from_values_uses_one_minute_timeout() {
        let config = PollerConfig::from_values("http://localhost:9000", "2").unwrap();
        assert_eq!(config.rps, 2.0);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.target_url.as_str(), "http://localhost:9000/");
    }

    #[test]
    fn test_from_values_invalid_rate_fails() {
        let err = PollerConfig::from_values(DEFAULT_URL, "fast").unwrap_err();
        assert_eq!(err.to_string(), "fast is not a float");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_RPS);

        let config = PollerConfig::from_env().unwrap();
        assert_eq!(config.target_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.rps, 1.0);
    }

    #[test]
    #[serial]
    fn test_from_env_empty_values_fall_back_to_defaults() {
        std::env::set_var(ENV_URL, "");
        std::env::set_var(ENV_RPS, "");

        let config = PollerConfig::from_env().unwrap();
        assert_eq!(config.target_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.rps, 1.0);

        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_RPS);
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        std::env::set_var(ENV_URL, "https://status.example.org/ping");
        std::env::set_var(ENV_RPS, "0.25");

        let config = PollerConfig::from_env().unwrap();
        assert_eq!(config.target_url.as_str(), "https://status.example.org/ping");
        assert_eq!(config.rps, 0.25);

        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_RPS);
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_rate_is_fatal() {
        std::env::remove_var(ENV_URL);
        std::env::set_var(ENV_RPS, "abc");

        assert!(PollerConfig::from_env().is_err());

        std::env::remove_var(ENV_RPS);
    }

    #[test]
    #[serial]
    fn test_get_env_or_default() {
        std::env::remove_var("RATEPOLL_TEST_VAR");
        assert_eq!(get_env_or("RATEPOLL_TEST_VAR", "fallback"), "fallback");

        std::env::set_var("RATEPOLL_TEST_VAR", "value");
        assert_eq!(get_env_or("RATEPOLL_TEST_VAR", "fallback"), "value");
        std::env::remove_var("RATEPOLL_TEST_VAR");
    }
}
