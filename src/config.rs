use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::PageTarget;

pub const DEFAULT_ORIGIN: &str = "https://forums.redflagdeals.com";
pub const DEFAULT_PATH_PREFIX: &str = "/hot-deals-f9/";
pub const DEFAULT_PAGES: usize = 2;
pub const MAX_PAGES: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub origin: String,
    pub path_prefix: String,
    /// `None` when the page count should be asked for interactively.
    pub pages: Option<usize>,
    pub logs_dir: PathBuf,
    pub http: HttpConfig,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    /// Build the configuration from an arbitrary key lookup, so tests do not
    /// have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let origin = var("DEALS_ORIGIN")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let path_prefix =
            var("DEALS_PATH_PREFIX").unwrap_or_else(|| DEFAULT_PATH_PREFIX.to_string());
        let pages = var("DEALS_PAGES").map(|v| parse_page_count(&v));
        let logs_dir = var("DEALS_LOGS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        let timeout = match var("FETCH_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "FETCH_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        let user_agent = var("DEALS_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let log_level = var("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            origin,
            path_prefix,
            pages,
            logs_dir,
            http: HttpConfig { timeout, user_agent },
            log_level,
        })
    }

    pub fn page_targets(&self, pages: usize) -> Vec<PageTarget> {
        page_targets(&self.path_prefix, pages)
    }
}

/// A requested page count, if it is within `1..=MAX_PAGES`.
pub fn page_count(input: &str) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_PAGES).contains(n))
}

/// Like `page_count`, falling back to `DEFAULT_PAGES` on invalid input.
pub fn parse_page_count(input: &str) -> usize {
    page_count(input).unwrap_or_else(|| {
        tracing::warn!(
            target: "app",
            input = %input.trim(),
            default = DEFAULT_PAGES,
            "invalid page count, using default"
        );
        DEFAULT_PAGES
    })
}

pub fn page_targets(prefix: &str, pages: usize) -> Vec<PageTarget> {
    (1..=pages)
        .map(|n| PageTarget::new(format!("{}{}", prefix, n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn page_count_bounds() {
        assert_eq!(parse_page_count("1"), 1);
        assert_eq!(parse_page_count(" 10 "), 10);
        assert_eq!(parse_page_count("0"), DEFAULT_PAGES);
        assert_eq!(parse_page_count("11"), DEFAULT_PAGES);
        assert_eq!(parse_page_count("-3"), DEFAULT_PAGES);
        assert_eq!(parse_page_count("three"), DEFAULT_PAGES);
        assert_eq!(page_count("11"), None);
        assert_eq!(page_count("7"), Some(7));
    }

    #[test]
    fn targets_are_numbered_from_one() {
        let targets = page_targets(DEFAULT_PATH_PREFIX, 3);
        let paths: Vec<&str> = targets.iter().map(|t| t.as_str()).collect();
        assert_eq!(paths, ["/hot-deals-f9/1", "/hot-deals-f9/2", "/hot-deals-f9/3"]);
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert_eq!(config.pages, None);
        assert_eq!(config.logs_dir, PathBuf::from("logs"));
        assert_eq!(config.http.timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DEALS_ORIGIN", "http://127.0.0.1:8080/"),
            ("DEALS_PAGES", "4"),
            ("FETCH_TIMEOUT_SECS", "5"),
            ("DEALS_LOGS_DIR", "/tmp/deal-logs"),
        ]))
        .unwrap();
        assert_eq!(config.origin, "http://127.0.0.1:8080");
        assert_eq!(config.pages, Some(4));
        assert_eq!(config.http.timeout, Duration::from_secs(5));
        assert_eq!(
            config.page_targets(2)[1].url(&config.origin),
            "http://127.0.0.1:8080/hot-deals-f9/2"
        );
    }

    #[test]
    fn invalid_page_env_falls_back_but_bad_timeout_is_rejected() {
        let config = AppConfig::from_lookup(lookup(&[("DEALS_PAGES", "42")])).unwrap();
        assert_eq!(config.pages, Some(DEFAULT_PAGES));

        let err = AppConfig::from_lookup(lookup(&[("FETCH_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "FETCH_TIMEOUT_SECS", .. }));
    }
}
