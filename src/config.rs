//! Application Configuration
//!
//! Settings baked in at build time through `JOIN_STORE_URL` and `JOIN_LOG_LEVEL`.

use log::LevelFilter;

pub const DEFAULT_STORE_URL: &str = "https://join-6e686-default-rtdb.europe-west1.firebasedatabase.app/";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Root of the document store; always ends in `/`
    pub store_url: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::new(option_env!("JOIN_STORE_URL"), option_env!("JOIN_LOG_LEVEL"))
    }

    pub fn new(store_url: Option<&str>, log_level: Option<&str>) -> Self {
        let store_url = store_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_STORE_URL);
        let log_level = log_level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self { store_url: normalize_base_url(store_url), log_level }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store_url, DEFAULT_STORE_URL);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides_are_normalized() {
        let config = AppConfig::new(Some(" http://localhost:9000// "), Some("debug"));
        assert_eq!(config.store_url, "http://localhost:9000/");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_bad_level_falls_back() {
        let config = AppConfig::new(Some(""), Some("chatty"));
        assert_eq!(config.store_url, DEFAULT_STORE_URL);
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
