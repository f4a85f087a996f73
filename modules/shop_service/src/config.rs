//! Configuration for shop service module

use serde::Deserialize;
use std::time::Duration;

/// Shop service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HMAC secret used to sign bearer tokens
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Lifetime of access tokens
    #[serde(default = "default_access_token_ttl", with = "humantime_serde")]
    pub access_token_ttl: Duration,

    /// Lifetime of refresh tokens
    #[serde(default = "default_refresh_token_ttl", with = "humantime_serde")]
    pub refresh_token_ttl: Duration,

    /// Page size used when a list request does not ask for one
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound for requested page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,

    /// Status given to orders created from carts
    #[serde(default = "default_pending_status_label")]
    pub pending_status_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_ttl: default_access_token_ttl(),
            refresh_token_ttl: default_refresh_token_ttl(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            pending_status_label: default_pending_status_label(),
        }
    }
}

impl Config {
    /// Resolve optional paging parameters against the configured bounds
    pub fn page(&self, page: Option<u64>, page_size: Option<u64>) -> crate::contract::PageRequest {
        let size = page_size
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size);
        crate::contract::PageRequest::new(page.unwrap_or(1), size)
    }
}

fn default_jwt_secret() -> String {
    "change-me".to_string()
}

fn default_access_token_ttl() -> Duration {
    Duration::from_secs(5 * 60)
}

fn default_refresh_token_ttl() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}

fn default_pending_status_label() -> String {
    "pending".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: Config = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg.access_token_ttl, Duration::from_secs(300));
        assert_eq!(cfg.pending_status_label, "pending");
    }

    #[test]
    fn ttl_accepts_humantime() {
        let cfg: Config =
            serde_json::from_value(serde_json::json!({ "refresh_token_ttl": "7d" })).unwrap();
        assert_eq!(cfg.refresh_token_ttl, Duration::from_secs(7 * 24 * 3600));
    }

    #[test]
    fn page_size_is_capped() {
        let cfg = Config::default();
        let page = cfg.page(Some(3), Some(10_000));
        assert_eq!(page.page, 3);
        assert_eq!(page.page_size, 100);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<Config, _> =
            serde_json::from_value(serde_json::json!({ "jwt_secrte": "x" }));
        assert!(res.is_err());
    }
}
