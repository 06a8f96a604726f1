//! Environment-driven service configuration.

use crate::cache::{CacheConfig, DEFAULT_TTL};
use crate::upstream::{YouTubeClientConfig, DEFAULT_BASE_URL};
use crate::{Error, ErrorContext, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:8085";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_key: String,
    pub bind: SocketAddr,
    pub cache_dir: PathBuf,
    pub cache_ttl: Duration,
    pub cache_enabled: bool,
    pub cache_salt: Option<String>,
    pub api_base_url: String,
    pub http_timeout: Duration,
}

impl ServiceConfig {
    /// Read configuration from `YTVP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("YTVP_GOOGLE_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "YTVP_GOOGLE_API_KEY not set",
                    ErrorContext::new()
                        .with_field_path("YTVP_GOOGLE_API_KEY")
                        .with_source("config"),
                )
            })?;

        let bind_raw = lookup("YTVP_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse::<SocketAddr>().map_err(|e| {
            invalid("YTVP_BIND", &bind_raw, format!("invalid bind address: {}", e))
        })?;

        let cache_dir = lookup("YTVP_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);

        let cache_ttl = match lookup("YTVP_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(parse_number("YTVP_CACHE_TTL_SECS", &raw)?),
            None => DEFAULT_TTL,
        };

        let cache_enabled = match lookup("YTVP_CACHE_ENABLED") {
            Some(raw) => parse_bool("YTVP_CACHE_ENABLED", &raw)?,
            None => true,
        };

        let cache_salt = lookup("YTVP_CACHE_SALT").filter(|s| !s.is_empty());

        let api_base_url =
            lookup("YTVP_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&api_base_url).map_err(|e| {
            invalid(
                "YTVP_API_BASE_URL",
                &api_base_url,
                format!("invalid URL: {}", e),
            )
        })?;

        let http_timeout = match lookup("YTVP_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("YTVP_HTTP_TIMEOUT_SECS", &raw)?),
            None => Duration::from_secs(30),
        };

        Ok(Self {
            api_key,
            bind,
            cache_dir,
            cache_ttl,
            cache_enabled,
            cache_salt,
            api_base_url,
            http_timeout,
        })
    }

    pub fn cache_config(&self) -> CacheConfig {
        let cfg = CacheConfig::new()
            .with_ttl(self.cache_ttl)
            .with_enabled(self.cache_enabled);
        match self.cache_salt {
            Some(ref salt) => cfg.with_salt(salt.clone()),
            None => cfg,
        }
    }

    pub fn client_config(&self) -> YouTubeClientConfig {
        YouTubeClientConfig::new(self.api_key.clone())
            .with_base_url(self.api_base_url.clone())
            .with_timeout(self.http_timeout)
    }
}

fn invalid(field: &str, raw: &str, message: String) -> Error {
    Error::configuration_with_context(
        message,
        ErrorContext::new()
            .with_field_path(field)
            .with_details(format!("value: {:?}", raw))
            .with_source("config"),
    )
}

fn parse_number(field: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| invalid(field, raw, "expected a whole number".to_string()))
}

fn parse_bool(field: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(field, raw, "expected a boolean".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServiceConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[("YTVP_GOOGLE_API_KEY", "secret")]).unwrap();
        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.bind, "0.0.0.0:8085".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.cache_dir, std::env::temp_dir());
        assert_eq!(cfg.cache_ttl, Duration::from_secs(6 * 3600));
        assert!(cfg.cache_enabled);
        assert!(cfg.cache_salt.is_none());
        assert_eq!(cfg.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_api_key() {
        let err = config(&[]).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("YTVP_GOOGLE_API_KEY")
        );
        assert!(config(&[("YTVP_GOOGLE_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("YTVP_GOOGLE_API_KEY", "k"),
            ("YTVP_BIND", "127.0.0.1:9000"),
            ("YTVP_CACHE_DIR", "/var/cache/ytvp"),
            ("YTVP_CACHE_TTL_SECS", "60"),
            ("YTVP_CACHE_ENABLED", "off"),
            ("YTVP_CACHE_SALT", "v2"),
            ("YTVP_API_BASE_URL", "http://127.0.0.1:4010/youtube/v3"),
            ("YTVP_HTTP_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(cfg.bind.port(), 9000);
        assert_eq!(cfg.cache_dir, PathBuf::from("/var/cache/ytvp"));

        let cache = cfg.cache_config();
        assert_eq!(cache.ttl, Duration::from_secs(60));
        assert!(!cache.enabled);
        assert_eq!(cache.salt.as_deref(), Some("v2"));

        let client = cfg.client_config();
        assert_eq!(client.base_url, "http://127.0.0.1:4010/youtube/v3");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        for (name, value) in [
            ("YTVP_BIND", "not-an-addr"),
            ("YTVP_CACHE_TTL_SECS", "six hours"),
            ("YTVP_CACHE_ENABLED", "maybe"),
            ("YTVP_API_BASE_URL", "no scheme"),
            ("YTVP_HTTP_TIMEOUT_SECS", "-1"),
        ] {
            let err = config(&[("YTVP_GOOGLE_API_KEY", "k"), (name, value)]).unwrap_err();
            let ctx = err.context().unwrap();
            assert_eq!(ctx.field_path.as_deref(), Some(name));
            assert_eq!(ctx.details, Some(format!("value: {:?}", value)));
        }
    }
}
