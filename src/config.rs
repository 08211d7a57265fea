//! Relay configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Parsing goes through a lookup function
//! so it can be exercised without touching the process environment.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3001`).
    pub listen_addr: SocketAddr,

    /// Capacity of each connection's push buffer.
    pub push_buffer_capacity: usize,

    /// Upper bound on a single REST request.
    pub request_timeout: Duration,

    /// Origins allowed by CORS. `["*"]` allows any origin.
    pub cors_allowed_origins: Vec<String>,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            push_buffer_capacity: 256,
            request_timeout: Duration::from_secs(30),
            cors_allowed_origins: vec!["*".to_string()],
            log_format: LogFormat::Pretty,
        }
    }
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` first to optionally load a `.env`
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as a
    /// [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Falls back to defaults for missing or unparseable numeric values.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid LISTEN_ADDR: {raw}"))?,
            None => defaults.listen_addr,
        };

        let push_buffer_capacity =
            parse_var(&lookup, "PUSH_BUFFER_CAPACITY", defaults.push_buffer_capacity).max(1);

        let request_timeout = Duration::from_secs(parse_var(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        ));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.cors_allowed_origins);

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json" | "JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            push_buffer_capacity,
            request_timeout,
            cors_allowed_origins,
            log_format,
        })
    }

    /// Returns `true` if CORS should allow any origin.
    #[must_use]
    pub fn cors_allows_any(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<RelayConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RelayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let Ok(cfg) = load(&[]) else {
            panic!("empty env should load");
        };
        assert_eq!(cfg.listen_addr, SocketAddr::from(([0, 0, 0, 0], 3001)));
        assert_eq!(cfg.push_buffer_capacity, 256);
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
        assert!(cfg.cors_allows_any());
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_overrides() {
        let Ok(cfg) = load(&[
            ("LISTEN_ADDR", "127.0.0.1:9000"),
            ("PUSH_BUFFER_CAPACITY", "16"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
            ("LOG_FORMAT", "json"),
        ]) else {
            panic!("overrides should load");
        };
        assert_eq!(cfg.listen_addr.port(), 9000);
        assert_eq!(cfg.push_buffer_capacity, 16);
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
        assert_eq!(
            cfg.cors_allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(!cfg.cors_allows_any());
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_listen_addr_is_an_error() {
        assert!(load(&[("LISTEN_ADDR", "not an address")]).is_err());
    }

    #[test]
    fn bad_numbers_fall_back() {
        let Ok(cfg) = load(&[("PUSH_BUFFER_CAPACITY", "lots"), ("REQUEST_TIMEOUT_SECS", "-1")])
        else {
            panic!("should load with fallbacks");
        };
        assert_eq!(cfg.push_buffer_capacity, 256);
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let Ok(cfg) = load(&[("PUSH_BUFFER_CAPACITY", "0")]) else {
            panic!("should load");
        };
        assert_eq!(cfg.push_buffer_capacity, 1);
    }
}
