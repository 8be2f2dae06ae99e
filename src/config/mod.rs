//! Configuration module for the ESCOtech site.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream REST API, without a trailing slash
    pub api_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Directory served under /static
    pub static_dir: PathBuf,
    /// How often the admin shell refreshes the unread message count
    pub unread_poll_interval: Duration,
    /// Timeout applied to every upstream request
    pub http_timeout: Duration,
    /// Mark the admin token cookie `Secure`
    pub secure_cookies: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("ESCOTECH_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = env::var("ESCOTECH_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .expect("Invalid ESCOTECH_BIND_ADDR format");

        let log_level = env::var("ESCOTECH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let static_dir = env::var("ESCOTECH_STATIC_DIR")
            .unwrap_or_else(|_| "./static".to_string())
            .into();

        let unread_poll_interval =
            Duration::from_secs(secs_from_env("ESCOTECH_UNREAD_POLL_SECS", 30));
        let http_timeout = Duration::from_secs(secs_from_env("ESCOTECH_HTTP_TIMEOUT_SECS", 15));

        let secure_cookies = env::var("ESCOTECH_SECURE_COOKIES")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            api_url,
            bind_addr,
            log_level,
            static_dir,
            unread_poll_interval,
            http_timeout,
            secure_cookies,
        }
    }
}

/// Read a positive number of seconds, falling back to `default` when unset or invalid.
fn secs_from_env(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}
