use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_PROVIDER_URL: &str = "https://music.yandex.ru/handlers/playlist.jsx";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_COMMON_TRACKS_LIMIT: usize = 500;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub provider_url: String,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
    pub common_tracks_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            common_tracks_limit: DEFAULT_COMMON_TRACKS_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let provider_url =
            std::env::var("PROVIDER_URL").unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string());

        let cache_ttl_secs = parse_var("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;
        let fetch_timeout_secs = parse_var("FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?;
        let common_tracks_limit = parse_var("COMMON_TRACKS_LIMIT", DEFAULT_COMMON_TRACKS_LIMIT)?;

        Ok(Self {
            bind_addr,
            provider_url,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            common_tracks_limit,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a non-negative integer, got {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}
