//! Server configuration parsed from environment variables.
//!
//! Recognized variables:
//! - `PORT` (falls back to lowercase `port`): listen port, default 3333
//! - `HOST`: advertised base URL, only logged, default `http://localhost`
//! - `PUBLIC_DIR`: static asset directory, default `public`
//! - `INITIAL_HUE`: starting hue in `0..360`, default 30
//! - `PAGE_DATA`: value substituted into the index page, default `test data`
//! - `CLIENT_BUFFER`: per-connection outbound queue size, default 256

use std::path::PathBuf;

use crate::services::color::{DEFAULT_HUE, Hue, HueError};

pub const DEFAULT_PORT: u16 = 3333;
pub const DEFAULT_HOST: &str = "http://localhost";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_PAGE_DATA: &str = "test data";
pub const DEFAULT_CLIENT_BUFFER: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("invalid INITIAL_HUE: {0}")]
    Hue(#[from] HueError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub public_dir: PathBuf,
    pub initial_hue: Hue,
    pub page_data: String,
    pub client_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            initial_hue: DEFAULT_HUE,
            page_data: DEFAULT_PAGE_DATA.to_string(),
            client_buffer: DEFAULT_CLIENT_BUFFER,
        }
    }
}

impl Config {
    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable fails to parse or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable fails to parse or is out of range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT").or_else(|| get("port")) {
            Some(raw) => parse_var("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let initial_hue = match get("INITIAL_HUE") {
            Some(raw) => Hue::new(parse_var("INITIAL_HUE", &raw)?)?,
            None => DEFAULT_HUE,
        };

        let client_buffer = match get("CLIENT_BUFFER") {
            Some(raw) => match parse_var::<usize>("CLIENT_BUFFER", &raw)? {
                0 => return Err(ConfigError::Invalid { var: "CLIENT_BUFFER", value: raw }),
                n => n,
            },
            None => DEFAULT_CLIENT_BUFFER,
        };

        Ok(Self {
            port,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            public_dir: get("PUBLIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR), PathBuf::from),
            initial_hue,
            page_data: lookup("PAGE_DATA").unwrap_or_else(|| DEFAULT_PAGE_DATA.to_string()),
            client_buffer,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value: raw.to_string() })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
