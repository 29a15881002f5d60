use crate::models::ResponseMode;
use std::{env, net::SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RELAY_BASE: &str = "https://api.allorigins.win/raw?url=";
pub const DEFAULT_API_BASE: &str = "https://bored-api.appbrewery.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ACTIVITY_RESPONSE_MODE must be 'list' or 'single', got '{0}'")]
    InvalidMode(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub relay_base: String,
    pub api_base: String,
    pub response_mode: ResponseMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            relay_base: DEFAULT_RELAY_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            response_mode: ResponseMode::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let relay_base = lookup("ACTIVITY_RELAY_BASE")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.relay_base);

        let api_base = lookup("ACTIVITY_API_BASE")
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);

        let response_mode = match lookup("ACTIVITY_RESPONSE_MODE") {
            Some(value) => {
                ResponseMode::parse(&value).ok_or(ConfigError::InvalidMode(value))?
            }
            None => defaults.response_mode,
        };

        Ok(Self {
            port,
            relay_base,
            api_base,
            response_mode,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
