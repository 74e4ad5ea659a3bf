//! # Configuration
//!
//! Runtime settings read from the environment, with a `.env` file loaded
//! first when present.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `POS_LOGIN_ROUTE` | `/login` | where signed-out operators are sent |
//! | `POS_CHANNEL_CAPACITY` | `32` | request buffer per collection actor |

use dotenvy::dotenv;
use std::env;
use thiserror::Error;

pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub login_route: String,
    pub channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        let config = Self::from_lookup(|var| env::var(var).ok())?;
        tracing::info!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Builds the config from any variable source; unset variables take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let login_route = lookup("POS_LOGIN_ROUTE").unwrap_or_else(|| DEFAULT_LOGIN_ROUTE.to_string());
        if !login_route.starts_with('/') {
            return Err(ConfigError::Invalid {
                var: "POS_LOGIN_ROUTE",
                reason: format!("route must start with '/': {}", login_route),
            });
        }

        let channel_capacity = match lookup("POS_CHANNEL_CAPACITY") {
            None => DEFAULT_CHANNEL_CAPACITY,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        var: "POS_CHANNEL_CAPACITY",
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "POS_CHANNEL_CAPACITY",
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            login_route,
            channel_capacity,
        })
    }
}
